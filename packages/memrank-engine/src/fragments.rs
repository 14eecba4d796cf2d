use std::collections::HashSet;

use memrank_domain::FragmentSegmenter;

/// Hard cap on the expanded fragment list.
pub const MAX_LEXICAL_FRAGMENTS: usize = 32;
const MIN_FRAGMENT_CHARS: usize = 2;

/// Split a query into keywords. `|` is the explicit separator; without
/// it, any whitespace splits.
pub fn tokenize_query(query: &str) -> Vec<String> {
	let query = query.trim();

	if query.is_empty() {
		return Vec::new();
	}

	let parts: Vec<&str> = if query.contains('|') {
		query.split('|').collect()
	} else {
		query.split_whitespace().collect()
	};

	parts.iter().map(|part| part.trim()).filter(|part| !part.is_empty()).map(str::to_string).collect()
}

/// Lower-case a token and append its segmented sub-words, dropping
/// anything shorter than two chars and keeping first occurrences only.
pub(crate) fn expand_token(token: &str, segmenter: &dyn FragmentSegmenter) -> Vec<String> {
	let normalized = token.trim().to_lowercase();

	if normalized.is_empty() {
		return Vec::new();
	}

	let mut candidates = vec![normalized.clone()];

	candidates
		.extend(segmenter.segment(&normalized).iter().map(|word| word.trim().to_lowercase()));

	let mut seen = HashSet::new();
	let mut fragments = Vec::new();

	for candidate in candidates {
		if candidate.chars().count() < MIN_FRAGMENT_CHARS {
			continue;
		}
		if seen.insert(candidate.clone()) {
			fragments.push(candidate);
		}
	}

	fragments
}

/// Expand the whole query plus each keyword into one deduplicated
/// fragment list, longest fragments first, capped at
/// [`MAX_LEXICAL_FRAGMENTS`]. Longer fragments are the more specific
/// ones, so the cap sheds generic short pieces first.
pub fn build_fragments(
	query: &str,
	keywords: &[String],
	segmenter: &dyn FragmentSegmenter,
) -> Vec<String> {
	let mut merged = expand_token(query, segmenter);

	for keyword in keywords {
		merged.extend(expand_token(keyword, segmenter));
	}

	let mut seen = HashSet::new();
	let mut fragments = Vec::new();

	for fragment in merged {
		if seen.insert(fragment.clone()) {
			fragments.push(fragment);
		}
	}

	fragments.sort_by(|left, right| right.chars().count().cmp(&left.chars().count()));
	fragments.truncate(MAX_LEXICAL_FRAGMENTS);

	fragments
}

#[cfg(test)]
mod tests {
	use memrank_domain::{NoopSegmenter, UnicodeSegmenter};

	use super::*;

	#[test]
	fn pipe_separator_wins_over_whitespace() {
		let keywords = tokenize_query("web package | publish column | toolkit");

		assert_eq!(keywords, vec!["web package", "publish column", "toolkit"]);
	}

	#[test]
	fn whitespace_splits_without_pipe() {
		assert_eq!(tokenize_query("  activate   web  "), vec!["activate", "web"]);
	}

	#[test]
	fn empty_query_yields_no_keywords() {
		assert!(tokenize_query("   ").is_empty());
		assert!(tokenize_query("").is_empty());
	}

	#[test]
	fn expand_drops_single_char_fragments() {
		let fragments = expand_token("a web b", &UnicodeSegmenter);

		assert_eq!(fragments, vec!["a web b".to_string(), "web".to_string()]);
	}

	#[test]
	fn expand_dedupes_keeping_first_occurrence() {
		let fragments = expand_token("Web web", &UnicodeSegmenter);

		assert_eq!(fragments, vec!["web web".to_string(), "web".to_string()]);
	}

	#[test]
	fn fragments_sort_longest_first_stably() {
		let keywords = vec!["web kit".to_string(), "publish".to_string()];
		let fragments = build_fragments("web kit publish", &keywords, &UnicodeSegmenter);

		assert_eq!(fragments[0], "web kit publish");
		// "web kit" and "publish" are both 7 chars; insertion order holds.
		assert_eq!(&fragments[1..3], &["web kit".to_string(), "publish".to_string()]);
	}

	#[test]
	fn fragment_list_is_capped() {
		let keywords: Vec<String> = (0..60).map(|n| format!("keyword{n:02}")).collect();
		let fragments = build_fragments("query", &keywords, &NoopSegmenter);

		assert_eq!(fragments.len(), MAX_LEXICAL_FRAGMENTS);
	}

	#[test]
	fn cjk_token_keeps_whole_plus_latin_run() {
		let fragments = expand_token("激活web包", &UnicodeSegmenter);

		assert!(fragments.contains(&"激活web包".to_string()));
		assert!(fragments.contains(&"web".to_string()));
	}
}
