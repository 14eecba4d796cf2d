//! Compact search-query construction.
//!
//! Raw assistant transcripts are poor retrieval queries: history dumps and
//! tool output swamp the lexical fragments the scorer matches on. These
//! helpers carve the core question (and a short solution echo) out of a
//! transcript so downstream scoring sees a compact query instead.

use regex::Regex;

const CN_QUESTION_PATTERN: &str =
	r"(?s)问题\s*[：:]\s*(.+?)(?:\n\s*解决方案\s*[：:]|\z)";
const EN_QUESTION_PATTERN: &str = r"(?s)Question\s*:\s*(.+?)(?:\n\s*Solution\s*:|\z)";
const TOOL_BLOCK_PATTERN: &str = r"(?is)<tool.*?>.*?</tool>";
const TOOL_RESULT_PATTERN: &str = r"(?is)<tool_result.*?</tool_result>";

const MAX_CORE_QUESTION_CHARS: usize = 500;
const MAX_FALLBACK_QUESTION_CHARS: usize = 800;
const MAX_CONCISE_SOLUTION_CHARS: usize = 180;
const MAX_SOLUTION_ONLY_CHARS: usize = 300;

/// Extract the core question from a raw transcript: the `问题:`/`Question:`
/// framing when present, minus history lines and tool blocks, whitespace
/// collapsed and capped at 500 chars.
pub fn extract_core_question(raw_query: &str) -> String {
	let compact = raw_query.replace("\r\n", "\n");

	let selected = first_capture(CN_QUESTION_PATTERN, &compact)
		.or_else(|| first_capture(EN_QUESTION_PATTERN, &compact))
		.unwrap_or_else(|| compact.clone());

	let mut kept = Vec::new();

	for line in selected.lines() {
		let stripped = line.trim_start();

		if stripped.starts_with("历史记录:") || stripped.starts_with("History:") {
			continue;
		}

		kept.push(line);
	}

	let cleaned = strip_pattern(&kept.join("\n"), TOOL_BLOCK_PATTERN);
	let cleaned = strip_pattern(&cleaned, TOOL_RESULT_PATTERN);

	take_chars(collapse_whitespace(&cleaned).trim(), MAX_CORE_QUESTION_CHARS)
}

/// Build a compact search query from a raw question transcript and its
/// solution text. Falls back to a whitespace-collapsed prefix of the raw
/// query when no framed question is found, and to the solution alone when
/// the query carries nothing usable.
pub fn build_compact_query(query: &str, solution: &str) -> String {
	let core_question = extract_core_question(query);
	let fallback_question = take_chars(
		collapse_whitespace(&strip_pattern(query, TOOL_RESULT_PATTERN)).trim(),
		MAX_FALLBACK_QUESTION_CHARS,
	);

	let selected = if core_question.is_empty() { fallback_question } else { core_question };

	if selected.is_empty() {
		return take_chars(solution, MAX_SOLUTION_ONLY_CHARS);
	}

	let concise_solution = take_chars(
		collapse_whitespace(&strip_pattern(solution, TOOL_RESULT_PATTERN)).trim(),
		MAX_CONCISE_SOLUTION_CHARS,
	);

	if concise_solution.is_empty() {
		return selected;
	}

	format!("{selected}\n{concise_solution}")
}

fn first_capture(pattern: &str, text: &str) -> Option<String> {
	let captured = Regex::new(pattern)
		.ok()
		.and_then(|re| re.captures(text))
		.and_then(|caps| caps.get(1).map(|group| group.as_str().trim().to_string()))?;

	(!captured.is_empty()).then_some(captured)
}

fn strip_pattern(text: &str, pattern: &str) -> String {
	match Regex::new(pattern) {
		Ok(re) => re.replace_all(text, " ").into_owned(),
		Err(_) => text.to_string(),
	}
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn take_chars(text: &str, limit: usize) -> String {
	text.chars().take(limit).collect()
}
