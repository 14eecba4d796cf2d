use memrank_domain::MemoryRecord;

use crate::board::{Component, ScoreBoard, cmp_f64_desc};

/// Multiplier applied on top of the rank score for fragment coverage:
/// a memory whose title contains every fragment scores 1.6x the rank
/// contribution of one matching a single fragment at the same rank.
pub(crate) const KEYWORD_COVERAGE_BOOST: f64 = 0.6;

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Forward lexical pass: memories whose titles contain query fragments,
/// ranked by match count then importance, scored with reciprocal rank
/// fusion times importance, weight and coverage.
pub(crate) fn keyword_pass(
	memories: &[MemoryRecord],
	fragments: &[String],
	keyword_weight: f64,
	rrf_k: f64,
	board: &mut ScoreBoard,
) {
	let mut matched: Vec<(&MemoryRecord, usize)> = memories
		.iter()
		.filter_map(|memory| {
			let hits = fragments
				.iter()
				.filter(|fragment| contains_ignore_case(&memory.title, fragment))
				.count();

			(hits > 0).then_some((memory, hits))
		})
		.collect();

	matched.sort_by(|left, right| {
		right.1.cmp(&left.1).then_with(|| cmp_f64_desc(left.0.importance, right.0.importance))
	});

	let total_fragments = fragments.len().max(1) as f64;

	for (index, (memory, hits)) in matched.iter().enumerate() {
		let rank_score = 1. / (rrf_k + (index + 1) as f64);
		let coverage = 1. + KEYWORD_COVERAGE_BOOST * (*hits as f64 / total_fragments);
		let weighted = rank_score * memory.importance * keyword_weight * coverage;

		board.add(memory.id, Component::Keyword, weighted);
	}
}

/// Reverse containment pass: memories whose whole title appears inside
/// the query. Rank follows input iteration order; no coverage term, a
/// contained title is already a full match.
pub(crate) fn reverse_pass(
	memories: &[MemoryRecord],
	query: &str,
	keyword_weight: f64,
	rrf_k: f64,
	board: &mut ScoreBoard,
) {
	let mut rank = 0_usize;

	for memory in memories {
		if !contains_ignore_case(query, &memory.title) {
			continue;
		}

		rank += 1;

		let weighted = memory.importance * keyword_weight / (rrf_k + rank as f64);

		board.add(memory.id, Component::Reverse, weighted);
	}
}

#[cfg(test)]
mod tests {
	use memrank_testkit::memory;

	use super::*;

	#[test]
	fn containment_ignores_case() {
		assert!(contains_ignore_case("Activate Web Package", "web pack"));
		assert!(!contains_ignore_case("Activate Web Package", "toolkit"));
	}

	#[test]
	fn keyword_pass_ranks_by_match_count_then_importance() {
		let memories = vec![
			memory(1, "web", 0.9),
			memory(2, "web toolkit", 0.2),
			memory(3, "unrelated", 0.99),
		];
		let fragments = vec!["web".to_string(), "toolkit".to_string()];
		let mut board = ScoreBoard::default();

		keyword_pass(&memories, &fragments, 10., 60., &mut board);

		// Two fragment hits outrank one, despite the lower importance.
		assert!(board.total(2) > 0.);
		assert!(board.total(1) > 0.);
		assert_eq!(board.total(3), 0.);

		let expected_first = (1. / 61.) * 0.2 * 10. * (1. + 0.6);
		let expected_second = (1. / 62.) * 0.9 * 10. * (1. + 0.3);

		assert!((board.total(2) - expected_first).abs() < 1e-12);
		assert!((board.total(1) - expected_second).abs() < 1e-12);
	}

	#[test]
	fn keyword_pass_full_coverage_is_1_6x_rank_contribution() {
		let memories = vec![memory(1, "alpha beta", 1.)];
		let fragments = vec!["alpha".to_string(), "beta".to_string()];
		let mut board = ScoreBoard::default();

		keyword_pass(&memories, &fragments, 1., 60., &mut board);

		assert!((board.total(1) - (1. / 61.) * 1.6).abs() < 1e-12);
	}

	#[test]
	fn reverse_pass_rewards_titles_echoed_in_query() {
		let memories = vec![memory(1, "web package", 0.8), memory(2, "column", 0.8)];
		let mut board = ScoreBoard::default();

		reverse_pass(&memories, "activate the WEB PACKAGE now", 10., 60., &mut board);

		assert!((board.total(1) - 0.8 * 10. / 61.).abs() < 1e-12);
		assert_eq!(board.total(2), 0.);
	}

	#[test]
	fn reverse_pass_rank_follows_iteration_order() {
		let memories = vec![memory(1, "alpha", 0.5), memory(2, "beta", 0.5)];
		let mut board = ScoreBoard::default();

		reverse_pass(&memories, "alpha beta", 1., 60., &mut board);

		assert!((board.total(1) - 0.5 / 61.).abs() < 1e-12);
		assert!((board.total(2) - 0.5 / 62.).abs() < 1e-12);
	}
}
