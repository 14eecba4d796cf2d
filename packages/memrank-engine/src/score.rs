use std::collections::HashMap;

use memrank_config::Scoring;
use memrank_domain::{FragmentSegmenter, LinkRecord, MemoryId, MemoryRecord};
use serde::Serialize;
use tracing::debug;

use crate::{
	board::ScoreBoard,
	fragments::{build_fragments, tokenize_query},
	graph::graph_pass,
	lexical::{keyword_pass, reverse_pass},
	semantic::{SemanticInputs, semantic_pass},
	weights::{EffectiveWeights, resolve_effective_weights},
};

/// One ranked result with its per-pass score breakdown. Ranks can skip
/// numbers: a link endpoint that scored but matches no known memory
/// keeps its position without producing a row.
#[derive(Clone, Debug, Serialize)]
pub struct RankedRow {
	pub rank: usize,
	pub memory_id: MemoryId,
	pub title: String,
	pub importance: f64,
	pub score_total: f64,
	pub score_keyword: f64,
	pub score_reverse: f64,
	pub score_semantic: f64,
	pub score_graph: f64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Thresholds {
	pub semantic_threshold: f64,
	pub min_score_threshold: f64,
}

/// Full outcome of one scoring run, including everything needed to
/// recompute any row by hand.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
	pub query: String,
	pub keywords: Vec<String>,
	pub lexical_fragments: Vec<String>,
	pub effective_weights: EffectiveWeights,
	pub thresholds: Thresholds,
	pub results: Vec<RankedRow>,
	pub filtered_count: usize,
	pub raw_count: usize,
}

/// Score `memories` against `query` and return the thresholded ranking.
///
/// Passes run in a fixed order: forward lexical, reverse containment,
/// semantic, then graph. The graph pass must come last since it seeds
/// from the accumulated totals of the other three.
pub fn score_memories(
	memories: &[MemoryRecord],
	links: &[LinkRecord],
	query: &str,
	scoring: &Scoring,
	inputs: SemanticInputs<'_>,
	segmenter: &dyn FragmentSegmenter,
) -> ScoreReport {
	let scoring = scoring.normalized();
	let keywords = tokenize_query(query);
	let weights = resolve_effective_weights(&scoring, keywords.len());
	let thresholds = Thresholds {
		semantic_threshold: scoring.semantic_threshold,
		min_score_threshold: scoring.min_score_threshold,
	};

	if keywords.is_empty() {
		return ScoreReport {
			query: query.to_string(),
			keywords,
			lexical_fragments: Vec::new(),
			effective_weights: weights,
			thresholds,
			results: Vec::new(),
			filtered_count: 0,
			raw_count: 0,
		};
	}

	let fragments = build_fragments(query, &keywords, segmenter);
	let mut board = ScoreBoard::default();

	keyword_pass(memories, &fragments, weights.keyword_weight, scoring.rrf_k, &mut board);
	reverse_pass(memories, query, weights.keyword_weight, scoring.rrf_k, &mut board);

	if weights.semantic_weight > 0. {
		semantic_pass(
			memories,
			&keywords,
			scoring.semantic_threshold,
			weights.semantic_weight,
			weights.keyword_norm_factor,
			scoring.rrf_k,
			&inputs,
			&mut board,
		);
	}
	if weights.edge_weight > 0. && !board.is_empty() {
		graph_pass(
			links,
			weights.edge_weight,
			scoring.graph_base_coef,
			scoring.graph_seed_top_n,
			&mut board,
		);
	}

	let raw_count = board.len();
	let by_id: HashMap<MemoryId, &MemoryRecord> =
		memories.iter().map(|memory| (memory.id, memory)).collect();
	let mut results = Vec::new();

	for (index, (memory_id, total, breakdown)) in
		board.ranked(scoring.min_score_threshold).into_iter().enumerate()
	{
		let Some(memory) = by_id.get(&memory_id) else {
			continue;
		};

		results.push(RankedRow {
			rank: index + 1,
			memory_id,
			title: memory.title.clone(),
			importance: memory.importance,
			score_total: total,
			score_keyword: breakdown.keyword,
			score_reverse: breakdown.reverse,
			score_semantic: breakdown.semantic,
			score_graph: breakdown.graph,
		});
	}

	let filtered_count = results.len();

	debug!(
		keywords = keywords.len(),
		fragments = fragments.len(),
		raw = raw_count,
		filtered = filtered_count,
		"Scored memory candidates.",
	);

	ScoreReport {
		query: query.to_string(),
		keywords,
		lexical_fragments: fragments,
		effective_weights: weights,
		thresholds,
		results,
		filtered_count,
		raw_count,
	}
}
