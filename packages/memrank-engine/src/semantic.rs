use memrank_domain::{MemoryRecord, QueryEmbeddings, SimilarityTable, lookup_similarity};

use crate::board::{Component, ScoreBoard, cmp_f64_desc};

/// Optional semantic sources for the similarity pass. Both default to
/// absent, which silently disables the pass for every keyword.
#[derive(Clone, Copy, Debug, Default)]
pub struct SemanticInputs<'a> {
	pub similarity: Option<&'a SimilarityTable>,
	pub query_embeddings: Option<&'a QueryEmbeddings>,
}

/// Per-keyword semantic pass: memories at or above the similarity
/// threshold, ranked by similarity, scored with a dampened-importance
/// rank term plus the similarity itself, the whole contribution scaled
/// by the keyword-count normalisation factor.
#[allow(clippy::too_many_arguments)]
pub(crate) fn semantic_pass(
	memories: &[MemoryRecord],
	keywords: &[String],
	semantic_threshold: f64,
	semantic_weight: f64,
	norm_factor: f64,
	rrf_k: f64,
	inputs: &SemanticInputs<'_>,
	board: &mut ScoreBoard,
) {
	for keyword in keywords {
		let mut hits: Vec<(&MemoryRecord, f64)> = memories
			.iter()
			.filter_map(|memory| {
				let similarity = lookup_similarity(
					keyword,
					memory,
					inputs.similarity,
					inputs.query_embeddings,
				)?;

				(similarity >= semantic_threshold).then_some((memory, similarity))
			})
			.collect();

		hits.sort_by(|left, right| cmp_f64_desc(left.1, right.1));

		for (index, (memory, similarity)) in hits.iter().enumerate() {
			let rank_score = 1. / (rrf_k + (index + 1) as f64);
			let weighted =
				(rank_score * memory.importance.sqrt() + similarity * semantic_weight)
					* norm_factor;

			board.add(memory.id, Component::Semantic, weighted);
		}
	}
}
