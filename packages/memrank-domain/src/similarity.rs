use std::collections::HashMap;

use crate::record::MemoryRecord;

/// Precomputed similarity: keyword -> memory id (stringified) -> similarity.
pub type SimilarityTable = HashMap<String, HashMap<String, f64>>;

/// Precomputed per-keyword query embeddings.
pub type QueryEmbeddings = HashMap<String, Vec<f64>>;

/// Standard cosine similarity. Zero when either vector is empty or the
/// dimensions disagree, so incompatible inputs degrade instead of failing.
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
	if left.is_empty() || right.is_empty() || left.len() != right.len() {
		return 0.0;
	}

	let mut dot = 0.0;
	let mut left_norm = 0.0;
	let mut right_norm = 0.0;

	for (l_value, r_value) in left.iter().zip(right.iter()) {
		dot += l_value * r_value;
		left_norm += l_value * l_value;
		right_norm += r_value * r_value;
	}

	if left_norm <= 0.0 || right_norm <= 0.0 {
		return 0.0;
	}

	dot / (left_norm.sqrt() * right_norm.sqrt())
}

/// Resolve a (keyword, memory) similarity. The supplied table wins, keyed by
/// the exact keyword then its lower-cased form; otherwise fall back to the
/// cosine of the keyword's query embedding against the memory's embedding.
/// `None` means no similarity is available for the pair.
pub fn lookup_similarity(
	keyword: &str,
	memory: &MemoryRecord,
	table: Option<&SimilarityTable>,
	embeddings: Option<&QueryEmbeddings>,
) -> Option<f64> {
	if let Some(table) = table {
		let by_memory =
			table.get(keyword).or_else(|| table.get(keyword.to_lowercase().as_str()));

		if let Some(by_memory) = by_memory
			&& let Some(value) = by_memory.get(memory.id.to_string().as_str())
		{
			return Some(*value);
		}
	}

	if let Some(embeddings) = embeddings {
		let query = embeddings
			.get(keyword)
			.or_else(|| embeddings.get(keyword.to_lowercase().as_str()));

		if let Some(query) = query
			&& let Some(memory_embedding) = memory.embedding.as_ref()
		{
			return Some(cosine_similarity(query, memory_embedding));
		}
	}

	None
}
