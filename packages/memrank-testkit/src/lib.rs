//! Fixture builders shared by the scoring test suites.

use std::collections::HashMap;

use memrank_domain::{LinkRecord, MemoryId, MemoryRecord, QueryEmbeddings, SimilarityTable};

pub fn memory(id: MemoryId, title: &str, importance: f64) -> MemoryRecord {
	MemoryRecord {
		id,
		title: title.to_string(),
		content: String::new(),
		importance,
		embedding: None,
	}
}

pub fn memory_with_embedding(
	id: MemoryId,
	title: &str,
	importance: f64,
	embedding: Vec<f64>,
) -> MemoryRecord {
	MemoryRecord {
		id,
		title: title.to_string(),
		content: String::new(),
		importance,
		embedding: Some(embedding),
	}
}

pub fn link(source_id: MemoryId, target_id: MemoryId, weight: f64) -> LinkRecord {
	LinkRecord { source_id, target_id, weight }
}

/// Build a similarity table from `(keyword, [(memory id, similarity)])`
/// pairs.
pub fn similarity_table(entries: &[(&str, &[(MemoryId, f64)])]) -> SimilarityTable {
	let mut table = SimilarityTable::new();

	for (keyword, values) in entries {
		let by_memory: HashMap<String, f64> =
			values.iter().map(|(id, similarity)| (id.to_string(), *similarity)).collect();

		table.insert((*keyword).to_string(), by_memory);
	}

	table
}

pub fn query_embeddings(entries: &[(&str, &[f64])]) -> QueryEmbeddings {
	entries.iter().map(|(keyword, vector)| ((*keyword).to_string(), vector.to_vec())).collect()
}
