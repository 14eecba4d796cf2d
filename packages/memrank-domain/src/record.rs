use serde::{Deserialize, Serialize};

pub type MemoryId = i64;

/// One candidate memory. Immutable for the duration of a scoring call;
/// owned by the caller and passed by reference into each pass.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MemoryRecord {
	pub id: MemoryId,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub content: String,
	#[serde(default = "default_importance")]
	pub importance: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embedding: Option<Vec<f64>>,
}

/// Directed association between two memories. Duplicate edges between the
/// same pair are permitted and accumulate independently.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LinkRecord {
	pub source_id: MemoryId,
	pub target_id: MemoryId,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

fn default_importance() -> f64 {
	0.5
}

fn default_weight() -> f64 {
	1.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_defaults_apply() {
		let memory: MemoryRecord =
			serde_json::from_str(r#"{"id": 7, "title": "t"}"#).expect("Memory must parse.");

		assert_eq!(memory.id, 7);
		assert!((memory.importance - 0.5).abs() < 1e-12);
		assert!(memory.embedding.is_none());
		assert!(memory.content.is_empty());
	}

	#[test]
	fn link_defaults_apply() {
		let link: LinkRecord =
			serde_json::from_str(r#"{"source_id": 1, "target_id": 2}"#).expect("Link must parse.");

		assert!((link.weight - 1.0).abs() < 1e-12);
	}
}
