use std::{fs, path::Path};

use memrank_domain::{LinkRecord, MemoryId, MemoryRecord, QueryEmbeddings, SimilarityTable};
use serde::Deserialize;

pub const ISOLATED_TITLE: &str = "技术操作：激活web包以执行发专栏任务";
pub const ISOLATED_CONTENT: &str =
	"用户要求激活web包来执行发专栏的网页操作。AI已响应并开始执行激活操作。";
const ISOLATED_IMPORTANCE: f64 = 0.72;

/// JSON dataset consumed by the `score` and `demo-isolated` commands.
/// Every section is optional; an empty object is a valid dataset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Dataset {
	pub memories: Vec<MemoryRecord>,
	pub links: Vec<LinkRecord>,
	pub semantic_similarity: Option<SimilarityTable>,
	pub query_embeddings: Option<QueryEmbeddings>,
}

pub fn load(path: &Path) -> color_eyre::Result<Dataset> {
	let raw = fs::read_to_string(path)?;
	let dataset = serde_json::from_str(&raw)?;

	Ok(dataset)
}

/// Make sure the dataset carries the isolated demo memory, a node no
/// link touches. Returns its id, appending the memory if absent.
pub fn ensure_isolated_memory(memories: &mut Vec<MemoryRecord>) -> MemoryId {
	if let Some(existing) = memories.iter().find(|memory| memory.title == ISOLATED_TITLE) {
		return existing.id;
	}

	let next_id = memories.iter().map(|memory| memory.id).max().unwrap_or(0) + 1;

	memories.push(MemoryRecord {
		id: next_id,
		title: ISOLATED_TITLE.to_string(),
		content: ISOLATED_CONTENT.to_string(),
		importance: ISOLATED_IMPORTANCE,
		embedding: None,
	});

	next_id
}

/// Small built-in dataset for running `demo-isolated` without an input
/// file. The distractors are linked to each other and one shares the
/// 工具包 phrasing with the noisy transcript, so the contrast between
/// query shapes actually shows up.
pub fn builtin_demo_dataset() -> Dataset {
	let titles: [(MemoryId, &str, f64); 5] = [
		(1, "每周工作计划与任务同步", 0.9),
		(2, "数据库迁移操作手册", 0.85),
		(3, "super_admin 工具包使用说明", 0.88),
		(4, "Quarterly publishing metrics review", 0.8),
		(5, "网页端内容发布流程", 0.75),
	];
	let memories = titles
		.iter()
		.map(|(id, title, importance)| MemoryRecord {
			id: *id,
			title: (*title).to_string(),
			content: String::new(),
			importance: *importance,
			embedding: None,
		})
		.collect();
	let links = vec![
		LinkRecord { source_id: 1, target_id: 2, weight: 0.9 },
		LinkRecord { source_id: 2, target_id: 3, weight: 0.7 },
		LinkRecord { source_id: 4, target_id: 5, weight: 0.6 },
	];

	Dataset { memories, links, semantic_similarity: None, query_embeddings: None }
}
