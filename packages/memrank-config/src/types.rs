use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RRF_K: f64 = 60.0;
pub const DEFAULT_MIN_SCORE_THRESHOLD: f64 = 0.025;
pub const DEFAULT_GRAPH_BASE_COEF: f64 = 0.03;
pub const DEFAULT_GRAPH_SEED_TOP_N: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub scoring: Scoring,
	pub report: Report,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Report {
	pub top_k: usize,
}
impl Default for Report {
	fn default() -> Self {
		Self { top_k: 15 }
	}
}

/// Tunable parameters for one scoring call. Callers hold a normalized copy
/// for the duration of the call; the engine never mutates it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Scoring {
	pub semantic_threshold: f64,
	pub mode: ScoreMode,
	pub keyword_weight: f64,
	pub semantic_weight: f64,
	pub edge_weight: f64,
	pub rrf_k: f64,
	pub min_score_threshold: f64,
	pub graph_base_coef: f64,
	pub graph_seed_top_n: usize,
	pub semantic_sqrt_norm: bool,
}
impl Scoring {
	/// Clamp every parameter into its documented range. Thresholds clamp to
	/// [0, 1]; weights and the base coefficient floor at zero; the fusion
	/// constant floors at one; the seed count floors at one.
	pub fn normalized(&self) -> Self {
		Self {
			semantic_threshold: self.semantic_threshold.clamp(0.0, 1.0),
			mode: self.mode,
			keyword_weight: self.keyword_weight.max(0.0),
			semantic_weight: self.semantic_weight.max(0.0),
			edge_weight: self.edge_weight.max(0.0),
			rrf_k: self.rrf_k.max(1.0),
			min_score_threshold: self.min_score_threshold.max(0.0),
			graph_base_coef: self.graph_base_coef.max(0.0),
			graph_seed_top_n: self.graph_seed_top_n.max(1),
			semantic_sqrt_norm: self.semantic_sqrt_norm,
		}
	}
}
impl Default for Scoring {
	fn default() -> Self {
		Self {
			semantic_threshold: 0.4,
			mode: ScoreMode::Balanced,
			keyword_weight: 10.0,
			semantic_weight: 0.5,
			edge_weight: 0.4,
			rrf_k: DEFAULT_RRF_K,
			min_score_threshold: DEFAULT_MIN_SCORE_THRESHOLD,
			graph_base_coef: DEFAULT_GRAPH_BASE_COEF,
			graph_seed_top_n: DEFAULT_GRAPH_SEED_TOP_N,
			semantic_sqrt_norm: true,
		}
	}
}

/// Scoring mode. Each variant carries keyword/semantic/edge weight
/// multipliers applied before any scoring pass runs.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreMode {
	#[default]
	Balanced,
	KeywordFirst,
	SemanticFirst,
}
impl ScoreMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Balanced => "BALANCED",
			Self::KeywordFirst => "KEYWORD_FIRST",
			Self::SemanticFirst => "SEMANTIC_FIRST",
		}
	}

	/// (keyword, semantic, edge) multipliers.
	pub fn multipliers(self) -> (f64, f64, f64) {
		match self {
			Self::Balanced => (1.0, 1.0, 1.0),
			Self::KeywordFirst => (1.3, 0.8, 0.9),
			Self::SemanticFirst => (0.8, 1.3, 1.1),
		}
	}
}
impl FromStr for ScoreMode {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"BALANCED" => Ok(Self::Balanced),
			"KEYWORD_FIRST" => Ok(Self::KeywordFirst),
			"SEMANTIC_FIRST" => Ok(Self::SemanticFirst),
			other => Err(format!(
				"Unknown score mode {other:?}; expected BALANCED, KEYWORD_FIRST, or SEMANTIC_FIRST."
			)),
		}
	}
}
