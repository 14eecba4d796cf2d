mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_GRAPH_BASE_COEF, DEFAULT_GRAPH_SEED_TOP_N, DEFAULT_MIN_SCORE_THRESHOLD,
	DEFAULT_RRF_K, Report, ScoreMode, Scoring, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			field: "service.log_level",
			reason: "must be non-empty.".to_string(),
		});
	}
	if cfg.report.top_k == 0 {
		return Err(Error::Validation {
			field: "report.top_k",
			reason: "must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("scoring.semantic_threshold", cfg.scoring.semantic_threshold),
		("scoring.keyword_weight", cfg.scoring.keyword_weight),
		("scoring.semantic_weight", cfg.scoring.semantic_weight),
		("scoring.edge_weight", cfg.scoring.edge_weight),
		("scoring.rrf_k", cfg.scoring.rrf_k),
		("scoring.min_score_threshold", cfg.scoring.min_score_threshold),
		("scoring.graph_base_coef", cfg.scoring.graph_base_coef),
	] {
		if !value.is_finite() {
			return Err(Error::Validation {
				field: label,
				reason: format!("{value} is not a finite number."),
			});
		}
	}

	Ok(())
}
