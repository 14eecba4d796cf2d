use memrank_config::Scoring;
use serde::Serialize;

/// Mode-scaled weights plus the keyword-count normalisation factor
/// actually applied to a run. Echoed verbatim in the report so a
/// reader can reproduce any row by hand.
#[derive(Clone, Debug, Serialize)]
pub struct EffectiveWeights {
	pub mode: String,
	pub keyword_weight: f64,
	pub semantic_weight: f64,
	pub edge_weight: f64,
	pub semantic_sqrt_norm: bool,
	pub keyword_norm_factor: f64,
}

pub(crate) fn resolve_effective_weights(scoring: &Scoring, keyword_count: usize) -> EffectiveWeights {
	let (keyword_mul, semantic_mul, edge_mul) = scoring.mode.multipliers();
	let keyword_norm_factor = if scoring.semantic_sqrt_norm && keyword_count > 0 {
		1. / (keyword_count as f64).sqrt()
	} else {
		1.
	};

	EffectiveWeights {
		mode: scoring.mode.as_str().to_string(),
		keyword_weight: scoring.keyword_weight * keyword_mul,
		semantic_weight: scoring.semantic_weight * semantic_mul,
		edge_weight: scoring.edge_weight * edge_mul,
		semantic_sqrt_norm: scoring.semantic_sqrt_norm,
		keyword_norm_factor,
	}
}
