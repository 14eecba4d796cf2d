//! Monte Carlo check of semantic-score fairness across keyword counts.
//!
//! Each trial draws per-keyword ranks and similarities, sums the
//! semantic contribution and reports the sum under three
//! normalizations: none, 1/sqrt(K) and 1/K. The raw sum favours long
//! queries, the linear division punishes them; the sqrt compromise is
//! what the scorer ships with.

use std::fmt::Write;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct FairnessParams {
	pub keyword_counts: Vec<usize>,
	pub trials: u32,
	pub seed: u64,
	pub rrf_k: f64,
	pub importance: f64,
	pub semantic_weight: f64,
	pub semantic_threshold: f64,
	pub rank_max: u32,
	pub decision_threshold: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct FairnessRow {
	pub keyword_count: usize,
	pub raw_mean: f64,
	pub sqrt_mean: f64,
	pub linear_mean: f64,
	pub raw_std: f64,
	pub sqrt_std: f64,
	pub linear_std: f64,
	pub raw_p95: f64,
	pub sqrt_p95: f64,
	pub linear_p95: f64,
	pub raw_pass_rate: f64,
	pub sqrt_pass_rate: f64,
	pub linear_pass_rate: f64,
}

pub fn run_fairness_simulation(params: &FairnessParams) -> Vec<FairnessRow> {
	let mut rng = StdRng::seed_from_u64(params.seed);
	let mut rows = Vec::with_capacity(params.keyword_counts.len());
	// The threshold comes straight off the CLI; out of range it pins
	// the similarity draw instead of producing an empty sample range.
	let semantic_threshold = params.semantic_threshold.clamp(0., 1.);

	for &keyword_count in &params.keyword_counts {
		let mut raw_values = Vec::with_capacity(params.trials as usize);
		let mut sqrt_values = Vec::with_capacity(params.trials as usize);
		let mut linear_values = Vec::with_capacity(params.trials as usize);

		for _ in 0..params.trials {
			let mut total = 0.;

			for _ in 0..keyword_count {
				let rank = rng.random_range(1..=params.rank_max.max(1)) as f64;
				let similarity = rng.random_range(semantic_threshold..=1.);

				total += (1. / (params.rrf_k + rank)) * params.importance.sqrt()
					+ similarity * params.semantic_weight;
			}

			raw_values.push(total);
			sqrt_values.push(total / (keyword_count.max(1) as f64).sqrt());
			linear_values.push(total / keyword_count.max(1) as f64);
		}

		let (raw_mean, raw_std) = mean_and_std(&raw_values);
		let (sqrt_mean, sqrt_std) = mean_and_std(&sqrt_values);
		let (linear_mean, linear_std) = mean_and_std(&linear_values);

		rows.push(FairnessRow {
			keyword_count,
			raw_mean,
			sqrt_mean,
			linear_mean,
			raw_std,
			sqrt_std,
			linear_std,
			raw_p95: percentile(&raw_values, 0.95),
			sqrt_p95: percentile(&sqrt_values, 0.95),
			linear_p95: percentile(&linear_values, 0.95),
			raw_pass_rate: pass_rate(&raw_values, params.decision_threshold),
			sqrt_pass_rate: pass_rate(&sqrt_values, params.decision_threshold),
			linear_pass_rate: pass_rate(&linear_values, params.decision_threshold),
		});
	}

	rows
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
	if values.is_empty() {
		return (0., 0.);
	}

	let count = values.len() as f64;
	let mean = values.iter().sum::<f64>() / count;
	let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;

	(mean, variance.sqrt())
}

fn pass_rate(values: &[f64], threshold: f64) -> f64 {
	if values.is_empty() {
		return 0.;
	}

	values.iter().filter(|value| **value >= threshold).count() as f64 / values.len() as f64
}

/// Linear-interpolated percentile over an unsorted sample.
pub fn percentile(values: &[f64], q: f64) -> f64 {
	if values.is_empty() {
		return 0.;
	}

	let mut ordered = values.to_vec();

	ordered.sort_by(|left, right| left.partial_cmp(right).unwrap_or(std::cmp::Ordering::Equal));

	if q <= 0. {
		return ordered[0];
	}
	if q >= 1. {
		return ordered[ordered.len() - 1];
	}

	let position = (ordered.len() - 1) as f64 * q;
	let left = position.floor() as usize;
	let right = position.ceil() as usize;

	if left == right {
		return ordered[left];
	}

	let weight = position - left as f64;

	ordered[left] * (1. - weight) + ordered[right] * weight
}

pub fn render_csv(rows: &[FairnessRow]) -> String {
	let mut out = String::from(
		"keyword_count,raw_mean,sqrt_mean,linear_mean,raw_std,sqrt_std,linear_std,\
		raw_p95,sqrt_p95,linear_p95,raw_pass_rate,sqrt_pass_rate,linear_pass_rate\n",
	);

	for row in rows {
		let _ = writeln!(
			out,
			"{},{},{},{},{},{},{},{},{},{},{},{},{}",
			row.keyword_count,
			row.raw_mean,
			row.sqrt_mean,
			row.linear_mean,
			row.raw_std,
			row.sqrt_std,
			row.linear_std,
			row.raw_p95,
			row.sqrt_p95,
			row.linear_p95,
			row.raw_pass_rate,
			row.sqrt_pass_rate,
			row.linear_pass_rate,
		);
	}

	out
}
