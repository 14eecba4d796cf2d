pub mod dataset;
pub mod fairness;

use std::{
	fs,
	path::{Path, PathBuf},
};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use memrank_config::{Config, ScoreMode, Scoring};
use memrank_domain::{UnicodeSegmenter, build_compact_query};
use memrank_engine::{
	EffectiveWeights, RankedRow, ScoreReport, SemanticInputs, Thresholds, rank_bound,
	score_memories,
};

use crate::{
	dataset::Dataset,
	fairness::{FairnessParams, FairnessRow, render_csv, run_fairness_simulation},
};

const DEFAULT_DEMO_RAW_QUERY: &str =
	"问题：我要的是那个工具包里面的\n解决方案：明白，你要测 super_admin 工具包里的等待能力。";
const DEFAULT_DEMO_SOLUTION: &str =
	"我先帮你做一个简单的 wait for 测试。随后你确认要的是 super_admin 工具包里的能力。";
const DEFAULT_DEMO_DIRECT_QUERY: &str = "激活web包 发专栏 工具包";
const DEMO_SOLUTION_TAIL_CHARS: usize = 1_000;

#[derive(Debug, Parser)]
#[command(
	version = memrank_cli::VERSION,
	rename_all = "kebab",
	styles = memrank_cli::styles(),
)]
pub struct Args {
	/// Optional TOML config; command flags override its scoring values.
	#[arg(long, short = 'c', value_name = "FILE", global = true)]
	pub config: Option<PathBuf>,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
	/// Score a dataset against a query and print the ranked report.
	Score(ScoreArgs),
	/// Monte Carlo check of keyword-count fairness per normalization.
	Simulate(SimulateArgs),
	/// Inject an isolated memory and compare noisy, compact and direct
	/// query shapes against it.
	DemoIsolated(DemoArgs),
}

#[derive(Debug, clap::Args)]
pub struct ScoreArgs {
	/// Dataset JSON with memories, links and optional semantic sources.
	#[arg(long, short = 'i', value_name = "FILE")]
	pub input: PathBuf,
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: String,
	#[arg(long, value_name = "N")]
	pub top_k: Option<usize>,
	/// Importance used for the analytical rank-bound proof rows.
	#[arg(long, value_name = "X", default_value_t = 0.5)]
	pub boundary_importance: f64,
	#[command(flatten)]
	pub overrides: ScoringOverrides,
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct SimulateArgs {
	#[arg(long, value_name = "LIST", value_delimiter = ',', default_value = "1,2,4,8,16,32")]
	pub keyword_counts: Vec<usize>,
	#[arg(long, value_name = "N", default_value_t = 5_000)]
	pub trials: u32,
	#[arg(long, value_name = "N", default_value_t = 42)]
	pub seed: u64,
	#[arg(long, value_name = "X", default_value_t = memrank_config::DEFAULT_RRF_K)]
	pub rrf_k: f64,
	#[arg(long, value_name = "X", default_value_t = 0.5)]
	pub importance: f64,
	#[arg(long, value_name = "X", default_value_t = 0.5)]
	pub semantic_weight: f64,
	#[arg(long, value_name = "X", default_value_t = 0.4)]
	pub semantic_threshold: f64,
	/// Largest semantic rank a keyword can draw in a trial.
	#[arg(long, value_name = "N", default_value_t = 400)]
	pub rank_max: u32,
	/// Threshold used for the per-normalization pass rates.
	#[arg(long, value_name = "X", default_value_t = 1.0)]
	pub decision_threshold: f64,
	#[arg(long, value_name = "FILE")]
	pub output_json: Option<PathBuf>,
	#[arg(long, value_name = "FILE")]
	pub output_csv: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct DemoArgs {
	/// Dataset JSON; a built-in distractor set is used when omitted.
	#[arg(long, short = 'i', value_name = "FILE")]
	pub input: Option<PathBuf>,
	#[arg(long, value_name = "TEXT", default_value = DEFAULT_DEMO_RAW_QUERY)]
	pub raw_query: String,
	#[arg(long, value_name = "TEXT", default_value = DEFAULT_DEMO_SOLUTION)]
	pub solution: String,
	#[arg(long, value_name = "TEXT", default_value = DEFAULT_DEMO_DIRECT_QUERY)]
	pub direct_query: String,
	#[command(flatten)]
	pub overrides: ScoringOverrides,
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: Option<PathBuf>,
}

/// Scoring parameters shared by the dataset-driven commands. Unset
/// flags fall through to the config file, then to the defaults.
#[derive(Debug, clap::Args)]
pub struct ScoringOverrides {
	#[arg(long, value_name = "MODE")]
	pub mode: Option<ScoreMode>,
	#[arg(long, value_name = "X")]
	pub keyword_weight: Option<f64>,
	#[arg(long, value_name = "X")]
	pub semantic_weight: Option<f64>,
	#[arg(long, value_name = "X")]
	pub edge_weight: Option<f64>,
	#[arg(long, value_name = "X")]
	pub rrf_k: Option<f64>,
	#[arg(long, value_name = "X")]
	pub min_score_threshold: Option<f64>,
	#[arg(long, value_name = "X")]
	pub semantic_threshold: Option<f64>,
	/// Disable the semantic 1/sqrt(K) normalization for A/B runs.
	#[arg(long)]
	pub disable_semantic_sqrt_norm: bool,
}
impl ScoringOverrides {
	fn apply(&self, scoring: &mut Scoring) {
		if let Some(mode) = self.mode {
			scoring.mode = mode;
		}
		if let Some(value) = self.keyword_weight {
			scoring.keyword_weight = value;
		}
		if let Some(value) = self.semantic_weight {
			scoring.semantic_weight = value;
		}
		if let Some(value) = self.edge_weight {
			scoring.edge_weight = value;
		}
		if let Some(value) = self.rrf_k {
			scoring.rrf_k = value;
		}
		if let Some(value) = self.min_score_threshold {
			scoring.min_score_threshold = value;
		}
		if let Some(value) = self.semantic_threshold {
			scoring.semantic_threshold = value;
		}
		if self.disable_semantic_sqrt_norm {
			scoring.semantic_sqrt_norm = false;
		}
	}
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
	query: String,
	keywords: Vec<String>,
	lexical_fragments: Vec<String>,
	effective_weights: EffectiveWeights,
	thresholds: Thresholds,
	raw_candidate_count: usize,
	filtered_candidate_count: usize,
	top_k: usize,
	proof: RankBoundProof,
	results: Vec<RankedRow>,
}

/// Closed-form ceiling on the rank at which a single- or double-hit
/// memory of the probe importance still clears the score floor.
#[derive(Debug, Serialize)]
struct RankBoundProof {
	boundary_importance: f64,
	single_hit_rank_bound: f64,
	double_hit_rank_bound: f64,
}

#[derive(Debug, Serialize)]
struct SimulateOutput {
	params: FairnessParams,
	rows: Vec<FairnessRow>,
}

#[derive(Debug, Serialize)]
struct DemoOutput {
	isolated_memory: IsolatedMemoryInfo,
	scoring: Scoring,
	cases: DemoCases,
}

#[derive(Debug, Serialize)]
struct IsolatedMemoryInfo {
	id: i64,
	title: String,
	importance: f64,
}

#[derive(Debug, Serialize)]
struct DemoCases {
	noisy_query: DemoCase,
	compact_query: DemoCase,
	direct_query: DemoCase,
}

#[derive(Debug, Serialize)]
struct DemoCase {
	query_chars: usize,
	keyword_count: usize,
	lexical_fragment_count: usize,
	lexical_fragments_preview: Vec<String>,
	raw_candidate_count: usize,
	filtered_candidate_count: usize,
	isolated_hit: bool,
	isolated_result: Option<RankedRow>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = match &args.config {
		Some(path) => memrank_config::load(path)?,
		None => Config::default(),
	};
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	match args.command {
		Command::Score(score_args) => run_score(&config, score_args),
		Command::Simulate(simulate_args) => run_simulate(simulate_args),
		Command::DemoIsolated(demo_args) => run_demo(&config, demo_args),
	}
}

fn run_score(config: &Config, args: ScoreArgs) -> color_eyre::Result<()> {
	let dataset = dataset::load(&args.input)?;
	let mut scoring = config.scoring.clone();

	args.overrides.apply(&mut scoring);

	let report = score_dataset(&dataset, &args.query, &scoring);
	let top_k = args.top_k.unwrap_or(config.report.top_k);
	let proof = RankBoundProof {
		boundary_importance: args.boundary_importance,
		single_hit_rank_bound: rank_bound(
			scoring.min_score_threshold,
			scoring.keyword_weight,
			args.boundary_importance,
			scoring.rrf_k,
			1,
		),
		double_hit_rank_bound: rank_bound(
			scoring.min_score_threshold,
			scoring.keyword_weight,
			args.boundary_importance,
			scoring.rrf_k,
			2,
		),
	};
	let output = ScoreOutput {
		query: report.query,
		keywords: report.keywords,
		lexical_fragments: report.lexical_fragments,
		effective_weights: report.effective_weights,
		thresholds: report.thresholds,
		raw_candidate_count: report.raw_count,
		filtered_candidate_count: report.filtered_count,
		top_k,
		proof,
		results: report.results.into_iter().take(top_k).collect(),
	};

	emit(&output, args.output.as_deref())
}

fn run_simulate(args: SimulateArgs) -> color_eyre::Result<()> {
	let params = FairnessParams {
		keyword_counts: args.keyword_counts,
		trials: args.trials,
		seed: args.seed,
		rrf_k: args.rrf_k,
		importance: args.importance,
		semantic_weight: args.semantic_weight,
		semantic_threshold: args.semantic_threshold,
		rank_max: args.rank_max,
		decision_threshold: args.decision_threshold,
	};
	let rows = run_fairness_simulation(&params);

	if let Some(path) = &args.output_csv {
		write_output(path, &render_csv(&rows))?;
	}

	let output = SimulateOutput { params, rows };

	emit(&output, args.output_json.as_deref())
}

fn run_demo(config: &Config, args: DemoArgs) -> color_eyre::Result<()> {
	let mut dataset = match &args.input {
		Some(path) => dataset::load(path)?,
		None => dataset::builtin_demo_dataset(),
	};
	let isolated_id = dataset::ensure_isolated_memory(&mut dataset.memories);
	let mut scoring = demo_scoring(config);

	args.overrides.apply(&mut scoring);

	let solution_tail: String = args.solution.chars().take(DEMO_SOLUTION_TAIL_CHARS).collect();
	let noisy_query = format!("{}\n{solution_tail}", args.raw_query).trim().to_string();
	let compact_query = build_compact_query(&args.raw_query, &args.solution);
	let direct_query = args.direct_query.trim().to_string();

	let importance = dataset
		.memories
		.iter()
		.find(|memory| memory.id == isolated_id)
		.map(|memory| memory.importance)
		.unwrap_or(0.);
	let output = DemoOutput {
		isolated_memory: IsolatedMemoryInfo {
			id: isolated_id,
			title: dataset::ISOLATED_TITLE.to_string(),
			importance,
		},
		cases: DemoCases {
			noisy_query: evaluate_demo_case(&dataset, &noisy_query, &scoring, isolated_id),
			compact_query: evaluate_demo_case(&dataset, &compact_query, &scoring, isolated_id),
			direct_query: evaluate_demo_case(&dataset, &direct_query, &scoring, isolated_id),
		},
		scoring,
	};

	emit(&output, args.output.as_deref())
}

/// Demo defaults diverge from scoring defaults: the semantic channel is
/// off so the contrast between query shapes is purely lexical.
fn demo_scoring(config: &Config) -> Scoring {
	Scoring { semantic_threshold: 0.6, semantic_weight: 0., ..config.scoring.clone() }
}

fn score_dataset(dataset: &Dataset, query: &str, scoring: &Scoring) -> ScoreReport {
	let inputs = SemanticInputs {
		similarity: dataset.semantic_similarity.as_ref(),
		query_embeddings: dataset.query_embeddings.as_ref(),
	};

	score_memories(&dataset.memories, &dataset.links, query, scoring, inputs, &UnicodeSegmenter)
}

fn evaluate_demo_case(
	dataset: &Dataset,
	query: &str,
	scoring: &Scoring,
	isolated_id: i64,
) -> DemoCase {
	let report = score_dataset(dataset, query, scoring);
	let isolated_result =
		report.results.iter().find(|row| row.memory_id == isolated_id).cloned();

	DemoCase {
		query_chars: query.chars().count(),
		keyword_count: report.keywords.len(),
		lexical_fragment_count: report.lexical_fragments.len(),
		lexical_fragments_preview: report.lexical_fragments.iter().take(16).cloned().collect(),
		raw_candidate_count: report.raw_count,
		filtered_candidate_count: report.filtered_count,
		isolated_hit: isolated_result.is_some(),
		isolated_result,
	}
}

fn emit<T>(payload: &T, output: Option<&Path>) -> color_eyre::Result<()>
where
	T: Serialize,
{
	let json = serde_json::to_string_pretty(payload)?;

	if let Some(path) = output {
		write_output(path, &json)?;
	}

	println!("{json}");

	Ok(())
}

fn write_output(path: &Path, content: &str) -> color_eyre::Result<()> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}

	fs::write(path, content)?;

	Ok(())
}
