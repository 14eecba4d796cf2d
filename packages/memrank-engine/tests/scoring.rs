use memrank_config::{ScoreMode, Scoring};
use memrank_domain::UnicodeSegmenter;
use memrank_engine::{SemanticInputs, rank_bound, score_memories};
use memrank_testkit::{link, memory, similarity_table};

fn no_semantic() -> SemanticInputs<'static> {
	SemanticInputs::default()
}

#[test]
fn fragment_coverage_outweighs_a_small_importance_edge() {
	let memories = vec![
		memory(1, "alpha beta notes", 0.5),
		memory(2, "alpha only", 0.55),
		memory(3, "unrelated", 0.99),
	];
	let report = score_memories(
		&memories,
		&[],
		"alpha beta",
		&Scoring::default(),
		no_semantic(),
		&UnicodeSegmenter,
	);

	assert_eq!(report.results[0].memory_id, 1);
	assert_eq!(report.results[1].memory_id, 2);
	assert!(report.results.iter().all(|row| row.memory_id != 3));
}

#[test]
fn threshold_drops_weak_reverse_matches() {
	// Titles straddle word boundaries of the query, so no lexical
	// fragment matches and every score comes from reverse containment.
	let memories =
		vec![memory(1, "lpha b", 0.9), memory(2, "pha be", 0.5), memory(3, "ha bet", 0.1)];
	let report = score_memories(
		&memories,
		&[],
		"alpha beta",
		&Scoring::default(),
		no_semantic(),
		&UnicodeSegmenter,
	);

	for row in &report.results {
		assert_eq!(row.score_keyword, 0.);
		assert!(row.score_reverse > 0.);
	}

	// 0.1 * 10 / 63 falls under the 0.025 floor.
	assert_eq!(report.raw_count, 3);
	assert_eq!(report.filtered_count, 2);
	assert_eq!(report.results[0].memory_id, 1);
	assert_eq!(report.results[1].memory_id, 2);

	let expected_top = 0.9 * 10. / 61.;

	assert!((report.results[0].score_total - expected_top).abs() < 1e-12);
}

#[test]
fn rank_bound_predicts_the_survivor_count() {
	// Single-fragment query, so every match has full coverage and the
	// effective lexical weight is keyword_weight * 1.6.
	let scoring = Scoring {
		keyword_weight: 1.,
		semantic_weight: 0.,
		edge_weight: 0.,
		rrf_k: 1.,
		min_score_threshold: 0.21,
		..Default::default()
	};
	let memories: Vec<_> =
		(1..=8).map(|id| memory(id, &format!("alpha entry {id}"), 1.)).collect();
	let report =
		score_memories(&memories, &[], "alpha", &scoring, no_semantic(), &UnicodeSegmenter);

	let bound = rank_bound(0.21, 1. * 1.6, 1., 1., 1);

	assert_eq!(report.results.len(), bound.floor() as usize);
	assert_eq!(report.results.len(), 6);
}

#[test]
fn rank_bound_predicts_the_survivor_count_for_double_hits() {
	// A title echoed verbatim in the query scores in both lexical
	// passes at the same rank. With a single fragment the keyword pass
	// contributes 1.6x and the reverse pass 1.0x, so each of the two
	// hits carries an effective weight of 1.3.
	let scoring = Scoring {
		keyword_weight: 1.,
		semantic_weight: 0.,
		edge_weight: 0.,
		rrf_k: 1.,
		min_score_threshold: 0.3,
		..Default::default()
	};
	let memories: Vec<_> = (1..=10).map(|id| memory(id, "alpha", 1.)).collect();
	let report =
		score_memories(&memories, &[], "alpha", &scoring, no_semantic(), &UnicodeSegmenter);

	let bound = rank_bound(0.3, 1. * 1.3, 1., 1., 2);

	assert_eq!(report.results.len(), bound.floor() as usize);
	assert_eq!(report.results.len(), 7);

	// Per rank r the total is 2.6 / (1 + r).
	let last = report.results.last().expect("Survivors should exist.");

	assert!((last.score_total - 2.6 / 8.).abs() < 1e-12);
	assert!(last.score_total >= 0.3);
}

#[test]
fn scoring_is_deterministic_across_runs() {
	let memories = vec![
		memory(1, "web toolkit", 0.5),
		memory(2, "web toolkit", 0.5),
		memory(3, "publishing column", 0.7),
	];
	let links = vec![link(1, 3, 0.8), link(2, 3, 0.8)];
	let table = similarity_table(&[("toolkit", &[(1, 0.6), (2, 0.6), (3, 0.45)])]);
	let inputs = SemanticInputs { similarity: Some(&table), query_embeddings: None };
	let scoring = Scoring::default();

	let first =
		score_memories(&memories, &links, "web toolkit", &scoring, inputs, &UnicodeSegmenter);
	let second =
		score_memories(&memories, &links, "web toolkit", &scoring, inputs, &UnicodeSegmenter);

	let first_json = serde_json::to_string(&first).expect("Report should serialize.");
	let second_json = serde_json::to_string(&second).expect("Report should serialize.");

	assert_eq!(first_json, second_json);
}

#[test]
fn isolated_cjk_memory_is_recalled_by_direct_query() {
	let memories = vec![
		memory(1, "Weekly planning sync", 0.9),
		memory(2, "Database migration runbook", 0.85),
		memory(3, "技术操作：激活web包以执行发专栏任务", 0.72),
		memory(4, "Quarterly metrics review", 0.8),
	];
	// No links touch memory 3; recall must come from lexical evidence.
	let links = vec![link(1, 2, 0.9), link(2, 4, 0.7)];
	let report = score_memories(
		&memories,
		&links,
		"激活web包 发专栏 工具包",
		&Scoring::default(),
		no_semantic(),
		&UnicodeSegmenter,
	);

	assert_eq!(report.results[0].memory_id, 3);
	assert_eq!(report.results[0].score_graph, 0.);
	assert!(report.results[0].score_keyword > 0.);
}

#[test]
fn keyword_first_mode_scales_lexical_totals_by_1_3() {
	let memories = vec![memory(1, "alpha beta", 0.6)];
	let balanced = Scoring { edge_weight: 0., ..Default::default() };
	let keyword_first =
		Scoring { mode: ScoreMode::KeywordFirst, edge_weight: 0., ..Default::default() };

	let base = score_memories(
		&memories,
		&[],
		"alpha beta",
		&balanced,
		no_semantic(),
		&UnicodeSegmenter,
	);
	let scaled = score_memories(
		&memories,
		&[],
		"alpha beta",
		&keyword_first,
		no_semantic(),
		&UnicodeSegmenter,
	);

	let ratio = scaled.results[0].score_total / base.results[0].score_total;

	assert!((ratio - 1.3).abs() < 1e-12);
}

#[test]
fn semantic_first_mode_scales_only_the_similarity_term() {
	// No lexical overlap, so the whole score is semantic.
	let memories = vec![memory(1, "unrelated title", 0.81)];
	let table = similarity_table(&[("topic", &[(1, 0.8)])]);
	let inputs = SemanticInputs { similarity: Some(&table), query_embeddings: None };
	let balanced = Scoring::default();
	let semantic_first = Scoring { mode: ScoreMode::SemanticFirst, ..Default::default() };

	let base = score_memories(&memories, &[], "topic", &balanced, inputs, &UnicodeSegmenter);
	let scaled =
		score_memories(&memories, &[], "topic", &semantic_first, inputs, &UnicodeSegmenter);

	// The rank term is untouched; only similarity * weight picks up the
	// 1.3 multiplier.
	let delta = scaled.results[0].score_semantic - base.results[0].score_semantic;
	let expected = 0.8 * 0.5 * 0.3;

	assert!((delta - expected).abs() < 1e-12);
}

#[test]
fn empty_query_produces_an_empty_report() {
	let memories = vec![memory(1, "anything", 0.9)];
	let report = score_memories(
		&memories,
		&[],
		"   ",
		&Scoring::default(),
		no_semantic(),
		&UnicodeSegmenter,
	);

	assert!(report.keywords.is_empty());
	assert!(report.lexical_fragments.is_empty());
	assert!(report.results.is_empty());
	assert_eq!(report.raw_count, 0);
}

#[test]
fn zero_semantic_weight_skips_the_semantic_pass() {
	let memories = vec![memory(1, "alpha", 0.9)];
	let table = similarity_table(&[("alpha", &[(1, 0.99)])]);
	let inputs = SemanticInputs { similarity: Some(&table), query_embeddings: None };
	let scoring = Scoring { semantic_weight: 0., ..Default::default() };
	let report = score_memories(&memories, &[], "alpha", &scoring, inputs, &UnicodeSegmenter);

	assert!(report.results.iter().all(|row| row.score_semantic == 0.));
	assert!(report.results[0].score_keyword > 0.);
}

#[test]
fn link_endpoints_outside_the_memory_set_keep_their_rank_slot() {
	let memories = vec![memory(1, "alpha", 1.)];
	// Heavy edge so the unknown endpoint outscores its seed.
	let links = vec![link(1, 99, 10.)];
	let report = score_memories(
		&memories,
		&links,
		"alpha",
		&Scoring::default(),
		no_semantic(),
		&UnicodeSegmenter,
	);

	assert_eq!(report.raw_count, 2);
	assert_eq!(report.filtered_count, 1);
	assert_eq!(report.results[0].memory_id, 1);
	assert_eq!(report.results[0].rank, 2);
}

#[test]
fn out_of_range_parameters_are_clamped_before_scoring() {
	let memories = vec![memory(1, "alpha", 0.9)];
	let scoring = Scoring {
		keyword_weight: -5.,
		semantic_weight: -1.,
		edge_weight: -1.,
		min_score_threshold: -0.5,
		..Default::default()
	};
	let report = score_memories(&memories, &[], "alpha", &scoring, no_semantic(), &UnicodeSegmenter);

	// Negative weights clamp to zero, so everything scores zero but the
	// clamped threshold keeps the touched entries.
	assert_eq!(report.effective_weights.keyword_weight, 0.);
	assert_eq!(report.thresholds.min_score_threshold, 0.);
	assert!(report.results.iter().all(|row| row.score_total == 0.));
}
