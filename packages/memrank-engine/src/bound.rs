/// Worst rank at which a memory with `hit_count` fragment matches and
/// the given importance still clears the score threshold on its forward
/// lexical contribution alone.
///
/// Inverts `hit_count * keyword_weight * importance / (rrf_k + rank)`
/// at the threshold. The coverage multiplier only raises the lexical
/// score, so the bound is conservative. Non-positive inputs make the
/// contribution unbounded or the threshold vacuous, either way every
/// rank qualifies.
pub fn rank_bound(
	threshold: f64,
	keyword_weight: f64,
	importance: f64,
	rrf_k: f64,
	hit_count: u32,
) -> f64 {
	if threshold <= 0. || keyword_weight <= 0. || importance <= 0. || hit_count == 0 {
		return f64::INFINITY;
	}

	(hit_count as f64 * keyword_weight * importance) / threshold - rrf_k
}
