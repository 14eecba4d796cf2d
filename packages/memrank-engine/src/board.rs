use std::{
	cmp::Ordering,
	collections::{HashMap, hash_map::Entry},
};

use memrank_domain::MemoryId;
use serde::Serialize;

#[derive(Clone, Copy, Debug)]
pub(crate) enum Component {
	Keyword,
	Reverse,
	Semantic,
	Graph,
}

/// Per-memory contribution of each scoring pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ScoreBreakdown {
	pub keyword: f64,
	pub reverse: f64,
	pub semantic: f64,
	pub graph: f64,
}
impl ScoreBreakdown {
	pub fn total(&self) -> f64 {
		self.keyword + self.reverse + self.semantic + self.graph
	}
}

/// Score accumulator that remembers first-touch order.
///
/// Every ranking below sorts stably over that order, so ties resolve to
/// whichever memory entered the board first and repeated runs agree.
#[derive(Debug, Default)]
pub(crate) struct ScoreBoard {
	order: Vec<MemoryId>,
	entries: HashMap<MemoryId, ScoreBreakdown>,
}
impl ScoreBoard {
	pub(crate) fn add(&mut self, id: MemoryId, component: Component, value: f64) {
		let breakdown = match self.entries.entry(id) {
			Entry::Occupied(slot) => slot.into_mut(),
			Entry::Vacant(slot) => {
				self.order.push(id);

				slot.insert(ScoreBreakdown::default())
			},
		};

		match component {
			Component::Keyword => breakdown.keyword += value,
			Component::Reverse => breakdown.reverse += value,
			Component::Semantic => breakdown.semantic += value,
			Component::Graph => breakdown.graph += value,
		}
	}

	pub(crate) fn total(&self, id: MemoryId) -> f64 {
		self.entries.get(&id).map(ScoreBreakdown::total).unwrap_or(0.)
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub(crate) fn len(&self) -> usize {
		self.order.len()
	}

	/// Top `top_n` ids by current total, ties broken by first-touch order.
	pub(crate) fn seeds(&self, top_n: usize) -> Vec<MemoryId> {
		let mut ranked: Vec<(MemoryId, f64)> =
			self.order.iter().map(|id| (*id, self.total(*id))).collect();

		ranked.sort_by(|left, right| cmp_f64_desc(left.1, right.1));

		ranked.into_iter().take(top_n).map(|(id, _)| id).collect()
	}

	/// All entries at or above `min_score`, highest total first.
	pub(crate) fn ranked(&self, min_score: f64) -> Vec<(MemoryId, f64, ScoreBreakdown)> {
		let mut filtered: Vec<(MemoryId, f64, ScoreBreakdown)> = self
			.order
			.iter()
			.filter_map(|id| {
				let breakdown = self.entries.get(id)?;
				let total = breakdown.total();

				(total >= min_score).then_some((*id, total, *breakdown))
			})
			.collect();

		filtered.sort_by(|left, right| cmp_f64_desc(left.1, right.1));

		filtered
	}
}

pub(crate) fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
	b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
