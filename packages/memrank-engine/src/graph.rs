use std::collections::HashMap;

use memrank_domain::{LinkRecord, MemoryId};

use crate::board::{Component, ScoreBoard};

/// One-hop propagation from the current top scorers along both link
/// directions. Seed selection is fixed up front, but each seed's total
/// is read live, so propagation already received from an earlier seed
/// strengthens what a later seed passes on.
pub(crate) fn graph_pass(
	links: &[LinkRecord],
	edge_weight: f64,
	graph_base_coef: f64,
	seed_top_n: usize,
	board: &mut ScoreBoard,
) {
	let seeds = board.seeds(seed_top_n);

	let mut outgoing: HashMap<MemoryId, Vec<&LinkRecord>> = HashMap::new();
	let mut incoming: HashMap<MemoryId, Vec<&LinkRecord>> = HashMap::new();

	for link in links {
		outgoing.entry(link.source_id).or_default().push(link);
		incoming.entry(link.target_id).or_default().push(link);
	}

	let base_propagation = graph_base_coef * edge_weight;

	for seed_id in seeds {
		let seed_score = board.total(seed_id);

		if seed_score <= 0. {
			continue;
		}

		if let Some(links) = outgoing.get(&seed_id) {
			for link in links {
				let propagated = seed_score * link.weight * edge_weight + base_propagation;

				board.add(link.target_id, Component::Graph, propagated);
			}
		}
		if let Some(links) = incoming.get(&seed_id) {
			for link in links {
				let propagated = seed_score * link.weight * edge_weight + base_propagation;

				board.add(link.source_id, Component::Graph, propagated);
			}
		}
	}
}
