//! Multi-signal recall scoring.
//!
//! Candidates accumulate score from four passes over the same board:
//! lexical fragment matching, reverse containment, semantic similarity
//! and one-hop graph propagation. The fused totals are thresholded and
//! ranked into a [`ScoreReport`].

mod board;
mod bound;
mod fragments;
mod graph;
mod lexical;
mod score;
mod semantic;
mod weights;

pub use self::{
	board::ScoreBreakdown,
	bound::rank_bound,
	fragments::{MAX_LEXICAL_FRAGMENTS, build_fragments, tokenize_query},
	score::{RankedRow, ScoreReport, Thresholds, score_memories},
	semantic::SemanticInputs,
	weights::EffectiveWeights,
};
