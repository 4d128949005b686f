//! Position evaluation.
//!
//! Scores a board position from a given power's perspective, plus the
//! distance and threat helpers the AI's heuristics share.

pub mod heuristic;

pub use heuristic::{
    can_reach, distance, nearest_center, score_all, score_position, threat, ScoreWeights,
};
