//! Candidate simulation and selection.
//!
//! Each candidate is adjudicated against every other active power holding
//! in place, applied to a scratch board, and scored with the position
//! heuristic. Adjudication is pure, so candidates are scored in parallel
//! with one adjudicator per rayon worker.

use rayon::prelude::*;

use crate::board::order::{Order, OrdersByPower};
use crate::board::province::Power;
use crate::board::state::Board;
use crate::eval::{score_position, ScoreWeights};
use crate::resolve::adjudicator::Adjudicator;
use crate::resolve::phase::{apply_results, update_supply_centers};

/// Score of the board after `power` plays `candidate` and everyone else holds.
pub fn simulate(
    adjudicator: &mut Adjudicator,
    board: &Board,
    power: Power,
    candidate: &[Order],
    weights: &ScoreWeights,
) -> f64 {
    let mut orders = OrdersByPower::new();
    for other in board.active_powers() {
        if other != power {
            let holds = board.units_of(other).map(|u| Order::hold(u.location)).collect();
            orders.insert(other, holds);
        }
    }
    orders.insert(power, candidate.to_vec());

    let res = adjudicator.resolve(board, &orders);
    let after = apply_results(board, &res.verdicts, &res.dislodged);
    let after = update_supply_centers(&after);
    score_position(&after, power, weights)
}

/// Scores every candidate, in order.
pub fn score_candidates(
    board: &Board,
    power: Power,
    candidates: &[Vec<Order>],
    weights: &ScoreWeights,
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        candidates
            .par_iter()
            .map_init(Adjudicator::new, |adj, c| simulate(adj, board, power, c, weights))
            .collect()
    } else {
        let mut adj = Adjudicator::new();
        candidates
            .iter()
            .map(|c| simulate(&mut adj, board, power, c, weights))
            .collect()
    }
}

/// Index of the highest score; the earliest wins a tie.
pub fn select_best(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}
