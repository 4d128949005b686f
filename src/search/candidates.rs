//! Candidate order sets around the baseline.
//!
//! Two families of perturbation:
//!
//! - single-unit substitutions, dealt round-robin across units with each
//!   unit's alternatives ranked by [`score_order`], until the candidate
//!   budget is spent;
//! - "A moves, B supports A" pairs for units whose ranges overlap, ranked by
//!   the combined score of both orders and capped by the pair budget.
//!
//! Sets that send two units to the same province are dropped, as are exact
//! duplicates. The baseline always comes first.

use std::collections::HashSet;

use crate::board::order::Order;
use crate::board::province::{Power, Province};
use crate::board::state::{Board, Season};
use crate::eval::{nearest_center, threat};
use crate::movegen::legal_orders;

use super::config::AiConfig;

/// Heuristic value of a single order, used only to rank alternatives.
pub fn score_order(board: &Board, power: Power, order: &Order) -> f32 {
    let owned = |p: Province| p.is_supply_center() && board.sc_owner(p) == Some(power);
    match *order {
        Order::Hold { unit } => {
            let danger = threat(board, unit, power);
            if owned(unit) && danger > 0 {
                2.0 + danger as f32
            } else {
                -1.0
            }
        }
        Order::Move { unit, dest, .. } => {
            let mut score: f32 = 0.0;
            if dest.is_supply_center() {
                score += match board.sc_owner(dest) {
                    None => 10.0,
                    Some(o) if o != power => 7.0,
                    Some(_) => 1.0,
                };
            }
            // Leaving a center before it is taken.
            if board.season == Season::Fall && unit.is_supply_center() && !owned(unit) {
                score -= 12.0;
            }
            if owned(unit) {
                score -= 4.0 * threat(board, unit, power) as f32;
            }
            if board.unit_at(dest).is_some_and(|u| u.owner == power) {
                score -= 15.0;
            }
            if let Some(kind) = board.kind_at(unit) {
                match nearest_center(dest, kind, |c| board.sc_owner(c) != Some(power)) {
                    Some(0) => score += 5.0,
                    Some(d) => score += 3.0 / f32::from(d),
                    None => {}
                }
            }
            score
        }
        Order::Support {
            supported,
            dest: None,
            ..
        } => {
            let danger = threat(board, supported, power);
            if danger == 0 {
                -2.0
            } else if owned(supported) {
                5.0 + danger as f32
            } else {
                1.0
            }
        }
        Order::Support {
            dest: Some(dest), ..
        } => {
            let enemy_there = board.unit_at(dest).is_some_and(|u| u.owner != power);
            if !enemy_there && threat(board, dest, power) == 0 {
                return -1.0;
            }
            let mut score: f32 = 2.0;
            if dest.is_supply_center() && !owned(dest) {
                score += 5.0;
            }
            if enemy_there {
                score += 3.0;
            }
            score
        }
        Order::Convoy { .. } => 1.0,
    }
}

/// Returns true if two orders in the set move into the same province.
pub fn has_collision(orders: &[Order]) -> bool {
    let mut seen: Vec<Province> = Vec::with_capacity(orders.len());
    for dest in orders.iter().filter_map(Order::move_dest) {
        if seen.contains(&dest) {
            return true;
        }
        seen.push(dest);
    }
    false
}

/// Whole order sets for `power` to simulate, baseline first.
pub fn generate_candidates(
    board: &Board,
    power: Power,
    baseline: &[Order],
    config: &AiConfig,
) -> Vec<Vec<Order>> {
    let mut out = vec![baseline.to_vec()];
    let mut seen: HashSet<Vec<Order>> = HashSet::new();
    seen.insert(baseline.to_vec());

    let mut push = |set: Vec<Order>, out: &mut Vec<Vec<Order>>| {
        if !has_collision(&set) && seen.insert(set.clone()) {
            out.push(set);
            true
        } else {
            false
        }
    };

    let legal: Vec<Vec<Order>> = baseline.iter().map(|o| legal_orders(board, o.unit())).collect();

    // Single-unit substitutions, round-robin by rank.
    let ranked: Vec<Vec<Order>> = legal
        .iter()
        .zip(baseline)
        .map(|(orders, current)| {
            let mut alts: Vec<(f32, Order)> = orders
                .iter()
                .filter(|o| *o != current)
                .map(|o| (score_order(board, power, o), *o))
                .collect();
            alts.sort_by(|a, b| b.0.total_cmp(&a.0));
            alts.into_iter().map(|(_, o)| o).collect()
        })
        .collect();

    let mut added = 0;
    let deepest = ranked.iter().map(Vec::len).max().unwrap_or(0);
    'rounds: for rank in 0..deepest {
        for (i, alts) in ranked.iter().enumerate() {
            if added >= config.candidate_budget {
                break 'rounds;
            }
            let Some(alt) = alts.get(rank) else {
                continue;
            };
            let mut set = baseline.to_vec();
            set[i] = *alt;
            if push(set, &mut out) {
                added += 1;
            }
        }
    }

    // Supported moves.
    let mut pairs: Vec<(f32, usize, Order, usize, Order)> = Vec::new();
    for (a, moves) in legal.iter().enumerate() {
        for mv in moves.iter().filter(|o| o.is_move()) {
            let Some(dest) = mv.move_dest() else {
                continue;
            };
            let from = mv.unit();
            for (b, supports) in legal.iter().enumerate() {
                if a == b {
                    continue;
                }
                let support = Order::support_move(baseline[b].unit(), from, dest);
                if supports.contains(&support) {
                    let score = score_order(board, power, mv) + score_order(board, power, &support);
                    pairs.push((score, a, *mv, b, support));
                }
            }
        }
    }
    pairs.sort_by(|x, y| y.0.total_cmp(&x.0));

    let mut kept = 0;
    for (_, a, mv, b, support) in pairs {
        if kept >= config.pair_budget {
            break;
        }
        let mut set = baseline.to_vec();
        set[a] = mv;
        set[b] = support;
        if push(set, &mut out) {
            kept += 1;
        }
    }

    out
}
