//! Retreat-phase resolution.
//!
//! A retreat succeeds when it names one of the unit's legal destinations and
//! no other unit retreats to the same province. Units retreating into each
//! other, units with an illegal order and units left without orders are all
//! disbanded.

use log::debug;

use crate::board::map::reachable_coasts;
use crate::board::order::{RetreatOrder, RetreatOrdersByPower};
use crate::board::province::{Coast, Province, PROVINCE_COUNT};
use crate::board::state::Board;
use crate::board::unit::Unit;

use super::adjudicator::RetreatOption;

/// What happened to one dislodged unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    Retreated { dest: Province, coast: Coast },
    /// Disbanded on request.
    Disbanded,
    /// Disbanded after colliding with another retreat.
    Bounced,
    /// Disbanded because the order named an illegal destination.
    Illegal,
    /// Disbanded for lack of an order.
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatResult {
    pub unit: Unit,
    pub order: Option<RetreatOrder>,
    pub outcome: RetreatOutcome,
}

impl RetreatResult {
    pub fn survives(&self) -> bool {
        matches!(self.outcome, RetreatOutcome::Retreated { .. })
    }
}

/// Resolves retreat orders for every dislodged unit in `options`.
///
/// Results come back in the order of `options`.
pub fn resolve_retreats(
    options: &[RetreatOption],
    orders: &RetreatOrdersByPower,
) -> Vec<RetreatResult> {
    let chosen: Vec<Option<RetreatOrder>> = options
        .iter()
        .map(|opt| {
            orders
                .get(&opt.unit.owner)
                .and_then(|list| list.iter().find(|o| o.unit() == opt.origin))
                .copied()
        })
        .collect();

    // Validate first so only legal retreats count towards collisions.
    let targets: Vec<Option<(Province, Coast)>> = options
        .iter()
        .zip(&chosen)
        .map(|(opt, order)| match order {
            Some(RetreatOrder::Retreat { dest, coast, .. }) => retreat_target(opt, *dest, *coast),
            _ => None,
        })
        .collect();

    let mut count = [0u8; PROVINCE_COUNT];
    for (dest, _) in targets.iter().flatten() {
        count[*dest as usize] += 1;
    }

    options
        .iter()
        .zip(chosen)
        .zip(targets)
        .map(|((opt, order), target)| {
            let outcome = match (order, target) {
                (None, _) => RetreatOutcome::Unordered,
                (Some(RetreatOrder::Disband { .. }), _) => RetreatOutcome::Disbanded,
                (Some(RetreatOrder::Retreat { .. }), None) => RetreatOutcome::Illegal,
                (Some(RetreatOrder::Retreat { .. }), Some((dest, _))) if count[dest as usize] > 1 => {
                    RetreatOutcome::Bounced
                }
                (Some(RetreatOrder::Retreat { .. }), Some((dest, coast))) => {
                    RetreatOutcome::Retreated { dest, coast }
                }
            };
            debug!("{} retreat: {:?}", opt.unit, outcome);
            RetreatResult {
                unit: opt.unit,
                order,
                outcome,
            }
        })
        .collect()
}

/// Legal landing spot for a retreat order, with the fleet coast settled.
fn retreat_target(opt: &RetreatOption, dest: Province, coast: Coast) -> Option<(Province, Coast)> {
    if !opt.legal_destinations.contains(&dest) {
        return None;
    }
    if !opt.unit.is_fleet() || !dest.has_coasts() {
        return Some((dest, Coast::None));
    }
    let coasts = reachable_coasts(opt.origin, opt.unit.coast, dest);
    match (coast, coasts.as_slice()) {
        (Coast::None, [only]) => Some((dest, *only)),
        (c, list) if c != Coast::None && list.contains(&c) => Some((dest, c)),
        _ => None,
    }
}

/// Places every surviving retreater on a copy of `board`.
///
/// `board` must already have the dislodged units removed, as
/// `apply_results` leaves it.
pub fn apply_retreats(board: &Board, results: &[RetreatResult]) -> Board {
    let mut next = board.clone();
    for r in results {
        if let RetreatOutcome::Retreated { dest, coast } = r.outcome {
            let placed = next.place_unit(Unit {
                location: dest,
                coast,
                ..r.unit
            });
            if !placed {
                debug!("{} could not retreat into occupied {dest}", r.unit);
            }
        }
    }
    next
}
