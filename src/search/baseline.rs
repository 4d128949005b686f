//! Baseline movement orders.
//!
//! One linear pass over the power's units, no search:
//!
//! 1. Threatened owned centers are defended: the unit on the center holds
//!    (with support from a free neighbour if several enemies border it), or
//!    a free unit steps into an empty one.
//! 2. Remaining units advance one step towards the nearest center the power
//!    does not own, preferring centers no enemy unit stands on. A unit
//!    already standing on such a center stays to take it.
//! 3. Units with nowhere useful to go support a planned move they can reach,
//!    or hold.
//!
//! Ties go to whichever candidate is found first.

use crate::board::map::{reachable_coasts, valid_moves};
use crate::board::order::Order;
use crate::board::province::{Coast, Power, Province, ALL_PROVINCES};
use crate::board::state::Board;
use crate::board::unit::Unit;
use crate::eval::{can_reach, distance, threat};

/// One legal order per unit of `power`, in province order.
pub fn baseline_orders(board: &Board, power: Power) -> Vec<Order> {
    let units: Vec<Unit> = board.units_of(power).copied().collect();
    let mut plan: Vec<Option<Order>> = vec![None; units.len()];
    let mut claimed: Vec<Province> = Vec::new();

    defend_centers(board, power, &units, &mut plan, &mut claimed);

    for i in 0..units.len() {
        if plan[i].is_some() {
            continue;
        }
        if let Some(order) = advance(board, power, &units[i], &claimed) {
            if let Some(dest) = order.move_dest() {
                claimed.push(dest);
            }
            plan[i] = Some(order);
        }
    }

    for i in 0..units.len() {
        if plan[i].is_some() {
            continue;
        }
        let unit = &units[i];
        let support = plan.iter().flatten().find_map(|o| match *o {
            Order::Move { unit: from, dest, .. } if dest != unit.location && can_reach(unit, dest) => {
                Some(Order::support_move(unit.location, from, dest))
            }
            _ => None,
        });
        plan[i] = Some(support.unwrap_or(Order::hold(unit.location)));
    }

    plan.into_iter()
        .zip(&units)
        .map(|(o, u)| o.unwrap_or(Order::hold(u.location)))
        .collect()
}

fn defend_centers(
    board: &Board,
    power: Power,
    units: &[Unit],
    plan: &mut [Option<Order>],
    claimed: &mut Vec<Province>,
) {
    for center in board.centers_of(power).collect::<Vec<_>>() {
        let danger = threat(board, center, power);
        if danger == 0 {
            continue;
        }
        let free = |plan: &[Option<Order>], u: usize| plan[u].is_none() && units[u].location != center;

        match units.iter().position(|u| u.location == center) {
            Some(holder) => {
                if plan[holder].is_some() {
                    continue;
                }
                plan[holder] = Some(Order::hold(center));
                if danger > 1 {
                    if let Some(helper) = (0..units.len()).find(|&u| free(plan, u) && can_reach(&units[u], center)) {
                        plan[helper] = Some(Order::support_hold(units[helper].location, center));
                    }
                }
            }
            None => {
                if board.is_occupied(center) || claimed.contains(&center) {
                    continue;
                }
                if let Some(mover) = (0..units.len()).find(|&u| free(plan, u) && can_reach(&units[u], center)) {
                    plan[mover] = Some(move_order(&units[mover], center));
                    claimed.push(center);
                }
            }
        }
    }
}

/// A step towards the best target center, if one brings the unit closer.
fn advance(board: &Board, power: Power, unit: &Unit, claimed: &[Province]) -> Option<Order> {
    if unit.location.is_supply_center() && board.sc_owner(unit.location) != Some(power) {
        return None;
    }
    let target = ALL_PROVINCES
        .into_iter()
        .filter(|p| p.is_supply_center() && board.sc_owner(*p) != Some(power))
        .filter(|p| board.unit_at(*p).map_or(true, |u| u.owner != power))
        .filter_map(|p| {
            let d = distance(unit.location, p, unit.kind)?;
            let defended = board.unit_at(p).is_some();
            Some(((defended, d), p))
        })
        .min_by_key(|(key, _)| *key)
        .map(|(_, p)| p)?;

    let here = distance(unit.location, target, unit.kind)?;
    let step = valid_moves(unit.location, unit.kind, unit.coast)
        .into_iter()
        .filter(|p| !claimed.contains(p))
        .filter(|p| board.unit_at(*p).map_or(true, |u| u.owner != power))
        .filter_map(|p| Some((distance(p, target, unit.kind)?, p)))
        .min_by_key(|(d, _)| *d)?;

    (step.0 < here).then(|| move_order(unit, step.1))
}

/// A direct move, picking the first reachable coast for fleets.
fn move_order(unit: &Unit, dest: Province) -> Order {
    let coast = if unit.is_fleet() && dest.has_coasts() {
        reachable_coasts(unit.location, unit.coast, dest)
            .first()
            .copied()
            .unwrap_or(Coast::None)
    } else {
        Coast::None
    };
    Order::move_to_coast(unit.location, dest, coast)
}
