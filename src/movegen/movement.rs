//! Movement-phase order generation.
//!
//! Enumerates legal hold, move, support, and convoy orders for a unit.

use crate::board::map::{can_convoy_between, is_adjacent, reachable_coasts, valid_moves};
use crate::board::order::Order;
use crate::board::province::{Coast, Province, ProvinceKind};
use crate::board::state::Board;
use crate::board::unit::{Unit, UnitKind};

/// All legal movement orders for the unit at `province`.
///
/// Empty if the province is empty. Every order returned passes validation.
pub fn legal_orders(board: &Board, province: Province) -> Vec<Order> {
    let Some(unit) = board.unit_at(province) else {
        return Vec::new();
    };

    let mut orders = vec![Order::hold(province)];
    orders.extend(move_orders(unit));
    orders.extend(convoyed_moves(board, unit));
    orders.extend(support_orders(board, unit));
    if unit.is_fleet() && province.kind() == ProvinceKind::Water {
        orders.extend(convoy_orders(board, unit));
    }
    orders
}

/// Direct moves, one per reachable coast for fleets.
fn move_orders(unit: &Unit) -> Vec<Order> {
    let mut orders = Vec::new();
    for dest in valid_moves(unit.location, unit.kind, unit.coast) {
        if unit.is_fleet() && dest.has_coasts() {
            for coast in reachable_coasts(unit.location, unit.coast, dest) {
                orders.push(Order::move_to_coast(unit.location, dest, coast));
            }
        } else {
            orders.push(Order::move_to(unit.location, dest));
        }
    }
    orders
}

/// Army moves over a single friendly fleet at sea.
fn convoyed_moves(board: &Board, unit: &Unit) -> Vec<Order> {
    if unit.kind != UnitKind::Army || unit.location.kind() != ProvinceKind::Coastal {
        return Vec::new();
    }
    let mut dests: Vec<Province> = Vec::new();
    for sea in valid_moves(unit.location, UnitKind::Fleet, Coast::None) {
        let carried = board
            .unit_at(sea)
            .is_some_and(|f| f.owner == unit.owner && sea.kind() == ProvinceKind::Water);
        if !carried {
            continue;
        }
        for dest in valid_moves(sea, UnitKind::Fleet, Coast::None) {
            if can_convoy_between(unit.location, dest)
                && !is_adjacent(unit.location, dest, UnitKind::Army, Coast::None)
                && !dests.contains(&dest)
            {
                dests.push(dest);
            }
        }
    }
    dests.sort();
    dests
        .into_iter()
        .map(|dest| Order::move_to(unit.location, dest))
        .collect()
}

/// Support-hold and support-move orders for every other unit.
fn support_orders(board: &Board, unit: &Unit) -> Vec<Order> {
    let here = unit.location;
    let mut orders = Vec::new();
    for other in board.units() {
        if other.location == here {
            continue;
        }
        if is_adjacent(here, other.location, unit.kind, unit.coast) {
            orders.push(Order::support_hold(here, other.location));
        }
        for dest in valid_moves(other.location, other.kind, other.coast) {
            if dest != here && is_adjacent(here, dest, unit.kind, unit.coast) {
                orders.push(Order::support_move(here, other.location, dest));
            }
        }
    }
    orders
}

/// Convoys for armies next to this fleet, to coasts next to this fleet.
fn convoy_orders(board: &Board, fleet: &Unit) -> Vec<Order> {
    let touching = valid_moves(fleet.location, UnitKind::Fleet, Coast::None);
    let mut orders = Vec::new();
    for army in board.units().filter(|u| u.kind == UnitKind::Army) {
        if !touching.contains(&army.location) {
            continue;
        }
        for &dest in &touching {
            if can_convoy_between(army.location, dest) {
                orders.push(Order::convoy(fleet.location, army.location, dest));
            }
        }
    }
    orders
}
