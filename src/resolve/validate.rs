//! Structural validation of movement orders.
//!
//! Checks an order against the map and the current board only; nothing here
//! looks at other orders. A valid order comes back normalised (inferred
//! fleet coast filled in, stray coasts cleared), an invalid one comes back
//! with the reason it cannot be carried out. The adjudicator downgrades
//! invalid orders to holds.

use crate::board::map::{can_convoy_between, is_adjacent, reachable_coasts};
use crate::board::order::Order;
use crate::board::province::{Coast, Province, ProvinceKind};
use crate::board::state::Board;
use crate::board::unit::{Unit, UnitKind};

/// Why an order is structurally impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Illegal {
    #[error("order names {0}, not the ordered unit")]
    WrongUnit(Province),
    #[error("cannot move to its own province")]
    MoveToSelf,
    #[error("{0} is not reachable")]
    Unreachable(Province),
    #[error("coast of {0} must be specified")]
    AmbiguousCoast(Province),
    #[error("no unit at {0}")]
    NoUnit(Province),
    #[error("a unit cannot support itself")]
    SupportSelf,
    #[error("supporting unit cannot reach {0}")]
    SupportUnreachable(Province),
    #[error("supported unit cannot reach {0}")]
    SupportedCannotReach(Province),
    #[error("only a fleet at sea can convoy")]
    NotAtSea,
    #[error("only armies can be convoyed")]
    NotAnArmy,
    #[error("no convoy from {0} to {1}")]
    NotConvoyable(Province, Province),
}

/// Validates `order` for `unit` on `board`, returning the normalised order.
pub fn validate(board: &Board, unit: &Unit, order: &Order) -> Result<Order, Illegal> {
    if order.unit() != unit.location {
        return Err(Illegal::WrongUnit(order.unit()));
    }
    match *order {
        Order::Hold { .. } => Ok(*order),
        Order::Move { dest, coast, .. } => {
            let coast = move_coast(unit, dest, coast)?;
            Ok(Order::move_to_coast(unit.location, dest, coast))
        }
        Order::Support {
            supported, dest, ..
        } => validate_support(board, unit, supported, dest).map(|()| *order),
        Order::Convoy { convoyed, dest, .. } => {
            if !unit.is_fleet() || unit.location.kind() != ProvinceKind::Water {
                return Err(Illegal::NotAtSea);
            }
            let army = board.unit_at(convoyed).ok_or(Illegal::NoUnit(convoyed))?;
            if army.kind != UnitKind::Army {
                return Err(Illegal::NotAnArmy);
            }
            if !can_convoy_between(convoyed, dest) {
                return Err(Illegal::NotConvoyable(convoyed, dest));
            }
            Ok(*order)
        }
    }
}

/// Resolves the coast a move lands on, or why the move is impossible.
fn move_coast(unit: &Unit, dest: Province, coast: Coast) -> Result<Coast, Illegal> {
    if dest == unit.location {
        return Err(Illegal::MoveToSelf);
    }
    match unit.kind {
        UnitKind::Army => {
            if is_adjacent(unit.location, dest, UnitKind::Army, Coast::None)
                || can_convoy_between(unit.location, dest)
            {
                Ok(Coast::None)
            } else {
                Err(Illegal::Unreachable(dest))
            }
        }
        UnitKind::Fleet => {
            let coasts = reachable_coasts(unit.location, unit.coast, dest);
            if !dest.has_coasts() {
                return if coasts.is_empty() {
                    Err(Illegal::Unreachable(dest))
                } else {
                    Ok(Coast::None)
                };
            }
            match (coast, coasts.as_slice()) {
                (_, []) => Err(Illegal::Unreachable(dest)),
                (Coast::None, [only]) => Ok(*only),
                (Coast::None, _) => Err(Illegal::AmbiguousCoast(dest)),
                (c, list) if list.contains(&c) => Ok(c),
                _ => Err(Illegal::Unreachable(dest)),
            }
        }
    }
}

fn validate_support(
    board: &Board,
    unit: &Unit,
    supported: Province,
    dest: Option<Province>,
) -> Result<(), Illegal> {
    if supported == unit.location {
        return Err(Illegal::SupportSelf);
    }
    let other = board.unit_at(supported).ok_or(Illegal::NoUnit(supported))?;
    let target = dest.unwrap_or(supported);
    if target == unit.location {
        return Err(Illegal::SupportSelf);
    }
    if !is_adjacent(unit.location, target, unit.kind, unit.coast) {
        return Err(Illegal::SupportUnreachable(target));
    }
    if let Some(dest) = dest {
        let reachable = dest != supported
            && match other.kind {
                UnitKind::Army => {
                    is_adjacent(supported, dest, UnitKind::Army, Coast::None)
                        || can_convoy_between(supported, dest)
                }
                UnitKind::Fleet => is_adjacent(supported, dest, UnitKind::Fleet, other.coast),
            };
        if !reachable {
            return Err(Illegal::SupportedCannotReach(dest));
        }
    }
    Ok(())
}
