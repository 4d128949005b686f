//! Retreat and build decisions.
//!
//! No simulation here: retreats head for a supply center, then for the
//! power's own territory; builds go to the home centers closest to an
//! enemy-held center, and forced disbands drop the units farthest from one.

use crate::board::map::valid_moves;
use crate::board::order::{BuildOrder, RetreatOrder};
use crate::board::province::{Coast, Power, Province, ALL_PROVINCES};
use crate::board::state::Board;
use crate::board::unit::UnitKind;
use crate::eval::nearest_center;
use crate::movegen::{legal_builds, legal_retreats};
use crate::resolve::adjudicator::RetreatOption;
use crate::resolve::build::BuildOption;

/// Distance from `from` to the nearest center another power holds. While no
/// other power holds a center, neutral centers count instead.
fn front_distance(board: &Board, power: Power, from: Province, kind: UnitKind) -> Option<u8> {
    let enemy = |c: Province| board.sc_owner(c).is_some_and(|o| o != power);
    if ALL_PROVINCES.into_iter().any(enemy) {
        nearest_center(from, kind, enemy)
    } else {
        nearest_center(from, kind, |c| board.sc_owner(c).is_none())
    }
}

/// As [`front_distance`], for a fleet on a specific coast.
fn fleet_front_distance(board: &Board, power: Power, at: Province, coast: Coast) -> Option<u8> {
    if coast == Coast::None {
        return front_distance(board, power, at, UnitKind::Fleet);
    }
    valid_moves(at, UnitKind::Fleet, coast)
        .into_iter()
        .filter_map(|n| front_distance(board, power, n, UnitKind::Fleet))
        .min()
        .map(|d| d.saturating_add(1))
}

/// One retreat or disband per dislodged unit of `power`, in option order.
pub fn decide_retreats(board: &Board, options: &[RetreatOption], power: Power) -> Vec<RetreatOrder> {
    let mut taken: Vec<Province> = Vec::new();
    let mut orders = Vec::new();
    for opt in options.iter().filter(|o| o.unit.owner == power) {
        let kind = opt.unit.kind;
        let best = legal_retreats(opt)
            .into_iter()
            .filter_map(|o| match o {
                RetreatOrder::Retreat { dest, .. } if !taken.contains(&dest) => {
                    let home = nearest_center(dest, kind, |c| board.sc_owner(c) == Some(power));
                    Some(((!dest.is_supply_center(), home.unwrap_or(u8::MAX)), o))
                }
                _ => None,
            })
            .min_by_key(|(key, _)| *key)
            .map(|(_, o)| o);

        match best {
            Some(order @ RetreatOrder::Retreat { dest, .. }) => {
                taken.push(dest);
                orders.push(order);
            }
            _ => orders.push(RetreatOrder::Disband { unit: opt.origin }),
        }
    }
    orders
}

/// Build, waive or disband orders for one power's adjustment.
pub fn decide_builds(board: &Board, option: &BuildOption) -> Vec<BuildOrder> {
    let power = option.power;
    if option.delta < 0 {
        let mut units: Vec<(u8, Province)> = board
            .units_of(power)
            .map(|u| {
                let d = front_distance(board, power, u.location, u.kind).unwrap_or(u8::MAX);
                (d, u.location)
            })
            .collect();
        units.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        return units
            .into_iter()
            .take(option.disbands())
            .map(|(_, unit)| BuildOrder::Disband { unit })
            .collect();
    }

    let legal = legal_builds(board, option);
    let mut sites: Vec<((u8, bool), BuildOrder)> = option
        .eligible_provinces
        .iter()
        .filter_map(|&site| {
            legal
                .iter()
                .filter_map(|o| match *o {
                    BuildOrder::Build {
                        province,
                        kind,
                        coast,
                    } if province == site => {
                        let d = match kind {
                            UnitKind::Army => front_distance(board, power, site, kind),
                            UnitKind::Fleet => fleet_front_distance(board, power, site, coast),
                        };
                        Some(((d.unwrap_or(u8::MAX), kind == UnitKind::Fleet), *o))
                    }
                    _ => None,
                })
                .min_by_key(|(key, _)| *key)
        })
        .collect();
    sites.sort_by_key(|(key, _)| key.0);

    let mut orders: Vec<BuildOrder> = sites
        .into_iter()
        .take(option.builds())
        .map(|(_, o)| o)
        .collect();
    while orders.len() < option.builds() {
        orders.push(BuildOrder::Waive);
    }
    orders
}
