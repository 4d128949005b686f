//! Legal order generation.
//!
//! Generates legal orders for a power in each of the three phases, and
//! random legal order sets for self-play and fuzzing.

pub mod build;
pub mod movement;
pub mod retreat;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::order::{BuildOrder, Order, RetreatOrder};
use crate::board::province::{Power, Province};
use crate::board::state::Board;
use crate::resolve::adjudicator::RetreatOption;
use crate::resolve::build::BuildOption;

pub use build::legal_builds;
pub use movement::legal_orders;
pub use retreat::legal_retreats;

/// One random legal movement order for each of the power's units.
pub fn random_orders(board: &Board, power: Power, rng: &mut impl Rng) -> Vec<Order> {
    let provinces: Vec<Province> = board.units_of(power).map(|u| u.location).collect();
    provinces
        .into_iter()
        .filter_map(|p| legal_orders(board, p).choose(rng).copied())
        .collect()
}

/// One random retreat or disband for each of the power's dislodged units.
pub fn random_retreats(
    options: &[RetreatOption],
    power: Power,
    rng: &mut impl Rng,
) -> Vec<RetreatOrder> {
    options
        .iter()
        .filter(|o| o.unit.owner == power)
        .filter_map(|o| legal_retreats(o).choose(rng).copied())
        .collect()
}

/// Random builds (or waives) up to the allowance, or the required number
/// of random disbands.
pub fn random_builds(board: &Board, option: &BuildOption, rng: &mut impl Rng) -> Vec<BuildOrder> {
    let legal = legal_builds(board, option);
    if option.delta < 0 {
        return legal
            .choose_multiple(rng, option.disbands())
            .copied()
            .collect();
    }

    let mut orders = Vec::new();
    let mut used: Vec<Province> = Vec::new();
    for _ in 0..option.builds() {
        let available: Vec<&BuildOrder> = legal
            .iter()
            .filter(|o| match o {
                BuildOrder::Build { province, .. } => !used.contains(province),
                _ => true,
            })
            .collect();
        let Some(&&chosen) = available.choose(rng) else {
            break;
        };
        if let BuildOrder::Build { province, .. } = chosen {
            used.push(province);
        }
        orders.push(chosen);
    }
    orders
}
