//! Retreat-phase order generation.

use crate::board::map::reachable_coasts;
use crate::board::order::RetreatOrder;
use crate::board::province::Coast;
use crate::resolve::adjudicator::RetreatOption;

/// Disband plus every legal retreat for a dislodged unit.
pub fn legal_retreats(option: &RetreatOption) -> Vec<RetreatOrder> {
    let unit = option.origin;
    let mut orders = vec![RetreatOrder::Disband { unit }];
    for &dest in &option.legal_destinations {
        if option.unit.is_fleet() && dest.has_coasts() {
            for coast in reachable_coasts(option.origin, option.unit.coast, dest) {
                orders.push(RetreatOrder::Retreat { unit, dest, coast });
            }
        } else {
            orders.push(RetreatOrder::Retreat {
                unit,
                dest,
                coast: Coast::None,
            });
        }
    }
    orders
}
