//! Build-phase order generation.

use crate::board::order::BuildOrder;
use crate::board::province::{Coast, ProvinceKind};
use crate::board::state::Board;
use crate::board::unit::UnitKind;
use crate::resolve::build::BuildOption;

/// Every build or disband a power could order, plus `Waive` when building.
pub fn legal_builds(board: &Board, option: &BuildOption) -> Vec<BuildOrder> {
    let mut orders = Vec::new();
    if option.delta > 0 {
        for &province in &option.eligible_provinces {
            orders.push(BuildOrder::Build {
                province,
                kind: UnitKind::Army,
                coast: Coast::None,
            });
            if province.kind() != ProvinceKind::Coastal {
                continue;
            }
            if province.has_coasts() {
                for &coast in province.coasts() {
                    orders.push(BuildOrder::Build {
                        province,
                        kind: UnitKind::Fleet,
                        coast,
                    });
                }
            } else {
                orders.push(BuildOrder::Build {
                    province,
                    kind: UnitKind::Fleet,
                    coast: Coast::None,
                });
            }
        }
        orders.push(BuildOrder::Waive);
    } else if option.delta < 0 {
        orders.extend(
            board
                .units_of(option.power)
                .map(|u| BuildOrder::Disband { unit: u.location }),
        );
    }
    orders
}
