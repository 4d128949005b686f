//! Heuristic position evaluation.
//!
//! Scores a board from one power's perspective: supply centers held, units
//! alive, units poised to take a center, and owned centers under threat.
//!
//! Distances are read from army and fleet BFS matrices computed once via
//! `LazyLock`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::board::map::{distances_from, is_adjacent};
use crate::board::province::{Power, Province, ALL_PROVINCES, PROVINCE_COUNT};
use crate::board::state::Board;
use crate::board::unit::{Unit, UnitKind};

/// Weights of the position score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per owned supply center.
    pub supply_center: f64,
    /// Per surviving unit.
    pub unit: f64,
    /// Per unit one move from a center the power does not own.
    pub near_target: f64,
    /// Extra, per unit one move from a center another power owns.
    pub near_enemy_center: f64,
    /// Per owned center an enemy unit could enter next move.
    pub threatened_center: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            supply_center: 100.0,
            unit: 30.0,
            near_target: 15.0,
            near_enemy_center: 5.0,
            threatened_center: -20.0,
        }
    }
}

struct DistMatrix {
    rows: Vec<[Option<u8>; PROVINCE_COUNT]>,
}

static ARMY_DIST: LazyLock<DistMatrix> = LazyLock::new(|| build_dist_matrix(UnitKind::Army));
static FLEET_DIST: LazyLock<DistMatrix> = LazyLock::new(|| build_dist_matrix(UnitKind::Fleet));

fn build_dist_matrix(kind: UnitKind) -> DistMatrix {
    DistMatrix {
        rows: ALL_PROVINCES
            .iter()
            .map(|&p| distances_from(p, kind))
            .collect(),
    }
}

/// Moves a unit of `kind` needs from `from` to `to`, ignoring other units.
pub fn distance(from: Province, to: Province, kind: UnitKind) -> Option<u8> {
    let dm = match kind {
        UnitKind::Army => &*ARMY_DIST,
        UnitKind::Fleet => &*FLEET_DIST,
    };
    dm.rows[from as usize][to as usize]
}

/// Distance from `from` to the nearest supply center accepted by `pick`.
pub fn nearest_center(
    from: Province,
    kind: UnitKind,
    mut pick: impl FnMut(Province) -> bool,
) -> Option<u8> {
    ALL_PROVINCES
        .into_iter()
        .filter(|p| p.is_supply_center() && pick(*p))
        .filter_map(|p| distance(from, p, kind))
        .min()
}

/// Returns true if the unit could enter `target` with one direct move.
pub fn can_reach(unit: &Unit, target: Province) -> bool {
    is_adjacent(unit.location, target, unit.kind, unit.coast)
}

/// Number of units of other powers that could move into `province`.
pub fn threat(board: &Board, province: Province, power: Power) -> usize {
    board
        .units()
        .filter(|u| u.owner != power && can_reach(u, province))
        .count()
}

/// Scores `board` for `power`. Higher is better.
pub fn score_position(board: &Board, power: Power, weights: &ScoreWeights) -> f64 {
    let centers = board.center_count(power) as f64;
    let mut units = 0.0;
    let mut near_target = 0.0;
    let mut near_enemy = 0.0;

    for unit in board.units_of(power) {
        units += 1.0;
        let mut target = false;
        let mut enemy = false;
        for p in ALL_PROVINCES {
            if !p.is_supply_center() || !can_reach(unit, p) {
                continue;
            }
            match board.sc_owner(p) {
                Some(owner) if owner == power => {}
                Some(_) => {
                    target = true;
                    enemy = true;
                }
                None => target = true,
            }
        }
        if target {
            near_target += 1.0;
        }
        if enemy {
            near_enemy += 1.0;
        }
    }

    let threatened = board
        .centers_of(power)
        .filter(|&c| threat(board, c, power) > 0)
        .count() as f64;

    centers * weights.supply_center
        + units * weights.unit
        + near_target * weights.near_target
        + near_enemy * weights.near_enemy_center
        + threatened * weights.threatened_center
}

/// Scores for all seven powers, indexed by `Power as usize`.
pub fn score_all(board: &Board, weights: &ScoreWeights) -> [f64; 7] {
    let mut scores = [0.0; 7];
    for p in crate::board::province::ALL_POWERS {
        scores[p as usize] = score_position(board, p, weights);
    }
    scores
}
