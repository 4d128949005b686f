//! Build/disband-phase accounting and resolution.
//!
//! At the end of a game year each power's unit count is brought in line
//! with its supply centers: a surplus of centers allows builds in owned,
//! vacant home centers, a deficit forces disbands. Disbands a power fails to
//! order are chosen by civil disorder.

use log::debug;

use crate::board::map::distances_from;
use crate::board::order::{BuildOrder, BuildOrdersByPower};
use crate::board::province::{Coast, Power, Province, ProvinceKind};
use crate::board::state::Board;
use crate::board::unit::{Unit, UnitKind};

/// What one power may or must do in the build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOption {
    pub power: Power,
    /// Supply centers minus units. Positive: builds allowed. Negative:
    /// disbands required.
    pub delta: i32,
    /// Vacant owned home centers when building; unit locations when
    /// disbanding; empty when balanced.
    pub eligible_provinces: Vec<Province>,
}

impl BuildOption {
    pub fn builds(&self) -> usize {
        self.delta.max(0) as usize
    }

    pub fn disbands(&self) -> usize {
        (-self.delta).max(0) as usize
    }
}

/// Build options for each of `powers`, in the order given.
pub fn calculate_builds(board: &Board, powers: &[Power]) -> Vec<BuildOption> {
    powers
        .iter()
        .map(|&power| {
            let delta = board.center_count(power) as i32 - board.unit_count(power) as i32;
            let eligible_provinces = if delta > 0 {
                board
                    .centers_of(power)
                    .filter(|p| p.home_power() == Some(power) && !board.is_occupied(*p))
                    .collect()
            } else if delta < 0 {
                board.units_of(power).map(|u| u.location).collect()
            } else {
                Vec::new()
            };
            BuildOption {
                power,
                delta,
                eligible_provinces,
            }
        })
        .collect()
}

/// Why a build-phase order was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no builds left")]
    NoBuildsLeft,
    #[error("no disbands owed")]
    NoDisbandsOwed,
    #[error("{0} is not an eligible build site")]
    NotEligible(Province),
    #[error("{0} already used this phase")]
    AlreadyUsed(Province),
    #[error("a fleet cannot be built in {0}")]
    NotCoastal(Province),
    #[error("a coast of {0} must be given")]
    CoastRequired(Province),
    #[error("no own unit at {0}")]
    NoOwnUnit(Province),
}

/// What a build-phase order, or civil disorder, did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Built(Unit),
    Disbanded(Unit),
    Waived,
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildResult {
    pub power: Power,
    /// `None` for a disband imposed by civil disorder.
    pub order: Option<BuildOrder>,
    pub outcome: BuildOutcome,
}

/// Resolves build-phase orders for every power in `options`.
pub fn resolve_builds(
    board: &Board,
    options: &[BuildOption],
    orders: &BuildOrdersByPower,
) -> Vec<BuildResult> {
    let mut results = Vec::new();
    for opt in options {
        let submitted = orders.get(&opt.power).map(Vec::as_slice).unwrap_or(&[]);
        let start = results.len();
        let mut used: Vec<Province> = Vec::new();
        let mut builds = 0;
        let mut disbands = 0;

        for order in submitted {
            let outcome = match *order {
                BuildOrder::Build {
                    province,
                    kind,
                    coast,
                } => {
                    if builds >= opt.builds() {
                        BuildOutcome::Rejected(Rejection::NoBuildsLeft)
                    } else {
                        match check_build(opt, &used, province, kind, coast) {
                            Ok(unit) => {
                                builds += 1;
                                used.push(province);
                                BuildOutcome::Built(unit)
                            }
                            Err(r) => BuildOutcome::Rejected(r),
                        }
                    }
                }
                BuildOrder::Waive => {
                    if builds >= opt.builds() {
                        BuildOutcome::Rejected(Rejection::NoBuildsLeft)
                    } else {
                        builds += 1;
                        BuildOutcome::Waived
                    }
                }
                BuildOrder::Disband { unit } => {
                    if disbands >= opt.disbands() {
                        BuildOutcome::Rejected(Rejection::NoDisbandsOwed)
                    } else if used.contains(&unit) {
                        BuildOutcome::Rejected(Rejection::AlreadyUsed(unit))
                    } else {
                        match board.unit_at(unit) {
                            Some(u) if u.owner == opt.power => {
                                disbands += 1;
                                used.push(unit);
                                BuildOutcome::Disbanded(*u)
                            }
                            _ => BuildOutcome::Rejected(Rejection::NoOwnUnit(unit)),
                        }
                    }
                }
            };
            results.push(BuildResult {
                power: opt.power,
                order: Some(*order),
                outcome,
            });
        }

        if disbands < opt.disbands() {
            let forced = civil_disorder(board, opt.power, &used, opt.disbands() - disbands);
            debug!("{}: civil disorder disbands {} units", opt.power, forced.len());
            results.extend(forced.into_iter().map(|unit| BuildResult {
                power: opt.power,
                order: None,
                outcome: BuildOutcome::Disbanded(unit),
            }));
        }

        for r in &results[start..] {
            debug!("{}: {:?}", r.power, r.outcome);
        }
    }
    results
}

fn check_build(
    opt: &BuildOption,
    used: &[Province],
    province: Province,
    kind: UnitKind,
    coast: Coast,
) -> Result<Unit, Rejection> {
    if !opt.eligible_provinces.contains(&province) {
        return Err(Rejection::NotEligible(province));
    }
    if used.contains(&province) {
        return Err(Rejection::AlreadyUsed(province));
    }
    match kind {
        UnitKind::Army => Ok(Unit::army(opt.power, province)),
        UnitKind::Fleet => {
            if province.kind() != ProvinceKind::Coastal {
                return Err(Rejection::NotCoastal(province));
            }
            if !province.has_coasts() {
                return Ok(Unit::fleet(opt.power, province));
            }
            if province.coasts().contains(&coast) {
                Ok(Unit::fleet_on(opt.power, province, coast))
            } else {
                Err(Rejection::CoastRequired(province))
            }
        }
    }
}

/// Picks `count` units to disband: farthest from the power's home centers
/// first, ties broken by province order.
fn civil_disorder(board: &Board, power: Power, taken: &[Province], count: usize) -> Vec<Unit> {
    let homes: Vec<Province> = power.home_centers().collect();
    let mut candidates: Vec<(u8, Unit)> = board
        .units_of(power)
        .filter(|u| !taken.contains(&u.location))
        .map(|u| {
            let dist = distances_from(u.location, u.kind);
            let nearest = homes
                .iter()
                .filter_map(|h| dist[*h as usize])
                .min()
                .unwrap_or(u8::MAX);
            (nearest, *u)
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.location.cmp(&b.1.location)));
    candidates.into_iter().take(count).map(|(_, u)| u).collect()
}

/// Applies successful builds and disbands to a copy of `board`.
pub fn apply_builds(board: &Board, results: &[BuildResult]) -> Board {
    let mut next = board.clone();
    for r in results {
        match r.outcome {
            BuildOutcome::Built(unit) => {
                if !next.place_unit(unit) {
                    debug!("{}: build site {} already occupied", r.power, unit.location);
                }
            }
            BuildOutcome::Disbanded(unit) => {
                next.remove_unit(unit.location);
            }
            BuildOutcome::Waived | BuildOutcome::Rejected(_) => {}
        }
    }
    next
}
