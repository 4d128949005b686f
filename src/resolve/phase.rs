//! State transitions between phases.
//!
//! Applies adjudicated movement to the board, captures supply centers, and
//! sequences the phases of a game year:
//!
//! - Spring Movement -> Spring Retreat (if dislodged) OR Fall Movement
//! - Spring Retreat  -> Fall Movement
//! - Fall Movement   -> Fall Retreat (if dislodged) OR Fall Build
//! - Fall Retreat    -> Fall Build
//! - Fall Build      -> Spring Movement (next year)
//!
//! Every function here takes the board by reference and returns a new one.

use crate::board::province::{Power, ALL_POWERS, ALL_PROVINCES, VICTORY_CENTERS};
use crate::board::state::{Board, Phase, Season};
use crate::board::unit::Unit;

use super::adjudicator::{RetreatOption, Verdict};

/// Moves every successful mover and removes every dislodged unit.
///
/// Units are lifted off the board before any is put down again, so
/// rotations and swaps land correctly.
pub fn apply_results(board: &Board, verdicts: &[Verdict], dislodged: &[RetreatOption]) -> Board {
    let mut next = board.clone();
    for d in dislodged {
        next.remove_unit(d.origin);
    }
    let mut arriving = Vec::new();
    for v in verdicts {
        if let Some((dest, coast)) = v.moved_to() {
            if let Some(unit) = next.remove_unit(v.unit.location) {
                arriving.push(Unit {
                    location: dest,
                    coast,
                    ..unit
                });
            }
        }
    }
    for unit in arriving {
        let placed = next.place_unit(unit);
        debug_assert!(placed, "two units arrived at {}", unit.location);
    }
    next
}

/// Hands every occupied supply center to the occupying power.
pub fn update_supply_centers(board: &Board) -> Board {
    let mut next = board.clone();
    for p in ALL_PROVINCES {
        if !p.is_supply_center() {
            continue;
        }
        if let Some(unit) = board.unit_at(p) {
            next.set_sc_owner(p, Some(unit.owner));
        }
    }
    next
}

/// The season and phase that follow the board's current ones.
pub fn next_phase(board: &Board, had_dislodgements: bool) -> (Season, Phase) {
    match board.phase {
        Phase::Movement if had_dislodgements => (board.season, Phase::Retreat),
        Phase::Movement | Phase::Retreat => match board.season {
            Season::Spring => (Season::Fall, Phase::Movement),
            Season::Fall => (Season::Fall, Phase::Build),
        },
        Phase::Build => (Season::Spring, Phase::Movement),
    }
}

/// Moves the board on to the next phase.
///
/// Supply centers change hands when leaving the Fall Movement phase without
/// retreats, or the Fall Retreat phase. The year increments entering Spring.
pub fn advance(board: &Board, had_dislodgements: bool) -> Board {
    let (season, phase) = next_phase(board, had_dislodgements);
    let mut next = if board.season == Season::Fall && phase == Phase::Build {
        update_supply_centers(board)
    } else {
        board.clone()
    };
    if season == Season::Spring && phase == Phase::Movement {
        next.year += 1;
    }
    next.season = season;
    next.phase = phase;
    next
}

/// The power holding enough supply centers to win, if any.
pub fn winner(board: &Board) -> Option<Power> {
    ALL_POWERS
        .into_iter()
        .find(|&p| board.center_count(p) >= VICTORY_CENTERS)
}
