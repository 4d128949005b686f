//! Board state.
//!
//! A `Board` is the complete snapshot the engine works on: units, supply
//! center ownership, and the current season, phase and year. Per-province
//! data is stored in fixed-size arrays indexed by `Province as usize`, so
//! cloning a board is a flat copy.

use serde::Serialize;

use super::province::{Coast, Power, Province, ALL_POWERS, ALL_PROVINCES, PROVINCE_COUNT};
use super::unit::{Unit, UnitKind};

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Fall,
}

/// The phase within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Movement,
    Retreat,
    Build,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub year: u16,
    pub season: Season,
    pub phase: Phase,
    units: [Option<Unit>; PROVINCE_COUNT],
    sc_owner: [Option<Power>; PROVINCE_COUNT],
}

impl Board {
    /// An empty board: no units, every supply center neutral.
    pub fn empty(year: u16, season: Season, phase: Phase) -> Self {
        Board {
            year,
            season,
            phase,
            units: [None; PROVINCE_COUNT],
            sc_owner: [None; PROVINCE_COUNT],
        }
    }

    /// The standard opening position of Spring 1901.
    pub fn standard() -> Self {
        use Power::*;
        use Province::*;

        let mut board = Board::empty(1901, Season::Spring, Phase::Movement);
        let setup = [
            Unit::army(Austria, Vie),
            Unit::army(Austria, Bud),
            Unit::fleet(Austria, Tri),
            Unit::fleet(England, Lon),
            Unit::fleet(England, Edi),
            Unit::army(England, Lvp),
            Unit::fleet(France, Bre),
            Unit::army(France, Par),
            Unit::army(France, Mar),
            Unit::fleet(Germany, Kie),
            Unit::army(Germany, Ber),
            Unit::army(Germany, Mun),
            Unit::fleet(Italy, Nap),
            Unit::army(Italy, Rom),
            Unit::army(Italy, Ven),
            Unit::fleet_on(Russia, Stp, Coast::South),
            Unit::army(Russia, Mos),
            Unit::army(Russia, War),
            Unit::fleet(Russia, Sev),
            Unit::fleet(Turkey, Ank),
            Unit::army(Turkey, Con),
            Unit::army(Turkey, Smy),
        ];
        for unit in setup {
            board.place_unit(unit);
        }
        for p in ALL_PROVINCES {
            if let Some(home) = p.home_power() {
                board.set_sc_owner(p, Some(home));
            }
        }
        board
    }

    /// Places a unit at its location. Returns false, leaving the board
    /// untouched, if the province is occupied or the unit's coast does not
    /// fit its location.
    pub fn place_unit(&mut self, unit: Unit) -> bool {
        let idx = unit.location as usize;
        if self.units[idx].is_some() || !unit.is_well_placed() {
            return false;
        }
        self.units[idx] = Some(unit);
        true
    }

    pub fn remove_unit(&mut self, province: Province) -> Option<Unit> {
        self.units[province as usize].take()
    }

    pub fn unit_at(&self, province: Province) -> Option<&Unit> {
        self.units[province as usize].as_ref()
    }

    pub fn is_occupied(&self, province: Province) -> bool {
        self.units[province as usize].is_some()
    }

    /// All units in province order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().flatten()
    }

    pub fn units_of(&self, power: Power) -> impl Iterator<Item = &Unit> {
        self.units().filter(move |u| u.owner == power)
    }

    pub fn unit_count(&self, power: Power) -> usize {
        self.units_of(power).count()
    }

    pub fn sc_owner(&self, province: Province) -> Option<Power> {
        self.sc_owner[province as usize]
    }

    /// Sets the owner of a supply center. Ignored for other provinces.
    pub fn set_sc_owner(&mut self, province: Province, owner: Option<Power>) {
        if province.is_supply_center() {
            self.sc_owner[province as usize] = owner;
        }
    }

    /// Supply centers owned by `power`, in province order.
    pub fn centers_of(&self, power: Power) -> impl Iterator<Item = Province> + '_ {
        ALL_PROVINCES
            .into_iter()
            .filter(move |p| self.sc_owner[*p as usize] == Some(power))
    }

    pub fn center_count(&self, power: Power) -> usize {
        self.centers_of(power).count()
    }

    /// Powers with at least one unit on the board.
    pub fn active_powers(&self) -> Vec<Power> {
        ALL_POWERS
            .into_iter()
            .filter(|&p| self.units_of(p).next().is_some())
            .collect()
    }

    /// Kind of the unit standing at `province`, if any.
    pub fn kind_at(&self, province: Province) -> Option<UnitKind> {
        self.unit_at(province).map(|u| u.kind)
    }
}
