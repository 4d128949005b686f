//! Units and their kinds.

use super::map::can_occupy;
use super::province::{Coast, Power, Province};

/// The kind of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Army,
    Fleet,
}

impl UnitKind {
    /// Single uppercase letter used in order notation.
    pub const fn letter(self) -> char {
        match self {
            UnitKind::Army => 'A',
            UnitKind::Fleet => 'F',
        }
    }

    pub fn from_letter(c: char) -> Option<UnitKind> {
        match c.to_ascii_uppercase() {
            'A' => Some(UnitKind::Army),
            'F' => Some(UnitKind::Fleet),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::Army => "Army",
            UnitKind::Fleet => "Fleet",
        }
    }
}

/// A unit on the board.
///
/// `coast` is only ever set for a fleet standing on a split-coast province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub kind: UnitKind,
    pub owner: Power,
    pub location: Province,
    pub coast: Coast,
}

impl Unit {
    pub fn army(owner: Power, location: Province) -> Self {
        Unit {
            kind: UnitKind::Army,
            owner,
            location,
            coast: Coast::None,
        }
    }

    pub fn fleet(owner: Power, location: Province) -> Self {
        Unit {
            kind: UnitKind::Fleet,
            owner,
            location,
            coast: Coast::None,
        }
    }

    /// A fleet on a named coast of a split-coast province.
    pub fn fleet_on(owner: Power, location: Province, coast: Coast) -> Self {
        Unit {
            kind: UnitKind::Fleet,
            owner,
            location,
            coast,
        }
    }

    pub fn is_fleet(&self) -> bool {
        self.kind == UnitKind::Fleet
    }

    /// Returns true if the unit may stand on its location and its coast is
    /// consistent with it.
    pub fn is_well_placed(&self) -> bool {
        if !can_occupy(self.kind, self.location.kind()) {
            return false;
        }
        match self.kind {
            UnitKind::Army => self.coast == Coast::None,
            UnitKind::Fleet => {
                if self.location.has_coasts() {
                    self.location.coasts().contains(&self.coast)
                } else {
                    self.coast == Coast::None
                }
            }
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.location)?;
        if self.coast != Coast::None {
            write!(f, "/{}", self.coast.abbr().to_ascii_uppercase())?;
        }
        Ok(())
    }
}
