//! Orders for the three kinds of phase.
//!
//! Movement orders address their unit by the province it stands in: at
//! resolution time a province holds at most one unit, so no persistent unit
//! id is needed. Each variant carries only the fields meaningful to it.

use std::collections::BTreeMap;

use super::province::{Coast, Power, Province};
use super::unit::UnitKind;

/// A movement-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// `A vie H`
    Hold { unit: Province },

    /// `A bud - rum`, `F mao - spa/nc`. `coast` is `Coast::None` unless the
    /// destination has named coasts; an army moving to a non-adjacent
    /// coastal province is a convoyed move.
    Move {
        unit: Province,
        dest: Province,
        coast: Coast,
    },

    /// `A tyr S A vie` (hold support, `dest` is `None`) or
    /// `A gal S A bud - rum` (move support).
    Support {
        unit: Province,
        supported: Province,
        dest: Option<Province>,
    },

    /// `F mao C A bre - spa`
    Convoy {
        unit: Province,
        convoyed: Province,
        dest: Province,
    },
}

impl Order {
    pub fn hold(unit: Province) -> Self {
        Order::Hold { unit }
    }

    pub fn move_to(unit: Province, dest: Province) -> Self {
        Order::Move {
            unit,
            dest,
            coast: Coast::None,
        }
    }

    pub fn move_to_coast(unit: Province, dest: Province, coast: Coast) -> Self {
        Order::Move { unit, dest, coast }
    }

    pub fn support_hold(unit: Province, supported: Province) -> Self {
        Order::Support {
            unit,
            supported,
            dest: None,
        }
    }

    pub fn support_move(unit: Province, supported: Province, dest: Province) -> Self {
        Order::Support {
            unit,
            supported,
            dest: Some(dest),
        }
    }

    pub fn convoy(unit: Province, convoyed: Province, dest: Province) -> Self {
        Order::Convoy {
            unit,
            convoyed,
            dest,
        }
    }

    /// The province of the unit issuing this order.
    pub fn unit(&self) -> Province {
        match *self {
            Order::Hold { unit }
            | Order::Move { unit, .. }
            | Order::Support { unit, .. }
            | Order::Convoy { unit, .. } => unit,
        }
    }

    /// Destination of a move order.
    pub fn move_dest(&self) -> Option<Province> {
        match *self {
            Order::Move { dest, .. } => Some(dest),
            _ => None,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Order::Move { .. })
    }
}

/// Orders submitted for one turn-phase, grouped by the submitting power.
pub type OrdersByPower = BTreeMap<Power, Vec<Order>>;

/// A retreat-phase order for a dislodged unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetreatOrder {
    Retreat {
        unit: Province,
        dest: Province,
        coast: Coast,
    },
    Disband {
        unit: Province,
    },
}

impl RetreatOrder {
    /// Province the dislodged unit was driven out of.
    pub fn unit(&self) -> Province {
        match *self {
            RetreatOrder::Retreat { unit, .. } | RetreatOrder::Disband { unit } => unit,
        }
    }
}

/// Retreat orders grouped by the submitting power.
pub type RetreatOrdersByPower = BTreeMap<Power, Vec<RetreatOrder>>;

/// A build-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildOrder {
    Build {
        province: Province,
        kind: UnitKind,
        coast: Coast,
    },
    Disband {
        unit: Province,
    },
    /// Voluntarily skip one build.
    Waive,
}

/// Build orders grouped by the submitting power.
pub type BuildOrdersByPower = BTreeMap<Power, Vec<BuildOrder>>;
