//! Board representation and game-state types.
//!
//! Contains the province table, the map oracle, units, orders, and the
//! overall board state.

pub mod map;
pub mod order;
pub mod province;
pub mod state;
pub mod unit;

pub use map::{coast_entered, is_adjacent, reachable_coasts, valid_moves};
pub use order::{
    BuildOrder, BuildOrdersByPower, Order, OrdersByPower, RetreatOrder, RetreatOrdersByPower,
};
pub use province::{
    Coast, Power, Province, ProvinceInfo, ProvinceKind, ALL_POWERS, ALL_PROVINCES,
    PROVINCE_COUNT, SUPPLY_CENTER_COUNT, VICTORY_CENTERS,
};
pub use state::{Board, Phase, Season};
pub use unit::{Unit, UnitKind};
