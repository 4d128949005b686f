//! Order resolution and phase transitions.
//!
//! Movement orders are validated, then adjudicated with Kruijswijk's
//! guess-and-check algorithm. Retreat and build phases have their own
//! resolvers; `phase` applies results and sequences the game year.

pub mod adjudicator;
pub mod build;
pub mod phase;
pub mod retreat;
pub mod validate;

pub use adjudicator::{resolve, Adjudicator, FailReason, Resolution, RetreatOption, Verdict};
pub use build::{
    apply_builds, calculate_builds, resolve_builds, BuildOption, BuildOutcome, BuildResult,
    Rejection,
};
pub use phase::{advance, apply_results, next_phase, update_supply_centers, winner};
pub use retreat::{apply_retreats, resolve_retreats, RetreatOutcome, RetreatResult};
pub use validate::{validate, Illegal};
