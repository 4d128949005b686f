//! Concordat: a Diplomacy adjudicator and computer player.
//!
//! - [`board`]: the standard map, units, orders and board state
//! - [`resolve`]: movement adjudication, retreats, builds and phase changes
//! - [`movegen`]: legal order generation
//! - [`eval`]: heuristic position scoring
//! - [`search`]: order selection for computer-controlled powers
//! - [`notation`]: orders as short text
//! - [`selfplay`]: complete games between computer players

pub mod board;
pub mod eval;
pub mod movegen;
pub mod notation;
pub mod resolve;
pub mod search;
pub mod selfplay;
