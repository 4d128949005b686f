//! Order selection for computer-controlled powers.
//!
//! A movement turn runs baseline → candidates → simulation → selection.
//! Retreat and build phases use the direct heuristics in [`adjustment`].

pub mod adjustment;
pub mod baseline;
pub mod candidates;
pub mod config;
pub mod simulate;

use log::debug;

use crate::board::order::{BuildOrder, Order, RetreatOrder};
use crate::board::province::Power;
use crate::board::state::Board;
use crate::resolve::adjudicator::RetreatOption;
use crate::resolve::build::BuildOption;

pub use adjustment::{decide_builds, decide_retreats};
pub use baseline::baseline_orders;
pub use candidates::{generate_candidates, has_collision, score_order};
pub use config::{AiConfig, ConfigError};
pub use simulate::{score_candidates, select_best, simulate};

/// Decision engine for one or more computer-controlled powers.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    pub config: AiConfig,
}

impl Planner {
    pub fn new(config: AiConfig) -> Self {
        Planner { config }
    }

    /// One legal order per unit of `power`.
    pub fn decide_orders(&self, board: &Board, power: Power) -> Vec<Order> {
        let baseline = baseline_orders(board, power);
        if baseline.is_empty() {
            return baseline;
        }
        let candidates = generate_candidates(board, power, &baseline, &self.config);
        let scores = score_candidates(
            board,
            power,
            &candidates,
            &self.config.weights,
            self.config.parallel,
        );
        match select_best(&scores) {
            Some(best) => {
                debug!(
                    "{power}: {} candidates, best #{best} scores {:.1} (baseline {:.1})",
                    candidates.len(),
                    scores[best],
                    scores[0]
                );
                candidates.into_iter().nth(best).unwrap_or(baseline)
            }
            None => board.units_of(power).map(|u| Order::hold(u.location)).collect(),
        }
    }

    pub fn decide_retreats(
        &self,
        board: &Board,
        options: &[RetreatOption],
        power: Power,
    ) -> Vec<RetreatOrder> {
        adjustment::decide_retreats(board, options, power)
    }

    pub fn decide_builds(&self, board: &Board, option: &BuildOption) -> Vec<BuildOrder> {
        adjustment::decide_builds(board, option)
    }
}

/// [`Planner::decide_orders`] with the default configuration.
pub fn decide_orders(board: &Board, power: Power) -> Vec<Order> {
    Planner::default().decide_orders(board, power)
}
