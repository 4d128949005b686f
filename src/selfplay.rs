//! Self-play games.
//!
//! Plays complete games from the standard opening, every power controlled
//! by the planner except those listed in `random_powers`, which play random
//! legal orders. Each phase's orders and the resulting supply-center counts
//! are recorded.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::board::order::{BuildOrdersByPower, OrdersByPower, RetreatOrdersByPower};
use crate::board::province::{Power, ALL_POWERS};
use crate::board::state::{Board, Phase, Season};
use crate::movegen::{random_builds, random_orders, random_retreats};
use crate::notation::{format_build, format_order, format_retreat};
use crate::resolve::adjudicator::{Adjudicator, RetreatOption};
use crate::resolve::build::{apply_builds, calculate_builds, resolve_builds};
use crate::resolve::phase::{advance, apply_results, winner};
use crate::resolve::retreat::{apply_retreats, resolve_retreats};
use crate::search::{AiConfig, Planner};

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Last game year played; the game is a draw if nobody has won by then.
    pub max_year: u16,
    pub seed: u64,
    /// Powers playing random legal orders instead of the planner.
    pub random_powers: Vec<Power>,
    pub ai: AiConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            max_year: 1910,
            seed: 1,
            random_powers: Vec::new(),
            ai: AiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseRecord {
    pub year: u16,
    pub season: Season,
    pub phase: Phase,
    /// Submitted orders in short notation.
    pub orders: BTreeMap<Power, Vec<String>>,
    /// Units dislodged during a movement phase.
    pub dislodged: usize,
    /// Supply centers per power once the phase is over.
    pub centers: BTreeMap<Power, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub seed: u64,
    pub winner: Option<Power>,
    pub final_year: u16,
    pub phases: Vec<PhaseRecord>,
}

fn center_counts(board: &Board) -> BTreeMap<Power, usize> {
    ALL_POWERS
        .into_iter()
        .map(|p| (p, board.center_count(p)))
        .filter(|(_, n)| *n > 0)
        .collect()
}

struct Game<'a> {
    config: &'a SelfPlayConfig,
    planner: Planner,
    adjudicator: Adjudicator,
    rng: SmallRng,
    board: Board,
    pending: Vec<RetreatOption>,
    phases: Vec<PhaseRecord>,
}

impl Game<'_> {
    fn is_random(&self, power: Power) -> bool {
        self.config.random_powers.contains(&power)
    }

    fn record(&mut self, orders: BTreeMap<Power, Vec<String>>, dislodged: usize, after: &Board) {
        self.phases.push(PhaseRecord {
            year: self.board.year,
            season: self.board.season,
            phase: self.board.phase,
            orders,
            dislodged,
            centers: center_counts(after),
        });
    }

    fn movement(&mut self) {
        let mut orders = OrdersByPower::new();
        for power in self.board.active_powers() {
            let list = if self.is_random(power) {
                random_orders(&self.board, power, &mut self.rng)
            } else {
                self.planner.decide_orders(&self.board, power)
            };
            orders.insert(power, list);
        }

        let res = self.adjudicator.resolve(&self.board, &orders);
        let after = apply_results(&self.board, &res.verdicts, &res.dislodged);
        let text: BTreeMap<Power, Vec<String>> = orders
            .iter()
            .map(|(p, list)| (*p, list.iter().map(format_order).collect()))
            .collect();
        self.record(text, res.dislodged.len(), &after);

        let had_dislodgements = !res.dislodged.is_empty();
        self.pending = res.dislodged;
        self.board = advance(&after, had_dislodgements);
    }

    fn retreats(&mut self) {
        let mut powers: Vec<Power> = self.pending.iter().map(|o| o.unit.owner).collect();
        powers.sort();
        powers.dedup();

        let mut orders = RetreatOrdersByPower::new();
        for power in powers {
            let list = if self.is_random(power) {
                random_retreats(&self.pending, power, &mut self.rng)
            } else {
                self.planner.decide_retreats(&self.board, &self.pending, power)
            };
            orders.insert(power, list);
        }

        let results = resolve_retreats(&self.pending, &orders);
        let after = apply_retreats(&self.board, &results);
        let text: BTreeMap<Power, Vec<String>> = orders
            .iter()
            .map(|(p, list)| (*p, list.iter().map(format_retreat).collect()))
            .collect();
        self.record(text, 0, &after);

        self.pending.clear();
        self.board = advance(&after, false);
    }

    fn builds(&mut self) {
        let options: Vec<_> = calculate_builds(&self.board, &ALL_POWERS)
            .into_iter()
            .filter(|o| o.delta != 0)
            .collect();

        let mut orders = BuildOrdersByPower::new();
        for option in &options {
            let list = if self.is_random(option.power) {
                random_builds(&self.board, option, &mut self.rng)
            } else {
                self.planner.decide_builds(&self.board, option)
            };
            orders.insert(option.power, list);
        }

        let results = resolve_builds(&self.board, &options, &orders);
        let after = apply_builds(&self.board, &results);
        let text: BTreeMap<Power, Vec<String>> = orders
            .iter()
            .map(|(p, list)| (*p, list.iter().map(format_build).collect()))
            .collect();
        self.record(text, 0, &after);

        self.board = advance(&after, false);
    }
}

/// Plays one game to a win or to the end of `config.max_year`.
pub fn play_game(config: &SelfPlayConfig) -> GameRecord {
    let mut game = Game {
        config,
        planner: Planner::new(config.ai.clone()),
        adjudicator: Adjudicator::new(),
        rng: SmallRng::seed_from_u64(config.seed),
        board: Board::standard(),
        pending: Vec::new(),
        phases: Vec::new(),
    };

    let mut won = None;
    while game.board.year <= config.max_year {
        won = winner(&game.board);
        if won.is_some() {
            break;
        }
        match game.board.phase {
            Phase::Movement => game.movement(),
            Phase::Retreat => game.retreats(),
            Phase::Build => game.builds(),
        }
        if game.board.season == Season::Spring && game.board.phase == Phase::Movement {
            debug!("seed {}: entering {}", config.seed, game.board.year);
        }
    }
    if won.is_none() {
        won = winner(&game.board);
    }

    let final_year = game.phases.last().map_or(game.board.year, |p| p.year);
    match won {
        Some(p) => info!("seed {}: {p} wins in {final_year}", config.seed),
        None => info!("seed {}: draw after {final_year}", config.seed),
    }
    GameRecord {
        seed: config.seed,
        winner: won,
        final_year,
        phases: game.phases,
    }
}

/// Plays `count` games on the rayon pool, seeds `config.seed`,
/// `config.seed + 1`, ... Records come back in seed order.
pub fn play_games(config: &SelfPlayConfig, count: usize) -> Vec<GameRecord> {
    (0..count as u64)
        .into_par_iter()
        .map(|i| {
            let config = SelfPlayConfig {
                seed: config.seed.wrapping_add(i),
                ..config.clone()
            };
            play_game(&config)
        })
        .collect()
}
