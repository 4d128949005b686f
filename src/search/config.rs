//! AI configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::eval::ScoreWeights;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("weight `{0}` must be a finite number")]
    NonFiniteWeight(&'static str),
    #[error("candidate_budget must be at least 1")]
    ZeroBudget,
}

/// Tuning knobs for the movement-phase planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub weights: ScoreWeights,
    /// Single-unit substitutions tried per turn.
    pub candidate_budget: usize,
    /// "A moves, B supports" variants tried per turn.
    pub pair_budget: usize,
    /// Score candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            weights: ScoreWeights::default(),
            candidate_budget: 40,
            pair_budget: 20,
            parallel: true,
        }
    }
}

impl AiConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let named = [
            ("supply_center", w.supply_center),
            ("unit", w.unit),
            ("near_target", w.near_target),
            ("near_enemy_center", w.near_enemy_center),
            ("threatened_center", w.threatened_center),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFiniteWeight(name));
        }
        if self.candidate_budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(())
    }
}
