//! Battle configuration with documented constants
//!
//! Every tunable value of the engine is collected here. None of them affect
//! damage math; they shape AI behavior and autoplay pacing only.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BattleError, Result};

/// Configuration for AI selection and autoplay pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    // === AI SELECTION ===
    /// Probability that an automated character uses a special ability
    ///
    /// Only rolled when at least one ability is off cooldown. At 0.3 a
    /// character with a ready ability uses it roughly one turn in three,
    /// so abilities with a 2-3 turn cooldown are not spammed the moment
    /// they come back.
    pub special_ability_chance: f64,

    // === AUTOPLAY PACING ===
    /// Delay between discrete autoplay steps (milliseconds)
    ///
    /// Presentation pacing only. Correctness never depends on it and tests
    /// run with an instant pacer.
    pub step_delay_ms: u64,

    /// Interval at which a paused autoplay re-checks its pause/stop flags
    ///
    /// Bounds how long a stop or resume request can go unnoticed.
    /// Must be non-zero.
    pub pause_poll_ms: u64,

    /// Delay before the first autoplay step (milliseconds)
    ///
    /// Gives a renderer time to show the introductory log lines.
    pub intro_delay_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            special_ability_chance: 0.3,
            step_delay_ms: 1000,
            pause_poll_ms: 100,
            intro_delay_ms: 500,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for headless runs: no pacing delays at all
    pub fn headless() -> Self {
        Self {
            step_delay_ms: 0,
            intro_delay_ms: 0,
            pause_poll_ms: 1,
            ..Self::default()
        }
    }

    /// Parse a config from TOML; missing fields take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.special_ability_chance) {
            return Err(BattleError::configuration(format!(
                "special_ability_chance ({}) must be within [0, 1]",
                self.special_ability_chance
            )));
        }

        if self.pause_poll_ms == 0 {
            return Err(BattleError::configuration(
                "pause_poll_ms must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Load a config from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<BattleConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    BattleConfig::from_toml_str(&contents)
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<BattleConfig> = OnceLock::new();

/// Get the global battle config (initializes with defaults if not set)
pub fn config() -> &'static BattleConfig {
    CONFIG.get_or_init(BattleConfig::default)
}

/// Set the global battle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BattleConfig) -> std::result::Result<(), BattleConfig> {
    CONFIG.set(config)
}
