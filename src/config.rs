//! Application configuration.
//!
//! Settings come from an optional TOML file; command-line flags override
//! individual values afterwards.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{FirstAvailable, GameMode, Mark, Minimax, ResetPolicy, Strategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "NOUGHTS_CONFIG";

/// Which strategy drives the computer player.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentKind {
    /// Perfect play via exhaustive minimax.
    #[default]
    Minimax,
    /// Always takes the first empty square.
    First,
}

impl OpponentKind {
    /// Builds the strategy for this opponent.
    #[instrument]
    pub fn strategy(self) -> Arc<dyn Strategy> {
        match self {
            OpponentKind::Minimax => Arc::new(Minimax),
            OpponentKind::First => Arc::new(FirstAvailable),
        }
    }
}

/// Settings for a play session.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cosmetic pause before the computer moves, in milliseconds.
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,

    /// Mode to start in; asked interactively when absent.
    #[serde(default)]
    mode: Option<GameMode>,

    /// Human's mark against the computer; asked interactively when absent.
    #[serde(default)]
    human_mark: Option<Mark>,

    /// Strategy for the computer player.
    #[serde(default)]
    opponent: OpponentKind,

    /// What "play again" keeps.
    #[serde(default)]
    reset_policy: ResetPolicy,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_delay_ms() -> u64 {
    500
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            mode: None,
            human_mark: None,
            opponent: OpponentKind::default(),
            reset_policy: ResetPolicy::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(delay_ms = config.delay_ms, opponent = %config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config file to use and loads it.
    ///
    /// An explicit path must exist. Otherwise `NOUGHTS_CONFIG` is tried,
    /// then `noughts.toml` in the working directory; if neither is present
    /// the defaults are used.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(PathBuf::from(path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::from_file(fallback);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Computer thinking delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Overrides the thinking delay.
    pub fn with_delay_ms(mut self, delay_ms: Option<u64>) -> Self {
        if let Some(delay_ms) = delay_ms {
            self.delay_ms = delay_ms;
        }
        self
    }

    /// Overrides the game mode.
    pub fn with_mode(mut self, mode: Option<GameMode>) -> Self {
        if mode.is_some() {
            self.mode = mode;
        }
        self
    }

    /// Overrides the human's mark.
    pub fn with_human_mark(mut self, mark: Option<Mark>) -> Self {
        if mark.is_some() {
            self.human_mark = mark;
        }
        self
    }

    /// Overrides the computer strategy.
    pub fn with_opponent(mut self, opponent: Option<OpponentKind>) -> Self {
        if let Some(opponent) = opponent {
            self.opponent = opponent;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
