//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::game::r#match::{MatchConfig, DEFAULT_WIN_SCORE};
use crate::util::time::{DEFAULT_FRAME_RATE, DEFAULT_MAX_FRAME_DELTA, MAX_FRAME_RATE};

/// Two minutes at the default frame rate
pub const DEFAULT_MAX_FRAMES: u64 = 7200;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Simulation frames per second for the harness loop
    pub frame_rate: u32,
    /// Upper bound on a single frame's delta, in seconds
    pub max_frame_delta: f32,

    /// Kills needed to win a round
    pub win_score: u32,
    /// Seed for spread jitter and respawn sampling
    pub match_seed: u64,
    /// Stop the harness after this many frames
    pub max_frames: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            win_score: DEFAULT_WIN_SCORE,
            match_seed: 0,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_frame_delta_ms: u32 = parse_var("MAX_FRAME_DELTA_MS")?
            .unwrap_or((defaults.max_frame_delta * 1000.0).round() as u32);

        let config = Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            frame_rate: parse_var("FRAME_RATE")?.unwrap_or(defaults.frame_rate),
            max_frame_delta: max_frame_delta_ms as f32 / 1000.0,
            win_score: parse_var("WIN_SCORE")?.unwrap_or(defaults.win_score),
            // Unset seed means a fresh random match
            match_seed: parse_var("MATCH_SEED")?.unwrap_or_else(rand::random),
            max_frames: parse_var("MAX_FRAMES")?.unwrap_or(defaults.max_frames),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::Invalid {
                var: "FRAME_RATE",
                value: self.frame_rate.to_string(),
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::Invalid {
                var: "WIN_SCORE",
                value: "0".to_string(),
            });
        }
        if self.max_frames == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_FRAMES",
                value: "0".to_string(),
            });
        }
        if self.max_frame_delta <= 0.0 {
            return Err(ConfigError::Invalid {
                var: "MAX_FRAME_DELTA_MS",
                value: ((self.max_frame_delta * 1000.0).round() as i64).to_string(),
            });
        }
        Ok(())
    }

    /// Match settings derived from this configuration
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.win_score, self.match_seed)
    }
}

/// Parse an optional variable; unset means `None`, unparsable is an error
fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(var)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable is not valid unicode: {0}")]
    NotUnicode(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
