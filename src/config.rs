//! Scheduling constants and study configuration.
//!
//! Every tunable number used by the engine lives here. The only value a
//! deployment may override is the daily new-card limit.

use serde::Deserialize;
use std::path::Path;

// ==================== Ease Factor ====================

/// Lowest ease factor a card can reach
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Highest ease factor, also the starting value
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Ease factor of a freshly created card
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease penalty for `again`
pub const AGAIN_EASE_PENALTY: f64 = 0.2;

/// Ease penalty for `hard`
pub const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease bonus for `easy` (applied twice per easy review)
pub const EASY_EASE_BONUS: f64 = 0.1;

// ==================== Intervals ====================

/// Interval of a new or reset card, in days
pub const INITIAL_INTERVAL_DAYS: u32 = 1;

/// Interval after the second successful review, in days
pub const SECOND_INTERVAL_DAYS: u32 = 6;

/// `hard` shrinks the current interval by this factor
pub const HARD_INTERVAL_FACTOR: f64 = 0.8;

/// `easy` stretches the computed interval by this factor
pub const EASY_INTERVAL_BONUS: f64 = 1.3;

// ==================== Summary & Stats ====================

/// Default number of new cards introduced per day
pub const DEFAULT_DAILY_NEW_CARD_LIMIT: usize = 20;

/// Rough study time per card, in minutes
pub const MINUTES_PER_CARD: f64 = 0.5;

/// Upper bounds (inclusive) of total due cards for the first four tiers;
/// anything above the last bound lands in the fifth tier
pub const TIER_THRESHOLDS: [usize; 4] = [5, 15, 30, 50];

/// Cards with at least this many repetitions count as mature
pub const MATURE_REPETITIONS: u32 = 3;

// ==================== Study Configuration ====================

/// Environment variable consulted when the config file has no limit
pub const DAILY_LIMIT_ENV: &str = "DAILY_NEW_CARD_LIMIT";

/// Config file read by [`load_default_study_config`]
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
  study: Option<StudySection>,
}

#[derive(Debug, Deserialize)]
struct StudySection {
  daily_new_card_limit: Option<usize>,
}

/// Settings a deployment can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyConfig {
  /// New cards introduced per day when a deck has no limit of its own
  pub daily_new_card_limit: usize,
}

impl Default for StudyConfig {
  fn default() -> Self {
    Self {
      daily_new_card_limit: DEFAULT_DAILY_NEW_CARD_LIMIT,
    }
  }
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  IoError(String, String),
  ParseError(String, String),
  InvalidEnv(String, String),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ConfigError::IoError(path, err) => write!(f, "IO error reading {}: {}", path, err),
      ConfigError::ParseError(path, err) => write!(f, "Parse error in {}: {}", path, err),
      ConfigError::InvalidEnv(var, value) => {
        write!(f, "{} must be a non-negative integer, got '{}'", var, value)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

/// Load study config with priority: config file > .env / environment > default
pub fn load_study_config(path: &Path) -> Result<StudyConfig, ConfigError> {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  let contents = match std::fs::read_to_string(path) {
    Ok(contents) => Some(contents),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
    Err(e) => return Err(ConfigError::IoError(path.display().to_string(), e.to_string())),
  };
  let env_value = std::env::var(DAILY_LIMIT_ENV).ok();

  resolve_study_config(
    &path.display().to_string(),
    contents.as_deref(),
    env_value.as_deref(),
  )
}

/// Load study config from `config.toml` in the working directory.
pub fn load_default_study_config() -> Result<StudyConfig, ConfigError> {
  load_study_config(Path::new(DEFAULT_CONFIG_FILE))
}

fn resolve_study_config(
  source: &str,
  file_contents: Option<&str>,
  env_value: Option<&str>,
) -> Result<StudyConfig, ConfigError> {
  // Priority 1: config file
  if let Some(contents) = file_contents {
    let config: AppConfig = toml::from_str(contents)
      .map_err(|e| ConfigError::ParseError(source.to_string(), e.to_string()))?;
    if let Some(limit) = config.study.and_then(|s| s.daily_new_card_limit) {
      tracing::info!("Using daily new card limit from {}: {}", source, limit);
      return Ok(StudyConfig {
        daily_new_card_limit: limit,
      });
    }
  }

  // Priority 2: environment
  if let Some(value) = env_value {
    let limit = value
      .trim()
      .parse::<usize>()
      .map_err(|_| ConfigError::InvalidEnv(DAILY_LIMIT_ENV.to_string(), value.to_string()))?;
    tracing::info!("Using daily new card limit from {} env: {}", DAILY_LIMIT_ENV, limit);
    return Ok(StudyConfig {
      daily_new_card_limit: limit,
    });
  }

  // Default
  tracing::info!(
    "Using default daily new card limit: {}",
    DEFAULT_DAILY_NEW_CARD_LIMIT
  );
  Ok(StudyConfig::default())
}
