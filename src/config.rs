// src/config.rs
use std::{env, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::domain::rules::{TRANSITION_RATIO_TARGET, Thresholds};
use crate::domain::selection::SelectionStrategy;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    database_url: Option<String>,
    vocabulary_path: Option<PathBuf>,
    store_timeout: Duration,
    batch_concurrency: usize,
    transition_ratio: f64,
    min_word_count: usize,
    selection: SelectionStrategy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Unsupported(String),
}

const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_BATCH_CONCURRENCY: usize = 4;
const DEFAULT_MIN_WORD_COUNT: usize = 300;

fn parse<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_selection(raw: Option<String>) -> Result<SelectionStrategy, ConfigError> {
    let Some(value) = raw.map(|v| v.trim().to_lowercase()).filter(|v| !v.is_empty()) else {
        return Ok(SelectionStrategy::default());
    };
    let seed = value
        .strip_prefix("seeded:")
        .and_then(|seed| seed.parse::<u64>().ok());
    match (value.as_str(), seed) {
        ("round_robin", _) => Ok(SelectionStrategy::RoundRobin),
        ("random", _) => Ok(SelectionStrategy::Random),
        (_, Some(seed)) => Ok(SelectionStrategy::Seeded(seed)),
        _ => Err(ConfigError::Invalid {
            key: "SELECTION_STRATEGY",
            value: value.clone(),
        }),
    }
}

impl EngineConfig {
    /// Build configuration from environment variables, loading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let vocabulary_path = lookup("VOCABULARY_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let store_timeout_ms = parse("STORE_TIMEOUT_MS", lookup("STORE_TIMEOUT_MS"), DEFAULT_STORE_TIMEOUT_MS)?;
        let batch_concurrency = parse("BATCH_CONCURRENCY", lookup("BATCH_CONCURRENCY"), DEFAULT_BATCH_CONCURRENCY)?;
        let transition_ratio = parse(
            "TRANSITION_RATIO_TARGET",
            lookup("TRANSITION_RATIO_TARGET"),
            TRANSITION_RATIO_TARGET,
        )?;
        let min_word_count = parse("MIN_WORD_COUNT", lookup("MIN_WORD_COUNT"), DEFAULT_MIN_WORD_COUNT)?;
        let selection = parse_selection(lookup("SELECTION_STRATEGY"))?;

        if store_timeout_ms == 0 {
            return Err(ConfigError::Unsupported("STORE_TIMEOUT_MS must be positive".into()));
        }
        if batch_concurrency == 0 {
            return Err(ConfigError::Unsupported("BATCH_CONCURRENCY must be positive".into()));
        }
        if !(0.0..=1.0).contains(&transition_ratio) {
            return Err(ConfigError::Unsupported(
                "TRANSITION_RATIO_TARGET must be between 0 and 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            vocabulary_path,
            store_timeout: Duration::from_millis(store_timeout_ms),
            batch_concurrency,
            transition_ratio,
            min_word_count,
            selection,
        })
    }

    /// `None` selects the in-memory stores.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// JSON vocabulary replacing the built-in pt-BR bank.
    pub fn vocabulary_path(&self) -> Option<&Path> {
        self.vocabulary_path.as_deref()
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    pub fn selection(&self) -> SelectionStrategy {
        self.selection
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::default()
            .with_transition_ratio(self.transition_ratio)
            .with_min_words(self.min_word_count)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            vocabulary_path: None,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            transition_ratio: TRANSITION_RATIO_TARGET,
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            selection: SelectionStrategy::default(),
        }
    }
}
