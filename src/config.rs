use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::mapping::traits::DEFAULT_LABEL_SEED;

/// How relationship labels are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelerKind {
    /// Uniform random, fresh entropy per session (default)
    Random,
    /// Uniform random from a fixed seed, so runs are reproducible
    Seeded,
    /// Hash of the theme pair, so a pair always gets the same label
    Hashed,
}

impl LabelerKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" | "random" => Ok(LabelerKind::Random),
            "seeded" => Ok(LabelerKind::Seeded),
            "hashed" => Ok(LabelerKind::Hashed),
            other => anyhow::bail!(
                "Unknown TOPICMAP_LABELER value '{other}'. Expected one of: random, seeded, hashed"
            ),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Relationship labeling strategy (TOPICMAP_LABELER)
    pub labeler: LabelerKind,
    /// Seed for the `seeded` labeler (TOPICMAP_SEED)
    pub label_seed: u64,
    /// Artificial latency before each analysis run (TOPICMAP_DELAY_MS)
    pub delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labeler: LabelerKind::Random,
            label_seed: DEFAULT_LABEL_SEED,
            delay: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. `load` uses the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let labeler = match lookup("TOPICMAP_LABELER") {
            Some(raw) => LabelerKind::parse(&raw)?,
            None => defaults.labeler,
        };

        let label_seed = match lookup("TOPICMAP_SEED") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("TOPICMAP_SEED must be an unsigned integer, got '{raw}'"))?,
            None => defaults.label_seed,
        };

        let delay = match lookup("TOPICMAP_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().with_context(|| {
                format!("TOPICMAP_DELAY_MS must be a number of milliseconds, got '{raw}'")
            })?),
            None => defaults.delay,
        };

        Ok(Self {
            labeler,
            label_seed,
            delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.labeler, LabelerKind::Random);
        assert_eq!(config.label_seed, DEFAULT_LABEL_SEED);
        assert!(config.delay.is_zero());
    }

    #[test]
    fn test_explicit_values() {
        let config = from_pairs(&[
            ("TOPICMAP_LABELER", "Hashed"),
            ("TOPICMAP_SEED", "7"),
            ("TOPICMAP_DELAY_MS", "250"),
        ])
        .unwrap();
        assert_eq!(config.labeler, LabelerKind::Hashed);
        assert_eq!(config.label_seed, 7);
        assert_eq!(config.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(from_pairs(&[("TOPICMAP_LABELER", "dice")]).is_err());
        assert!(from_pairs(&[("TOPICMAP_SEED", "-1")]).is_err());
        assert!(from_pairs(&[("TOPICMAP_DELAY_MS", "soon")]).is_err());
    }
}
