//! Run configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use orglink_rank::RankConfig;
use orglink_score::ScoreConfig;
use serde::{Deserialize, Serialize};

/// Scoring and ranking settings, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrglinkConfig {
    pub score: ScoreConfig,
    pub rank: RankConfig,
}

impl OrglinkConfig {
    /// Load from `path`, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config() {
        let config = OrglinkConfig::from_json(r#"{"score": {"state_bonus": 4}}"#).unwrap();
        assert_eq!(config.score.state_bonus, 4);
        assert_eq!(config.score.city_bonus, 5);
        assert_eq!(config.rank, RankConfig::default());
    }

    #[test]
    fn test_no_path_is_default() {
        assert_eq!(OrglinkConfig::load(None).unwrap(), OrglinkConfig::default());
    }

    #[test]
    fn test_bad_json() {
        assert!(OrglinkConfig::from_json("{score:").is_err());
    }
}
