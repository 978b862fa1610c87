//! Search configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InfexionError, Result};
use crate::eval::Heuristics;

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 4;

/// Default number of successors expanded per node
pub const DEFAULT_BREADTH: usize = 6;

/// Turns after which a game is declared drawn
pub const MAX_TURNS: u32 = 343;

/// Alpha-beta search settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched from the root, counting the root move
    pub depth: u32,
    /// Successors kept per node after pruning
    pub breadth: usize,
    /// Play an eliminating spread without searching
    pub finish_immediate_wins: bool,
    /// Weights for the attack/defence evaluator
    pub heuristics: Heuristics,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            breadth: DEFAULT_BREADTH,
            finish_immediate_wins: true,
            heuristics: Heuristics::default(),
        }
    }
}

impl SearchConfig {
    /// Create config with a given depth and breadth
    pub fn new(depth: u32, breadth: usize) -> Self {
        Self {
            depth,
            breadth,
            ..Default::default()
        }
    }

    /// Set custom heuristics
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(InfexionError::InvalidConfig("depth must be at least 1".into()));
        }
        if self.breadth == 0 {
            return Err(InfexionError::InvalidConfig("breadth must be at least 1".into()));
        }
        if !self.heuristics.is_valid() {
            return Err(InfexionError::InvalidConfig(
                "heuristic weights must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 4);
        assert_eq!(config.breadth, 6);
        assert!(config.finish_immediate_wins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"depth": 2, "heuristics": {"attack_weight": 2.0}}"#).unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.breadth, DEFAULT_BREADTH);
        assert_eq!(config.heuristics.attack_weight, 2.0);
        assert_eq!(config.heuristics.material_weight, 1.0);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(SearchConfig::new(0, 6).validate().is_err());
        assert!(SearchConfig::new(3, 0).validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("infexion-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"depth": 3, "breadth": 5}"#).unwrap();
        let config = SearchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config, SearchConfig::new(3, 5));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SearchConfig::load(Path::new("/nonexistent/infexion.json")).unwrap_err();
        assert!(matches!(err, InfexionError::Io(_)));
    }
}
