use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::constants::*;
use crate::error::{MenuError, Result};

/// Runtime-tunable thresholds for scoring, classification and health tiers.
///
/// Every field falls back to its named default when absent from the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub popularity_volume_ceiling: f64,
    pub profitability_margin_ratio: f64,
    pub classification_threshold: f64,
    pub food_cost_healthy_max: f64,
    pub food_cost_warning_max: f64,
    pub target_food_cost_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            popularity_volume_ceiling: POPULARITY_VOLUME_CEILING,
            profitability_margin_ratio: PROFITABILITY_MARGIN_RATIO,
            classification_threshold: CLASSIFICATION_THRESHOLD,
            food_cost_healthy_max: FOOD_COST_HEALTHY_MAX,
            food_cost_warning_max: FOOD_COST_WARNING_MAX,
            target_food_cost_pct: TARGET_FOOD_COST_PCT,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML config string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading engine config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(MenuError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, v
                )))
            }
        };

        positive("popularity_volume_ceiling", self.popularity_volume_ceiling)?;
        positive("profitability_margin_ratio", self.profitability_margin_ratio)?;

        if !(0.0..=SCORE_CAP).contains(&self.classification_threshold) {
            return Err(MenuError::InvalidConfig(format!(
                "classification_threshold must be within 0..=100, got {}",
                self.classification_threshold
            )));
        }

        positive("food_cost_healthy_max", self.food_cost_healthy_max)?;
        positive("food_cost_warning_max", self.food_cost_warning_max)?;
        if self.food_cost_healthy_max > self.food_cost_warning_max {
            return Err(MenuError::InvalidConfig(format!(
                "food_cost_healthy_max ({}) exceeds food_cost_warning_max ({})",
                self.food_cost_healthy_max, self.food_cost_warning_max
            )));
        }

        positive("target_food_cost_pct", self.target_food_cost_pct)?;
        if self.target_food_cost_pct > 100.0 {
            return Err(MenuError::InvalidConfig(format!(
                "target_food_cost_pct must be at most 100, got {}",
                self.target_food_cost_pct
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.popularity_volume_ceiling, 160.0);
        assert_eq!(config.profitability_margin_ratio, 0.8);
        assert_eq!(config.classification_threshold, 50.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("popularity_volume_ceiling = 200.0\n").unwrap();
        assert_eq!(config.popularity_volume_ceiling, 200.0);
        assert_eq!(config.food_cost_warning_max, FOOD_COST_WARNING_MAX);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(EngineConfig::from_toml_str("popularity_volume_ceiling = 0.0").is_err());
        assert!(EngineConfig::from_toml_str("classification_threshold = 120.0").is_err());
        assert!(EngineConfig::from_toml_str(
            "food_cost_healthy_max = 45.0\nfood_cost_warning_max = 40.0"
        )
        .is_err());
        assert!(EngineConfig::from_toml_str("profitability_margin_ratio = \"high\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"classification_threshold = 60.0\n").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.classification_threshold, 60.0);

        let none: Option<&Path> = None;
        assert_eq!(EngineConfig::load_or_default(none).unwrap(), EngineConfig::default());
    }
}
