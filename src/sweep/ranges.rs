use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::error::{MenuError, Result};

/// Inclusive sampling ranges for the constants that drive classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRanges {
    pub volume_ceiling: (f64, f64),
    pub margin_ratio: (f64, f64),
    pub threshold: (f64, f64),
}

impl Default for SweepRanges {
    fn default() -> Self {
        Self {
            volume_ceiling: (120.0, 200.0),
            margin_ratio: (0.6, 1.0),
            threshold: (40.0, 60.0),
        }
    }
}

impl SweepRanges {
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, (lo, hi): (f64, f64), min: f64| {
            if lo.is_finite() && hi.is_finite() && lo > min && lo <= hi {
                Ok(())
            } else {
                Err(MenuError::InvalidConfig(format!(
                    "{} range {}..{} is empty or out of bounds",
                    name, lo, hi
                )))
            }
        };
        check("volume_ceiling", self.volume_ceiling, 0.0)?;
        check("margin_ratio", self.margin_ratio, 0.0)?;
        check("threshold", self.threshold, -f64::EPSILON)?;
        if self.threshold.1 > 100.0 {
            return Err(MenuError::InvalidConfig(format!(
                "threshold range upper bound {} exceeds 100",
                self.threshold.1
            )));
        }
        Ok(())
    }

    /// Draw a config within the ranges; health benchmarks come from `base`.
    pub fn sample(&self, rng: &mut impl Rng, base: &EngineConfig) -> EngineConfig {
        EngineConfig {
            popularity_volume_ceiling: rng.gen_range(self.volume_ceiling.0..=self.volume_ceiling.1),
            profitability_margin_ratio: rng.gen_range(self.margin_ratio.0..=self.margin_ratio.1),
            classification_threshold: rng.gen_range(self.threshold.0..=self.threshold.1),
            ..base.clone()
        }
    }
}

/// Parse `"lo:hi"` into a range tuple.
pub fn parse_range(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LO:HI, got '{}'", s))?;
    let lo: f64 = lo
        .trim()
        .parse()
        .map_err(|_| format!("invalid lower bound '{}'", lo))?;
    let hi: f64 = hi
        .trim()
        .parse()
        .map_err(|_| format!("invalid upper bound '{}'", hi))?;
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_within_ranges() {
        let ranges = SweepRanges::default();
        let base = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let cfg = ranges.sample(&mut rng, &base);
            assert!((120.0..=200.0).contains(&cfg.popularity_volume_ceiling));
            assert!((0.6..=1.0).contains(&cfg.profitability_margin_ratio));
            assert!((40.0..=60.0).contains(&cfg.classification_threshold));
            assert_eq!(cfg.food_cost_healthy_max, base.food_cost_healthy_max);
            assert!(cfg.validate().is_ok());
        }
    }

    #[test]
    fn test_validate() {
        assert!(SweepRanges::default().validate().is_ok());

        let bad = SweepRanges {
            volume_ceiling: (200.0, 100.0),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = SweepRanges {
            threshold: (40.0, 140.0),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("120:200").unwrap(), (120.0, 200.0));
        assert_eq!(parse_range(" 0.5 : 0.9 ").unwrap(), (0.5, 0.9));
        assert!(parse_range("120-200").is_err());
        assert!(parse_range("a:1").is_err());
    }
}
