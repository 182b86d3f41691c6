use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::analysis::label_counts;
use crate::engine::config::EngineConfig;
use crate::error::Result;
use crate::models::{CategoryLabel, MenuEngineeringItem};
use crate::sweep::evaluation::{evaluate_stability, ItemStability};
use crate::sweep::ranges::SweepRanges;

/// Configuration for a sensitivity sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub iterations: usize,
    pub seed: u64,
    pub ranges: SweepRanges,
    /// Config the baseline labels are computed with.
    pub base: EngineConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            seed: 123,
            ranges: SweepRanges::default(),
            base: EngineConfig::default(),
        }
    }
}

/// Results from a sweep.
#[derive(Debug, Clone)]
pub struct SweepResults {
    /// Per-item stability, most fragile first.
    pub items: Vec<ItemStability>,
    /// Baseline quadrant counts, keyed by label name.
    pub baseline_counts: BTreeMap<String, usize>,
    pub iterations: usize,
    pub seed: u64,
}

impl SweepResults {
    /// Items whose stability is strictly below `cutoff`.
    pub fn fragile(&self, cutoff: f64) -> Vec<&ItemStability> {
        self.items.iter().filter(|i| i.stability < cutoff).collect()
    }
}

/// Rescore `items` under the base config, then sample `iterations` configs
/// and measure label stability. Deterministic for a given seed.
pub fn run_sweep(config: &SweepConfig, items: &[MenuEngineeringItem]) -> Result<SweepResults> {
    config.ranges.validate()?;
    config.base.validate()?;

    let baseline: Vec<MenuEngineeringItem> = items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.rescore(item.sales_volume(), item.food_cost_per_serving(), &config.base);
            item
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples: Vec<EngineConfig> = (0..config.iterations)
        .map(|_| config.ranges.sample(&mut rng, &config.base))
        .collect();

    tracing::info!(
        "Sweeping {} items over {} sampled configs (seed {})",
        baseline.len(),
        samples.len(),
        config.seed
    );

    let mut stability = evaluate_stability(&baseline, &samples);
    stability.sort_by(|a, b| {
        a.stability
            .partial_cmp(&b.stability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.sku_id.cmp(&b.sku_id))
    });

    let counts = label_counts(&baseline);
    let baseline_counts = CategoryLabel::ALL
        .iter()
        .map(|label| {
            (
                label.as_str().to_string(),
                counts.get(label).copied().unwrap_or(0),
            )
        })
        .collect();

    Ok(SweepResults {
        items: stability,
        baseline_counts,
        iterations: config.iterations,
        seed: config.seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuEngineeringItem> {
        let base = EngineConfig::default();
        vec![
            MenuEngineeringItem::new("FAR", "Far Star", 100.0, 5.0, 1000, &base),
            MenuEngineeringItem::new("MID", "Midline", 100.0, 5.0, 80, &base),
            MenuEngineeringItem::new("DOG", "Dog", 100.0, 95.0, 2, &base),
        ]
    }

    #[test]
    fn test_sweep_sorts_fragile_first() {
        let config = SweepConfig {
            iterations: 200,
            ..Default::default()
        };
        let results = run_sweep(&config, &items()).unwrap();

        assert_eq!(results.items.len(), 3);
        assert_eq!(results.items[0].sku_id, "MID");
        assert!(results.items[0].stability < 1.0);
        assert_eq!(results.items[2].stability, 1.0);
        assert_eq!(results.baseline_counts["STAR"], 2);
        assert_eq!(results.baseline_counts["PUZZLE"], 0);
        assert_eq!(results.fragile(1.0).len(), 1);
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let config = SweepConfig {
            iterations: 50,
            seed: 9,
            ..Default::default()
        };
        let a = run_sweep(&config, &items()).unwrap();
        let b = run_sweep(&config, &items()).unwrap();
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_sweep_rejects_bad_ranges() {
        let config = SweepConfig {
            ranges: SweepRanges {
                margin_ratio: (1.0, 0.5),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(run_sweep(&config, &items()).is_err());
    }
}
