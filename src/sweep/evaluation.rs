use std::collections::HashMap;

use serde::Serialize;

use crate::engine::config::EngineConfig;
use crate::models::{CategoryLabel, MenuEngineeringItem};

/// How consistently one item keeps its baseline quadrant across samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStability {
    pub sku_id: String,
    pub name: String,
    pub baseline: CategoryLabel,
    pub popularity_score: f64,
    pub profitability_score: f64,
    /// Fraction of samples that kept the baseline label, in [0, 1].
    pub stability: f64,
    /// Label it most often flipped to, if it ever flipped.
    pub most_common_flip: Option<CategoryLabel>,
}

/// Reclassify every item under each sampled config and measure how often its
/// label survives.
///
/// `baseline` items carry the labels from the default config; an empty
/// `samples` slice yields a stability of 1 for every item.
pub fn evaluate_stability(
    baseline: &[MenuEngineeringItem],
    samples: &[EngineConfig],
) -> Vec<ItemStability> {
    baseline
        .iter()
        .map(|item| {
            let mut kept = 0usize;
            let mut flips: HashMap<CategoryLabel, usize> = HashMap::new();

            for config in samples {
                let mut trial = item.clone();
                trial.rescore(item.sales_volume(), item.food_cost_per_serving(), config);
                if trial.category_label() == item.category_label() {
                    kept += 1;
                } else {
                    *flips.entry(trial.category_label()).or_insert(0) += 1;
                }
            }

            let stability = if samples.is_empty() {
                1.0
            } else {
                kept as f64 / samples.len() as f64
            };

            // Ties resolve to the earlier quadrant in STAR..DOG order
            let most_common_flip = CategoryLabel::ALL
                .iter()
                .filter_map(|label| flips.get(label).map(|n| (*label, *n)))
                .fold(None, |best: Option<(CategoryLabel, usize)>, (label, n)| match best {
                    Some((_, best_n)) if best_n >= n => best,
                    _ => Some((label, n)),
                })
                .map(|(label, _)| label);

            ItemStability {
                sku_id: item.sku_id.clone(),
                name: item.name.clone(),
                baseline: item.category_label(),
                popularity_score: item.popularity_score(),
                profitability_score: item.profitability_score(),
                stability,
                most_common_flip,
            }
        })
        .collect()
}
