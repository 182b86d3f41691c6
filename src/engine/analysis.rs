use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CategoryLabel, MenuEngineeringItem};

/// Menu-level rollup of scored items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAnalysis {
    pub item_count: usize,
    pub stars: usize,
    pub plowhorses: usize,
    pub puzzles: usize,
    pub dogs: usize,
    pub total_units_sold: u64,
    pub total_contribution: f64,
    pub average_margin: f64,
    /// Cost-weighted food cost across units sold, as a percentage of revenue.
    pub weighted_food_cost_pct: f64,
    /// DOG items the user pinned as essential.
    pub essential_dogs: Vec<String>,
}

impl MenuAnalysis {
    pub fn count(&self, label: CategoryLabel) -> usize {
        match label {
            CategoryLabel::Star => self.stars,
            CategoryLabel::Plowhorse => self.plowhorses,
            CategoryLabel::Puzzle => self.puzzles,
            CategoryLabel::Dog => self.dogs,
        }
    }
}

/// Count items per quadrant.
pub fn label_counts(items: &[MenuEngineeringItem]) -> HashMap<CategoryLabel, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.category_label()).or_insert(0) += 1;
    }
    counts
}

pub fn analyze_menu(items: &[MenuEngineeringItem]) -> MenuAnalysis {
    let counts = label_counts(items);
    let get = |label: CategoryLabel| counts.get(&label).copied().unwrap_or(0);

    let total_units_sold: u64 = items.iter().map(|i| u64::from(i.sales_volume())).sum();
    // Fold from 0.0: an empty f64 sum is -0.0.
    let total = |f: fn(&MenuEngineeringItem) -> f64| {
        items.iter().map(f).fold(0.0, |acc, v| acc + v)
    };

    let total_contribution = total(MenuEngineeringItem::total_contribution);
    let average_margin = if items.is_empty() {
        0.0
    } else {
        total(MenuEngineeringItem::contribution_margin) / items.len() as f64
    };

    let revenue = total(|i| i.current_price() * f64::from(i.sales_volume()));
    let cost = total(|i| i.food_cost_per_serving() * f64::from(i.sales_volume()));
    let weighted_food_cost_pct = if revenue > 0.0 {
        cost / revenue * 100.0
    } else {
        0.0
    };

    let mut essential_dogs: Vec<String> = items
        .iter()
        .filter(|i| i.is_essential && i.category_label() == CategoryLabel::Dog)
        .map(|i| i.sku_id.clone())
        .collect();
    essential_dogs.sort();

    MenuAnalysis {
        item_count: items.len(),
        stars: get(CategoryLabel::Star),
        plowhorses: get(CategoryLabel::Plowhorse),
        puzzles: get(CategoryLabel::Puzzle),
        dogs: get(CategoryLabel::Dog),
        total_units_sold,
        total_contribution,
        average_margin,
        weighted_food_cost_pct,
        essential_dogs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;

    fn items() -> Vec<MenuEngineeringItem> {
        let config = EngineConfig::default();
        let mut dog = MenuEngineeringItem::new("D", "Dog", 100.0, 90.0, 10, &config);
        dog.is_essential = true;
        vec![
            MenuEngineeringItem::new("S", "Star", 100.0, 20.0, 160, &config),
            MenuEngineeringItem::new("P", "Plowhorse", 100.0, 80.0, 120, &config),
            dog,
        ]
    }

    #[test]
    fn test_analyze_counts_and_totals() {
        let analysis = analyze_menu(&items());
        assert_eq!(analysis.item_count, 3);
        assert_eq!(analysis.count(CategoryLabel::Star), 1);
        assert_eq!(analysis.count(CategoryLabel::Plowhorse), 1);
        assert_eq!(analysis.count(CategoryLabel::Puzzle), 0);
        assert_eq!(analysis.count(CategoryLabel::Dog), 1);
        assert_eq!(analysis.total_units_sold, 290);
        // 80*160 + 20*120 + 10*10
        assert!((analysis.total_contribution - 15300.0).abs() < 1e-9);
        assert!((analysis.average_margin - 110.0 / 3.0).abs() < 1e-9);
        assert_eq!(analysis.essential_dogs, vec!["D".to_string()]);
    }

    #[test]
    fn test_weighted_food_cost() {
        let analysis = analyze_menu(&items());
        // (20*160 + 80*120 + 90*10) / (100*290)
        let expected = (3200.0 + 9600.0 + 900.0) / 29000.0 * 100.0;
        assert!((analysis.weighted_food_cost_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_menu() {
        let analysis = analyze_menu(&[]);
        assert_eq!(analysis.item_count, 0);
        assert!(analysis.total_contribution.is_sign_positive());
        assert_eq!(analysis.average_margin, 0.0);
        assert_eq!(analysis.weighted_food_cost_pct, 0.0);
    }
}
