use std::collections::HashMap;

use assert_float_eq::assert_float_absolute_eq;
use chrono::NaiveDate;

use menu_engineer_rs::engine::{
    aggregate, classify, classify_food_cost_health, compute_ingredient_cost, project_savings,
    score_popularity, score_profitability, CLASSIFICATION_THRESHOLD,
};
use menu_engineer_rs::models::{
    CategoryLabel, ExpenseEntry, FoodCostStatus, Ingredient, LedgerSet, ManpowerEntry,
    PurchaseEntry, RecipeCard, SalesEntry,
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

#[test]
fn test_classification_total_and_deterministic() {
    let mut p = 0.0;
    while p <= 100.0 {
        let mut q = 0.0;
        while q <= 100.0 {
            let first = classify(p, q, CLASSIFICATION_THRESHOLD);
            assert!(CategoryLabel::ALL.contains(&first));
            assert_eq!(first, classify(p, q, CLASSIFICATION_THRESHOLD));
            q += 2.5;
        }
        p += 2.5;
    }
}

#[test]
fn test_classification_tie_break() {
    let t = CLASSIFICATION_THRESHOLD;
    assert_eq!(classify(50.0, 50.0, t), CategoryLabel::Star);
    assert_eq!(classify(50.0, 49.999, t), CategoryLabel::Plowhorse);
    assert_eq!(classify(49.999, 50.0, t), CategoryLabel::Puzzle);
    assert_eq!(classify(49.999, 49.999, t), CategoryLabel::Dog);
}

#[test]
fn test_popularity_clamped() {
    assert_eq!(score_popularity(1000.0, 160.0), 100.0);
    assert_eq!(score_popularity(80.0, 160.0), 50.0);
    for volume in (0..5000).step_by(37) {
        assert!(score_popularity(f64::from(volume), 160.0) <= 100.0);
    }
}

#[test]
fn test_profitability_zero_price_edge_case() {
    // Zero price falls back to a denominator of 1
    assert_eq!(score_profitability(0.5, 0.0, 0.8), 50.0);
    assert_eq!(score_profitability(12.0, 0.0, 0.8), 100.0);
}

#[test]
fn test_food_cost_bucket_boundaries() {
    assert_eq!(classify_food_cost_health(30.0), FoodCostStatus::Healthy);
    assert_eq!(classify_food_cost_health(30.01), FoodCostStatus::Warning);
    assert_eq!(classify_food_cost_health(40.0), FoodCostStatus::Warning);
    assert_eq!(classify_food_cost_health(40.01), FoodCostStatus::Critical);
}

#[test]
fn test_ledger_aggregation_scenario() {
    let ledger = LedgerSet {
        sales: vec![
            SalesEntry {
                date: date(1),
                revenue: 30000.0,
                order_count: 300,
                channel: "pos".to_string(),
            },
            SalesEntry {
                date: date(2),
                revenue: 20000.0,
                order_count: 150,
                channel: "delivery".to_string(),
            },
        ],
        purchases: vec![PurchaseEntry {
            date: date(3),
            supplier: "Wholesale Mart".to_string(),
            amount: 15000.0,
            category: "produce".to_string(),
        }],
        expenses: vec![ExpenseEntry {
            date: date(4),
            expense_type: "utilities".to_string(),
            amount: 5000.0,
            note: String::new(),
        }],
        manpower: vec![ManpowerEntry {
            date: date(30),
            staff_count: 5,
            total_salaries: 10000.0,
            overtime_hours: 12.0,
        }],
    };

    let agg = aggregate(&ledger, None);
    let s = &agg.snapshot;
    assert_eq!(s.total_inflow, 50000.0);
    assert_eq!(s.total_outflow, 30000.0);
    assert_eq!(s.fiscal_balance, 20000.0);
    assert_float_absolute_eq!(s.food_cost_pct, 30.0, 1e-9);
    assert_eq!(s.food_cost_status, FoodCostStatus::Healthy);
    assert!(agg.rejected.is_empty());
}

#[test]
fn test_waste_cost_round_trip() {
    let ing = Ingredient::new("Tomato", 2.0, 100.0, "kg");
    assert_eq!(compute_ingredient_cost(&ing), 200.0);

    let ing = ing.with_waste(50.0);
    assert_float_absolute_eq!(compute_ingredient_cost(&ing), 400.0, 1e-9);

    // 100% waste caps at 99.9%: 200 x 1000
    let ing = ing.with_waste(100.0);
    assert_float_absolute_eq!(compute_ingredient_cost(&ing), 200000.0, 1e-6);
}

#[test]
fn test_zero_inflow_guard() {
    let agg = aggregate(&LedgerSet::default(), None);
    assert_eq!(agg.snapshot.food_cost_pct, 0.0);
    assert_eq!(agg.snapshot.fiscal_balance, 0.0);
}

#[test]
fn test_savings_projection_no_op() {
    let recipe = RecipeCard::new(
        "VB-1",
        "Veg Biryani",
        vec![
            Ingredient::new("Basmati", 0.15, 110.0, "kg"),
            Ingredient::new("Mixed veg", 0.12, 65.0, "kg"),
            Ingredient::new("Ghee", 0.015, 620.0, "kg"),
        ],
        240.0,
    );

    let p = project_savings(&recipe, &HashMap::new());
    assert_eq!(p.savings, 0.0);
    assert_eq!(p.savings_pct, 0.0);
    assert!(!p.has_changes);
    assert_eq!(p.projected_cost, p.original_cost);
}
