use crate::engine::config::EngineConfig;
use crate::engine::constants::{FOOD_COST_HEALTHY_MAX, FOOD_COST_WARNING_MAX};
use crate::models::FoodCostStatus;

/// Bucket a food-cost percentage against the default 30/40 benchmarks.
pub fn classify_food_cost_health(pct: f64) -> FoodCostStatus {
    classify_food_cost_with(pct, FOOD_COST_HEALTHY_MAX, FOOD_COST_WARNING_MAX)
}

/// Bucket against configured benchmarks.
pub fn classify_food_cost_for(pct: f64, config: &EngineConfig) -> FoodCostStatus {
    classify_food_cost_with(
        pct,
        config.food_cost_healthy_max,
        config.food_cost_warning_max,
    )
}

/// Upper bounds are inclusive: exactly `healthy_max` is healthy, exactly
/// `warning_max` is a warning.
fn classify_food_cost_with(pct: f64, healthy_max: f64, warning_max: f64) -> FoodCostStatus {
    if pct <= healthy_max {
        FoodCostStatus::Healthy
    } else if pct <= warning_max {
        FoodCostStatus::Warning
    } else {
        FoodCostStatus::Critical
    }
}
