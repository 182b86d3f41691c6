use std::collections::HashMap;

use serde::Serialize;

use crate::engine::constants::WASTE_CLAMP_PCT;
use crate::models::{Ingredient, RecipeCard};

/// Multiplier that grosses a cost up for waste: `100 / (100 - min(waste, 99.9))`.
///
/// Waste at or above 100% is capped silently; callers that care use
/// [`is_waste_clamped`].
pub fn waste_factor(waste_pct: f64) -> f64 {
    100.0 / (100.0 - waste_pct.min(WASTE_CLAMP_PCT))
}

/// True when `waste_pct` hits the clamp.
pub fn is_waste_clamped(waste_pct: f64) -> bool {
    waste_pct >= WASTE_CLAMP_PCT
}

/// Waste-adjusted cost of one ingredient per serving.
pub fn compute_ingredient_cost(ingredient: &Ingredient) -> f64 {
    let base_cost = ingredient.base_cost();
    if ingredient.waste_pct > 0.0 {
        base_cost * waste_factor(ingredient.waste_pct)
    } else {
        base_cost
    }
}

/// Food cost per serving. No yield division: quantities are per serving.
///
/// Folds from `0.0` because an empty `f64` sum is `-0.0`.
pub fn compute_recipe_cost(ingredients: &[Ingredient]) -> f64 {
    ingredients
        .iter()
        .map(compute_ingredient_cost)
        .fold(0.0, |acc, cost| acc + cost)
}

/// Price at which `food_cost` lands at `target_food_cost_pct` of the price.
pub fn suggest_selling_price(food_cost: f64, target_food_cost_pct: f64) -> f64 {
    if target_food_cost_pct > 0.0 {
        food_cost / (target_food_cost_pct / 100.0)
    } else {
        0.0
    }
}

/// Food cost as a percentage of selling price; 0 when unpriced.
pub fn food_cost_pct_of_price(food_cost: f64, price: f64) -> f64 {
    if price > 0.0 {
        food_cost / price * 100.0
    } else {
        0.0
    }
}

/// Hypothetical change to one ingredient line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IngredientOverride {
    pub new_unit_rate: Option<f64>,
    pub new_waste_pct: Option<f64>,
}

impl IngredientOverride {
    pub fn rate(new_unit_rate: f64) -> Self {
        Self {
            new_unit_rate: Some(new_unit_rate),
            new_waste_pct: None,
        }
    }

    pub fn waste(new_waste_pct: f64) -> Self {
        Self {
            new_unit_rate: None,
            new_waste_pct: Some(new_waste_pct),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_unit_rate.is_none() && self.new_waste_pct.is_none()
    }
}

/// Arithmetic edge case hit during a projection. Informational, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatioWarning {
    /// Effective waste was capped at the clamp.
    WasteClamped { index: usize, requested: f64 },
    /// A rate override was supplied but the original rate is zero, so the
    /// cost cannot be scaled.
    ZeroOriginalRate { index: usize },
}

/// Result of a what-if costing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProjection {
    pub original_cost: f64,
    pub projected_cost: f64,
    pub savings: f64,
    pub savings_pct: f64,
    pub has_changes: bool,
    pub warnings: Vec<RatioWarning>,
}

/// Project the per-serving cost of `recipe` under hypothetical unit rates
/// and waste percentages, keyed by ingredient index.
///
/// Each ingredient's basis is its pre-waste cost. A rate override scales that
/// basis by `new / original`, so quantity is never re-derived from cost. The
/// effective waste (override, else stored) is applied on top of the result.
pub fn project_savings(
    recipe: &RecipeCard,
    overrides: &HashMap<usize, IngredientOverride>,
) -> SavingsProjection {
    for index in overrides.keys().filter(|&&i| i >= recipe.ingredients.len()) {
        tracing::warn!(
            "Ignoring override for ingredient #{} on {}: recipe has {} ingredients",
            index,
            recipe.sku_id,
            recipe.ingredients.len()
        );
    }

    let mut original_cost = 0.0;
    let mut projected_cost = 0.0;
    let mut has_changes = false;
    let mut warnings = Vec::new();

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        let over = overrides.get(&index).copied().unwrap_or_default();
        let original_basis = ingredient.base_cost();
        let original_rate = ingredient.cost_per_unit;

        let effective_waste = over.new_waste_pct.unwrap_or(ingredient.waste_pct);
        if is_waste_clamped(effective_waste) {
            tracing::warn!(
                "Waste {}% on {} clamped to {}%",
                effective_waste,
                ingredient.name,
                WASTE_CLAMP_PCT
            );
            warnings.push(RatioWarning::WasteClamped {
                index,
                requested: effective_waste,
            });
        }
        let factor = waste_factor(effective_waste);

        let cost_with_waste = match over.new_unit_rate {
            Some(new_rate) if original_rate > 0.0 => {
                (original_basis / original_rate) * new_rate * factor
            }
            Some(_) => {
                tracing::warn!(
                    "Rate override on {} ignored: original rate is zero",
                    ingredient.name
                );
                warnings.push(RatioWarning::ZeroOriginalRate { index });
                original_basis * factor
            }
            None => original_basis * factor,
        };

        if over.new_unit_rate.is_some() || effective_waste > 0.0 {
            has_changes = true;
        }

        original_cost += original_basis;
        projected_cost += cost_with_waste;
    }

    let savings = original_cost - projected_cost;
    let savings_pct = if original_cost > 0.0 {
        savings / original_cost * 100.0
    } else {
        0.0
    };

    tracing::debug!(
        "Projection for {}: {:.2} -> {:.2} ({:.2}%)",
        recipe.sku_id,
        original_cost,
        projected_cost,
        savings_pct
    );

    SavingsProjection {
        original_cost,
        projected_cost,
        savings,
        savings_pct,
        has_changes,
        warnings,
    }
}
