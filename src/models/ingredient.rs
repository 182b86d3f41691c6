use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::costing;
use crate::error::{check_amount, MenuError, Result};

/// A single ingredient line on a recipe card, expressed per serving.
///
/// Waste is a non-negative percentage; values at or above the clamp are capped
/// when costing, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,

    pub quantity_per_serving: f64,

    pub cost_per_unit: f64,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub waste_pct: f64,
}

impl Ingredient {
    pub fn new(name: &str, quantity_per_serving: f64, cost_per_unit: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity_per_serving,
            cost_per_unit,
            unit: unit.to_string(),
            waste_pct: 0.0,
        }
    }

    /// Builder-style waste setter.
    pub fn with_waste(mut self, waste_pct: f64) -> Self {
        self.waste_pct = waste_pct;
        self
    }

    /// Pre-waste cost: quantity x unit rate.
    #[inline]
    pub fn base_cost(&self) -> f64 {
        self.quantity_per_serving * self.cost_per_unit
    }

    /// Waste-adjusted cost per serving.
    #[inline]
    pub fn cost_per_serving(&self) -> f64 {
        costing::compute_ingredient_cost(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.quantity_per_serving.is_finite() || self.quantity_per_serving <= 0.0 {
            return Err(MenuError::InvalidEntry {
                kind: "ingredient",
                field: "quantityPerServing",
                value: self.quantity_per_serving,
            });
        }
        check_amount("ingredient", "costPerUnit", self.cost_per_unit)?;
        // Waste at or above 100% is capped by the waste factor, not rejected.
        check_amount("ingredient", "wastePct", self.waste_pct)

    }
}

fn default_yield() -> u32 {
    1
}

/// A saved recipe together with the menu data attached to its SKU.
///
/// Fields this crate does not understand are kept in `annotations` and
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    pub sku_id: String,

    pub name: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default = "default_yield")]
    pub yield_count: u32,

    #[serde(default)]
    pub current_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_selling_price: Option<f64>,

    #[serde(default)]
    pub sales_volume: u32,

    #[serde(default)]
    pub is_essential: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ai_recommendation: String,

    #[serde(flatten)]
    pub annotations: Map<String, Value>,
}

impl RecipeCard {
    pub fn new(sku_id: &str, name: &str, ingredients: Vec<Ingredient>, current_price: f64) -> Self {
        Self {
            sku_id: sku_id.to_string(),
            name: name.to_string(),
            ingredients,
            yield_count: 1,
            current_price,
            suggested_selling_price: None,
            sales_volume: 0,
            is_essential: false,
            ai_recommendation: String::new(),
            annotations: Map::new(),
        }
    }

    /// Canonical key for lookups (lowercase SKU).
    pub fn key(&self) -> String {
        self.sku_id.to_lowercase()
    }

    /// Sum of waste-adjusted ingredient costs. Quantities are already per serving.
    pub fn food_cost_per_serving(&self) -> f64 {
        costing::compute_recipe_cost(&self.ingredients)
    }

    /// Cost of producing the whole yield.
    pub fn batch_cost(&self) -> f64 {
        self.food_cost_per_serving() * f64::from(self.yield_count)
    }

    /// Stored suggestion if the recipe store supplied one, else derived from
    /// the target food-cost percentage.
    pub fn suggested_price(&self, target_food_cost_pct: f64) -> f64 {
        self.suggested_selling_price.unwrap_or_else(|| {
            costing::suggest_selling_price(self.food_cost_per_serving(), target_food_cost_pct)
        })
    }

    /// Card-level checks; ingredient rows are validated separately so one bad
    /// line does not drop the whole card.
    pub fn validate(&self) -> Result<()> {
        if self.sku_id.trim().is_empty() {
            return Err(MenuError::InvalidInput("recipe with empty skuId".to_string()));
        }
        check_amount("recipe", "currentPrice", self.current_price)?;
        if self.yield_count == 0 {
            return Err(MenuError::InvalidEntry {
                kind: "recipe",
                field: "yieldCount",
                value: 0.0,
            });
        }
        Ok(())
    }
}
