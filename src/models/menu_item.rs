use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::{quadrant, scoring};
use crate::models::RecipeCard;

/// Menu-engineering quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryLabel {
    Star,
    Plowhorse,
    Puzzle,
    Dog,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 4] = [
        CategoryLabel::Star,
        CategoryLabel::Plowhorse,
        CategoryLabel::Puzzle,
        CategoryLabel::Dog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Star => "STAR",
            CategoryLabel::Plowhorse => "PLOWHORSE",
            CategoryLabel::Puzzle => "PUZZLE",
            CategoryLabel::Dog => "DOG",
        }
    }

    /// Standard menu-engineering action for the quadrant.
    pub fn strategy(&self) -> &'static str {
        match self {
            CategoryLabel::Star => "Maintain quality and placement",
            CategoryLabel::Plowhorse => "Reprice or trim portion cost",
            CategoryLabel::Puzzle => "Promote and reposition on the menu",
            CategoryLabel::Dog => "Rework or remove",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A menu item enriched with its computed scores and quadrant.
///
/// Everything derived from price, cost and volume is private so the label
/// always matches the scores it was classified from. Use [`rescore`] or
/// [`reprice`] when inputs change.
///
/// [`rescore`]: MenuEngineeringItem::rescore
/// [`reprice`]: MenuEngineeringItem::reprice
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEngineeringItem {
    pub sku_id: String,
    pub name: String,
    current_price: f64,
    food_cost_per_serving: f64,
    contribution_margin: f64,
    sales_volume: u32,
    popularity_score: f64,
    profitability_score: f64,
    category_label: CategoryLabel,
    /// Display-only override; never feeds classification.
    pub is_essential: bool,
    /// Opaque text from the generative-AI collaborator.
    pub ai_recommendation: String,
}

impl MenuEngineeringItem {
    pub fn new(
        sku_id: &str,
        name: &str,
        current_price: f64,
        food_cost_per_serving: f64,
        sales_volume: u32,
        config: &EngineConfig,
    ) -> Self {
        let mut item = Self {
            sku_id: sku_id.to_string(),
            name: name.to_string(),
            current_price,
            food_cost_per_serving,
            contribution_margin: 0.0,
            sales_volume,
            popularity_score: 0.0,
            profitability_score: 0.0,
            category_label: CategoryLabel::Dog,
            is_essential: false,
            ai_recommendation: String::new(),
        };
        item.recompute(config);
        item
    }

    /// Run a saved recipe through the scorer.
    pub fn from_recipe(recipe: &RecipeCard, config: &EngineConfig) -> Self {
        let mut item = Self::new(
            &recipe.sku_id,
            &recipe.name,
            recipe.current_price,
            recipe.food_cost_per_serving(),
            recipe.sales_volume,
            config,
        );
        item.is_essential = recipe.is_essential;
        item.ai_recommendation = recipe.ai_recommendation.clone();
        item
    }

    /// Supersede volume and cost inputs and reclassify.
    pub fn rescore(&mut self, sales_volume: u32, food_cost_per_serving: f64, config: &EngineConfig) {
        self.sales_volume = sales_volume;
        self.food_cost_per_serving = food_cost_per_serving;
        self.recompute(config);
    }

    /// Supersede the selling price and reclassify.
    pub fn reprice(&mut self, current_price: f64, config: &EngineConfig) {
        self.current_price = current_price;
        self.recompute(config);
    }

    fn recompute(&mut self, config: &EngineConfig) {
        self.contribution_margin = self.current_price - self.food_cost_per_serving;
        self.popularity_score = scoring::score_popularity(
            f64::from(self.sales_volume),
            config.popularity_volume_ceiling,
        );
        self.profitability_score = scoring::score_profitability(
            self.contribution_margin,
            self.current_price,
            config.profitability_margin_ratio,
        );
        self.category_label = quadrant::classify(
            self.popularity_score,
            self.profitability_score,
            config.classification_threshold,
        );
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn food_cost_per_serving(&self) -> f64 {
        self.food_cost_per_serving
    }

    pub fn contribution_margin(&self) -> f64 {
        self.contribution_margin
    }

    pub fn sales_volume(&self) -> u32 {
        self.sales_volume
    }

    pub fn popularity_score(&self) -> f64 {
        self.popularity_score
    }

    pub fn profitability_score(&self) -> f64 {
        self.profitability_score
    }

    pub fn category_label(&self) -> CategoryLabel {
        self.category_label
    }

    /// Margin earned across the analysis window.
    pub fn total_contribution(&self) -> f64 {
        self.contribution_margin * f64::from(self.sales_volume)
    }
}
