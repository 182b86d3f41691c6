pub mod analysis;
pub mod config;
pub mod constants;
pub mod costing;
pub mod health;
pub mod ledger;
pub mod quadrant;
pub mod scoring;

pub use analysis::{analyze_menu, label_counts, MenuAnalysis};
pub use config::EngineConfig;
pub use constants::*;
pub use costing::{
    compute_ingredient_cost, compute_recipe_cost, food_cost_pct_of_price, project_savings,
    suggest_selling_price, waste_factor, IngredientOverride, RatioWarning, SavingsProjection,
};
pub use health::{classify_food_cost_for, classify_food_cost_health};
pub use ledger::{
    aggregate, aggregate_by_period, aggregate_with, channel_breakdown, ChannelTotals,
    LedgerAggregate, PeriodSnapshot, RejectedEntry,
};
pub use quadrant::classify;
pub use scoring::{score_popularity, score_profitability};
