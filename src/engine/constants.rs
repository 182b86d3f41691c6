//! Named defaults for every tunable number in the engine.
//!
//! Callers should go through [`EngineConfig`](crate::engine::EngineConfig)
//! rather than reading these directly.

/// Sales volume per period that scores as 100% popular.
pub const POPULARITY_VOLUME_CEILING: f64 = 160.0;

/// Fraction of price that a margin must reach to score as 100% profitable.
pub const PROFITABILITY_MARGIN_RATIO: f64 = 0.8;

/// Score at or above which an axis counts as "high".
pub const CLASSIFICATION_THRESHOLD: f64 = 50.0;

/// Upper bound of the score scale.
pub const SCORE_CAP: f64 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Food-cost benchmarks
// ─────────────────────────────────────────────────────────────────────────────

/// Food cost at or below this percentage of inflow is healthy.
pub const FOOD_COST_HEALTHY_MAX: f64 = 30.0;

/// Food cost at or below this percentage (and above healthy) is a warning.
pub const FOOD_COST_WARNING_MAX: f64 = 40.0;

/// Target food-cost percentage used to suggest a selling price.
pub const TARGET_FOOD_COST_PCT: f64 = 30.0;

// ─────────────────────────────────────────────────────────────────────────────
// Arithmetic guards
// ─────────────────────────────────────────────────────────────────────────────

/// Waste percentages are capped here before dividing by `100 - waste`.
pub const WASTE_CLAMP_PCT: f64 = 99.9;

/// Minimum Jaro-Winkler similarity for a fuzzy SKU/name match.
pub const FUZZY_MATCH_MIN: f64 = 0.7;
