use crate::engine::constants::SCORE_CAP;

/// Popularity in [0, 100]: sales volume relative to the volume ceiling.
pub fn score_popularity(sales_volume: f64, ceiling: f64) -> f64 {
    ((sales_volume / ceiling) * 100.0).min(SCORE_CAP)
}

/// Profitability in [0, 100]: margin relative to `price * margin_ratio`.
///
/// A zero (or NaN) denominator is replaced by 1, so an unpriced item scores
/// `min(margin * 100, 100)`. That conflates "no revenue" with "highly
/// profitable" whenever the margin is at least 1, but existing dashboards
/// depend on the exact figure.
pub fn score_profitability(contribution_margin: f64, price: f64, margin_ratio: f64) -> f64 {
    let reference = price * margin_ratio;
    let denominator = if reference == 0.0 || reference.is_nan() {
        tracing::debug!("Zero profitability reference (price {}), using 1", price);
        1.0
    } else {
        reference
    };
    ((contribution_margin / denominator) * 100.0).min(SCORE_CAP)
}
