use crate::models::CategoryLabel;

/// Assign a quadrant from the two scores.
///
/// Both axes are "high" at or above `threshold`, so an item sitting exactly on
/// the midline is never demoted. Total over all inputs: anything not high on
/// either axis (including NaN) is a `Dog`.
pub fn classify(popularity: f64, profitability: f64, threshold: f64) -> CategoryLabel {
    let popular = popularity >= threshold;
    let profitable = profitability >= threshold;

    match (popular, profitable) {
        (true, true) => CategoryLabel::Star,
        (true, false) => CategoryLabel::Plowhorse,
        (false, true) => CategoryLabel::Puzzle,
        (false, false) => CategoryLabel::Dog,
    }
}
