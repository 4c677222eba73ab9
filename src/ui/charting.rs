use crate::session::{LevelResult, TOTAL_LEVELS};

/// Running total after each resolved level, as (level, score) points
pub fn score_coords(results: &[LevelResult]) -> Vec<(f64, f64)> {
    results
        .iter()
        .scan(0, |total, result| {
            *total += result.points_earned;
            Some((f64::from(result.level), f64::from(*total)))
        })
        .collect()
}

/// Compute X (level) and Y (score) bounds for the results chart
pub fn compute_chart_params(coords: &[(f64, f64)]) -> (f64, f64) {
    let highest_score = coords.iter().map(|&(_, score)| score).fold(0.0, f64::max);

    let last_level = coords
        .last()
        .map(|&(level, _)| level)
        .unwrap_or(f64::from(TOTAL_LEVELS));

    (last_level.max(1.0), highest_score.max(1.0).round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
