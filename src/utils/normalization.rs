//! Normalization Utilities
//!
//! Converts a raw parameter reading to a score in [0, 1] by its distance
//! from the optimal band, falling off linearly to zero at the absolute
//! sensor bounds.

use crate::catalog::ParameterDefinition;

/// Distance-based falloff score
///
/// Algorithm:
/// 1. Inside [optimal_min, optimal_max] (inclusive) the score is exactly 1.0
/// 2. Below the band: 1 - (optimal_min - value) / (optimal_min - minimum_possible)
/// 3. Above the band: 1 - (value - optimal_max) / (maximum_possible - optimal_max)
/// 4. Clamp at 0.0 beyond the absolute bounds
///
/// Non-finite input and zero-width falloff ranges score 0.0, so the result
/// is always a finite value in [0, 1].
pub fn falloff_score(value: f64, def: &ParameterDefinition) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    if def.is_optimal(value) {
        return 1.0;
    }

    let (distance, max_distance) = if value < def.optimal_min {
        (def.optimal_min - value, def.optimal_min - def.minimum_possible)
    } else {
        (value - def.optimal_max, def.maximum_possible - def.optimal_max)
    };

    // Degenerate entry: optimal band touches the absolute bound
    if max_distance.is_nan() || max_distance <= 0.0 {
        return 0.0;
    }

    let score = 1.0 - distance / max_distance;
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
