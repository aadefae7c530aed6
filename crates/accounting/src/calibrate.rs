//! Calibration between epsilon, noise scale, and accuracy.
//!
//! For Laplace noise with scale `b`, `P(|Z| <= t) = 1 - exp(-t / b)`, so an
//! accuracy target "within `t` with probability `p`" fixes `b` and hence
//! epsilon.

use census_dp_core::{check_epsilon, check_sensitivity, DpError, Result};

fn check_confidence(confidence: f64) -> Result<()> {
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(DpError::invalid(format!(
            "confidence must be in (0, 1), got {confidence}"
        )));
    }
    Ok(())
}

/// Half-width `t` such that Laplace noise with `scale` lands in `[-t, t]`
/// with probability `confidence`.
pub fn noise_bound(scale: f64, confidence: f64) -> Result<f64> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(DpError::invalid(format!(
            "scale must be non-negative and finite, got {scale}"
        )));
    }
    check_confidence(confidence)?;
    Ok(scale * (1.0 / (1.0 - confidence)).ln())
}

/// Probability that Laplace noise with `scale` has magnitude at most `bound`.
pub fn coverage(scale: f64, bound: f64) -> f64 {
    if bound < 0.0 {
        return 0.0;
    }
    if scale <= 0.0 {
        return 1.0;
    }
    1.0 - (-bound / scale).exp()
}

/// Epsilon yielding the given Laplace noise scale.
pub fn epsilon_for_scale(sensitivity: f64, scale: f64) -> Result<f64> {
    check_sensitivity(sensitivity)?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DpError::invalid(format!(
            "scale must be positive and finite, got {scale}"
        )));
    }
    let epsilon = sensitivity / scale;
    check_epsilon(epsilon)?;
    Ok(epsilon)
}

/// Smallest epsilon whose noise stays within `tolerance` of the true answer
/// with probability `confidence`.
pub fn calibrate_epsilon(sensitivity: f64, tolerance: f64, confidence: f64) -> Result<f64> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(DpError::invalid(format!(
            "tolerance must be positive and finite, got {tolerance}"
        )));
    }
    check_confidence(confidence)?;
    let scale = tolerance / (1.0 / (1.0 - confidence)).ln();
    epsilon_for_scale(sensitivity, scale)
}
