//! Empirical statistics for checking mechanism output against theory.

use rand::Rng;
use statrs::distribution::{ContinuousCDF, Laplace};

use census_dp_core::{DpError, LaplaceMechanism, Result};

/// Sample moments of a set of draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
}

impl SampleSummary {
    /// Summarize a non-empty set of finite samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(DpError::invalid("cannot summarize an empty sample"));
        }
        if samples.iter().any(|x| !x.is_finite()) {
            return Err(DpError::numerical("samples contain non-finite values"));
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Ok(Self {
            count: samples.len(),
            mean,
            variance,
        })
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Fraction of samples within `half_width` of `center`.
pub fn fraction_within(samples: &[f64], center: f64, half_width: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let hits = samples
        .iter()
        .filter(|&&x| (x - center).abs() <= half_width)
        .count();
    hits as f64 / samples.len() as f64
}

/// Kolmogorov-Smirnov distance between the samples and `Laplace(location, scale)`.
pub fn ks_distance_laplace(samples: &[f64], location: f64, scale: f64) -> Result<f64> {
    if samples.is_empty() {
        return Err(DpError::invalid("cannot test an empty sample"));
    }
    let dist = Laplace::new(location, scale).map_err(|e| DpError::invalid(e.to_string()))?;

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len() as f64;
    let mut d: f64 = 0.0;
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = dist.cdf(x);
        let lo = i as f64 / n;
        let hi = (i + 1) as f64 / n;
        d = d.max((cdf - lo).abs()).max((hi - cdf).abs());
    }
    Ok(d)
}

/// Empirical behavior of a mechanism compared with its theoretical moments.
#[derive(Clone, Debug)]
pub struct MechanismCheck {
    /// Moments of the observed releases.
    pub summary: SampleSummary,
    /// Value the releases should center on.
    pub expected_mean: f64,
    /// Theoretical noise variance, `2 * scale^2`.
    pub expected_variance: f64,
}

impl MechanismCheck {
    /// Absolute error of the empirical mean.
    pub fn mean_error(&self) -> f64 {
        (self.summary.mean - self.expected_mean).abs()
    }

    /// Relative error of the empirical variance (absolute when zero is expected).
    pub fn variance_relative_error(&self) -> f64 {
        if self.expected_variance == 0.0 {
            return self.summary.variance;
        }
        (self.summary.variance - self.expected_variance).abs() / self.expected_variance
    }

    /// Whether the mean lies within `z` standard errors of the expected mean.
    pub fn mean_within_standard_errors(&self, z: f64) -> bool {
        let se = (self.expected_variance / self.summary.count as f64).sqrt();
        self.mean_error() <= z * se + f64::EPSILON * self.expected_mean.abs().max(1.0)
    }
}

/// Draw `draws` releases of `true_value` and compare them with theory.
pub fn check_mechanism<R: Rng + ?Sized>(
    mechanism: &LaplaceMechanism,
    true_value: f64,
    draws: usize,
    rng: &mut R,
) -> Result<MechanismCheck> {
    let samples = (0..draws)
        .map(|_| mechanism.apply_scalar(true_value, rng))
        .collect::<Result<Vec<_>>>()?;
    Ok(MechanismCheck {
        summary: SampleSummary::from_samples(&samples)?,
        expected_mean: true_value,
        expected_variance: mechanism.variance(),
    })
}
