//! The Laplace mechanism.
//!
//! A query answer `f(x)` is privatized as `f(x) + Z` where
//! `Z ~ Laplace(0, sensitivity / epsilon)`. When `sensitivity` bounds how
//! far `f` can move between neighboring datasets, the release satisfies
//! epsilon-differential privacy.

use rand::Rng;
use rand_distr::{Distribution, Exp};

use crate::error::{check_epsilon, check_sensitivity, DpError, Result};
use crate::tensor::Tensor;

/// Draw a single zero-mean Laplace variate with the given scale.
///
/// Sampled as the difference of two i.i.d. exponentials with rate
/// `1 / scale`. A zero scale yields exactly `0.0`.
pub fn sample_laplace<R: Rng + ?Sized>(scale: f64, rng: &mut R) -> Result<f64> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(DpError::invalid(format!(
            "laplace scale must be non-negative and finite, got {scale}"
        )));
    }
    if scale == 0.0 {
        return Ok(0.0);
    }
    let dist = Exp::new(1.0 / scale).map_err(|e| DpError::numerical(e.to_string()))?;
    Ok(dist.sample(rng) - dist.sample(rng))
}

/// Add Laplace noise to a tensor in-place.
///
/// Non-finite cells are left untouched, as is the whole tensor when the
/// scale is not positive.
pub fn add_laplace_noise<R: Rng + ?Sized>(tensor: &mut Tensor, scale: f64, rng: &mut R) {
    if !scale.is_finite() || scale <= 0.0 || tensor.is_empty() {
        return;
    }

    let dist = match Exp::new(1.0 / scale) {
        Ok(d) => d,
        Err(_) => return,
    };

    tensor.mapv_inplace(|x| {
        if x.is_finite() {
            x + (dist.sample(rng) - dist.sample(rng))
        } else {
            x
        }
    });
}

/// Privatize `true_value` with the Laplace mechanism.
///
/// Noise is drawn from the thread-local, entropy-seeded generator. Use
/// [`apply_laplace_mechanism_with_rng`] when reproducible draws are needed.
///
/// # Errors
///
/// Returns [`DpError::InvalidParameter`] when `epsilon` is not positive,
/// `sensitivity` is negative, or any input is not finite.
pub fn apply_laplace_mechanism(true_value: f64, sensitivity: f64, epsilon: f64) -> Result<f64> {
    apply_laplace_mechanism_with_rng(true_value, sensitivity, epsilon, &mut rand::thread_rng())
}

/// Privatize `true_value` with the Laplace mechanism using `rng`.
pub fn apply_laplace_mechanism_with_rng<R: Rng + ?Sized>(
    true_value: f64,
    sensitivity: f64,
    epsilon: f64,
    rng: &mut R,
) -> Result<f64> {
    LaplaceMechanism::new(epsilon, sensitivity)?.apply_scalar(true_value, rng)
}

/// Laplace mechanism with sensitivity calibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaplaceMechanism {
    epsilon: f64,
    sensitivity: f64,
}

impl LaplaceMechanism {
    /// Create a new Laplace mechanism.
    ///
    /// `epsilon` must be positive and `sensitivity` non-negative; both finite.
    pub fn new(epsilon: f64, sensitivity: f64) -> Result<Self> {
        check_epsilon(epsilon)?;
        check_sensitivity(sensitivity)?;
        let scale = sensitivity / epsilon;
        if !scale.is_finite() {
            return Err(DpError::numerical(format!(
                "noise scale sensitivity / epsilon overflows ({sensitivity} / {epsilon})"
            )));
        }
        Ok(Self {
            epsilon,
            sensitivity,
        })
    }

    /// Privacy parameter.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// L1 sensitivity bound.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Get the scale parameter.
    pub fn scale(&self) -> f64 {
        self.sensitivity / self.epsilon
    }

    /// Variance of the added noise, `2 * scale^2`.
    pub fn variance(&self) -> f64 {
        let b = self.scale();
        2.0 * b * b
    }

    /// Release a single noisy value.
    pub fn apply_scalar<R: Rng + ?Sized>(&self, true_value: f64, rng: &mut R) -> Result<f64> {
        if !true_value.is_finite() {
            return Err(DpError::invalid(format!(
                "query result must be finite, got {true_value}"
            )));
        }
        tracing::debug!(
            target: "census_dp::mechanism",
            epsilon = self.epsilon,
            sensitivity = self.sensitivity,
            scale = self.scale(),
            "laplace_release"
        );
        if self.sensitivity == 0.0 {
            return Ok(true_value);
        }
        Ok(true_value + sample_laplace(self.scale(), rng)?)
    }

    /// Add noise to every cell of a tensor.
    pub fn apply<R: Rng + ?Sized>(&self, tensor: &mut Tensor, rng: &mut R) {
        tracing::debug!(
            target: "census_dp::mechanism",
            epsilon = self.epsilon,
            sensitivity = self.sensitivity,
            scale = self.scale(),
            cells = tensor.len(),
            "laplace_release_tensor"
        );
        add_laplace_noise(tensor, self.scale(), rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn draws(true_value: f64, sensitivity: f64, epsilon: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                apply_laplace_mechanism_with_rng(true_value, sensitivity, epsilon, &mut rng)
                    .expect("valid parameters")
            })
            .collect()
    }

    fn mean_var(xs: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, var)
    }

    #[test]
    fn test_laplace_deterministic() {
        let a = draws(10.0, 1.0, 0.5, 50, 42);
        let b = draws(10.0, 1.0, 0.5, 50, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_laplace_statistics() {
        let samples = draws(14_235.0, 1.0, 0.1, 100_000, 123);
        let (mean, var) = mean_var(&samples);
        assert!((mean - 14_235.0).abs() < 0.3, "mean = {mean}");
        assert!((var - 200.0).abs() / 200.0 < 0.05, "var = {var}");
    }

    #[test]
    fn test_zero_sensitivity_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let out = apply_laplace_mechanism_with_rng(42.5, 0.0, 0.1, &mut rng).unwrap();
            assert_eq!(out, 42.5);
        }
    }

    #[test]
    fn test_invalid_epsilon() {
        for eps in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = apply_laplace_mechanism(1.0, 1.0, eps).unwrap_err();
            assert!(err.is_invalid_parameter());
        }
    }

    #[test]
    fn test_invalid_sensitivity() {
        let err = apply_laplace_mechanism(1.0, -1.0, 1.0).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_non_finite_value_rejected() {
        assert!(apply_laplace_mechanism(f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_unseeded_release_is_finite() {
        let out = apply_laplace_mechanism(100.0, 1.0, 1.0).unwrap();
        assert!(out.is_finite());
    }

    #[test]
    fn test_overflowing_scale_is_numerical_error() {
        let err = LaplaceMechanism::new(1e-10, 1e300).unwrap_err();
        assert!(matches!(err, DpError::NumericalError { .. }));
        assert!(err.to_string().contains("overflows"));
        let err = apply_laplace_mechanism(0.0, 1e300, 1e-10).unwrap_err();
        assert!(!err.is_invalid_parameter());
    }

    #[test]
    fn test_mechanism_scale_and_variance() {
        let m = LaplaceMechanism::new(0.1, 1.0).unwrap();
        assert!((m.scale() - 10.0).abs() < 1e-12);
        assert!((m.variance() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_tensor_noise_skips_non_finite() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut t = Array1::from_vec(vec![0.0, f64::INFINITY, 0.0]).into_dyn();
        let m = LaplaceMechanism::new(1.0, 1.0).unwrap();
        m.apply(&mut t, &mut rng);
        assert_eq!(t[[1]], f64::INFINITY);
        assert!(t[[0]] != 0.0 && t[[2]] != 0.0);
    }

    #[test]
    fn test_tensor_noise_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut t = Array1::zeros(50_000).into_dyn();
        add_laplace_noise(&mut t, 2.0, &mut rng);
        let xs: Vec<f64> = t.iter().copied().collect();
        let (mean, var) = mean_var(&xs);
        assert!(mean.abs() < 0.1);
        assert!((var - 8.0).abs() / 8.0 < 0.08);
    }

    #[test]
    fn test_sample_laplace_rejects_negative_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(sample_laplace(-1.0, &mut rng).is_err());
        assert_eq!(sample_laplace(0.0, &mut rng).unwrap(), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

        #[test]
        fn prop_non_positive_epsilon_fails(
            value in -1e6f64..1e6,
            sensitivity in 0.0f64..10.0,
            epsilon in -10.0f64..=0.0,
        ) {
            let res = apply_laplace_mechanism(value, sensitivity, epsilon);
            prop_assert!(res.map_err(|e| e.is_invalid_parameter()) == Err(true));
        }

        #[test]
        fn prop_release_is_finite(
            value in -1e6f64..1e6,
            sensitivity in 0.0f64..10.0,
            epsilon in 0.01f64..10.0,
            seed in any::<u64>(),
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let out = apply_laplace_mechanism_with_rng(value, sensitivity, epsilon, &mut rng);
            prop_assert!(out.map(f64::is_finite).unwrap_or(false));
        }
    }
}
