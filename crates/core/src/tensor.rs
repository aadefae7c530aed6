//! Tensor types for vector-valued query results.

use ndarray::ArrayD;

use crate::error::{DpError, Result};

/// Dynamic-dimensional tensor of query answers.
pub type Tensor = ArrayD<f64>;

/// Compute the L1 norm of a tensor, handling NaN/inf.
pub fn l1_norm(t: &Tensor) -> f64 {
    let mut sum: f64 = 0.0;
    for &v in t.iter() {
        if v.is_nan() {
            return f64::NAN;
        }
        if !v.is_finite() {
            return f64::INFINITY;
        }
        sum += v.abs();
    }
    sum
}

/// L1 distance between two query results of the same shape.
///
/// This is the quantity bounded by a query's L1 sensitivity when the
/// two results come from neighboring datasets.
pub fn l1_distance(a: &Tensor, b: &Tensor) -> Result<f64> {
    if a.raw_dim() != b.raw_dim() {
        return Err(DpError::invalid(format!(
            "tensor shapes differ: {:?} vs {:?}",
            a.shape(),
            b.shape()
        )));
    }
    Ok(l1_norm(&(a - b)))
}
