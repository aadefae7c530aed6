//! Counting and histogram queries with declared sensitivity.

use ndarray::Array1;
use rand::Rng;

use crate::error::{DpError, Result};
use crate::noise::LaplaceMechanism;
use crate::tensor::Tensor;

/// Sensitivity of any counting query over neighboring datasets.
pub const COUNTING_QUERY_SENSITIVITY: f64 = 1.0;

/// Which pairs of datasets are considered neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NeighboringRelation {
    /// Add or remove a single record.
    #[default]
    AddOrRemoveOne,
    /// Replace a single record with another.
    ReplaceOne,
}

/// Count records satisfying `predicate`.
pub fn count_matching<R, P>(dataset: &[R], predicate: P) -> usize
where
    P: Fn(&R) -> bool,
{
    dataset.iter().filter(|r| predicate(*r)).count()
}

/// Count records per bin.
///
/// `bin_of` assigns each record to at most one of `num_bins` disjoint bins;
/// records mapped to `None` or to an out-of-range bin are not counted.
pub fn histogram<R, B>(dataset: &[R], bin_of: B, num_bins: usize) -> Tensor
where
    B: Fn(&R) -> Option<usize>,
{
    let mut counts = Array1::<f64>::zeros(num_bins);
    for record in dataset {
        if let Some(bin) = bin_of(record) {
            if bin < num_bins {
                counts[bin] += 1.0;
            }
        }
    }
    counts.into_dyn()
}

/// A counting query: a predicate over records.
#[derive(Clone)]
pub struct CountingQuery<P> {
    predicate: P,
}

impl<P> std::fmt::Debug for CountingQuery<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountingQuery").finish_non_exhaustive()
    }
}

impl<P> CountingQuery<P> {
    /// Wrap a predicate as a counting query.
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Sensitivity under the given relation.
    ///
    /// Adding, removing or replacing one record moves a count by at most one.
    pub fn sensitivity(&self, _relation: NeighboringRelation) -> f64 {
        COUNTING_QUERY_SENSITIVITY
    }

    /// Exact (non-private) answer.
    pub fn evaluate<R>(&self, dataset: &[R]) -> usize
    where
        P: Fn(&R) -> bool,
    {
        count_matching(dataset, &self.predicate)
    }

    /// Noisy answer satisfying `epsilon`-DP.
    pub fn release<R, G>(&self, dataset: &[R], epsilon: f64, rng: &mut G) -> Result<f64>
    where
        P: Fn(&R) -> bool,
        G: Rng + ?Sized,
    {
        let mechanism = LaplaceMechanism::new(epsilon, COUNTING_QUERY_SENSITIVITY)?;
        mechanism.apply_scalar(self.evaluate(dataset) as f64, rng)
    }
}

/// A histogram query over disjoint bins.
#[derive(Clone)]
pub struct HistogramQuery<B> {
    bin_of: B,
    num_bins: usize,
}

impl<B> std::fmt::Debug for HistogramQuery<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistogramQuery")
            .field("num_bins", &self.num_bins)
            .finish_non_exhaustive()
    }
}

impl<B> HistogramQuery<B> {
    /// Create a histogram query with `num_bins` bins.
    pub fn new(bin_of: B, num_bins: usize) -> Result<Self> {
        if num_bins == 0 {
            return Err(DpError::invalid("histogram needs at least one bin"));
        }
        Ok(Self { bin_of, num_bins })
    }

    /// Number of bins.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// L1 sensitivity under the given relation.
    pub fn sensitivity(&self, relation: NeighboringRelation) -> f64 {
        match relation {
            NeighboringRelation::AddOrRemoveOne => 1.0,
            // One count goes down, another goes up.
            NeighboringRelation::ReplaceOne => 2.0,
        }
    }

    /// Exact (non-private) per-bin counts.
    pub fn evaluate<R>(&self, dataset: &[R]) -> Tensor
    where
        B: Fn(&R) -> Option<usize>,
    {
        histogram(dataset, &self.bin_of, self.num_bins)
    }

    /// Noisy per-bin counts satisfying `epsilon`-DP under `relation`.
    pub fn release<R, G>(
        &self,
        dataset: &[R],
        epsilon: f64,
        relation: NeighboringRelation,
        rng: &mut G,
    ) -> Result<Tensor>
    where
        B: Fn(&R) -> Option<usize>,
        G: Rng + ?Sized,
    {
        let mechanism = LaplaceMechanism::new(epsilon, self.sensitivity(relation))?;
        let mut counts = self.evaluate(dataset);
        mechanism.apply(&mut counts, rng);
        Ok(counts)
    }
}
