//! Budgeted query sessions over an in-memory dataset.

use rand_chacha::ChaCha8Rng;

use census_dp_accounting::{AccountantConfig, PureDpAccountant};
use census_dp_core::{
    CountingQuery, HistogramQuery, LaplaceMechanism, NeighboringRelation, Result, Tensor,
};

use crate::config::SessionConfig;

/// Answers noisy queries over a dataset while tracking the privacy budget.
///
/// Every release is charged to the session's accountant before noise is
/// drawn; a release that would overspend fails without touching the data.
pub struct PrivateQuerySession<T> {
    records: Vec<T>,
    accountant: PureDpAccountant,
    relation: NeighboringRelation,
    rng: ChaCha8Rng,
}

impl<T> std::fmt::Debug for PrivateQuerySession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateQuerySession")
            .field("records", &self.records.len())
            .field("accountant", &self.accountant)
            .field("relation", &self.relation)
            .finish_non_exhaustive()
    }
}

impl<T> PrivateQuerySession<T> {
    /// Open a session over `records`.
    pub fn new(records: Vec<T>, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let accountant = config.budget.create_accountant()?;
        tracing::info!(
            target: "census_dp::session",
            records = records.len(),
            total_epsilon = accountant.total_epsilon(),
            relation = ?config.relation,
            seeded = config.seed.is_some(),
            "session_opened"
        );
        Ok(Self {
            records,
            accountant,
            relation: config.relation,
            rng: config.rng(),
        })
    }

    /// Number of records in the session.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the session holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Budget state.
    pub fn budget(&self) -> &PureDpAccountant {
        &self.accountant
    }

    /// Neighboring relation releases are calibrated for.
    pub fn relation(&self) -> NeighboringRelation {
        self.relation
    }

    /// Noisy count of records satisfying `predicate`.
    pub fn noisy_count<P>(&mut self, predicate: P, epsilon: f64) -> Result<f64>
    where
        P: Fn(&T) -> bool,
    {
        let query = CountingQuery::new(predicate);
        let mechanism = LaplaceMechanism::new(epsilon, query.sensitivity(self.relation))?;
        self.accountant.charge(epsilon)?;
        mechanism.apply_scalar(query.evaluate(&self.records) as f64, &mut self.rng)
    }

    /// Noisy per-bin counts.
    pub fn noisy_histogram<B>(
        &mut self,
        bin_of: B,
        num_bins: usize,
        epsilon: f64,
    ) -> Result<Tensor>
    where
        B: Fn(&T) -> Option<usize>,
    {
        let query = HistogramQuery::new(bin_of, num_bins)?;
        let mechanism = LaplaceMechanism::new(epsilon, query.sensitivity(self.relation))?;
        self.accountant.charge(epsilon)?;
        let mut counts = query.evaluate(&self.records);
        mechanism.apply(&mut counts, &mut self.rng);
        Ok(counts)
    }

    /// Noisy release of an arbitrary statistic with a caller-declared sensitivity.
    pub fn noisy_statistic<F>(
        &mut self,
        statistic: F,
        sensitivity: f64,
        epsilon: f64,
    ) -> Result<f64>
    where
        F: FnOnce(&[T]) -> f64,
    {
        let mechanism = LaplaceMechanism::new(epsilon, sensitivity)?;
        self.accountant.charge(epsilon)?;
        mechanism.apply_scalar(statistic(self.records.as_slice()), &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_dp_core::DpError;

    fn session(total: f64) -> PrivateQuerySession<u32> {
        let records: Vec<u32> = (0..1_000).collect();
        PrivateQuerySession::new(records, SessionConfig::new(total).with_seed(8)).unwrap()
    }

    #[test]
    fn count_charges_budget() {
        let mut s = session(1.0);
        let noisy = s.noisy_count(|&x| x >= 500, 0.5).unwrap();
        assert!((noisy - 500.0).abs() < 40.0);
        assert!((s.budget().remaining() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn overspending_is_rejected() {
        let mut s = session(0.3);
        s.noisy_count(|_| true, 0.2).unwrap();
        let err = s.noisy_count(|_| true, 0.2).unwrap_err();
        assert!(matches!(err, DpError::PrivacyBudgetExhausted { .. }));
        assert!((s.budget().spent() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bad_budget_is_a_config_error() {
        let err = PrivateQuerySession::new(vec![1u32], SessionConfig::new(-1.0)).unwrap_err();
        assert!(matches!(err, DpError::ConfigError { .. }));
    }

    #[test]
    fn seeded_histograms_agree_and_charge_once() {
        let mut a = session(1.0);
        let mut b = session(1.0);
        let bin = |x: &u32| Some((x % 5) as usize);
        let ha = a.noisy_histogram(bin, 5, 0.25).unwrap();
        let hb = b.noisy_histogram(bin, 5, 0.25).unwrap();
        assert_eq!(ha, hb);
        assert_eq!(a.budget().history(), &[0.25]);
        assert!(a.noisy_histogram(bin, 5, 0.0).unwrap_err().is_invalid_parameter());
        assert_eq!(a.budget().history(), &[0.25]);
    }

    #[test]
    fn invalid_epsilon_costs_nothing() {
        let mut s = session(1.0);
        assert!(s.noisy_count(|_| true, 0.0).unwrap_err().is_invalid_parameter());
        assert!(s.noisy_histogram(|_| Some(0), 0, 0.1).is_err());
        assert_eq!(s.budget().spent(), 0.0);
    }

    #[test]
    fn histogram_has_one_cell_per_bin() {
        let mut s = session(1.0);
        let h = s
            .noisy_histogram(|&x| Some((x % 4) as usize), 4, 0.5)
            .unwrap();
        assert_eq!(h.len(), 4);
        assert!(h.iter().all(|c| (c - 250.0).abs() < 60.0));
    }

    #[test]
    fn statistic_with_zero_sensitivity_is_exact() {
        let mut s = session(1.0);
        let out = s.noisy_statistic(|xs| xs.len() as f64, 0.0, 0.1).unwrap();
        assert_eq!(out, 1_000.0);
    }

    #[test]
    fn seeded_sessions_agree() {
        let mut a = session(1.0);
        let mut b = session(1.0);
        assert_eq!(
            a.noisy_count(|&x| x % 3 == 0, 0.1).unwrap(),
            b.noisy_count(|&x| x % 3 == 0, 0.1).unwrap()
        );
    }
}
