//! Distinguishing-test audit of releases on neighboring datasets.
//!
//! Given many releases of a query on a dataset `D` and on a neighbor `D'`,
//! any threshold test "output >= t" gives true/false positive rates whose
//! ratio lower-bounds the epsilon actually achieved.

use rand::Rng;

use census_dp_core::{DpError, LaplaceMechanism, Result};

/// Result of a threshold audit.
#[derive(Clone, Debug)]
pub struct AuditResult {
    /// Empirical epsilon lower bound.
    pub epsilon_lower: f64,
    /// Fraction of `D` releases flagged by the test.
    pub tpr: f64,
    /// Fraction of `D'` releases flagged by the test.
    pub fpr: f64,
    /// Probability a random `D` release exceeds a random `D'` release.
    pub auc: f64,
    /// Number of releases inspected.
    pub num_trials: usize,
}

impl AuditResult {
    /// Check if the empirical epsilon is within an expected bound.
    pub fn within_bound(&self, expected_epsilon: f64, margin: f64) -> bool {
        self.epsilon_lower <= expected_epsilon + margin
    }
}

/// Threshold auditor.
#[derive(Clone, Debug)]
pub struct Auditor {
    /// Minimum number of flagged releases on each side for a threshold to count.
    pub min_events: usize,
}

impl Default for Auditor {
    fn default() -> Self {
        Self { min_events: 500 }
    }
}

impl Auditor {
    /// Create an auditor with a custom event floor.
    pub fn new(min_events: usize) -> Self {
        Self {
            min_events: min_events.max(1),
        }
    }

    /// Compute an epsilon lower bound from TPR/FPR.
    pub fn compute_epsilon_lower(&self, tpr: f64, fpr: f64) -> f64 {
        if fpr <= 0.0 || tpr <= 0.0 {
            return 0.0;
        }
        if fpr >= 1.0 || tpr >= 1.0 {
            return f64::INFINITY;
        }

        let eps1 = (tpr / fpr).ln();
        let eps2 = ((1.0 - fpr) / (1.0 - tpr)).ln();
        eps1.max(eps2).max(0.0)
    }

    /// Audit releases with a fixed threshold.
    pub fn audit_outputs(
        &self,
        outputs_d: &[f64],
        outputs_d_prime: &[f64],
        threshold: f64,
    ) -> AuditResult {
        let auc = compute_auc(outputs_d, outputs_d_prime);
        self.audit_with_auc(outputs_d, outputs_d_prime, threshold, auc)
    }

    fn audit_with_auc(
        &self,
        outputs_d: &[f64],
        outputs_d_prime: &[f64],
        threshold: f64,
        auc: f64,
    ) -> AuditResult {
        let tp = outputs_d.iter().filter(|&&s| s >= threshold).count();
        let fp = outputs_d_prime.iter().filter(|&&s| s >= threshold).count();

        let tpr = rate(tp, outputs_d.len());
        let fpr = rate(fp, outputs_d_prime.len());

        let enough_events = |hits: usize, total: usize| {
            hits >= self.min_events && total - hits >= self.min_events
        };
        let epsilon_lower = if enough_events(tp, outputs_d.len())
            && enough_events(fp, outputs_d_prime.len())
        {
            self.compute_epsilon_lower(tpr, fpr)
        } else {
            0.0
        };

        AuditResult {
            epsilon_lower,
            tpr,
            fpr,
            auc,
            num_trials: outputs_d.len() + outputs_d_prime.len(),
        }
    }

    /// Find the threshold that maximizes the epsilon estimate.
    pub fn find_optimal_threshold(
        &self,
        outputs_d: &[f64],
        outputs_d_prime: &[f64],
    ) -> (f64, AuditResult) {
        let mut all_scores: Vec<f64> = outputs_d
            .iter()
            .chain(outputs_d_prime.iter())
            .copied()
            .filter(|x| x.is_finite())
            .collect();
        all_scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        all_scores.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        let auc = compute_auc(outputs_d, outputs_d_prime);
        let mut best_threshold = f64::INFINITY;
        let mut best_result =
            self.audit_with_auc(outputs_d, outputs_d_prime, best_threshold, auc);

        // Coarsen the sweep on large samples.
        let stride = (all_scores.len() / 2_000).max(1);
        for &threshold in all_scores.iter().step_by(stride) {
            let result = self.audit_with_auc(outputs_d, outputs_d_prime, threshold, auc);
            if result.epsilon_lower > best_result.epsilon_lower {
                best_result = result;
                best_threshold = threshold;
            }
        }

        (best_threshold, best_result)
    }
}

fn rate(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Compute the Mann-Whitney AUC that a `D` release exceeds a `D'` release.
fn compute_auc(outputs_d: &[f64], outputs_d_prime: &[f64]) -> f64 {
    if outputs_d.is_empty() || outputs_d_prime.is_empty() {
        return 0.5;
    }

    let mut tagged: Vec<(f64, bool)> = outputs_d
        .iter()
        .map(|&x| (x, true))
        .chain(outputs_d_prime.iter().map(|&x| (x, false)))
        .collect();
    tagged.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    // Sum of (1-based, tie-averaged) ranks of the D releases.
    let mut rank_sum = 0.0;
    let mut i = 0usize;
    while i < tagged.len() {
        let mut j = i;
        while j + 1 < tagged.len() && (tagged[j + 1].0 - tagged[i].0).abs() < 1e-12 {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        rank_sum += avg_rank * tagged[i..=j].iter().filter(|(_, d)| *d).count() as f64;
        i = j + 1;
    }

    let n1 = outputs_d.len() as f64;
    let n2 = outputs_d_prime.len() as f64;
    (rank_sum - n1 * (n1 + 1.0) / 2.0) / (n1 * n2)
}

/// Release `draws` noisy answers for each of two neighboring query results.
pub fn neighboring_releases<R: Rng + ?Sized>(
    mechanism: &LaplaceMechanism,
    value_d: f64,
    value_d_prime: f64,
    draws: usize,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if (value_d - value_d_prime).abs() > mechanism.sensitivity() {
        return Err(DpError::invalid(format!(
            "answers differ by {} which exceeds the declared sensitivity {}",
            (value_d - value_d_prime).abs(),
            mechanism.sensitivity()
        )));
    }
    let on_d = (0..draws)
        .map(|_| mechanism.apply_scalar(value_d, rng))
        .collect::<Result<Vec<_>>>()?;
    let on_d_prime = (0..draws)
        .map(|_| mechanism.apply_scalar(value_d_prime, rng))
        .collect::<Result<Vec<_>>>()?;
    Ok((on_d, on_d_prime))
}
