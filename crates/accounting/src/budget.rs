//! Pure-DP budget tracking under sequential composition.

use census_dp_core::{check_epsilon, DpError, Result};

use crate::event::DpEvent;

/// Slack allowed when comparing cumulative spend against the total.
const BUDGET_TOLERANCE: f64 = 1e-12;

/// Tracks epsilon spent against a fixed total.
#[derive(Clone, Debug)]
pub struct PureDpAccountant {
    total_epsilon: f64,
    spent: f64,
    history: Vec<f64>,
}

impl PureDpAccountant {
    /// Create an accountant with the given total budget.
    pub fn new(total_epsilon: f64) -> Result<Self> {
        check_epsilon(total_epsilon)?;
        tracing::info!(
            target: "census_dp::budget",
            total_epsilon,
            "budget_created"
        );
        Ok(Self {
            total_epsilon,
            spent: 0.0,
            history: Vec::new(),
        })
    }

    /// Total budget.
    pub fn total_epsilon(&self) -> f64 {
        self.total_epsilon
    }

    /// Epsilon spent so far.
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Epsilon still available.
    pub fn remaining(&self) -> f64 {
        (self.total_epsilon - self.spent).max(0.0)
    }

    /// Epsilon of each accepted charge, in order.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Whether a charge of `epsilon` would be accepted.
    pub fn can_afford(&self, epsilon: f64) -> bool {
        check_epsilon(epsilon).is_ok() && self.fits(epsilon)
    }

    fn fits(&self, epsilon: f64) -> bool {
        self.spent + epsilon <= self.total_epsilon + BUDGET_TOLERANCE
    }

    /// Spend `epsilon` from the budget.
    ///
    /// A rejected charge leaves the accountant unchanged.
    pub fn charge(&mut self, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        if !self.fits(epsilon) {
            let remaining = self.remaining();
            tracing::warn!(
                target: "census_dp::budget",
                requested = epsilon,
                remaining,
                "budget_exhausted"
            );
            return Err(DpError::PrivacyBudgetExhausted {
                requested: epsilon,
                remaining,
            });
        }
        self.spent += epsilon;
        self.history.push(epsilon);
        tracing::info!(
            target: "census_dp::budget",
            charged = epsilon,
            spent = self.spent,
            remaining = self.remaining(),
            "budget_charged"
        );
        Ok(())
    }

    /// Spend the total epsilon of `event`.
    pub fn charge_event(&mut self, event: &DpEvent) -> Result<()> {
        let epsilon = event.epsilon()?;
        if epsilon == 0.0 {
            return Ok(());
        }
        self.charge(epsilon)
    }
}
