//! Accountant configuration types.

use census_dp_core::{check_epsilon, DpError, Result};

use crate::budget::PureDpAccountant;

/// Configuration for constructing a privacy accountant with a fresh state.
pub trait AccountantConfig {
    /// Accountant type created by this config.
    type Accountant;

    /// Create a new accountant instance.
    fn create_accountant(&self) -> Result<Self::Accountant>;
}

/// Configuration for the pure-DP budget accountant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetConfig {
    /// Total epsilon available to the session.
    pub total_epsilon: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self { total_epsilon: 1.0 }
    }
}

impl BudgetConfig {
    /// Create a config with an explicit total budget.
    pub fn new(total_epsilon: f64) -> Self {
        Self { total_epsilon }
    }

    /// Validate configuration parameters.
    ///
    /// A bad total budget is reported as [`census_dp_core::DpError::ConfigError`].
    pub fn validate(&self) -> Result<()> {
        check_epsilon(self.total_epsilon).map_err(DpError::in_config)
    }
}

impl AccountantConfig for BudgetConfig {
    type Accountant = PureDpAccountant;

    fn create_accountant(&self) -> Result<Self::Accountant> {
        self.validate()?;
        PureDpAccountant::new(self.total_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_config_creates_fresh_accountant() {
        let cfg = BudgetConfig::new(2.0);
        let mut acc = cfg.create_accountant().unwrap();
        acc.charge(1.5).unwrap();
        let fresh = cfg.create_accountant().unwrap();
        assert_eq!(fresh.spent(), 0.0);
        assert_eq!(fresh.total_epsilon(), 2.0);
    }

    #[test]
    fn invalid_budget_config_fails() {
        assert!(BudgetConfig::new(0.0)
            .create_accountant()
            .unwrap_err()
            .is_config_error());
        assert!(BudgetConfig::new(f64::NAN).validate().unwrap_err().is_config_error());
        assert!(BudgetConfig::default().validate().is_ok());
    }
}
