//! Error types for differential privacy operations.

/// Errors that can occur during DP operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DpError {
    /// Privacy budget cannot cover the requested charge.
    #[error("privacy budget exhausted (requested eps={requested:.4}, remaining eps={remaining:.4})")]
    PrivacyBudgetExhausted {
        /// Epsilon requested by the rejected charge.
        requested: f64,
        /// Epsilon still available.
        remaining: f64,
    },

    /// Invalid parameter provided.
    #[error("invalid parameter: {msg}")]
    InvalidParameter {
        /// Human-readable error description.
        msg: String,
    },

    /// Numerical computation error.
    #[error("numerical error: {msg}")]
    NumericalError {
        /// Human-readable error description.
        msg: String,
    },

    /// Configuration error.
    #[error("configuration error: {msg}")]
    ConfigError {
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for DP operations.
pub type Result<T> = std::result::Result<T, DpError>;

impl DpError {
    /// Create an invalid parameter error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter { msg: msg.into() }
    }

    /// Create a numerical error.
    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        Self::NumericalError { msg: msg.into() }
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError { msg: msg.into() }
    }

    /// Re-report a rejected parameter as a configuration error.
    ///
    /// Other variants pass through unchanged.
    pub fn in_config(self) -> Self {
        match self {
            Self::InvalidParameter { msg } => Self::ConfigError { msg },
            other => other,
        }
    }

    /// Whether this error reports an invalid parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Whether this error reports a bad configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Check that `epsilon` is a usable privacy parameter.
pub fn check_epsilon(epsilon: f64) -> Result<()> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(DpError::invalid(format!(
            "epsilon must be positive and finite, got {epsilon}"
        )));
    }
    Ok(())
}

/// Check that `sensitivity` is a usable sensitivity bound.
pub fn check_sensitivity(sensitivity: f64) -> Result<()> {
    if !sensitivity.is_finite() || sensitivity < 0.0 {
        return Err(DpError::invalid(format!(
            "sensitivity must be non-negative and finite, got {sensitivity}"
        )));
    }
    Ok(())
}
