//! Release and session configuration.
//!
//! A missing `seed` means noise comes from an entropy-seeded generator; a
//! fixed seed makes every release reproducible, which is only appropriate
//! for tests and demonstrations.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use census_dp_accounting::BudgetConfig;
use census_dp_core::{
    DpError, LaplaceMechanism, NeighboringRelation, Result, COUNTING_QUERY_SENSITIVITY,
};

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Parameters for a single Laplace release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryConfig {
    /// Privacy parameter for the release.
    pub epsilon: f64,
    /// L1 sensitivity of the released query.
    pub sensitivity: f64,
    /// Optional RNG seed.
    pub seed: Option<u64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            sensitivity: COUNTING_QUERY_SENSITIVITY,
            seed: None,
        }
    }
}

impl QueryConfig {
    /// A counting-query release at `epsilon`.
    pub fn counting(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    /// Set the sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration parameters.
    ///
    /// Rejected parameters are reported as [`DpError::ConfigError`]; an
    /// overflowing noise scale stays a [`DpError::NumericalError`].
    pub fn validate(&self) -> Result<()> {
        self.mechanism().map(|_| ()).map_err(DpError::in_config)
    }

    /// Build the configured mechanism.
    pub fn mechanism(&self) -> Result<LaplaceMechanism> {
        LaplaceMechanism::new(self.epsilon, self.sensitivity)
    }

    /// Build the noise source.
    pub fn rng(&self) -> ChaCha8Rng {
        make_rng(self.seed)
    }
}

/// Parameters for a [`crate::PrivateQuerySession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Total budget for the session.
    pub budget: BudgetConfig,
    /// Neighboring relation the guarantees are stated for.
    pub relation: NeighboringRelation,
    /// Optional RNG seed.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig::default(),
            relation: NeighboringRelation::AddOrRemoveOne,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// A session with the given total epsilon.
    pub fn new(total_epsilon: f64) -> Self {
        Self {
            budget: BudgetConfig::new(total_epsilon),
            ..Self::default()
        }
    }

    /// Set the neighboring relation.
    pub fn with_relation(mut self, relation: NeighboringRelation) -> Self {
        self.relation = relation;
        self
    }

    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()
    }

    /// Build the noise source.
    pub fn rng(&self) -> ChaCha8Rng {
        make_rng(self.seed)
    }
}
