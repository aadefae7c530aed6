//! Facade crate re-exporting stable APIs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod census;
pub mod config;
pub mod session;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use census_dp_accounting as accounting;
pub use census_dp_audit as audit;
pub use census_dp_core as core;

pub use census_dp_accounting::{
    calibrate_epsilon, compose_parallel, compose_sequential, coverage, epsilon_for_scale,
    noise_bound, AccountantConfig, BudgetConfig, DpEvent, PureDpAccountant,
};
pub use census_dp_audit::{
    check_mechanism, fraction_within, ks_distance_laplace, neighboring_releases, AuditResult,
    Auditor, MechanismCheck, SampleSummary,
};
pub use census::{
    age_at_least, age_decade, earns_above_50k, has_sex, synthetic_census, CensusRecord,
    IncomeBracket, Sex, AGE_DECADES,
};
pub use config::{QueryConfig, SessionConfig};
pub use census_dp_core::prelude as core_prelude;
pub use census_dp_core::{
    apply_laplace_mechanism, apply_laplace_mechanism_with_rng, count_matching, CountingQuery,
    DpError, HistogramQuery, LaplaceMechanism, NeighboringRelation, Result, Tensor,
    COUNTING_QUERY_SENSITIVITY,
};
pub use session::PrivateQuerySession;

/// Convenience prelude covering common DP building blocks.
pub mod prelude {
    pub use crate::census::{
        age_at_least, age_decade, earns_above_50k, has_sex, synthetic_census, CensusRecord,
        IncomeBracket, Sex, AGE_DECADES,
    };
    pub use crate::config::{QueryConfig, SessionConfig};
    pub use crate::session::PrivateQuerySession;
    pub use census_dp_accounting::prelude::*;
    pub use census_dp_audit::prelude::*;
    pub use census_dp_core::prelude::*;
}
