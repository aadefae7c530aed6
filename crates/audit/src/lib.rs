//! Empirical checks for differentially private releases.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auditor;
mod stats;

pub use auditor::{neighboring_releases, AuditResult, Auditor};
pub use stats::{
    check_mechanism, fraction_within, ks_distance_laplace, MechanismCheck, SampleSummary,
};

/// Common imports for auditing.
pub mod prelude {
    pub use crate::{
        check_mechanism, fraction_within, ks_distance_laplace, neighboring_releases,
        AuditResult, Auditor, MechanismCheck, SampleSummary,
    };
}
