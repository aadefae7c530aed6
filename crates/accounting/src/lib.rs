//! Privacy budget accounting for pure differential privacy.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accountants;
pub mod budget;
pub mod calibrate;
pub mod event;

pub use accountants::{AccountantConfig, BudgetConfig};
pub use budget::PureDpAccountant;
pub use calibrate::{calibrate_epsilon, coverage, epsilon_for_scale, noise_bound};
pub use event::{compose_parallel, compose_sequential, DpEvent};

/// Common imports for privacy accounting.
pub mod prelude {
    pub use crate::{
        calibrate_epsilon, compose_parallel, compose_sequential, coverage, epsilon_for_scale,
        noise_bound, AccountantConfig, BudgetConfig, DpEvent, PureDpAccountant,
    };
}
