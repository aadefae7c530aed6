//! Core differential privacy primitives.
//!
//! This crate provides the Laplace mechanism and the counting and
//! histogram queries it is usually applied to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod noise;
pub mod query;
pub mod tensor;

pub use error::{check_epsilon, check_sensitivity, DpError, Result};
pub use noise::{
    add_laplace_noise, apply_laplace_mechanism, apply_laplace_mechanism_with_rng, sample_laplace,
    LaplaceMechanism,
};
pub use query::{
    count_matching, histogram, CountingQuery, HistogramQuery, NeighboringRelation,
    COUNTING_QUERY_SENSITIVITY,
};
pub use tensor::{l1_distance, l1_norm, Tensor};

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::{
        add_laplace_noise, apply_laplace_mechanism, apply_laplace_mechanism_with_rng,
        count_matching, histogram, l1_distance, sample_laplace, CountingQuery, DpError,
        HistogramQuery, LaplaceMechanism, NeighboringRelation, Result, Tensor,
        COUNTING_QUERY_SENSITIVITY,
    };
}
