//! Composable descriptions of pure-DP releases.

use census_dp_core::{check_epsilon, check_sensitivity, DpError, Result};

/// A composable description of a DP mechanism.
#[derive(Clone, Debug, PartialEq)]
pub enum DpEvent {
    /// A Laplace release with the given sensitivity and noise scale.
    Laplace {
        /// L1 sensitivity of the released query.
        sensitivity: f64,
        /// Noise scale `b` of the Laplace distribution.
        scale: f64,
    },
    /// An event composed with itself multiple times.
    SelfComposed {
        /// The inner event.
        event: Box<DpEvent>,
        /// Number of compositions.
        count: u64,
    },
    /// Events run one after another on the same data.
    Composed(Vec<DpEvent>),
    /// Events run on disjoint partitions of the data.
    Parallel(Vec<DpEvent>),
}

impl DpEvent {
    /// A Laplace release calibrated to `epsilon`.
    pub fn laplace(sensitivity: f64, epsilon: f64) -> Result<Self> {
        check_sensitivity(sensitivity)?;
        check_epsilon(epsilon)?;
        Ok(DpEvent::Laplace {
            sensitivity,
            scale: sensitivity / epsilon,
        })
    }

    /// Compose `self` with itself `count` times.
    pub fn repeated(self, count: u64) -> Self {
        DpEvent::SelfComposed {
            event: Box::new(self),
            count,
        }
    }

    /// Total pure-DP epsilon of the event.
    pub fn epsilon(&self) -> Result<f64> {
        match self {
            DpEvent::Laplace { sensitivity, scale } => {
                check_sensitivity(*sensitivity)?;
                if *sensitivity == 0.0 {
                    return Ok(0.0);
                }
                if !scale.is_finite() || *scale <= 0.0 {
                    return Err(DpError::invalid(format!(
                        "laplace scale must be positive for non-zero sensitivity, got {scale}"
                    )));
                }
                Ok(sensitivity / scale)
            }
            DpEvent::SelfComposed { event, count } => Ok(event.epsilon()? * *count as f64),
            DpEvent::Composed(events) => {
                let eps = events
                    .iter()
                    .map(DpEvent::epsilon)
                    .collect::<Result<Vec<_>>>()?;
                Ok(eps.iter().sum())
            }
            DpEvent::Parallel(events) => {
                let eps = events
                    .iter()
                    .map(DpEvent::epsilon)
                    .collect::<Result<Vec<_>>>()?;
                Ok(eps.into_iter().fold(0.0, f64::max))
            }
        }
    }
}

/// Sequential composition: total epsilon of releases on the same data.
pub fn compose_sequential(epsilons: &[f64]) -> Result<f64> {
    let mut total = 0.0;
    for &eps in epsilons {
        check_epsilon(eps)?;
        total += eps;
    }
    Ok(total)
}

/// Parallel composition: total epsilon of releases on disjoint data.
pub fn compose_parallel(epsilons: &[f64]) -> Result<f64> {
    let mut total: f64 = 0.0;
    for &eps in epsilons {
        check_epsilon(eps)?;
        total = total.max(eps);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn laplace_event_recovers_epsilon() {
        let event = DpEvent::laplace(1.0, 0.1).unwrap();
        assert_eq!(
            event,
            DpEvent::Laplace {
                sensitivity: 1.0,
                scale: 10.0
            }
        );
        assert!((event.epsilon().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_sensitivity_costs_nothing() {
        let event = DpEvent::Laplace {
            sensitivity: 0.0,
            scale: 0.0,
        };
        assert_eq!(event.epsilon().unwrap(), 0.0);
    }

    #[test]
    fn self_composition_scales_linearly() {
        let event = DpEvent::laplace(1.0, 0.5).unwrap().repeated(4);
        assert!((event.epsilon().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_takes_max() {
        let event = DpEvent::Parallel(vec![
            DpEvent::laplace(1.0, 0.5).unwrap(),
            DpEvent::laplace(1.0, 1.5).unwrap(),
            DpEvent::laplace(2.0, 1.0).unwrap(),
        ]);
        assert!((event.epsilon().unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn composed_rejects_invalid_inner_event() {
        let event = DpEvent::Composed(vec![
            DpEvent::laplace(1.0, 0.5).unwrap(),
            DpEvent::Laplace {
                sensitivity: 1.0,
                scale: -1.0,
            },
        ]);
        assert!(event.epsilon().is_err());
    }

    #[test]
    fn composition_helpers_validate() {
        assert!((compose_sequential(&[0.1, 0.2, 0.3]).unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(compose_parallel(&[0.1, 0.4, 0.2]).unwrap(), 0.4);
        assert!(compose_sequential(&[0.1, 0.0]).is_err());
        assert!(compose_parallel(&[-1.0]).is_err());
        assert_eq!(compose_sequential(&[]).unwrap(), 0.0);
    }

    proptest! {
        #[test]
        fn parallel_never_exceeds_sequential(
            eps in prop::collection::vec(0.01f64..5.0, 1..16),
        ) {
            let seq = compose_sequential(&eps).unwrap();
            let par = compose_parallel(&eps).unwrap();
            prop_assert!(par <= seq + 1e-12);
        }
    }
}
