//! Answer-selection policy engine
//!
//! Decides which option(s) to pick for a survey question. Selection is
//! randomized but biased toward a configured set of preferred answers:
//! a probability gate decides whether a matching preferred option is honored,
//! otherwise selection falls back to a uniform draw over the full option
//! list.
//!
//! All randomness flows through the [`Sampler`] trait so tests can script
//! exact draw sequences and exercise every branch deterministically.

pub mod matcher;
pub mod multi;
pub mod sampler;
pub mod single;

pub use matcher::PreferenceSet;
pub use multi::{MultiChoice, MultiChoicePolicy, MultiPick};
pub use sampler::{Sampler, ScriptedSampler, ThreadSampler};
pub use single::{SingleChoice, SingleChoicePolicy};

use thiserror::Error;

/// Errors produced by policy construction and selection
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A selection was requested over zero options
    #[error("no selectable options for this question")]
    EmptyOptionSet,

    /// The preference set was constructed without any entries
    #[error("preference set must contain at least one entry")]
    EmptyPreferenceSet,

    /// A probability parameter fell outside [0, 1]
    #[error("probability must be within [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

pub(crate) fn validate_probability(value: f64) -> Result<f64, PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PolicyError::ProbabilityOutOfRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds_accepted() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(0.6).is_ok());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        assert!(matches!(
            validate_probability(1.01),
            Err(PolicyError::ProbabilityOutOfRange(_))
        ));
        assert!(matches!(
            validate_probability(-0.1),
            Err(PolicyError::ProbabilityOutOfRange(_))
        ));
    }
}
