//! Single-choice selection policy
//!
//! Picks exactly one option from a non-empty list. With the configured
//! probability the first preferred option (in list order) is taken; when the
//! gate fails or nothing matches, one option is drawn uniformly from the
//! full list.

use super::matcher::PreferenceSet;
use super::sampler::Sampler;
use super::{validate_probability, PolicyError};

/// Outcome of a single-choice selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleChoice {
    /// Index into the option list passed to [`SingleChoicePolicy::choose`]
    pub index: usize,
    /// Whether the pick came from the preference pass rather than the
    /// uniform fallback
    pub preferred: bool,
}

/// Policy selecting exactly one option per question
#[derive(Debug, Clone)]
pub struct SingleChoicePolicy {
    preferences: PreferenceSet,
    preference_probability: f64,
}

impl SingleChoicePolicy {
    pub fn new(
        preferences: PreferenceSet,
        preference_probability: f64,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            preferences,
            preference_probability: validate_probability(preference_probability)?,
        })
    }

    /// Selects one option index from `labels`.
    ///
    /// Always returns a valid index for non-empty input; empty input is
    /// [`PolicyError::EmptyOptionSet`]. One `chance` draw is consumed per
    /// call; the uniform `pick` draw is consumed only when the preference
    /// pass did not produce an option.
    pub fn choose<T, S>(&self, labels: &[T], sampler: &mut S) -> Result<SingleChoice, PolicyError>
    where
        T: AsRef<str>,
        S: Sampler + ?Sized,
    {
        if labels.is_empty() {
            return Err(PolicyError::EmptyOptionSet);
        }

        if sampler.chance(self.preference_probability) {
            if let Some(index) = labels
                .iter()
                .position(|label| self.preferences.matches(label.as_ref()))
            {
                return Ok(SingleChoice {
                    index,
                    preferred: true,
                });
            }
        }

        Ok(SingleChoice {
            index: sampler.pick(labels.len()),
            preferred: false,
        })
    }
}
