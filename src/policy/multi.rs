//! Multi-choice selection policy
//!
//! Picks a non-empty, deduplicated subset of options in two phases: a
//! preference pass that gates each matching option individually, then a
//! supplementary pass that may extend the selection with uniform draws over
//! the full option list.

use super::matcher::PreferenceSet;
use super::sampler::Sampler;
use super::{validate_probability, PolicyError};

/// Probability that a non-empty preference selection is extended with
/// additional uniform picks
pub const DEFAULT_EXTENSION_PROBABILITY: f64 = 0.3;

/// One selected option within a multi-choice answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPick {
    /// Index into the option list passed to [`MultiChoicePolicy::choose`]
    pub index: usize,
    /// Trimmed label text; selection is deduplicated on this value
    pub text: String,
    /// Whether the pick came from the preference pass
    pub preferred: bool,
}

/// Outcome of a multi-choice selection, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiChoice {
    picks: Vec<MultiPick>,
}

impl MultiChoice {
    pub fn picks(&self) -> &[MultiPick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Answer string: selected texts joined with "; " in insertion order
    pub fn joined(&self) -> String {
        self.picks
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Policy selecting a non-empty subset of options per question
#[derive(Debug, Clone)]
pub struct MultiChoicePolicy {
    preferences: PreferenceSet,
    preference_probability: f64,
    extension_probability: f64,
}

impl MultiChoicePolicy {
    pub fn new(
        preferences: PreferenceSet,
        preference_probability: f64,
    ) -> Result<Self, PolicyError> {
        Self::with_extension_probability(
            preferences,
            preference_probability,
            DEFAULT_EXTENSION_PROBABILITY,
        )
    }

    pub fn with_extension_probability(
        preferences: PreferenceSet,
        preference_probability: f64,
        extension_probability: f64,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            preferences,
            preference_probability: validate_probability(preference_probability)?,
            extension_probability: validate_probability(extension_probability)?,
        })
    }

    /// Selects a subset of option indices from `labels`.
    ///
    /// Phase A walks the options in order and gates each preferred one
    /// individually with the preference probability. Phase B runs when
    /// phase A selected nothing, or when the selection does not yet cover
    /// every option and the extension gate fires; it then draws a uniform
    /// number of additional picks (with replacement) from the full list,
    /// skipping texts already selected.
    ///
    /// The result is never empty for non-empty input: when phase A selects
    /// nothing, phase B's first draw lands on an unselected option.
    /// Selection size never exceeds the number of distinct labels.
    pub fn choose<T, S>(&self, labels: &[T], sampler: &mut S) -> Result<MultiChoice, PolicyError>
    where
        T: AsRef<str>,
        S: Sampler + ?Sized,
    {
        if labels.is_empty() {
            return Err(PolicyError::EmptyOptionSet);
        }

        let mut picks: Vec<MultiPick> = Vec::new();

        // Phase A: one gate draw per preferred option, in list order.
        for (index, label) in labels.iter().enumerate() {
            let text = label.as_ref().trim();
            if !self.preferences.matches(text) {
                continue;
            }
            if sampler.chance(self.preference_probability) && !selected(&picks, text) {
                picks.push(MultiPick {
                    index,
                    text: text.to_string(),
                    preferred: true,
                });
            }
        }

        // Phase B: mandatory when nothing was selected, otherwise gated on
        // the extension probability while options remain uncovered.
        let extend = picks.is_empty()
            || (picks.len() < labels.len() && sampler.chance(self.extension_probability));

        if extend {
            let remaining = sampler.amount(std::cmp::max(1, labels.len() - picks.len()));
            for _ in 0..remaining {
                let index = sampler.pick(labels.len());
                let text = labels[index].as_ref().trim();
                if !selected(&picks, text) {
                    picks.push(MultiPick {
                        index,
                        text: text.to_string(),
                        preferred: false,
                    });
                }
            }
        }

        Ok(MultiChoice { picks })
    }
}

fn selected(picks: &[MultiPick], text: &str) -> bool {
    picks.iter().any(|p| p.text == text)
}
