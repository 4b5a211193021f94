//! Preference matching
//!
//! A [`PreferenceSet`] holds the configured answer texts that selection
//! should be biased toward. Matching is case-insensitive substring
//! containment in either direction, so an abbreviated preference like
//! "Agree" matches the option "Strongly Agree", and an overly specific
//! preference still matches a shorter option label.

use super::PolicyError;

/// Configured set of preferred answer texts, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSet {
    // Lowercased at construction; matching never re-normalizes them.
    entries: Vec<String>,
}

impl PreferenceSet {
    /// Builds a preference set from the given entries.
    ///
    /// Entries are lowercased once here. Returns
    /// [`PolicyError::EmptyPreferenceSet`] when no entries are given, since
    /// a run configured with an empty set could never honor its bias.
    pub fn new<I, S>(entries: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();

        if entries.is_empty() {
            return Err(PolicyError::EmptyPreferenceSet);
        }

        Ok(Self { entries })
    }

    /// Returns true when the option text counts as preferred.
    ///
    /// The option text is trimmed and lowercased, then compared against
    /// every entry with symmetric containment: the entry may appear inside
    /// the option text, or the option text inside the entry. First match
    /// wins; there is no scoring among multiple matching entries.
    pub fn matches(&self, option_text: &str) -> bool {
        let text = option_text.trim().to_lowercase();
        if text.is_empty() {
            return false;
        }
        self.entries
            .iter()
            .any(|p| text.contains(p.as_str()) || p.contains(text.as_str()))
    }

    /// Number of configured entries (always at least one)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API completeness alongside `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn set(entries: &[&str]) -> PreferenceSet {
        PreferenceSet::new(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_set_rejected() {
        let result = PreferenceSet::new(Vec::<String>::new());
        assert!(matches!(result, Err(PolicyError::EmptyPreferenceSet)));
    }

    #[parameterized(
        preference_inside_option = { "Strongly Agree", "Agree", true },
        option_inside_preference = { "Agree", "Strongly Agree", true },
        exact = { "Female", "Female", true },
        case_insensitive = { "FEMALE", "female", true },
        whitespace_trimmed = { "  Agree \n", "agree", true },
        digit_preference = { "4", "4", true },
        unrelated = { "Disagree strongly", "Female", false },
    )]
    fn test_symmetric_containment(option: &str, preference: &str, expected: bool) {
        assert_eq!(set(&[preference]).matches(option), expected);
    }

    #[test]
    fn test_any_entry_matches() {
        let prefs = set(&["Female", "18-24", "Other country"]);
        assert!(prefs.matches("18-24"));
        assert!(prefs.matches("Other country (please specify)"));
        assert!(!prefs.matches("Male"));
    }

    #[test]
    fn test_empty_option_text_never_matches() {
        // "" is a substring of everything; an empty label must not count
        // as preferred.
        let prefs = set(&["Agree"]);
        assert!(!prefs.matches(""));
        assert!(!prefs.matches("   "));
    }
}
