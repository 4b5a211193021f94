//! Configuration for formpilot
//!
//! Settings load from `FORMPILOT_*` environment variables with defaults and
//! may be overridden by CLI flags before validation. The preference set and
//! probabilities are explicit values handed to the policy components at
//! construction; nothing reads them as ambient state afterwards.
//!
//! # Environment Variables
//!
//! - `FORMPILOT_FORM_URL`: survey form URL
//! - `FORMPILOT_WEBDRIVER_URL`: WebDriver endpoint - default: "http://localhost:9515"
//! - `FORMPILOT_PREFERENCES`: comma-separated preferred answer texts
//! - `FORMPILOT_PROBABILITY`: preference probability in [0,1] - default: "0.6"
//! - `FORMPILOT_EXTENSION_PROBABILITY`: multi-choice extension probability - default: "0.3"
//! - `FORMPILOT_LOG_FILE`: response log path - default: "form_responses.csv"
//! - `FORMPILOT_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "30"
//! - `FORMPILOT_PAGE_TIMEOUT`: page readiness timeout in seconds - default: "15"

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSe42EEaKgfigJukDIwsccpfAdQ4uqQvLIshQAcW5hDFCid0Ew/viewform";
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
const DEFAULT_LOG_FILE: &str = "form_responses.csv";
const DEFAULT_PROBABILITY: f64 = 0.6;
const DEFAULT_EXTENSION_PROBABILITY: f64 = 0.3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 15;

const DEFAULT_PREFERENCES: [&str; 10] = [
    "Female",
    "18-24",
    "Other country",
    "Several times a month",
    "Agree",
    "Likely",
    "Mainly foreign brands",
    "Neutral",
    "4",
    "3",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("preference set is empty. Set FORMPILOT_PREFERENCES or pass --prefer")]
    NoPreferences,

    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),

    #[error("{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
}

/// CSS selectors addressing the survey form's markup.
///
/// Defaults target Google Forms class names; override the fields for other
/// markup.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    /// One question field container
    pub field: String,
    /// Single-select option control within a field
    pub single_option: String,
    /// Multi-select option control within a field
    pub multi_option: String,
    /// Question title element within a field
    pub title: String,
    /// Form submit control
    pub submit: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            field: ".geS5n".to_string(),
            single_option: ".nWQGrd.zwllIb".to_string(),
            multi_option: ".eBFwI".to_string(),
            title: ".M7eMe".to_string(),
            submit: ".l4V7wb.Fxmcue".to_string(),
        }
    }
}

/// Main configuration structure for formpilot
#[derive(Debug, Clone)]
pub struct FormpilotConfig {
    /// Survey form URL opened once per pass
    pub form_url: String,

    /// WebDriver endpoint the browser session is driven through
    pub webdriver_url: String,

    /// Preferred answer texts the selection policies are biased toward
    pub preferences: Vec<String>,

    /// Chance of honoring a matched preference over pure randomness
    pub preference_probability: f64,

    /// Chance of extending a non-empty multi-choice selection
    pub extension_probability: f64,

    /// Response log path
    pub log_path: PathBuf,

    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Page readiness timeout in seconds
    pub page_timeout_secs: u64,

    /// CSS selectors for the form markup
    pub selectors: SelectorSet,
}

impl Default for FormpilotConfig {
    /// Loads configuration from environment variables with defaults.
    fn default() -> Self {
        let form_url = env::var("FORMPILOT_FORM_URL").unwrap_or_else(|_| DEFAULT_FORM_URL.into());

        let webdriver_url =
            env::var("FORMPILOT_WEBDRIVER_URL").unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.into());

        let preferences = env::var("FORMPILOT_PREFERENCES")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|parsed| !parsed.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFERENCES.iter().map(|s| s.to_string()).collect());

        let preference_probability = env::var("FORMPILOT_PROBABILITY")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_PROBABILITY);

        let extension_probability = env::var("FORMPILOT_EXTENSION_PROBABILITY")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_EXTENSION_PROBABILITY);

        let log_path = env::var("FORMPILOT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));

        let request_timeout_secs = env::var("FORMPILOT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let page_timeout_secs = env::var("FORMPILOT_PAGE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE_TIMEOUT_SECS);

        Self {
            form_url,
            webdriver_url,
            preferences,
            preference_probability,
            extension_probability,
            log_path,
            request_timeout_secs,
            page_timeout_secs,
            selectors: SelectorSet::default(),
        }
    }
}

impl FormpilotConfig {
    /// Validates the configuration before a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("form URL"));
        }
        if self.webdriver_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("webdriver URL"));
        }
        if self.preferences.is_empty() {
            return Err(ConfigError::NoPreferences);
        }
        if !(0.0..=1.0).contains(&self.preference_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                field: "preference probability",
                value: self.preference_probability,
            });
        }
        if !(0.0..=1.0).contains(&self.extension_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                field: "extension probability",
                value: self.extension_probability,
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("request timeout"));
        }
        if self.page_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("page timeout"));
        }
        Ok(())
    }
}

impl fmt::Display for FormpilotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Formpilot Configuration:")?;
        writeln!(f, "  Form URL: {}", self.form_url)?;
        writeln!(f, "  WebDriver: {}", self.webdriver_url)?;
        writeln!(f, "  Preferences: {}", self.preferences.join(", "))?;
        writeln!(f, "  Preference Probability: {}", self.preference_probability)?;
        writeln!(f, "  Extension Probability: {}", self.extension_probability)?;
        writeln!(f, "  Log File: {}", self.log_path.display())?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Page Timeout: {}s", self.page_timeout_secs)?;
        Ok(())
    }
}
