//! formpilot - automated survey form filler
//!
//! This library drives a web survey form through a WebDriver session,
//! answering every question at random with a configurable bias toward a set
//! of preferred choices, and appends each pass's answers to a CSV response
//! log.
//!
//! # Core Concepts
//!
//! - **Policy engine**: [`policy`] decides which option(s) to pick per
//!   question. A probability gate controls how often a matched preference is
//!   honored over a uniform random draw; all randomness flows through an
//!   injectable [`policy::Sampler`].
//! - **Form drivers**: [`form::FormDriver`] is the seam to the browser. The
//!   shipped implementation targets Google Forms markup over the W3C
//!   WebDriver protocol.
//! - **Response log**: [`response_log::ResponseLog`] appends one CSV row per
//!   pass; the column layout is fixed by the first record ever written.
//!
//! # Example
//!
//! ```ignore
//! use formpilot::config::FormpilotConfig;
//! use formpilot::form::GoogleFormDriver;
//! use formpilot::policy::ThreadSampler;
//! use formpilot::runner::SurveyRunner;
//!
//! async fn fill_ten_times() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FormpilotConfig::default();
//!     config.validate()?;
//!
//!     let driver = GoogleFormDriver::connect(&config).await?;
//!     let mut runner = SurveyRunner::from_config(&config, driver, ThreadSampler)?;
//!     let summary = runner.run(10).await?;
//!     println!("completed {} passes", summary.completed);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod form;
pub mod policy;
pub mod record;
pub mod response_log;
pub mod runner;

pub use config::{ConfigError, FormpilotConfig, SelectorSet};
pub use form::{FieldKind, FormDriver, FormError, GoogleFormDriver};
pub use policy::{
    MultiChoicePolicy, PolicyError, PreferenceSet, Sampler, SingleChoicePolicy, ThreadSampler,
};
pub use record::AnswerRecord;
pub use response_log::{LogError, ResponseLog};
pub use runner::{RunError, RunSummary, SurveyRunner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
