//! Form-rendering collaborator seam
//!
//! The policy engine and run loop never talk to a browser directly; they
//! drive a [`FormDriver`], which exposes the survey page as ordered field
//! handles with a title, a probed field kind, and selectable options.
//! [`GoogleFormDriver`] implements the trait over a WebDriver session;
//! tests substitute an in-memory form.

pub mod google;
pub mod webdriver;

pub use google::GoogleFormDriver;
pub use webdriver::{WebDriverClient, WebDriverError};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by form drivers
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    WebDriver(#[from] WebDriverError),

    /// The page never produced a stable, non-zero field count
    #[error("form did not become ready within {0:?}")]
    PageTimeout(Duration),

    /// The submit control is missing from the page
    #[error("submit control not found on the form page")]
    MissingSubmit,
}

/// Probed rendering of a question field.
///
/// Distinguishing single- from multi-select is an explicit capability probe
/// (which option controls exist), never exception-driven fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The field renders single-select option controls
    SingleSelect,
    /// The field renders multi-select option controls
    MultiSelect,
    /// Neither control type was found; the field cannot be answered
    Unknown,
}

/// Opaque handle to one question field on the loaded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHandle {
    pub id: String,
}

/// Opaque handle to one selectable option, with its visible label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionHandle {
    pub id: String,
    /// Visible text as rendered; not trimmed
    pub label: String,
}

/// Capability surface the run loop drives a survey form through.
///
/// One driver instance owns one browser session; passes reuse it by calling
/// [`FormDriver::open`] again. Implementations must keep field and option
/// ordering as rendered.
#[async_trait]
pub trait FormDriver: Send {
    /// Loads the form and waits until its fields are ready.
    async fn open(&mut self, url: &str) -> Result<(), FormError>;

    /// Ordered question fields of the loaded form.
    async fn fields(&mut self) -> Result<Vec<FieldHandle>, FormError>;

    /// Extracted title text of the field, `None` when no title is rendered.
    async fn title(&mut self, field: &FieldHandle) -> Result<Option<String>, FormError>;

    /// Probes which option controls the field renders.
    async fn probe(&mut self, field: &FieldHandle) -> Result<FieldKind, FormError>;

    /// Ordered selectable options for the probed kind. Empty for
    /// [`FieldKind::Unknown`].
    async fn options(
        &mut self,
        field: &FieldHandle,
        kind: FieldKind,
    ) -> Result<Vec<OptionHandle>, FormError>;

    /// Activates (clicks) the option.
    async fn activate(&mut self, option: &OptionHandle) -> Result<(), FormError>;

    /// Submits the filled form.
    async fn submit(&mut self) -> Result<(), FormError>;

    /// Releases the underlying browser session. Idempotent.
    async fn close(&mut self) -> Result<(), FormError>;
}
