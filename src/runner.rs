//! Run loop: repeated form-filling passes
//!
//! One pass opens the form, answers every question through the selection
//! policies, submits, and appends the collected answers to the response
//! log. Passes run strictly sequentially. Ctrl-C ends the loop gracefully
//! and releases the browser session; it never aborts the process mid-write.

use crate::config::FormpilotConfig;
use crate::form::{FieldHandle, FieldKind, FormDriver, FormError};
use crate::policy::{
    MultiChoicePolicy, PolicyError, PreferenceSet, Sampler, SingleChoicePolicy,
};
use crate::record::AnswerRecord;
use crate::response_log::{LogError, ResponseLog};
use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{error, info, warn};

/// Title recorded when a field renders no extractable question text
pub const UNKNOWN_QUESTION: &str = "Unknown Question";

/// Errors that end a pass or the whole run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Form(#[from] FormError),

    /// Persisting a pass's answers failed; continuing would silently lose
    /// every later pass as well, so this ends the run
    #[error(transparent)]
    Log(#[from] LogError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: u32,
    pub completed: u32,
    pub failed: u32,
    pub interrupted: bool,
}

/// Orchestrates N form-filling passes over one browser session
pub struct SurveyRunner<D, S> {
    driver: D,
    sampler: S,
    single: SingleChoicePolicy,
    multi: MultiChoicePolicy,
    log: ResponseLog,
    form_url: String,
}

impl<D, S> SurveyRunner<D, S>
where
    D: FormDriver,
    S: Sampler + Send,
{
    /// Builds the runner's policies from configuration. The caller is
    /// expected to have validated the config already; policy constructors
    /// re-check their own invariants.
    pub fn from_config(config: &FormpilotConfig, driver: D, sampler: S) -> Result<Self, PolicyError> {
        let preferences = PreferenceSet::new(config.preferences.iter().cloned())?;
        let single = SingleChoicePolicy::new(preferences.clone(), config.preference_probability)?;
        let multi = MultiChoicePolicy::with_extension_probability(
            preferences,
            config.preference_probability,
            config.extension_probability,
        )?;

        Ok(Self {
            driver,
            sampler,
            single,
            multi,
            log: ResponseLog::new(config.log_path.clone()),
            form_url: config.form_url.clone(),
        })
    }

    /// Runs up to `passes` sequential passes.
    ///
    /// A failed pass (navigation, submit) is counted and the run moves on;
    /// a persistence failure ends the run. Ctrl-C stops the loop, closes
    /// the browser session and returns the summary collected so far.
    pub async fn run(&mut self, passes: u32) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary {
            requested: passes,
            completed: 0,
            failed: 0,
            interrupted: false,
        };

        let bar = ProgressBar::new(passes as u64);
        for pass in 1..=passes {
            let outcome = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt received, stopping after {} completed passes", summary.completed);
                    summary.interrupted = true;
                    break;
                }
                outcome = self.run_pass(pass) => outcome,
            };

            match outcome {
                Ok(record) => {
                    summary.completed += 1;
                    info!(pass, answers = record.len(), "pass complete");
                    for (question, answer) in record.iter() {
                        info!("  {question}: {answer}");
                    }
                }
                Err(RunError::Log(err)) => {
                    error!(pass, error = %err, "failed to persist answers, aborting run");
                    self.shutdown().await;
                    return Err(RunError::Log(err));
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(pass, error = %err, "pass failed, continuing with next pass");
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        self.shutdown().await;
        Ok(summary)
    }

    /// One complete pass: load, answer every field, submit, persist.
    async fn run_pass(&mut self, pass: u32) -> Result<AnswerRecord, RunError> {
        info!(pass, url = %self.form_url, "opening form");
        self.driver.open(&self.form_url).await?;

        let fields = self.driver.fields().await?;
        let mut record = AnswerRecord::new();

        for (number, field) in fields.iter().enumerate() {
            info!("Question {}:", number + 1);
            if let Some((question, answer)) = self.answer_field(field).await? {
                record.insert(question, answer);
            }
        }

        self.driver.submit().await?;
        self.log.append(&record)?;
        Ok(record)
    }

    /// Answers one field. Returns `None` when the field cannot be answered
    /// (unknown rendering or no options); the pass continues without it.
    async fn answer_field(
        &mut self,
        field: &FieldHandle,
    ) -> Result<Option<(String, String)>, RunError> {
        let question = match self.driver.title(field).await {
            Ok(Some(title)) if !title.trim().is_empty() => title.trim().to_string(),
            Ok(_) => UNKNOWN_QUESTION.to_string(),
            Err(err) => {
                warn!(error = %err, "failed to extract question title");
                UNKNOWN_QUESTION.to_string()
            }
        };

        let kind = self.driver.probe(field).await?;
        if kind == FieldKind::Unknown {
            warn!(%question, "no option controls found, skipping question");
            return Ok(None);
        }

        let options = self.driver.options(field, kind).await?;
        if options.is_empty() {
            warn!(%question, "no selectable options, skipping question");
            return Ok(None);
        }
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();

        let answer = match kind {
            FieldKind::SingleSelect => {
                let choice = self.single.choose(&labels, &mut self.sampler)?;
                self.driver.activate(&options[choice.index]).await?;
                let answer = labels[choice.index].trim().to_string();
                if choice.preferred {
                    info!("  [prioritized] selected option: {answer}");
                } else {
                    info!("  selected option: {answer}");
                }
                answer
            }
            FieldKind::MultiSelect => {
                let selection = self.multi.choose(&labels, &mut self.sampler)?;
                for pick in selection.picks() {
                    self.driver.activate(&options[pick.index]).await?;
                    if pick.preferred {
                        info!("  [prioritized] selected option: {}", pick.text);
                    } else {
                        info!("  selected option: {}", pick.text);
                    }
                }
                selection.joined()
            }
            FieldKind::Unknown => unreachable!("unknown kind returns early"),
        };

        Ok(Some((question, answer)))
    }

    async fn shutdown(&mut self) {
        if let Err(err) = self.driver.close().await {
            warn!(error = %err, "failed to close browser session");
        }
    }
}
