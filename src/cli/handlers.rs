//! Subcommand handlers
//!
//! Each handler resolves configuration (environment, then CLI overrides),
//! validates it, and returns a process exit code. Run-fatal errors are
//! printed with enough context to act on.

use super::commands::{CheckArgs, RunArgs};
use crate::config::FormpilotConfig;
use crate::form::{GoogleFormDriver, WebDriverClient};
use crate::policy::ThreadSampler;
use crate::runner::SurveyRunner;
use anyhow::{bail, Context};
use std::io::Write;
use std::time::Duration;
use tracing::{error, info};

/// Runs the form-filling loop.
pub async fn handle_run(args: &RunArgs) -> i32 {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return 1;
        }
    };

    let passes = match resolve_passes(args.passes) {
        Ok(passes) => passes,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return 1;
        }
    };
    if passes == 0 {
        info!("nothing to do, 0 passes requested");
        return 0;
    }

    info!(passes, url = %config.form_url, "starting run");

    let driver = match GoogleFormDriver::connect(&config).await {
        Ok(driver) => driver,
        Err(err) => {
            error!(error = %err, "failed to start browser session");
            eprintln!(
                "Error: could not start a browser session at {}\n\n\
                 Help: Make sure a chromedriver-compatible WebDriver is running. Try:\n\
                 - Start it: chromedriver --port=9515\n\
                 - Check availability: formpilot check\n\
                 - Point elsewhere: --webdriver or FORMPILOT_WEBDRIVER_URL",
                config.webdriver_url
            );
            return 1;
        }
    };

    let mut runner = match SurveyRunner::from_config(&config, driver, ThreadSampler) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("Error: {err}");
            return 1;
        }
    };

    match runner.run(passes).await {
        Ok(summary) => {
            info!(
                completed = summary.completed,
                failed = summary.failed,
                interrupted = summary.interrupted,
                "run finished"
            );
            println!(
                "Completed {}/{} passes ({} failed){}. Responses logged to {}",
                summary.completed,
                summary.requested,
                summary.failed,
                if summary.interrupted {
                    ", interrupted"
                } else {
                    ""
                },
                config.log_path.display()
            );
            0
        }
        Err(err) => {
            error!(error = %err, "run aborted");
            eprintln!("Error: {err}");
            1
        }
    }
}

/// Checks the WebDriver endpoint.
pub async fn handle_check(args: &CheckArgs) -> i32 {
    let mut config = FormpilotConfig::default();
    if let Some(endpoint) = &args.webdriver {
        config.webdriver_url = endpoint.clone();
    }

    let client = WebDriverClient::new(
        &config.webdriver_url,
        Duration::from_secs(config.request_timeout_secs),
    );
    match client.status().await {
        Ok(true) => {
            println!("WebDriver at {} is ready", config.webdriver_url);
            0
        }
        Ok(false) => {
            println!(
                "WebDriver at {} responded but is not ready for new sessions",
                config.webdriver_url
            );
            1
        }
        Err(err) => {
            eprintln!(
                "WebDriver at {} is unreachable: {}",
                config.webdriver_url, err
            );
            1
        }
    }
}

/// Environment config with CLI flag overrides applied, validated.
fn resolve_config(args: &RunArgs) -> anyhow::Result<FormpilotConfig> {
    let mut config = FormpilotConfig::default();

    if let Some(url) = &args.url {
        config.form_url = url.clone();
    }
    if let Some(endpoint) = &args.webdriver {
        config.webdriver_url = endpoint.clone();
    }
    if let Some(output) = &args.output {
        config.log_path = output.clone();
    }
    if let Some(probability) = args.probability {
        config.preference_probability = probability;
    }
    if !args.prefer.is_empty() {
        config.preferences = args.prefer.clone();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Pass count from the flag, or prompted from an interactive stdin.
fn resolve_passes(flag: Option<u32>) -> anyhow::Result<u32> {
    if let Some(passes) = flag {
        return Ok(passes);
    }
    if !atty::is(atty::Stream::Stdin) {
        bail!("--passes is required when stdin is not interactive");
    }

    print!("How many passes to run? ");
    std::io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read pass count")?;
    line.trim()
        .parse::<u32>()
        .with_context(|| format!("invalid pass count: {:?}", line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_resolve_config_applies_overrides() {
        let args = RunArgs {
            passes: Some(1),
            url: Some("https://example.com/form".into()),
            output: Some("/tmp/out.csv".into()),
            webdriver: Some("http://host:4444".into()),
            probability: Some(0.9),
            prefer: vec!["Agree".into()],
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.form_url, "https://example.com/form");
        assert_eq!(config.webdriver_url, "http://host:4444");
        assert_eq!(config.preference_probability, 0.9);
        assert_eq!(config.preferences, vec!["Agree"]);
    }

    #[test]
    #[serial]
    fn test_resolve_config_rejects_bad_probability() {
        let args = RunArgs {
            passes: None,
            url: None,
            output: None,
            webdriver: None,
            probability: Some(2.0),
            prefer: Vec::new(),
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_resolve_passes_uses_flag() {
        assert_eq!(resolve_passes(Some(7)).unwrap(), 7);
    }
}
