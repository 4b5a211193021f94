use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Automated survey form filler with preference-biased answer selection
#[derive(Parser, Debug)]
#[command(
    name = "formpilot",
    about = "Automated survey form filler with preference-biased answer selection",
    version,
    long_about = "formpilot drives a survey form through a WebDriver session, answering \
                  each question at random with a configurable bias toward preferred \
                  choices, and appends every pass's answers to a CSV response log."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Fill and submit the survey form N times",
        long_about = "Runs the form-filling loop: each pass opens the form, answers every \
                      question, submits, and appends the answers to the response log.\n\n\
                      Examples:\n  \
                      formpilot run --passes 10\n  \
                      formpilot run --probability 0.8 --prefer Agree --prefer 18-24\n  \
                      formpilot run --url https://docs.google.com/forms/d/e/.../viewform"
    )]
    Run(RunArgs),

    #[command(
        about = "Check WebDriver endpoint availability",
        long_about = "Checks that the configured WebDriver endpoint is reachable and ready \
                      to start a browser session.\n\n\
                      Examples:\n  \
                      formpilot check\n  \
                      formpilot check --webdriver http://localhost:9515"
    )]
    Check(CheckArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        help = "Number of passes to run (prompted interactively when omitted)"
    )]
    pub passes: Option<u32>,

    #[arg(long, value_name = "URL", help = "Survey form URL")]
    pub url: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Response log file (CSV, appended to)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "ENDPOINT", help = "WebDriver endpoint")]
    pub webdriver: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "PROB",
        help = "Probability of honoring a matched preference, in [0, 1]"
    )]
    pub probability: Option<f64>,

    #[arg(
        long = "prefer",
        value_name = "TEXT",
        help = "Preferred answer text (repeatable; replaces the configured set)"
    )]
    pub prefer: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(long, value_name = "ENDPOINT", help = "WebDriver endpoint")]
    pub webdriver: Option<String>,
}
