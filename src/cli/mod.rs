pub mod commands;
pub mod handlers;

pub use commands::{CheckArgs, CliArgs, Commands, RunArgs};
pub use handlers::{handle_check, handle_run};
