//! CLI argument parsing and command handling.

mod args;
pub mod help;
mod validators;

pub use args::{Cli, Command, ConfigAction, SyncArgs};
pub use validators::{parse_sample_rate, parse_threshold};
