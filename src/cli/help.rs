//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print a short usage guide, showing the settings a run would use.
pub fn print_usage_help(config: &Config) {
    println!("Usage: clipsync [OPTIONS] <CLIPS_DIR> <MASTERS_DIR> <OUTPUT_DIR>");
    println!();
    println!("Example: clipsync ./clips ./masters ./synced --threshold 0.02");
    println!();
    println!("Current settings:");
    for line in settings_summary(config) {
        println!("  {line}");
    }
    println!();
    println!("Run 'clipsync -h' for all options or 'clipsync config init' to create a config file.");
}

fn settings_summary(config: &Config) -> Vec<String> {
    vec![
        format!("threshold   = {}", config.matching.threshold),
        format!("sample rate = {} Hz", config.matching.sample_rate),
        format!("backend     = {}", config.extraction.backend),
    ]
}
