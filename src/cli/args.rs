//! CLI argument definitions.

use super::validators::{parse_sample_rate, parse_threshold};
use crate::config::ExtractionBackend;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Find where short audio clips came from in a set of master recordings and
/// re-extract them from the masters.
#[derive(Debug, Parser)]
#[command(name = "clipsync")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of short clips to locate.
    pub clips_dir: Option<PathBuf>,

    /// Directory of master recordings to search.
    pub masters_dir: Option<PathBuf>,

    /// Directory to write re-extracted clips to (created if missing).
    pub output_dir: Option<PathBuf>,

    /// Options for a sync run.
    #[command(flatten)]
    pub sync: SyncArgs,
}

impl Cli {
    /// The three positional directories, if all were given.
    pub fn directories(&self) -> Option<(PathBuf, PathBuf, PathBuf)> {
        match (&self.clips_dir, &self.masters_dir, &self.output_dir) {
            (Some(clips), Some(masters), Some(output)) => {
                Some((clips.clone(), masters.clone(), output.clone()))
            }
            _ => None,
        }
    }

    /// True when no positional directory was given at all.
    pub fn has_no_directories(&self) -> bool {
        self.clips_dir.is_none() && self.masters_dir.is_none() && self.output_dir.is_none()
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a sync run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct SyncArgs {
    /// Minimum confidence a match must exceed to be accepted.
    #[arg(short, long, value_parser = parse_threshold, allow_hyphen_values = true, env = "CLIPSYNC_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Analysis sample rate in Hz.
    #[arg(long, value_parser = parse_sample_rate, env = "CLIPSYNC_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Extraction backend (native, ffmpeg).
    #[arg(long, env = "CLIPSYNC_BACKEND")]
    pub backend: Option<ExtractionBackend>,

    /// Path to the ffmpeg executable used by the ffmpeg backend.
    #[arg(long)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Do not overwrite outputs that already exist.
    #[arg(long)]
    pub skip_existing: bool,

    /// Match and report only; write no files.
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON summary of the run to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace, -vvv: trace+decoder logs).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,
}
