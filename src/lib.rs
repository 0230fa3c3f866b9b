//! clipsync - locate audio clips in master recordings and re-extract them.
//!
//! Each clip is matched against every master by normalized cross-correlation.
//! When the best match clears the acceptance threshold, the matching span is
//! cut from the master and written as a WAV file.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod matching;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, SyncArgs};
use config::{
    Config, config_file_path, load_default_config, save_default_config, validate_config,
};
use extract::build_extractor;
use matching::{MatchConfig, Matcher};
use output::{ConsoleReporter, NullReporter, ReportSettings, RunReport, SyncReporter};
use pipeline::{ProcessOptions, SyncPlan, SyncSummary, sync_directories};
use std::path::PathBuf;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the clipsync CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.sync.verbose, cli.sync.quiet);

    // Remove half-written outputs on interrupt
    if let Err(e) = ctrlc::set_handler(|| {
        extract::cleanup_partial_files();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;

    if cli.has_no_directories() {
        cli::help::print_usage_help(&config);
        return Ok(());
    }

    let (clips_dir, masters_dir, output_dir) = cli.directories().ok_or(Error::MissingArguments)?;

    let config = resolve_config(config, &cli.sync);
    validate_config(&config)?;

    let plan = SyncPlan {
        clips_dir,
        masters_dir,
        output_dir,
    };
    sync(&plan, &cli.sync, &config).map(|_| ())
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn resolve_config(mut config: Config, args: &SyncArgs) -> Config {
    if let Some(threshold) = args.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.matching.sample_rate = sample_rate;
    }
    if let Some(backend) = args.backend {
        config.extraction.backend = backend;
    }
    if let Some(ffmpeg_path) = &args.ffmpeg_path {
        config.extraction.ffmpeg_path.clone_from(ffmpeg_path);
    }
    config.extraction.skip_existing |= args.skip_existing;
    config
}

/// Run one sync with resolved settings and write the optional report.
fn sync(plan: &SyncPlan, args: &SyncArgs, config: &Config) -> Result<SyncSummary> {
    let match_config = MatchConfig::from(config.matching);
    info!(
        "Matching at {} Hz, accepting confidence above {}",
        match_config.sample_rate, match_config.threshold
    );

    let matcher = Matcher::new(match_config);
    let extractor = build_extractor(&config.extraction);
    let reporter: Box<dyn SyncReporter> = if args.quiet {
        Box::new(NullReporter)
    } else {
        Box::new(ConsoleReporter::new())
    };
    let options = ProcessOptions {
        skip_existing: config.extraction.skip_existing,
        dry_run: args.dry_run,
    };
    let progress_enabled = !args.quiet && !args.no_progress;

    let summary = sync_directories(
        plan,
        &options,
        &matcher,
        extractor.as_ref(),
        reporter.as_ref(),
        progress_enabled,
    )?;

    if let Some(report_path) = &args.report {
        let report = RunReport::new(
            ReportSettings {
                threshold: match_config.threshold,
                sample_rate: match_config.sample_rate,
                backend: extractor.name().to_string(),
                dry_run: args.dry_run,
            },
            summary.records.clone(),
            summary.totals,
        );
        output::write_run_report(report_path, &report)?;
        info!("Wrote report: {}", report_path.display());
    }

    Ok(summary)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Decoder crates log every skipped frame at info; keep them quiet below -vvv.
    let filter_str = if quiet {
        "warn".to_string()
    } else {
        match verbose {
            0 => "info,symphonia=warn".to_string(),
            1 => "debug,symphonia=warn".to_string(),
            2 => "trace,symphonia=warn".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            let path: PathBuf = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
