//! Directory scanning and run coordination.

use super::masters::load_masters;
use super::processor::{ProcessOptions, process_clip};
use crate::constants::{AUDIO_EXTENSIONS, OUTPUT_EXTENSION};
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::matching::Matcher;
use crate::output::{ClipRecord, RunTotals, SyncReporter, progress};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// The three directories of a run.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Clips to locate.
    pub clips_dir: PathBuf,
    /// Master recordings to search.
    pub masters_dir: PathBuf,
    /// Destination for extracted clips.
    pub output_dir: PathBuf,
}

/// Everything that happened during a run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// One record per clip, in processing order.
    pub records: Vec<ClipRecord>,
    /// Outcome counts.
    pub totals: RunTotals,
}

/// Result of checking whether a clip should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// Clip should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Output path for a clip: `<output_dir>/<clip stem>.wav`.
pub fn output_path_for(clip: &Path, output_dir: &Path) -> PathBuf {
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    let stem = clip.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );
    output_dir.join(format!("{stem}.{OUTPUT_EXTENSION}"))
}

/// Check if a clip should be processed.
pub fn should_process(output: &Path, skip_existing: bool) -> ProcessCheck {
    if skip_existing && output.exists() {
        ProcessCheck::SkipExists
    } else {
        ProcessCheck::Process
    }
}

/// List audio files directly inside `dir`, in directory listing order.
///
/// Subdirectories are not descended into. Files with unrecognized
/// extensions are ignored.
pub fn collect_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_audio_file(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Check if a file has a recognized audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        // Compare as OsStr to handle non-UTF-8 filenames
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

/// Match every clip in the plan against every master and extract the hits.
///
/// Precondition failures (a missing directory, no clips, no masters, an
/// output directory that cannot be created) abort the run. Anything that
/// goes wrong with an individual clip or master is recorded and the run
/// continues.
pub fn sync_directories(
    plan: &SyncPlan,
    options: &ProcessOptions,
    matcher: &Matcher,
    extractor: &dyn Extractor,
    reporter: &dyn SyncReporter,
    progress_enabled: bool,
) -> Result<SyncSummary> {
    let started = Instant::now();

    let clips = collect_audio_files(&plan.clips_dir)?;
    if clips.is_empty() {
        return Err(Error::NoClipFiles {
            path: plan.clips_dir.clone(),
        });
    }

    let master_files = collect_audio_files(&plan.masters_dir)?;
    if master_files.is_empty() {
        return Err(Error::NoMasterFiles {
            path: plan.masters_dir.clone(),
        });
    }

    if !options.dry_run {
        std::fs::create_dir_all(&plan.output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: plan.output_dir.clone(),
            source: e,
        })?;
    }

    info!(
        "Found {} clip(s) and {} master(s); extracting with {}",
        clips.len(),
        master_files.len(),
        extractor.name()
    );

    let masters = load_masters(
        &master_files,
        matcher.finder(),
        matcher.config().sample_rate,
        progress_enabled,
    );
    let masters_unavailable = masters.iter().filter(|m| !m.is_ready()).count();
    if masters_unavailable == masters.len() {
        warn!("None of the {} master(s) could be loaded", masters.len());
    }

    let clip_progress = progress::create_file_progress(clips.len(), "clips", progress_enabled);
    reporter.set_progress(clip_progress.clone());

    let mut records = Vec::with_capacity(clips.len());
    for clip in &clips {
        progress::set_progress_message(clip_progress.as_ref(), &clip.display().to_string());
        let record = process_clip(
            clip,
            &plan.output_dir,
            &masters,
            matcher,
            extractor,
            reporter,
            options,
        );
        records.push(record);
        progress::inc_progress(clip_progress.as_ref());
    }

    reporter.set_progress(None);
    progress::finish_progress(clip_progress);

    let totals = RunTotals::from_records(&records, masters.len(), masters_unavailable);
    info!(
        "Complete: {} accepted, {} rejected, {} failed, {} skipped in {:.2}s",
        totals.accepted,
        totals.rejected,
        totals.failed,
        totals.skipped,
        started.elapsed().as_secs_f64()
    );
    if totals.failed > 0 {
        warn!("{} clip(s) had errors", totals.failed);
    }

    Ok(SyncSummary { records, totals })
}
