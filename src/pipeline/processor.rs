//! Single clip processing.

use super::coordinator::{ProcessCheck, output_path_for, should_process};
use crate::audio::load_signal;
use crate::extract::{ExtractionRequest, Extractor};
use crate::matching::{CandidateClip, Decision, MasterRecording, Matcher};
use crate::output::{ClipRecord, ClipStatus, SyncReporter};
use std::path::Path;
use tracing::{debug, info, warn};

/// Options for processing a single clip.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Leave existing outputs alone.
    pub skip_existing: bool,
    /// Match and report without writing anything.
    pub dry_run: bool,
}

/// Locate one clip among the masters and extract the matching span.
///
/// Never fails: load and extraction errors end up in the returned record.
pub fn process_clip(
    clip_path: &Path,
    output_dir: &Path,
    masters: &[MasterRecording],
    matcher: &Matcher,
    extractor: &dyn Extractor,
    reporter: &dyn SyncReporter,
    options: &ProcessOptions,
) -> ClipRecord {
    let output = output_path_for(clip_path, output_dir);

    if !options.dry_run && should_process(&output, options.skip_existing) == ProcessCheck::SkipExists
    {
        info!("Skipping (output exists): {}", clip_path.display());
        reporter.clip_skipped(&output, "output exists");
        return ClipRecord::skipped(clip_path, &output);
    }

    reporter.clip_started(clip_path);

    let loaded = match load_signal(clip_path, matcher.config().sample_rate) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("Failed to load clip {}: {e}", clip_path.display());
            reporter.clip_failed(clip_path, &e.to_string());
            return ClipRecord::failed(clip_path, e.to_string());
        }
    };

    let clip = CandidateClip::new(clip_path, loaded.signal, loaded.source_duration_secs);
    let decision = matcher.match_clip(&clip, masters);
    reporter.clip_decided(&decision);

    let mut record = ClipRecord::from_decision(clip_path, &decision, clip.duration_secs);

    let Decision::Accepted(acceptance) = decision else {
        debug!("No master accepted for {}", clip_path.display());
        return record;
    };

    reporter.extraction_started(&acceptance);

    if options.dry_run {
        reporter.clip_skipped(&output, "dry run");
        record.output = Some(output);
        return record;
    }

    let request = ExtractionRequest::new(
        acceptance.master,
        acceptance.offset_secs,
        acceptance.duration_secs,
        output,
    );

    match extractor.extract(&request) {
        Ok(written) => {
            reporter.clip_saved(&written);
            record.output = Some(written);
        }
        Err(e) => {
            warn!(
                "Failed to extract {} from {}: {e}",
                clip_path.display(),
                request.master.display()
            );
            reporter.clip_failed(clip_path, &e.to_string());
            record.status = ClipStatus::Failed;
            record.error = Some(e.to_string());
        }
    }

    record
}
