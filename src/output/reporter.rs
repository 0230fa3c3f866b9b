//! Console reporting of per-clip progress.
//!
//! Lines go to stdout, or through the active progress bar so the bar is
//! redrawn below them instead of being torn.

use crate::constants::CONFIDENCE_DECIMALS;
use crate::matching::{Acceptance, Decision};
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Receives events while clips are processed.
pub trait SyncReporter {
    /// A clip is about to be matched.
    fn clip_started(&self, clip: &Path);

    /// Matching finished for the current clip.
    fn clip_decided(&self, decision: &Decision);

    /// An accepted span is being extracted.
    fn extraction_started(&self, acceptance: &Acceptance);

    /// The extracted span was written.
    fn clip_saved(&self, output: &Path);

    /// Nothing was written because of `reason`.
    fn clip_skipped(&self, output: &Path, reason: &str);

    /// The clip could not be processed.
    fn clip_failed(&self, clip: &Path, error: &str);

    /// Route further output through `progress`, or detach with `None`.
    fn set_progress(&self, _progress: Option<ProgressBar>) {}
}

/// Line-oriented human-readable reporter.
pub struct ConsoleReporter {
    writer: Mutex<Box<dyn Write + Send>>,
    progress: Mutex<Option<ProgressBar>>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// Report to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Report to a custom writer.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            progress: Mutex::new(None),
        }
    }

    fn line(&self, line: &str) {
        if let Ok(progress) = self.progress.lock() {
            if let Some(pb) = progress.as_ref() {
                pb.println(line);
                return;
            }
        }
        if let Ok(mut writer) = self.writer.lock() {
            // Write errors (e.g. a closed pipe) are ignored
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

impl SyncReporter for ConsoleReporter {
    fn clip_started(&self, clip: &Path) {
        self.line(&format!("Processing: {}", file_name(clip)));
    }

    fn clip_decided(&self, decision: &Decision) {
        self.line(&best_match_line(decision));
        if !decision.is_accepted() {
            self.line("  No matching master found (correlation too low).");
        }
    }

    fn extraction_started(&self, acceptance: &Acceptance) {
        self.line(&format!(
            "  Syncing... Offset: {:.2}s, Duration: {:.2}s",
            acceptance.offset_secs, acceptance.duration_secs
        ));
    }

    fn clip_saved(&self, output: &Path) {
        self.line(&format!("  Saved to: {}", output.display()));
    }

    fn clip_skipped(&self, output: &Path, reason: &str) {
        self.line(&format!("  Skipped {}: {reason}", output.display()));
    }

    fn clip_failed(&self, clip: &Path, error: &str) {
        self.line(&format!("  Failed {}: {error}", file_name(clip)));
    }

    fn set_progress(&self, progress: Option<ProgressBar>) {
        if let Ok(mut current) = self.progress.lock() {
            *current = progress;
        }
    }
}

/// Reporter that prints nothing.
pub struct NullReporter;

impl SyncReporter for NullReporter {
    fn clip_started(&self, _clip: &Path) {}
    fn clip_decided(&self, _decision: &Decision) {}
    fn extraction_started(&self, _acceptance: &Acceptance) {}
    fn clip_saved(&self, _output: &Path) {}
    fn clip_skipped(&self, _output: &Path, _reason: &str) {}
    fn clip_failed(&self, _clip: &Path, _error: &str) {}
}

/// `  Best match: NAME (Corr: 0.1234)`, or `None` when nothing could be scored.
pub fn best_match_line(decision: &Decision) -> String {
    match (decision.master(), decision.confidence()) {
        (Some(master), Some(confidence)) => format!(
            "  Best match: {} (Corr: {confidence:.prec$})",
            file_name(master),
            prec = CONFIDENCE_DECIMALS
        ),
        _ => "  Best match: None".to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
