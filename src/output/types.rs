//! Per-clip outcome records shared by console and JSON reporting.

use crate::matching::Decision;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What happened to a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    /// Matched and extracted (or would be, in a dry run).
    Accepted,
    /// No master matched above the threshold.
    Rejected,
    /// The clip could not be loaded or its extraction failed.
    Failed,
    /// Output already existed and was left alone.
    Skipped,
}

impl std::fmt::Display for ClipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome of processing one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    /// Clip file.
    pub clip: PathBuf,
    /// Outcome.
    pub status: ClipStatus,
    /// Best master, if any master could be scored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<PathBuf>,
    /// Confidence against the best master.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Offset within the master in seconds, for accepted clips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_secs: Option<f64>,
    /// Clip duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Written (or planned) output file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Error message for failed clips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClipRecord {
    /// Record built from a match decision.
    pub fn from_decision(clip: &Path, decision: &Decision, duration_secs: f64) -> Self {
        let (status, offset_secs) = match decision {
            Decision::Accepted(acceptance) => (ClipStatus::Accepted, Some(acceptance.offset_secs)),
            Decision::Rejected { .. } => (ClipStatus::Rejected, None),
        };
        Self {
            clip: clip.to_path_buf(),
            status,
            master: decision.master().map(Path::to_path_buf),
            confidence: decision.confidence(),
            offset_secs,
            duration_secs: Some(duration_secs),
            output: None,
            error: None,
        }
    }

    /// Record for a clip that failed before or during extraction.
    pub fn failed(clip: &Path, error: impl Into<String>) -> Self {
        Self {
            clip: clip.to_path_buf(),
            status: ClipStatus::Failed,
            master: None,
            confidence: None,
            offset_secs: None,
            duration_secs: None,
            output: None,
            error: Some(error.into()),
        }
    }

    /// Record for a clip whose output already exists.
    pub fn skipped(clip: &Path, output: &Path) -> Self {
        Self {
            clip: clip.to_path_buf(),
            status: ClipStatus::Skipped,
            master: None,
            confidence: None,
            offset_secs: None,
            duration_secs: None,
            output: Some(output.to_path_buf()),
            error: None,
        }
    }
}

/// Counts of clip outcomes for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Clips seen.
    pub clips: usize,
    /// Masters scanned.
    pub masters: usize,
    /// Masters that could not be loaded.
    pub masters_unavailable: usize,
    /// Accepted clips.
    pub accepted: usize,
    /// Rejected clips.
    pub rejected: usize,
    /// Failed clips.
    pub failed: usize,
    /// Skipped clips.
    pub skipped: usize,
}

impl RunTotals {
    /// Tally clip records.
    pub fn from_records(records: &[ClipRecord], masters: usize, masters_unavailable: usize) -> Self {
        let mut totals = Self {
            clips: records.len(),
            masters,
            masters_unavailable,
            ..Self::default()
        };
        for record in records {
            match record.status {
                ClipStatus::Accepted => totals.accepted += 1,
                ClipStatus::Rejected => totals.rejected += 1,
                ClipStatus::Failed => totals.failed += 1,
                ClipStatus::Skipped => totals.skipped += 1,
            }
        }
        totals
    }
}
