//! Clip and master records handed to the matcher.

use super::offset::PreparedSignal;
use crate::audio::AudioSignal;
use std::path::{Path, PathBuf};

/// A short clip of unknown origin.
#[derive(Debug, Clone)]
pub struct CandidateClip {
    /// Source file.
    pub path: PathBuf,
    /// Mono signal at the analysis rate.
    pub signal: AudioSignal,
    /// Duration of the source file at its native rate.
    pub duration_secs: f64,
}

impl CandidateClip {
    /// Create a clip record.
    pub fn new(path: impl Into<PathBuf>, signal: AudioSignal, duration_secs: f64) -> Self {
        Self {
            path: path.into(),
            signal,
            duration_secs,
        }
    }
}

/// Load state of a master recording.
#[derive(Debug, Clone)]
pub enum MasterState {
    /// Decoded and standardized.
    Ready(PreparedSignal),
    /// Could not be decoded; every comparison against it fails.
    Unavailable {
        /// Why the master could not be loaded.
        reason: String,
    },
}

/// A long reference recording.
#[derive(Debug, Clone)]
pub struct MasterRecording {
    /// Source file.
    pub path: PathBuf,
    /// Prepared signal, or the reason it is missing.
    pub state: MasterState,
    /// Duration of the source file at its native rate, when known.
    pub duration_secs: Option<f64>,
}

impl MasterRecording {
    /// A master whose signal is ready for comparison.
    pub fn ready(path: impl Into<PathBuf>, signal: PreparedSignal, duration_secs: f64) -> Self {
        Self {
            path: path.into(),
            state: MasterState::Ready(signal),
            duration_secs: Some(duration_secs),
        }
    }

    /// A master that failed to load.
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state: MasterState::Unavailable {
                reason: reason.into(),
            },
            duration_secs: None,
        }
    }

    /// Source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the master can be compared.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, MasterState::Ready(_))
    }

    /// True when `[offset, offset + duration)` runs past the end of the
    /// master. An accepted match like this is usually spurious.
    pub fn overruns(&self, offset_secs: f64, duration_secs: f64) -> bool {
        self.duration_secs
            .is_some_and(|master| offset_secs + duration_secs > master)
    }
}
