//! Extraction of matched spans from master recordings.
//!
//! An [`Extractor`] cuts `[start, start + duration)` out of a master and
//! writes it as 16-bit PCM WAV. Output always goes to a `.part` file first
//! and is renamed into place only when complete.

mod ffmpeg;
mod partial;
mod wav;

pub use ffmpeg::FfmpegExtractor;
pub use partial::{PartialFile, cleanup_partial_files, partial_path_for};
pub use wav::WavExtractor;

use crate::config::{ExtractionBackend, ExtractionConfig};
use crate::error::Result;
use std::path::PathBuf;

/// One span to cut out of a master.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    /// Master recording to read from.
    pub master: PathBuf,
    /// Start of the span in seconds.
    pub start_secs: f64,
    /// Length of the span in seconds.
    pub duration_secs: f64,
    /// Destination WAV file.
    pub output: PathBuf,
}

impl ExtractionRequest {
    /// Build a request.
    pub fn new(
        master: impl Into<PathBuf>,
        start_secs: f64,
        duration_secs: f64,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            master: master.into(),
            start_secs,
            duration_secs,
            output: output.into(),
        }
    }
}

/// Writes a span of a master to disk.
pub trait Extractor {
    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Extract the requested span, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the master cannot be read, the span is empty, or
    /// the output cannot be written. No file is left at the output path on
    /// failure.
    fn extract(&self, request: &ExtractionRequest) -> Result<PathBuf>;
}

/// Build the extractor selected in the configuration.
pub fn build_extractor(config: &ExtractionConfig) -> Box<dyn Extractor> {
    match config.backend {
        ExtractionBackend::Native => Box::new(WavExtractor::new()),
        ExtractionBackend::Ffmpeg => Box::new(FfmpegExtractor::new(&config.ffmpeg_path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_extractor_follows_backend() {
        let mut config = ExtractionConfig::default();
        assert_eq!(build_extractor(&config).name(), "native");

        config.backend = ExtractionBackend::Ffmpeg;
        assert_eq!(build_extractor(&config).name(), "ffmpeg");
    }
}
