//! Native extraction: decode the span with symphonia, write it with hound.

use super::partial::PartialFile;
use super::{ExtractionRequest, Extractor};
use crate::audio::{InterleavedAudio, decode_time_range};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extracts spans in-process as 16-bit PCM WAV at the master's native rate.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavExtractor;

impl WavExtractor {
    /// Create a native extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for WavExtractor {
    fn name(&self) -> &'static str {
        "native"
    }

    fn extract(&self, request: &ExtractionRequest) -> Result<PathBuf> {
        let out_of_range = |available: f64| Error::ExtractionRange {
            path: request.master.clone(),
            start: request.start_secs,
            duration: request.duration_secs,
            available,
        };

        if !request.start_secs.is_finite()
            || !request.duration_secs.is_finite()
            || request.start_secs < 0.0
            || request.duration_secs <= 0.0
        {
            return Err(out_of_range(f64::NAN));
        }

        let span = decode_time_range(&request.master, request.start_secs, request.duration_secs)?;
        if span.frames() == 0 {
            #[allow(clippy::cast_precision_loss)]
            let available = span.frames_seen as f64 / f64::from(span.sample_rate.max(1));
            return Err(out_of_range(available));
        }

        #[allow(clippy::cast_precision_loss)]
        let got_secs = span.frames() as f64 / f64::from(span.sample_rate);
        if got_secs + 1.0 / f64::from(span.sample_rate) < request.duration_secs {
            debug!(
                "Span of {} truncated to {got_secs:.3}s (requested {:.3}s)",
                request.master.display(),
                request.duration_secs
            );
        }

        let partial = PartialFile::new(&request.output);
        write_wav_file(partial.path(), &span)?;
        partial.commit()
    }
}

/// Write interleaved samples to a 16-bit WAV file.
fn write_wav_file(path: &Path, audio: &InterleavedAudio) -> Result<()> {
    let wav_error = |e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let spec = WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(wav_error)?;

    for &sample in &audio.samples {
        writer
            .write_sample(to_i16(sample))
            .map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)
}

/// Convert an f32 sample in [-1.0, 1.0] to i16.
fn to_i16(sample: f32) -> i16 {
    #[allow(clippy::cast_possible_truncation)]
    let value = (sample.clamp(-1.0, 1.0) * 32768.0).round().clamp(-32768.0, 32767.0) as i16;
    value
}
