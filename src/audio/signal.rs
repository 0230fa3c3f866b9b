//! Fixed-rate mono signals used for matching.

use super::{decode_audio_file, resample};
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// A mono sample sequence at a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    /// Mono samples.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal from raw samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// A decoded file: the analysis signal plus the length of the original.
#[derive(Debug, Clone)]
pub struct LoadedSignal {
    /// Mono signal at the analysis rate.
    pub signal: AudioSignal,
    /// Duration of the original file at its native rate.
    pub source_duration_secs: f64,
}

/// Decode, downmix and resample a file to the analysis rate.
pub fn load_signal(path: &Path, analysis_rate: u32) -> Result<LoadedSignal> {
    let decoded = decode_audio_file(path)?;
    let source_duration_secs = decoded.duration_secs;

    let samples = if decoded.sample_rate == analysis_rate {
        decoded.samples
    } else {
        debug!(
            "Resampling {} from {} Hz to {} Hz",
            path.display(),
            decoded.sample_rate,
            analysis_rate
        );
        resample(decoded.samples, decoded.sample_rate, analysis_rate)?
    };

    Ok(LoadedSignal {
        signal: AudioSignal::new(samples, analysis_rate),
        source_duration_secs,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;

    #[test]
    fn test_duration_secs() {
        let signal = AudioSignal::new(vec![0.0; 11_025], 22_050);
        assert!((signal.duration_secs() - 0.5).abs() < 1e-12);
        assert_eq!(signal.len(), 11_025);
        assert!(!signal.is_empty());
    }

    #[test]
    fn test_zero_rate_has_zero_duration() {
        let signal = AudioSignal::new(vec![0.0; 10], 0);
        assert!(signal.duration_secs().abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_signal_keeps_source_duration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..44_100 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            let v = ((i as f32 * 0.05).sin() * 10_000.0) as i16;
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_signal(&path, 22_050).unwrap();
        assert_eq!(loaded.signal.sample_rate, 22_050);
        assert_eq!(loaded.signal.len(), 22_050);
        assert!((loaded.source_duration_secs - 1.0).abs() < 1e-9);
    }
}
