//! Locating a clip inside a master by normalized cross-correlation.

use super::correlate::{Correlator, argmax};
use super::standardize::standardize;
use crate::audio::AudioSignal;
use crate::constants::DEFAULT_EPSILON;
use crate::error::{Error, Result};
use serde::Serialize;

/// A standardized signal ready for correlation.
#[derive(Debug, Clone)]
pub struct PreparedSignal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl PreparedSignal {
    /// Standardized samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Best alignment of one clip against one master.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    /// Offset of the clip within the master, in analysis samples.
    pub offset_samples: usize,
    /// Offset of the clip within the master, in seconds.
    pub offset_secs: f64,
    /// Correlation peak divided by the clip length.
    pub confidence: f64,
}

/// Outcome of comparing a clip with a master.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// The pair was correlated.
    Scored(MatchResult),
    /// The pair could not be correlated.
    Failed {
        /// Why the comparison failed.
        reason: String,
    },
}

impl Comparison {
    /// Effective confidence; a failure ranks below every scored comparison.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Scored(result) if !result.confidence.is_nan() => result.confidence,
            _ => f64::NEG_INFINITY,
        }
    }

    /// The match result, if the pair was scored with a usable confidence.
    pub fn result(&self) -> Option<MatchResult> {
        match self {
            Self::Scored(result) if !result.confidence.is_nan() => Some(*result),
            _ => None,
        }
    }
}

impl From<Result<MatchResult>> for Comparison {
    fn from(result: Result<MatchResult>) -> Self {
        match result {
            Ok(result) => Self::Scored(result),
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Finds the offset at which a clip correlates best with a master.
#[derive(Debug)]
pub struct OffsetFinder {
    epsilon: f64,
    correlator: Correlator,
}

impl Default for OffsetFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetFinder {
    /// Create a finder with the default standardization epsilon.
    pub fn new() -> Self {
        Self::with_epsilon(DEFAULT_EPSILON)
    }

    /// Create a finder with a custom standardization epsilon.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon,
            correlator: Correlator::new(),
        }
    }

    /// Standardize a signal once so it can be compared many times.
    pub fn prepare(&self, signal: &AudioSignal) -> Result<PreparedSignal> {
        if signal.is_empty() {
            return Err(Error::EmptySignal);
        }
        Ok(PreparedSignal {
            samples: standardize(&signal.samples, self.epsilon),
            sample_rate: signal.sample_rate,
        })
    }

    /// Locate `clip` inside `master`.
    pub fn find_offset(&self, clip: &AudioSignal, master: &AudioSignal) -> Result<MatchResult> {
        let clip = self.prepare(clip)?;
        let master = self.prepare(master)?;
        self.find_prepared(&clip, &master)
    }

    /// Locate a prepared clip inside a prepared master.
    ///
    /// The peak position of the valid-mode correlation is the offset; the
    /// peak value divided by the clip length is the confidence. When the
    /// clip is longer than the master the master is slid inside the clip
    /// instead and the offset is reported as zero.
    pub fn find_prepared(
        &self,
        clip: &PreparedSignal,
        master: &PreparedSignal,
    ) -> Result<MatchResult> {
        if clip.sample_rate != master.sample_rate {
            return Err(Error::SampleRateMismatch {
                clip: clip.sample_rate,
                master: master.sample_rate,
            });
        }
        if clip.is_empty() || master.is_empty() || clip.sample_rate == 0 {
            return Err(Error::EmptySignal);
        }

        let clip_longer = clip.len() > master.len();
        let correlation = if clip_longer {
            self.correlator
                .correlate_valid(&clip.samples, &master.samples)?
        } else {
            self.correlator
                .correlate_valid(&master.samples, &clip.samples)?
        };

        let (peak_index, peak_value) = argmax(&correlation).ok_or_else(|| Error::Fft {
            reason: "correlation produced no finite values".to_string(),
        })?;

        let offset_samples = if clip_longer { 0 } else { peak_index };
        #[allow(clippy::cast_precision_loss)]
        let offset_secs = offset_samples as f64 / f64::from(clip.sample_rate);
        #[allow(clippy::cast_precision_loss)]
        let confidence = peak_value / clip.len() as f64;

        Ok(MatchResult {
            offset_samples,
            offset_secs,
            confidence,
        })
    }
}
