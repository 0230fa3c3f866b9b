//! Configuration type definitions.

use crate::constants::{DEFAULT_EPSILON, DEFAULT_FFMPEG_PATH, DEFAULT_SAMPLE_RATE, DEFAULT_THRESHOLD};
use crate::matching::MatchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching settings.
    pub matching: MatchingConfig,

    /// Extraction settings.
    pub extraction: ExtractionConfig,
}

/// Matching settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Confidence must exceed this value for a match to be accepted.
    pub threshold: f64,

    /// Analysis sample rate in Hz.
    pub sample_rate: u32,

    /// Added to the standard deviation when standardizing.
    pub epsilon: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_rate: DEFAULT_SAMPLE_RATE,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl From<MatchingConfig> for MatchConfig {
    fn from(config: MatchingConfig) -> Self {
        Self {
            threshold: config.threshold,
            sample_rate: config.sample_rate,
            epsilon: config.epsilon,
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which extractor writes the output files.
    pub backend: ExtractionBackend,

    /// ffmpeg executable used by the ffmpeg backend.
    pub ffmpeg_path: PathBuf,

    /// Leave clips alone whose output file already exists.
    pub skip_existing: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backend: ExtractionBackend::default(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            skip_existing: false,
        }
    }
}

/// Extraction implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionBackend {
    /// Decode and write WAV in-process.
    #[default]
    Native,
    /// Shell out to ffmpeg.
    Ffmpeg,
}

impl std::fmt::Display for ExtractionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Ffmpeg => write!(f, "ffmpeg"),
        }
    }
}

impl std::str::FromStr for ExtractionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "wav" => Ok(Self::Native),
            "ffmpeg" => Ok(Self::Ffmpeg),
            other => Err(format!("unknown extraction backend: {other}")),
        }
    }
}
