//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "clipsync";

/// File name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default analysis sample rate in Hz.
///
/// Every clip and master is downmixed and resampled to this rate before
/// correlation. It favours speed over fidelity; extraction always reads the
/// master at its native rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Default acceptance threshold for the normalized correlation peak.
///
/// Chosen empirically. It does not carry over unchanged to other sample
/// rates or clip lengths, which is why it can be overridden.
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Added to the standard deviation when standardizing a signal.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Accepted range for the analysis sample rate.
pub mod sample_rate {
    /// Lowest accepted analysis rate in Hz.
    pub const MIN: u32 = 1_000;
    /// Highest accepted analysis rate in Hz.
    pub const MAX: u32 = 384_000;
}

/// Recognized audio file extensions (compared case-insensitively).
pub const AUDIO_EXTENSIONS: &[&str] = &["aif", "aiff", "wav", "mp3", "aac", "m4a", "flac"];

/// Extension of every extracted output file.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Suffix appended to an output path while it is being written.
pub const PARTIAL_SUFFIX: &str = "part";

/// Default program name for the ffmpeg extraction backend.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Number of trailing stderr lines kept when an external tool fails.
pub const STDERR_TAIL_LINES: usize = 5;

/// Decimal places for confidence formatting.
pub const CONFIDENCE_DECIMALS: usize = 4;
