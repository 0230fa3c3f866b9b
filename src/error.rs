//! Error types for clipsync.

use std::path::PathBuf;

/// Result type alias for clipsync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clipsync.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Required positional arguments were not supplied.
    #[error("missing arguments: expected <CLIPS_DIR> <MASTERS_DIR> <OUTPUT_DIR>")]
    MissingArguments,

    /// Input directory does not exist or is not a directory.
    #[error("input directory not found: {path}")]
    InputDirNotFound {
        /// Path that was expected to be a directory.
        path: PathBuf,
    },

    /// No clip files in the clip directory.
    #[error("no extracted audio files found in '{path}'")]
    NoClipFiles {
        /// Clip directory that was scanned.
        path: PathBuf,
    },

    /// No master files in the master directory.
    #[error("no master audio files found in '{path}'")]
    NoMasterFiles {
        /// Master directory that was scanned.
        path: PathBuf,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Decoded stream contained no samples.
    #[error("audio file '{path}' contains no samples")]
    EmptyAudio {
        /// Path to the audio file.
        path: PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// A signal handed to the correlator was empty.
    #[error("cannot correlate an empty signal")]
    EmptySignal,

    /// Two signals were compared at different sample rates.
    #[error("sample rate mismatch: clip at {clip} Hz, master at {master} Hz")]
    SampleRateMismatch {
        /// Clip sample rate in Hz.
        clip: u32,
        /// Master sample rate in Hz.
        master: u32,
    },

    /// FFT planning or execution failed.
    #[error("FFT failed: {reason}")]
    Fft {
        /// Description of the FFT failure.
        reason: String,
    },

    /// Requested extraction span lies outside the master.
    #[error(
        "span {start:.3}s+{duration:.3}s is outside '{path}' ({available:.3}s available)"
    )]
    ExtractionRange {
        /// Master file.
        path: PathBuf,
        /// Requested start in seconds.
        start: f64,
        /// Requested duration in seconds.
        duration: f64,
        /// Master length in seconds.
        available: f64,
    },

    /// External extraction tool could not be started.
    #[error("failed to run '{program}'")]
    ExtractorSpawn {
        /// Program that was invoked.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// External extraction tool exited unsuccessfully.
    #[error("extraction of '{path}' failed: {message}")]
    ExtractionFailed {
        /// Master file being extracted.
        path: PathBuf,
        /// Exit status and tail of the tool's diagnostics.
        message: String,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write JSON report file.
    #[error("failed to write JSON report '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
