//! Extraction by shelling out to ffmpeg.

use super::partial::PartialFile;
use super::{ExtractionRequest, Extractor};
use crate::constants::STDERR_TAIL_LINES;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs `ffmpeg -ss START -t DURATION -i MASTER -c:a pcm_s16le OUT`.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: PathBuf,
}

impl FfmpegExtractor {
    /// Use the given ffmpeg executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable that will be invoked.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, request: &ExtractionRequest, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-y", "-hide_banner", "-loglevel", "error"])
            .arg("-ss")
            .arg(format!("{:.6}", request.start_secs))
            .arg("-t")
            .arg(format!("{:.6}", request.duration_secs))
            .arg("-i")
            .arg(&request.master)
            .args(["-vn", "-c:a", "pcm_s16le", "-f", "wav"])
            .arg(output)
            .stdin(Stdio::null());
        command
    }
}

impl Extractor for FfmpegExtractor {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn extract(&self, request: &ExtractionRequest) -> Result<PathBuf> {
        let partial = PartialFile::new(&request.output);
        let mut command = self.command(request, partial.path());
        debug!("Running {command:?}");

        let output = command.output().map_err(|e| Error::ExtractorSpawn {
            program: self.program.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(Error::ExtractionFailed {
                path: request.master.clone(),
                message: format!(
                    "{} ({})",
                    output.status,
                    stderr_tail(&String::from_utf8_lossy(&output.stderr))
                ),
            });
        }

        if !partial.path().exists() {
            return Err(Error::ExtractionFailed {
                path: request.master.clone(),
                message: "no output was produced".to_string(),
            });
        }

        partial.commit()
    }
}

/// Last few non-empty lines of a tool's stderr, joined with `; `.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return "no diagnostics".to_string();
    }
    let skip = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[skip..].join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_arguments() {
        let extractor = FfmpegExtractor::new("ffmpeg");
        let request = ExtractionRequest::new("/m/master.mp3", 12.3, 5.0, "/o/clip.wav");
        let command = extractor.command(&request, Path::new("/o/clip.wav.part"));

        let args: Vec<String> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(command.get_program(), "ffmpeg");
        assert_eq!(
            args,
            [
                "-y",
                "-hide_banner",
                "-loglevel",
                "error",
                "-ss",
                "12.300000",
                "-t",
                "5.000000",
                "-i",
                "/m/master.mp3",
                "-vn",
                "-c:a",
                "pcm_s16le",
                "-f",
                "wav",
                "/o/clip.wav.part",
            ]
        );
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = "a\n\nb\nc\nd\ne\nf\n";
        assert_eq!(stderr_tail(stderr), "b; c; d; e; f");
        assert_eq!(stderr_tail("  \n"), "no diagnostics");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clip.wav");
        let extractor = FfmpegExtractor::new(dir.path().join("no-such-ffmpeg"));
        let request = ExtractionRequest::new("master.wav", 0.0, 1.0, &output);

        let result = extractor.extract(&request);
        assert!(matches!(result, Err(Error::ExtractorSpawn { .. })));
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clip.wav");
        let extractor = FfmpegExtractor::new("false");
        let request = ExtractionRequest::new("master.wav", 0.0, 1.0, &output);

        let result = extractor.extract(&request);
        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
        assert!(!output.exists());
        assert!(!super::super::partial::partial_path_for(&output).exists());
    }
}
