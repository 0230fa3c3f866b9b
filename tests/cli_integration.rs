//! Command-line behaviour of the clipsync binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

mod common;

/// A command isolated from the user's config file and environment.
fn clipsync(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("clipsync");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("CLIPSYNC_THRESHOLD")
        .env_remove("CLIPSYNC_SAMPLE_RATE")
        .env_remove("CLIPSYNC_BACKEND")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_prints_usage() {
    let home = TempDir::new().unwrap();
    clipsync(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: clipsync"));
}

#[test]
fn test_partial_arguments_fail() {
    let home = TempDir::new().unwrap();
    clipsync(home.path())
        .arg("clips")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing arguments"));
}

#[test]
fn test_missing_clip_directory_fails() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    clipsync(home.path())
        .arg(work.path().join("nope"))
        .arg(work.path())
        .arg(work.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("input directory not found"));
}

#[test]
fn test_empty_clip_directory_fails() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let clips = work.path().join("clips");
    let masters = work.path().join("masters");
    std::fs::create_dir(&clips).unwrap();
    std::fs::create_dir(&masters).unwrap();
    std::fs::write(clips.join("notes.txt"), b"not audio").unwrap();

    clipsync(home.path())
        .arg(&clips)
        .arg(&masters)
        .arg(work.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no extracted audio files found"));
}

#[test]
fn test_empty_master_directory_fails() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let clips = work.path().join("clips");
    let masters = work.path().join("masters");
    std::fs::create_dir(&clips).unwrap();
    std::fs::create_dir(&masters).unwrap();
    common::write_wav(&clips.join("a.wav"), &common::noise(1000, 1), 2000);

    clipsync(home.path())
        .arg(&clips)
        .arg(&masters)
        .arg(work.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no master audio files found"));
}

#[test]
fn test_invalid_sample_rate_is_rejected() {
    let home = TempDir::new().unwrap();
    clipsync(home.path())
        .args(["a", "b", "c", "--sample-rate", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample rate must be between"));
}

#[test]
fn test_config_path_points_to_toml() {
    let home = TempDir::new().unwrap();
    clipsync(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    clipsync(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(
        home.path()
            .join(".config")
            .join("clipsync")
            .join("config.toml")
            .exists()
    );

    clipsync(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[matching]"))
        .stdout(predicate::str::contains("backend = \"native\""));
}

#[test]
fn test_full_run_extracts_and_reports() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let clips = work.path().join("clips");
    let masters = work.path().join("masters");
    let out = work.path().join("out");
    std::fs::create_dir(&clips).unwrap();
    std::fs::create_dir(&masters).unwrap();

    let master = common::noise(40_000, 7);
    common::write_wav(&masters.join("take_b.wav"), &master, 2000);
    common::write_wav(&masters.join("take_a.wav"), &common::noise(40_000, 8), 2000);
    common::write_wav(&clips.join("line.wav"), &master[6_000..10_000], 2000);

    let report = work.path().join("report.json");

    clipsync(home.path())
        .arg(&clips)
        .arg(&masters)
        .arg(&out)
        .args(["--sample-rate", "2000", "--no-progress", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: line.wav"))
        .stdout(predicate::str::contains("Best match: take_b.wav"))
        .stdout(predicate::str::contains("Offset: 3.00s, Duration: 2.00s"))
        .stdout(predicate::str::contains("Saved to:"));

    let written = hound::WavReader::open(out.join("line.wav")).unwrap();
    assert_eq!(written.duration(), 4_000);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["totals"]["accepted"], 1);
    assert_eq!(json["clips"][0]["status"], "accepted");
    assert_eq!(json["settings"]["sample_rate"], 2000);
}

#[test]
fn test_quiet_run_prints_nothing_on_stdout() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let clips = work.path().join("clips");
    let masters = work.path().join("masters");
    std::fs::create_dir(&clips).unwrap();
    std::fs::create_dir(&masters).unwrap();

    let master = common::noise(20_000, 9);
    common::write_wav(&masters.join("m.wav"), &master, 2000);
    common::write_wav(&clips.join("c.wav"), &master[1_000..3_000], 2000);

    clipsync(home.path())
        .arg(&clips)
        .arg(&masters)
        .arg(work.path().join("out"))
        .args(["--sample-rate", "2000", "-q", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
