//! JSON run report.

use crate::error::{Error, Result};
use crate::output::{ClipRecord, RunTotals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Settings a run used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Acceptance threshold.
    pub threshold: f64,
    /// Analysis sample rate in Hz.
    pub sample_rate: u32,
    /// Extraction backend name.
    pub backend: String,
    /// Whether outputs were written.
    pub dry_run: bool,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Tool version.
    pub version: String,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Settings used.
    pub settings: ReportSettings,
    /// One record per clip, in processing order.
    pub clips: Vec<ClipRecord>,
    /// Outcome counts.
    pub totals: RunTotals,
}

impl RunReport {
    /// Assemble a report stamped with the current time.
    pub fn new(settings: ReportSettings, clips: Vec<ClipRecord>, totals: RunTotals) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            settings,
            clips,
            totals,
        }
    }
}

/// Write a report as pretty-printed JSON.
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
