//! Loading master recordings once per run.

use crate::audio::load_signal;
use crate::matching::{MasterRecording, OffsetFinder};
use crate::output::progress;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decode, resample and standardize every master.
///
/// Order is preserved. A master that fails to load stays in the list as
/// unavailable, and every comparison against it fails.
pub fn load_masters(
    paths: &[PathBuf],
    finder: &OffsetFinder,
    sample_rate: u32,
    progress_enabled: bool,
) -> Vec<MasterRecording> {
    let pb = progress::create_file_progress(paths.len(), "masters", progress_enabled);

    let masters = paths
        .iter()
        .map(|path| {
            progress::set_progress_message(pb.as_ref(), &path.display().to_string());
            let master = load_master(path, finder, sample_rate);
            progress::inc_progress(pb.as_ref());
            master
        })
        .collect();

    progress::finish_progress(pb);
    masters
}

/// Load a single master.
pub fn load_master(path: &Path, finder: &OffsetFinder, sample_rate: u32) -> MasterRecording {
    let prepared = load_signal(path, sample_rate).and_then(|loaded| {
        let prepared = finder.prepare(&loaded.signal)?;
        Ok((prepared, loaded.source_duration_secs))
    });

    match prepared {
        Ok((prepared, duration_secs)) => {
            debug!(
                "Loaded master {} ({duration_secs:.1}s, {} samples)",
                path.display(),
                prepared.len()
            );
            MasterRecording::ready(path, prepared, duration_secs)
        }
        Err(e) => {
            warn!("Could not load master {}: {e}", path.display());
            MasterRecording::unavailable(path, e.to_string())
        }
    }
}
