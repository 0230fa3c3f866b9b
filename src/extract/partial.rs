//! Temporary output files that only appear under their final name once complete.

use crate::constants::PARTIAL_SUFFIX;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// RAII guard for an output file being written.
///
/// Writers fill [`PartialFile::path`]; [`PartialFile::commit`] renames it to
/// the target. Dropping an uncommitted guard deletes the temporary file.
#[derive(Debug)]
pub struct PartialFile {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl PartialFile {
    /// Reserve a temporary sibling of `target`.
    pub fn new(target: &Path) -> Self {
        let temp_path = partial_path_for(target);
        register_partial(&temp_path);
        Self {
            temp_path,
            target: target.to_path_buf(),
            committed: false,
        }
    }

    /// Where the writer should put its data.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Final destination.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the finished file into place.
    pub fn commit(mut self) -> Result<PathBuf> {
        fs::rename(&self.temp_path, &self.target)?;
        self.committed = true;
        Ok(self.target.clone())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
        unregister_partial(&self.temp_path);
    }
}

/// Temporary path used while writing `target`.
pub fn partial_path_for(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Global registry of in-flight partial files for cleanup on signal.
static ACTIVE_PARTIALS: std::sync::LazyLock<std::sync::Mutex<Vec<PathBuf>>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(Vec::new()));

fn register_partial(path: &Path) {
    if let Ok(mut partials) = ACTIVE_PARTIALS.lock() {
        partials.push(path.to_path_buf());
    }
}

fn unregister_partial(path: &Path) {
    if let Ok(mut partials) = ACTIVE_PARTIALS.lock() {
        partials.retain(|p| p != path);
    }
}

/// Remove every partial file still being written. Called on Ctrl+C.
pub fn cleanup_partial_files() {
    if let Ok(partials) = ACTIVE_PARTIALS.lock() {
        for path in partials.iter() {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_path_appends_suffix() {
        let path = partial_path_for(Path::new("/out/clip.wav"));
        assert_eq!(path, PathBuf::from("/out/clip.wav.part"));
    }

    #[test]
    fn test_commit_moves_file_into_place() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("clip.wav");

        let partial = PartialFile::new(&target);
        fs::write(partial.path(), b"data").unwrap();
        let temp = partial.path().to_path_buf();
        let committed = partial.commit().unwrap();

        assert_eq!(committed, target);
        assert!(target.exists());
        assert!(!temp.exists());
    }

    #[test]
    fn test_drop_without_commit_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("clip.wav");

        let temp = {
            let partial = PartialFile::new(&target);
            fs::write(partial.path(), b"half").unwrap();
            partial.path().to_path_buf()
        };

        assert!(!temp.exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_cleanup_removes_registered_partials() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("interrupted.wav");

        let partial = PartialFile::new(&target);
        fs::write(partial.path(), b"half").unwrap();
        cleanup_partial_files();

        assert!(!partial.path().exists());
    }
}
