//! Where clipsync keeps its settings file.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Directory holding clipsync's `config.toml`.
///
/// `~/.config/clipsync` on Linux, `~/Library/Application Support/clipsync`
/// on macOS, `%APPDATA%\clipsync\config` on Windows. Fails when no home
/// directory can be resolved.
pub fn config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(Error::ConfigDirNotFound)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Settings file read at startup and written by `clipsync config init`.
pub fn config_file_path() -> Result<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_named_after_app() {
        let dir = config_dir().unwrap();
        assert!(dir.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_config_file_lives_in_config_dir() {
        let path = config_file_path().unwrap();
        assert_eq!(path.parent(), Some(config_dir().unwrap().as_path()));
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
    }
}
