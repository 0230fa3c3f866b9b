//! Reading and writing `config.toml`.
//!
//! The file holds a `[matching]` and an `[extraction]` table. Keys that are
//! left out take their built-in defaults, so an empty file is valid.
//! Values are range-checked later by [`super::validate_config`], after
//! command-line overrides are applied.

use super::{Config, config_file_path};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Read settings from `path`, or the defaults when there is no such file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the user's settings file.
///
/// Falls back to the defaults when the file is absent or no config
/// directory exists on this platform. A file that exists but does not parse
/// is an error.
pub fn load_default_config() -> Result<Config> {
    config_file_path().map_or_else(|_| Ok(Config::default()), |path| load_config_file(&path))
}

/// Write `config` to `path` as pretty TOML, creating missing directories.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let write_err = |source| Error::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;
    std::fs::write(path, contents).map_err(write_err)
}

/// Write `config` to the user's settings file and return its path.
pub fn save_default_config(config: &Config) -> Result<PathBuf> {
    let path = config_file_path()?;
    save_config(config, &path)?;
    Ok(path)
}
