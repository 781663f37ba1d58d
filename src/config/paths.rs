//! Path resolution for tallybook data
//!
//! Everything the crate stores lives under one base directory: container
//! documents in `data/`, user settings in `config.json`.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where tallybook keeps its files
///
/// The base directory comes from, in order: the `TALLYBOOK_DATA_DIR`
/// environment variable, `$XDG_CONFIG_HOME/tallybook`, or
/// `~/.config/tallybook` (`%APPDATA%\tallybook` on Windows).
#[derive(Debug, Clone)]
pub struct DataPaths {
    base_dir: PathBuf,
}

impl DataPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self> {
        let base_dir = match env::var("TALLYBOOK_DATA_DIR") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => default_base_dir()?,
        };
        Ok(Self { base_dir })
    }

    /// Use an explicit base directory instead of resolving one
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The base directory holding everything tallybook stores
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The directory container documents are written to
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// The user settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the base and data directories if they are missing
    pub fn ensure_directories(&self) -> Result<()> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir)
            .map_err(|e| Error::Storage(format!("Failed to create {}: {}", data_dir.display(), e)))
    }
}

fn default_base_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        let appdata = env::var("APPDATA")
            .map_err(|_| Error::Storage("APPDATA is not set".to_string()))?;
        return Ok(PathBuf::from(appdata).join("tallybook"));
    }

    let config_home = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = env::var("HOME")
                .map_err(|_| Error::Storage("Could not determine home directory".to_string()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_home.join("tallybook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_derived_paths_hang_off_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("TALLYBOOK_DATA_DIR", temp_dir.path());
        let paths = DataPaths::new().unwrap();
        env::remove_var("TALLYBOOK_DATA_DIR");

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories_creates_nested_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }
}
