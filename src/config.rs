//! Filesystem layout for the application. Everything lives under a single
//! dot-directory in the user's home so the database and its logs travel
//! together.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use crate::db::DATABASE_NAME;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".feed-reader";
/// Subdirectory of the data folder that receives rotated log files.
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    MissingHome,
}

/// Resolved locations for the database file and the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the default layout beneath the current user's home directory.
    pub fn from_home() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::MissingHome)?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Lay out the same structure under an arbitrary root.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            database: data_dir.join(DATABASE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
        }
    }
}
