//! Runtime configuration resolved once at startup.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the home directory holding all deck files.
pub const STORAGE_DIR_NAME: &str = ".flashcards";
/// Overrides the storage directory.
pub const STORAGE_ENV: &str = "FLASHCARDS_HOME";
/// Preferred editor command.
pub const EDITOR_ENV: &str = "EDITOR";
/// Editor used when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine the home directory; set FLASHCARDS_HOME")]
    NoHomeDirectory,

    #[error("cannot create storage directory {}: {source}", path.display())]
    StorageDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_root: PathBuf,
    pub editor: String,
}

impl Config {
    /// Read configuration from the process environment, after loading an
    /// optional `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::resolve(
            std::env::var_os(STORAGE_ENV).map(PathBuf::from),
            std::env::var(EDITOR_ENV).ok(),
            dirs::home_dir(),
        )
    }

    fn resolve(
        storage_override: Option<PathBuf>,
        editor: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let storage_root = match storage_override.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path,
            None => home
                .ok_or(ConfigError::NoHomeDirectory)?
                .join(STORAGE_DIR_NAME),
        };

        let editor = editor
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Ok(Self {
            storage_root,
            editor,
        })
    }
}

/// Create the storage directory if it does not exist. Safe to call repeatedly.
pub fn ensure_storage_directory(root: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(root).map_err(|source| ConfigError::StorageDirectory {
        path: root.to_path_buf(),
        source,
    })
}
