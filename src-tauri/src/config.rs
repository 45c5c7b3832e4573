use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::storage::{FileStorage, MemoryStorage, SharedStorage};

/// Overrides the data directory (`~` is expanded).
pub const DATA_DIR_ENV: &str = "PLSL_DATA_DIR";

const APP_DIR_NAME: &str = "nature-explorer";
const STORAGE_DIR_NAME: &str = "storage";

/// Where the app keeps its per-profile data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve from the environment, falling back to the platform data
    /// directory (`~/.local/share`, `%APPDATA%`, `~/Library/Application Support`).
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(DATA_DIR_ENV).ok())
    }

    pub fn resolve(override_dir: Option<String>) -> Self {
        let data_dir = match override_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => Some(expand_tilde(dir.trim())),
            None => dirs::data_dir().map(|d| d.join(APP_DIR_NAME)),
        };
        Self { data_dir }
    }

    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|d| d.join(STORAGE_DIR_NAME))
    }

    /// Durable storage under the data directory.
    pub fn open_file_storage(&self) -> Result<FileStorage> {
        let dir = self
            .storage_dir()
            .ok_or_else(|| StoreError::Unavailable("cannot find a data directory".into()))?;
        FileStorage::open(dir)
    }

    /// Durable storage if possible, otherwise process memory. Progress made
    /// in the fallback is lost when the app exits.
    pub fn open_storage(&self) -> SharedStorage {
        match self.open_file_storage() {
            Ok(storage) => {
                info!(dir = %storage.dir().display(), "using file storage");
                Box::new(storage)
            }
            Err(e) => {
                warn!(error = %e, "durable storage unavailable, progress will not persist");
                Box::new(MemoryStorage::new())
            }
        }
    }
}

/// Expand a leading `~` to the home directory. Paths without one, or with no
/// resolvable home, are returned unchanged.
fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(Path::new(rest)),
        _ => PathBuf::from(path),
    }
}
