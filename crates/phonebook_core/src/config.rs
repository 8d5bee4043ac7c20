//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - Resolution never fails; invalid log levels surface later from
//!   `init_logging`.

use crate::logging::default_log_level;
use crate::service::contact_store::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "PHONEBOOK_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "PHONEBOOK_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "PHONEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PHONEBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "phonebook.sqlite3";

/// Effective settings for opening a phonebook session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PhonebookConfig {
    /// Reads `PHONEBOOK_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            storage_key: read(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}
