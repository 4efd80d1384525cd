//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve where the local storage database and logs live.
//! - Carry the log level and task storage key handed to core subsystems.
//!
//! # Invariants
//! - `log_dir` is absolute once `validate` succeeds.
//! - Defaults derive from the platform data directory, falling back to the
//!   system temp directory when none is known.

use crate::logging::default_log_level;
use crate::repo::task_repo::TASKS_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "showcase";
const DB_FILE_NAME: &str = "local_storage.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub storage_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(PathBuf),
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Lays out database and logs under `data_dir`.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            storage_key: TASKS_STORAGE_KEY.to_string(),
        }
    }

    /// Checks values that core subsystems would otherwise reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(self.log_dir.clone()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_data_dir(default_data_dir())
    }
}

/// Per-user data directory for this application.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use std::path::PathBuf;

    #[test]
    fn from_data_dir_places_files_under_root() {
        let config = CoreConfig::from_data_dir("/var/lib/showcase");
        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/showcase/local_storage.sqlite3")
        );
        assert_eq!(config.log_dir, PathBuf::from("/var/lib/showcase/logs"));
        assert_eq!(config.storage_key, "tasks");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_log_dir_and_blank_key() {
        let mut config = CoreConfig::from_data_dir("relative");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RelativeLogDir(_))
        ));

        config.log_dir = PathBuf::from("/tmp/logs");
        config.storage_key = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));
    }

    #[test]
    fn default_config_is_absolute() {
        let config = CoreConfig::default();
        assert!(config.db_path.ends_with("local_storage.sqlite3"));
    }
}
