//! Application configuration, read from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::Role;

pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("invalid config JSON: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by every front end. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
    pub students_collection: String,
    pub teachers_collection: String,
    /// Upper bound on a single store call.
    pub store_timeout_ms: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            students_collection: Role::Student.default_collection().to_string(),
            teachers_collection: Role::Teacher.default_collection().to_string(),
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Collection holding profiles of `role`.
    pub fn collection(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.students_collection,
            Role::Teacher => &self.teachers_collection,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let students = self.students_collection.trim();
        let teachers = self.teachers_collection.trim();
        if students.is_empty() || teachers.is_empty() {
            return Err(ConfigError::Invalid(
                "collection names must not be empty".into(),
            ));
        }
        if students == teachers {
            return Err(ConfigError::Invalid(format!(
                "students and teachers share collection '{students}'"
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "store_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.collection(Role::Student), "students");
        assert_eq!(config.collection(Role::Teacher), "teachers");
        assert_eq!(config.store_timeout_ms, 10_000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config = AppConfig::from_json_str(
            r#"{"teachers_collection": "tutors", "store_timeout_ms": 250}"#,
        )
        .unwrap();
        assert_eq!(config.collection(Role::Teacher), "tutors");
        assert_eq!(config.collection(Role::Student), "students");
        assert_eq!(config.store_timeout_ms, 250);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_json_str(r#"{"store_timeout_ms": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json_str(r#"{"students_collection": "teachers"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/hometutions.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
