//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TimerMode;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mode duration is out of range.
    #[error("{mode} duration must be between {min} and {max} seconds, got {value}")]
    InvalidDuration {
        mode: TimerMode,
        value: u32,
        min: u32,
        max: u32,
    },

    /// The session goal must be at least one.
    #[error("target work sessions must be at least 1, got {0}")]
    InvalidTarget(u32),
}

impl ConfigError {
    /// Returns true if the error came from reading or parsing a file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_display() {
        let err = ConfigError::InvalidDuration {
            mode: TimerMode::ShortBreak,
            value: 0,
            min: 1,
            max: 86_400,
        };
        assert_eq!(
            err.to_string(),
            "short_break duration must be between 1 and 86400 seconds, got 0"
        );
        assert!(!err.is_file_error());
    }

    #[test]
    fn test_invalid_target_display() {
        assert!(ConfigError::InvalidTarget(0).to_string().contains("at least 1"));
    }

    #[test]
    fn test_io_error_is_file_error() {
        let err = ConfigError::Io {
            path: PathBuf::from("/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_file_error());
        assert!(err.to_string().contains("/missing.json"));
    }
}
