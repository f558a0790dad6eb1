//! Widget configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional JSON file, then command-line flags. Every field in the file
//! is optional.
//!
//! ```
//! use pomodoro_widget::config::WidgetConfig;
//!
//! let config: WidgetConfig = serde_json::from_str(r#"{"target_work_sessions": 6}"#).unwrap();
//! assert_eq!(config.target_work_sessions, 6);
//! assert_eq!(config.durations.work_seconds, 1500);
//! ```

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

use crate::notification::NotificationPermission;
use crate::timer::DEFAULT_TARGET_WORK_SESSIONS;
use crate::types::{ModeDurations, TimerMode};

/// Shortest allowed mode duration in seconds.
pub const MIN_DURATION_SECONDS: u32 = 1;

/// Longest allowed mode duration in seconds (one day).
pub const MAX_DURATION_SECONDS: u32 = 86_400;

fn default_target_work_sessions() -> u32 {
    DEFAULT_TARGET_WORK_SESSIONS
}

fn default_sound() -> bool {
    true
}

/// Configuration for the widget and its terminal collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Countdown duration per mode.
    #[serde(default)]
    pub durations: ModeDurations,

    /// Display-only session goal.
    #[serde(default = "default_target_work_sessions")]
    pub target_work_sessions: u32,

    /// Whether the completion bell rings.
    #[serde(default = "default_sound")]
    pub sound: bool,

    /// Initial notification permission.
    #[serde(default)]
    pub notifications: NotificationPermission,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            durations: ModeDurations::default(),
            target_work_sessions: default_target_work_sessions(),
            sound: default_sound(),
            notifications: NotificationPermission::default(),
        }
    }
}

impl WidgetConfig {
    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// values fail validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in TimerMode::ALL {
            let value = self.durations.seconds_for(mode);
            if !(MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&value) {
                return Err(ConfigError::InvalidDuration {
                    mode,
                    value,
                    min: MIN_DURATION_SECONDS,
                    max: MAX_DURATION_SECONDS,
                });
            }
        }

        if self.target_work_sessions < 1 {
            return Err(ConfigError::InvalidTarget(self.target_work_sessions));
        }

        Ok(())
    }
}
