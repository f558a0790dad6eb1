//! Core data types for the Pomodoro widget.
//!
//! This module defines the data structures used for:
//! - Timer modes and their countdown durations
//! - The observable timer state snapshot

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerMode
// ============================================================================

/// The countdown mode, which selects the default duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work session
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break
    LongBreak,
}

impl TimerMode {
    /// All modes, in button order.
    pub const ALL: [TimerMode; 3] = [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short break",
            TimerMode::LongBreak => "Long break",
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Work
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode: {0} (expected work, short-break or long-break)")]
pub struct ParseModeError(pub String);

impl FromStr for TimerMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "work" => Ok(TimerMode::Work),
            "short_break" | "break" => Ok(TimerMode::ShortBreak),
            "long_break" => Ok(TimerMode::LongBreak),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

// ============================================================================
// ModeDurations
// ============================================================================

/// Mapping from mode to countdown duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeDurations {
    /// Work duration in seconds
    pub work_seconds: u32,
    /// Short break duration in seconds
    pub short_break_seconds: u32,
    /// Long break duration in seconds
    pub long_break_seconds: u32,
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            work_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
        }
    }
}

impl ModeDurations {
    /// Sets the work duration in whole minutes.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_seconds = minutes * 60;
        self
    }

    /// Sets the short break duration in whole minutes.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_seconds = minutes * 60;
        self
    }

    /// Sets the long break duration in whole minutes.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_seconds = minutes * 60;
        self
    }

    /// Returns the duration for the given mode.
    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_seconds,
            TimerMode::ShortBreak => self.short_break_seconds,
            TimerMode::LongBreak => self.long_break_seconds,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Snapshot of the countdown timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the current countdown
    pub remaining_seconds: u32,
    /// Whether a tick source is active
    pub running: bool,
    /// Current mode
    pub mode: TimerMode,
    /// Completed work countdowns
    pub completed_work_sessions: u32,
    /// Display-only session goal
    pub target_work_sessions: u32,
}

impl TimerState {
    /// Creates the initial state: idle, in work mode, with the work duration loaded.
    pub fn new(durations: &ModeDurations, target_work_sessions: u32) -> Self {
        Self {
            remaining_seconds: durations.seconds_for(TimerMode::Work),
            running: false,
            mode: TimerMode::Work,
            completed_work_sessions: 0,
            target_work_sessions,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
