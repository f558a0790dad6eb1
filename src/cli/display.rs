//! Display utilities for the widget host.
//!
//! This module provides formatted output for:
//! - The startup banner and command list
//! - Status queries
//! - Error messages
//!
//! Countdown frames themselves go through the
//! [`DisplayRenderer`](crate::display::DisplayRenderer).

use crate::config::WidgetConfig;
use crate::timer::{format_time, progress_label};
use crate::types::{TimerMode, TimerState};
use crate::widget::COMMAND_WORDS;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for host output.
pub struct Display;

impl Display {
    /// Shows the configured durations and the accepted commands.
    pub fn show_banner(config: &WidgetConfig) {
        for line in Self::banner_lines(config) {
            println!("{}", line);
        }
    }

    /// Shows the current timer status.
    pub fn show_status(state: &TimerState) {
        for line in Self::status_lines(state) {
            println!("{}", line);
        }
    }

    /// Shows the final state when the host stops.
    pub fn show_summary(state: &TimerState) {
        println!(
            "Stopped. Completed work sessions: {}",
            progress_label(state.completed_work_sessions, state.target_work_sessions)
        );
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    fn banner_lines(config: &WidgetConfig) -> Vec<String> {
        let durations = TimerMode::ALL
            .iter()
            .map(|mode| {
                format!(
                    "{} {}",
                    mode.label(),
                    format_time(config.durations.seconds_for(*mode))
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");

        vec![
            "Pomodoro widget".to_string(),
            format!("  {}", durations),
            format!("  Goal: {} work sessions", config.target_work_sessions),
            format!("  Commands: {}", COMMAND_WORDS.join(", ")),
        ]
    }

    fn status_lines(state: &TimerState) -> Vec<String> {
        vec![
            format!("Mode: {}", state.mode.label()),
            format!(
                "State: {}",
                if state.running { "running" } else { "paused" }
            ),
            format!("Remaining: {}", format_time(state.remaining_seconds)),
            format!(
                "Sessions: {}",
                progress_label(state.completed_work_sessions, state.target_work_sessions)
            ),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
