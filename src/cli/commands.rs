//! Command definitions for the Pomodoro widget host.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigError, WidgetConfig};
use crate::notification::NotificationPermission;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro widget - a countdown timer driven from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-widget",
    version,
    about = "Pomodoro countdown timer widget",
    long_about = "Runs the Pomodoro countdown widget in the terminal.\n\
                  Type one command per line: start, pause, reset, work, short-break, \
                  long-break, status, quit.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the widget, reading commands from stdin
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Work duration in minutes (1-1440)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub work: Option<u32>,

    /// Short break duration in minutes (1-1440)
    #[arg(short = 'b', long, value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub short_break: Option<u32>,

    /// Long break duration in minutes (1-1440)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub long_break: Option<u32>,

    /// Work sessions shown as the goal
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub target: Option<u32>,

    /// Disable the completion bell
    #[arg(long)]
    pub no_sound: bool,

    /// Initial notification permission
    #[arg(short, long, value_enum)]
    pub notifications: Option<NotificationPermission>,
}

impl RunArgs {
    /// Builds the effective configuration: defaults, then file, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result
    /// fails validation.
    pub fn resolve(&self) -> Result<WidgetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => WidgetConfig::load(path)?,
            None => WidgetConfig::default(),
        };

        if let Some(minutes) = self.work {
            config.durations = config.durations.with_work_minutes(minutes);
        }
        if let Some(minutes) = self.short_break {
            config.durations = config.durations.with_short_break_minutes(minutes);
        }
        if let Some(minutes) = self.long_break {
            config.durations = config.durations.with_long_break_minutes(minutes);
        }
        if let Some(target) = self.target {
            config.target_work_sessions = target;
        }
        if self.no_sound {
            config.sound = false;
        }
        if let Some(permission) = self.notifications {
            config.notifications = permission;
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
