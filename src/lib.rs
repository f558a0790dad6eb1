//! Pomodoro Widget Library
//!
//! This library provides an embeddable Pomodoro countdown timer.
//! It includes:
//! - Countdown timer state machine with an injectable tick scheduler
//! - Display, sound and system notification collaborator traits
//! - Terminal implementations of those collaborators
//! - Widget host event loop and control commands
//! - Configuration loading and CLI definitions

pub mod cli;
pub mod config;
pub mod display;
pub mod notification;
pub mod sound;
pub mod timer;
pub mod types;
pub mod widget;

// Re-export commonly used types for convenience
pub use types::{ModeDurations, TimerMode, TimerState};

pub use timer::{
    format_time, progress_label, Collaborators, CountdownTimer, ManualTickScheduler, TickHandle,
    TickOutcome, TickScheduler, TokioTickScheduler,
};

pub use config::{ConfigError, WidgetConfig};

pub use display::{DisplayRenderer, MockDisplayRenderer, TerminalRenderer};

pub use sound::{AudioNotifier, MockAudioNotifier, SoundError, TerminalBell};

pub use notification::{
    MockNotificationSender, NotificationError, NotificationPermission, SystemNotifier,
    TerminalNotifier,
};

pub use widget::{ControlCommand, Widget};
