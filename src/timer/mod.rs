//! Countdown timer engine for the Pomodoro widget.
//!
//! This module provides the core timer functionality:
//! - Idle/Running state machine driven by `start`, `pause`, `reset`, `set_mode`
//! - One-second ticks from an injected [`TickScheduler`]
//! - Completion handling: session counting, sound and notification
//!
//! Completion always reloads the *current* mode's duration. Picking the next
//! mode is left to whoever drives the widget.

pub mod format;
pub mod scheduler;

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::display::DisplayRenderer;
use crate::notification::{SystemNotifier, WORK_COMPLETE_BODY, WORK_COMPLETE_TITLE};
use crate::sound::AudioNotifier;
use crate::types::{ModeDurations, TimerMode, TimerState};

pub use format::{format_time, progress_label};
pub use scheduler::{ManualTickScheduler, TickHandle, TickScheduler, TokioTickScheduler};

/// Wall-clock time between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default display-only session goal.
pub const DEFAULT_TARGET_WORK_SESSIONS: u32 = 4;

// ============================================================================
// Collaborators
// ============================================================================

/// Output side effects the timer invokes.
pub struct Collaborators {
    pub display: Box<dyn DisplayRenderer>,
    pub audio: Box<dyn AudioNotifier>,
    pub notifier: Box<dyn SystemNotifier>,
}

impl Collaborators {
    pub fn new(
        display: impl DisplayRenderer + 'static,
        audio: impl AudioNotifier + 'static,
        notifier: impl SystemNotifier + 'static,
    ) -> Self {
        Self {
            display: Box::new(display),
            audio: Box::new(audio),
            notifier: Box::new(notifier),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of delivering one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick did not belong to the active tick source and was dropped.
    Ignored,
    /// One second elapsed; the countdown continues.
    Counting {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// The countdown reached zero and completion handling ran.
    Completed {
        /// Mode that completed
        mode: TimerMode,
    },
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// Pomodoro countdown timer.
///
/// Owns the [`TimerState`] and at most one active tick source. `running` is
/// true exactly when a tick source is scheduled.
pub struct CountdownTimer {
    state: TimerState,
    durations: ModeDurations,
    active_tick: Option<TickHandle>,
    scheduler: Box<dyn TickScheduler>,
    collaborators: Collaborators,
}

impl CountdownTimer {
    /// Creates an idle timer in work mode and renders the initial display.
    pub fn new(
        durations: ModeDurations,
        target_work_sessions: u32,
        scheduler: impl TickScheduler + 'static,
        collaborators: Collaborators,
    ) -> Self {
        let timer = Self {
            state: TimerState::new(&durations, target_work_sessions),
            durations,
            active_tick: None,
            scheduler: Box::new(scheduler),
            collaborators,
        };
        timer.update_display();
        timer
    }

    /// Starts ticking. No-op if already running.
    pub fn start(&mut self) {
        if self.active_tick.is_some() {
            trace!("Start ignored, already running");
            return;
        }

        let handle = self.scheduler.schedule(TICK_INTERVAL);
        self.active_tick = Some(handle);
        self.state.running = true;
        debug!(
            mode = self.state.mode.as_str(),
            remaining = self.state.remaining_seconds,
            "Timer started"
        );
    }

    /// Stops ticking. Safe to call when already paused.
    ///
    /// Once this returns, no tick from the cancelled source is acted upon.
    pub fn pause(&mut self) {
        if let Some(handle) = self.active_tick.take() {
            self.scheduler.cancel(handle);
            debug!(remaining = self.state.remaining_seconds, "Timer paused");
        }
        self.state.running = false;
    }

    /// Pauses and reloads the current mode's duration.
    ///
    /// Mode and completed session count are left untouched.
    pub fn reset(&mut self) {
        self.pause();
        self.state.remaining_seconds = self.durations.seconds_for(self.state.mode);
        debug!(mode = self.state.mode.as_str(), "Timer reset");
        self.update_display();
    }

    /// Switches mode, loading its duration. Stops any running countdown.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.state.mode = mode;
        self.state.remaining_seconds = self.durations.seconds_for(mode);
        self.pause();
        debug!(mode = mode.as_str(), "Mode switched");
        self.update_display();
    }

    /// Delivers one fired tick.
    ///
    /// Ticks from any handle other than the active one are ignored, so a
    /// tick queued before `pause` never decrements the countdown.
    pub fn on_tick(&mut self, handle: TickHandle) -> TickOutcome {
        if self.active_tick != Some(handle) {
            trace!(handle = handle.id(), "Stale tick ignored");
            return TickOutcome::Ignored;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.update_display();

        if self.state.remaining_seconds == 0 {
            let mode = self.state.mode;
            self.handle_completion();
            return TickOutcome::Completed { mode };
        }

        TickOutcome::Counting {
            remaining_seconds: self.state.remaining_seconds,
        }
    }

    /// Handles the countdown reaching zero.
    fn handle_completion(&mut self) {
        self.pause();

        if self.state.mode == TimerMode::Work {
            self.state.completed_work_sessions += 1;
            info!(
                completed = self.state.completed_work_sessions,
                target = self.state.target_work_sessions,
                "Work session completed"
            );
            self.update_display();

            if let Err(e) = self.collaborators.audio.play_completion_sound() {
                warn!("Completion sound failed: {}", e);
            }

            let notifier = &self.collaborators.notifier;
            if notifier.permission().is_granted() {
                if let Err(e) = notifier.notify(WORK_COMPLETE_TITLE, WORK_COMPLETE_BODY) {
                    warn!("Completion notification failed: {}", e);
                }
            }
        } else {
            info!(mode = self.state.mode.as_str(), "Break completed");
        }

        self.reset();
    }

    /// Re-renders the current state.
    pub fn refresh(&self) {
        self.update_display();
    }

    fn update_display(&self) {
        let time = format_time(self.state.remaining_seconds);
        let progress = progress_label(
            self.state.completed_work_sessions,
            self.state.target_work_sessions,
        );
        self.collaborators.display.render(&time, &progress);
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns true if a tick source is active.
    pub fn is_running(&self) -> bool {
        self.active_tick.is_some()
    }

    /// Returns the configured durations.
    pub fn durations(&self) -> &ModeDurations {
        &self.durations
    }

    /// Returns the collaborators, e.g. to ask the notifier for permission.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("state", &self.state)
            .field("durations", &self.durations)
            .field("active_tick", &self.active_tick)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
