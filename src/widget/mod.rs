//! Widget host for the countdown timer.
//!
//! [`Widget`] wires a [`CountdownTimer`] to a [`TokioTickScheduler`] and
//! runs a single-task event loop: fired tick handles and control commands
//! are processed one at a time, so each tick (including any nested pause
//! or reset) finishes before the next event is looked at.

pub mod control;

use tokio::sync::mpsc;
use tracing::{debug, info};

pub use control::{ControlCommand, ParseCommandError, COMMAND_WORDS};

use crate::cli::Display;
use crate::config::WidgetConfig;
use crate::timer::{Collaborators, CountdownTimer, TickHandle, TokioTickScheduler};
use crate::types::TimerState;

/// The timer plus its wall-clock tick source.
#[derive(Debug)]
pub struct Widget {
    timer: CountdownTimer,
    ticks: mpsc::UnboundedReceiver<TickHandle>,
}

impl Widget {
    /// Builds the widget and performs the startup permission request.
    pub fn new(config: &WidgetConfig, collaborators: Collaborators) -> Self {
        let (scheduler, ticks) = TokioTickScheduler::new();
        let timer = CountdownTimer::new(
            config.durations,
            config.target_work_sessions,
            scheduler,
            collaborators,
        );

        let widget = Self { timer, ticks };
        widget.request_notification_permission();
        widget
    }

    /// Asks for notification permission once if it is not already granted.
    fn request_notification_permission(&self) {
        let notifier = &self.timer.collaborators().notifier;
        let current = notifier.permission();
        if current.is_granted() {
            return;
        }

        let permission = notifier.request_permission();
        info!(
            before = current.as_str(),
            after = permission.as_str(),
            "Notification permission requested"
        );
    }

    /// Applies one control command. Returns false when the host should stop.
    pub fn dispatch(&mut self, command: ControlCommand) -> bool {
        debug!(?command, "Control command");
        match command {
            ControlCommand::Start => self.timer.start(),
            ControlCommand::Pause => self.timer.pause(),
            ControlCommand::Reset => self.timer.reset(),
            ControlCommand::SetMode(mode) => self.timer.set_mode(mode),
            ControlCommand::Status => Display::show_status(self.timer.state()),
            ControlCommand::Quit => return false,
        }
        true
    }

    /// Runs until `Quit` arrives or the command channel closes.
    ///
    /// The timer is paused on the way out so no tick task outlives the loop.
    /// Returns the final state.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ControlCommand>) -> TimerState {
        loop {
            tokio::select! {
                Some(handle) = self.ticks.recv() => {
                    self.timer.on_tick(handle);
                }
                command = commands.recv() => match command {
                    Some(command) => {
                        if !self.dispatch(command) {
                            break;
                        }
                    }
                    None => {
                        debug!("Control channel closed");
                        break;
                    }
                },
            }
        }

        self.timer.pause();
        info!("Widget stopped");
        self.timer.state().clone()
    }

    /// Returns the timer.
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }
}
