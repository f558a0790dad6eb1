//! Control surface commands.
//!
//! The four timer buttons (start, pause, reset, mode) plus `status` and
//! `quit` for the host. Each command parses from a single word so a host
//! can bind them to buttons, key presses or lines on stdin.

use std::str::FromStr;

use thiserror::Error;

use crate::types::TimerMode;

/// A command from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reload the current mode's duration
    Reset,
    /// Switch mode
    SetMode(TimerMode),
    /// Print the current state
    Status,
    /// Stop the host
    Quit,
}

/// Error returned for an unrecognised command word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: '{0}' (try: {commands})", commands = COMMAND_WORDS.join(", "))]
pub struct ParseCommandError(pub String);

/// Words accepted by [`ControlCommand::from_str`], for help output.
pub const COMMAND_WORDS: &[&str] = &[
    "start",
    "pause",
    "reset",
    "work",
    "short-break",
    "long-break",
    "status",
    "quit",
];

impl FromStr for ControlCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();
        match word.as_str() {
            "start" | "s" => Ok(Self::Start),
            "pause" | "p" => Ok(Self::Pause),
            "reset" | "r" => Ok(Self::Reset),
            "status" => Ok(Self::Status),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => other
                .parse::<TimerMode>()
                .map(Self::SetMode)
                .map_err(|_| ParseCommandError(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timer_buttons() {
        assert_eq!("start".parse::<ControlCommand>(), Ok(ControlCommand::Start));
        assert_eq!("pause".parse::<ControlCommand>(), Ok(ControlCommand::Pause));
        assert_eq!("reset".parse::<ControlCommand>(), Ok(ControlCommand::Reset));
    }

    #[test]
    fn test_parse_mode_buttons() {
        assert_eq!("work".parse::<ControlCommand>(), Ok(ControlCommand::SetMode(TimerMode::Work)));
        assert_eq!(
            "break".parse::<ControlCommand>(),
            Ok(ControlCommand::SetMode(TimerMode::ShortBreak))
        );
        assert_eq!(
            "short-break".parse::<ControlCommand>(),
            Ok(ControlCommand::SetMode(TimerMode::ShortBreak))
        );
        assert_eq!(
            "long-break".parse::<ControlCommand>(),
            Ok(ControlCommand::SetMode(TimerMode::LongBreak))
        );
    }

    #[test]
    fn test_parse_host_commands() {
        assert_eq!("status".parse::<ControlCommand>(), Ok(ControlCommand::Status));
        assert_eq!("quit".parse::<ControlCommand>(), Ok(ControlCommand::Quit));
        assert_eq!("exit".parse::<ControlCommand>(), Ok(ControlCommand::Quit));
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!("  START \n".parse::<ControlCommand>(), Ok(ControlCommand::Start));
        assert_eq!("Q".parse::<ControlCommand>(), Ok(ControlCommand::Quit));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "snooze".parse::<ControlCommand>().unwrap_err();
        assert_eq!(err, ParseCommandError("snooze".to_string()));
        assert!(err.to_string().contains("snooze"));
        assert!(err.to_string().contains("long-break"));
    }
}
