//! Sound system error types.

use thiserror::Error;

/// Errors that can occur when playing the completion sound.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The output (terminal, device) could not be written to.
    #[error("audio output is not available: {0}")]
    OutputUnavailable(String),

    /// The environment refused playback.
    #[error("sound playback was rejected: {0}")]
    PlaybackRejected(String),
}

impl SoundError {
    /// Returns true if this error is related to the output device.
    #[must_use]
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputUnavailable(_))
    }
}

impl From<std::io::Error> for SoundError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputUnavailable(err.to_string())
    }
}
