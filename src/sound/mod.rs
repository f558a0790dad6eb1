//! Completion sound for the Pomodoro widget.
//!
//! The timer only asks for "play the completion sound" and never waits on
//! the result. Failures are logged by the caller and dropped.
//!
//! - [`TerminalBell`]: rings the terminal bell (BEL, `0x07`)
//! - [`MockAudioNotifier`]: records calls for tests

mod error;

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

pub use error::SoundError;

/// Trait for completion sound implementations.
pub trait AudioNotifier: Send {
    /// Plays the completion sound. Must not block on playback.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play_completion_sound(&self) -> Result<(), SoundError>;
}

impl<T: AudioNotifier + Sync + ?Sized> AudioNotifier for Arc<T> {
    fn play_completion_sound(&self) -> Result<(), SoundError> {
        (**self).play_completion_sound()
    }
}

// ============================================================================
// TerminalBell
// ============================================================================

/// Rings the terminal bell on the given writer (stderr by default).
#[derive(Debug)]
pub struct TerminalBell<W: Write + Send> {
    out: Mutex<W>,
    disabled: AtomicBool,
}

impl TerminalBell<std::io::Stderr> {
    /// Creates a bell on stderr.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all playback is silently skipped.
    #[must_use]
    pub fn stderr(disabled: bool) -> Self {
        Self::new(std::io::stderr(), disabled)
    }
}

impl<W: Write + Send> TerminalBell<W> {
    #[must_use]
    pub fn new(out: W, disabled: bool) -> Self {
        Self {
            out: Mutex::new(out),
            disabled: AtomicBool::new(disabled),
        }
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }

    /// Consumes the bell and returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> AudioNotifier for TerminalBell<W> {
    fn play_completion_sound(&self) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(b"\x07")?;
        out.flush()?;
        debug!("Terminal bell rung");
        Ok(())
    }
}

// ============================================================================
// MockAudioNotifier
// ============================================================================

/// Mock audio notifier for testing.
#[derive(Debug, Default)]
pub struct MockAudioNotifier {
    play_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAudioNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of play attempts, including failed ones.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) {
        self.play_calls.store(0, Ordering::SeqCst);
    }
}

impl AudioNotifier for MockAudioNotifier {
    fn play_completion_sound(&self) -> Result<(), SoundError> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackRejected("Mock failure".to_string()));
        }
        Ok(())
    }
}
