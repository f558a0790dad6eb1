//! Display collaborator for the countdown.
//!
//! The timer pushes `(formatted_time, progress_label)` pairs to a
//! [`DisplayRenderer`] on every tick, reset, mode switch and completion.
//! The renderer owns presentation; the timer owns the text.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::warn;

/// Receives display text from the timer.
pub trait DisplayRenderer: Send {
    /// Shows the remaining time (`MM:SS`) and progress (`"done / target"`).
    fn render(&self, formatted_time: &str, progress_label: &str);
}

impl<T: DisplayRenderer + Sync + ?Sized> DisplayRenderer for Arc<T> {
    fn render(&self, formatted_time: &str, progress_label: &str) {
        (**self).render(formatted_time, progress_label)
    }
}

// ============================================================================
// TerminalRenderer
// ============================================================================

/// Renders one line per update to a writer (stdout by default).
#[derive(Debug)]
pub struct TerminalRenderer<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalRenderer<std::io::Stdout> {
    /// Creates a renderer that writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> DisplayRenderer for TerminalRenderer<W> {
    fn render(&self, formatted_time: &str, progress_label: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let result = writeln!(out, "{}  [{}]", formatted_time, progress_label)
            .and_then(|()| out.flush());
        if let Err(e) = result {
            warn!("Failed to write display update: {}", e);
        }
    }
}

// ============================================================================
// MockDisplayRenderer
// ============================================================================

/// Records every frame for assertions.
#[derive(Debug, Default)]
pub struct MockDisplayRenderer {
    frames: Mutex<Vec<(String, String)>>,
}

impl MockDisplayRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<(String, String)> {
        self.frames.lock().unwrap().clone()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<(String, String)> {
        self.frames.lock().unwrap().last().cloned()
    }

    /// Returns the most recently rendered time text.
    #[must_use]
    pub fn last_time(&self) -> Option<String> {
        self.last_frame().map(|(time, _)| time)
    }

    pub fn clear(&self) {
        self.frames.lock().unwrap().clear();
    }
}

impl DisplayRenderer for MockDisplayRenderer {
    fn render(&self, formatted_time: &str, progress_label: &str) {
        self.frames
            .lock()
            .unwrap()
            .push((formatted_time.to_string(), progress_label.to_string()));
    }
}
