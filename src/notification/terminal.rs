//! Terminal-backed system notifier.
//!
//! Prints a banner line instead of posting an OS notification. There is no
//! consent dialog in a terminal, so requesting permission from the
//! `Default` state grants it; an explicit `Denied` is kept.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::content::WORK_COMPLETE_ICON;
use super::error::NotificationError;
use super::{NotificationPermission, SystemNotifier};

/// Writes notification banners to a writer (stderr by default).
#[derive(Debug)]
pub struct TerminalNotifier<W: Write + Send> {
    out: Mutex<W>,
    permission: Mutex<NotificationPermission>,
}

impl TerminalNotifier<std::io::Stderr> {
    #[must_use]
    pub fn stderr(permission: NotificationPermission) -> Self {
        Self::new(std::io::stderr(), permission)
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    #[must_use]
    pub fn new(out: W, permission: NotificationPermission) -> Self {
        Self {
            out: Mutex::new(out),
            permission: Mutex::new(permission),
        }
    }

    /// Consumes the notifier and returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn permission_slot(&self) -> std::sync::MutexGuard<'_, NotificationPermission> {
        self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> SystemNotifier for TerminalNotifier<W> {
    fn permission(&self) -> NotificationPermission {
        *self.permission_slot()
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self.permission_slot();
        if *permission == NotificationPermission::Default {
            *permission = NotificationPermission::Granted;
        }
        debug!(permission = permission.as_str(), "Notification permission requested");
        *permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if !self.permission().is_granted() {
            return Err(NotificationError::PermissionDenied);
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{} {} {}", WORK_COMPLETE_ICON, title, body)?;
        out.flush()?;
        Ok(())
    }
}
