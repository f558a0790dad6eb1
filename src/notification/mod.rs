//! System notification integration.
//!
//! The timer asks a [`SystemNotifier`] for its permission state and, when
//! granted, posts the fixed work-complete notification. Requesting
//! permission happens once at widget startup, outside the timer.
//!
//! - [`TerminalNotifier`]: banner line on stderr
//! - [`MockNotificationSender`]: records notifications for tests

mod content;
pub mod error;
mod terminal;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub use self::content::{
    create_work_complete_content, NotificationContent, WORK_COMPLETE_BODY, WORK_COMPLETE_ICON,
    WORK_COMPLETE_TITLE,
};
pub use self::error::NotificationError;
pub use self::terminal::TerminalNotifier;

/// Permission state reported by the notification system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// Notifications may be shown
    Granted,
    /// The user refused notifications
    Denied,
    /// Not asked yet
    #[default]
    Default,
}

impl NotificationPermission {
    /// Returns the string representation of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Default => "default",
        }
    }

    /// Returns true if notifications may be shown.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Trait for system notification implementations.
pub trait SystemNotifier: Send {
    /// Returns the current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Asks for permission and returns the resulting state.
    fn request_permission(&self) -> NotificationPermission;

    /// Posts a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if permission is missing or delivery fails.
    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

impl<T: SystemNotifier + Sync + ?Sized> SystemNotifier for Arc<T> {
    fn permission(&self) -> NotificationPermission {
        (**self).permission()
    }

    fn request_permission(&self) -> NotificationPermission {
        (**self).request_permission()
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        (**self).notify(title, body)
    }
}

// ============================================================================
// MockNotificationSender
// ============================================================================

/// Mock notifier for testing.
#[derive(Debug)]
pub struct MockNotificationSender {
    notifications: Mutex<Vec<NotificationContent>>,
    permission: Mutex<NotificationPermission>,
    grant_on_request: AtomicBool,
    request_count: AtomicUsize,
    should_fail: AtomicBool,
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new(NotificationPermission::Granted)
    }
}

impl MockNotificationSender {
    #[must_use]
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            permission: Mutex::new(permission),
            grant_on_request: AtomicBool::new(true),
            request_count: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_permission(&self, permission: NotificationPermission) {
        *self.permission.lock().unwrap() = permission;
    }

    /// Controls whether `request_permission` grants from `Default`.
    pub fn set_grant_on_request(&self, grant: bool) {
        self.grant_on_request.store(grant, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn clear_recorded(&self) {
        self.notifications.lock().unwrap().clear();
    }
}

impl SystemNotifier for MockNotificationSender {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> NotificationPermission {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        let mut permission = self.permission.lock().unwrap();
        if *permission == NotificationPermission::Default
            && self.grant_on_request.load(Ordering::SeqCst)
        {
            *permission = NotificationPermission::Granted;
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications
            .lock()
            .unwrap()
            .push(NotificationContent::new(title, body));
        Ok(())
    }
}
