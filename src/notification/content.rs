//! Notification content construction.

/// Title shown when a work session completes.
pub const WORK_COMPLETE_TITLE: &str = "Pomodoro Complete!";

/// Body shown when a work session completes.
pub const WORK_COMPLETE_BODY: &str = "Time for a break!";

/// Icon hint shown alongside the notification.
pub const WORK_COMPLETE_ICON: &str = "🍅";

/// Title and body of a system notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Creates the fixed content for a completed work session.
#[must_use]
pub fn create_work_complete_content() -> NotificationContent {
    NotificationContent::new(WORK_COMPLETE_TITLE, WORK_COMPLETE_BODY)
}
