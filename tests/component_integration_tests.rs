//! Component Integration Tests for the widget host.
//!
//! Runs `Widget` on the tokio runtime with paused time so the wall-clock
//! tick scheduler advances deterministically:
//! - Start/pause/reset through control commands
//! - Work completion with sound and notification
//! - Startup permission request
//! - Shutdown leaves no tick task running

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use pomodoro_widget::{
    Collaborators, ControlCommand, MockAudioNotifier, MockDisplayRenderer, MockNotificationSender,
    ModeDurations, NotificationPermission, TimerMode, TimerState, Widget, WidgetConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

struct Host {
    commands: mpsc::UnboundedSender<ControlCommand>,
    task: JoinHandle<TimerState>,
    display: Arc<MockDisplayRenderer>,
    audio: Arc<MockAudioNotifier>,
    notifier: Arc<MockNotificationSender>,
}

impl Host {
    fn send(&self, command: ControlCommand) {
        self.commands.send(command).unwrap();
    }

    async fn quit(self) -> TimerState {
        self.send(ControlCommand::Quit);
        self.task.await.unwrap()
    }
}

fn spawn_host(config: WidgetConfig, notifier: MockNotificationSender) -> Host {
    let display = Arc::new(MockDisplayRenderer::new());
    let audio = Arc::new(MockAudioNotifier::new());
    let notifier = Arc::new(notifier);

    let widget = Widget::new(
        &config,
        Collaborators::new(
            Arc::clone(&display),
            Arc::clone(&audio),
            Arc::clone(&notifier),
        ),
    );

    let (commands, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(widget.run(command_rx));

    Host {
        commands,
        task,
        display,
        audio,
        notifier,
    }
}

fn short_config() -> WidgetConfig {
    WidgetConfig {
        durations: ModeDurations {
            work_seconds: 3,
            short_break_seconds: 2,
            long_break_seconds: 4,
        },
        ..WidgetConfig::default()
    }
}

fn granted() -> MockNotificationSender {
    MockNotificationSender::new(NotificationPermission::Granted)
}

// ============================================================================
// Control Commands
// ============================================================================

mod control_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_start_counts_down_on_wall_clock() {
        let host = spawn_host(WidgetConfig::default(), granted());

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(3500)).await;

        let display = Arc::clone(&host.display);
        let state = host.quit().await;

        assert_eq!(state.remaining_seconds, 1497);
        assert!(!state.running);
        assert_eq!(display.last_time().as_deref(), Some("24:57"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_countdown() {
        let host = spawn_host(WidgetConfig::default(), granted());

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        host.send(ControlCommand::Pause);
        tokio::time::sleep(Duration::from_secs(60)).await;

        let state = host.quit().await;
        assert_eq!(state.remaining_seconds, 1498);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_after_pause_continues_from_remaining() {
        let host = spawn_host(WidgetConfig::default(), granted());

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        host.send(ControlCommand::Pause);
        tokio::time::sleep(Duration::from_secs(10)).await;
        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let state = host.quit().await;
        assert_eq!(state.remaining_seconds, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_switch_and_reset() {
        let host = spawn_host(WidgetConfig::default(), granted());

        host.send(ControlCommand::SetMode(TimerMode::ShortBreak));
        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(4500)).await;
        host.send(ControlCommand::Reset);
        tokio::time::sleep(Duration::from_secs(5)).await;

        let display = Arc::clone(&host.display);
        let state = host.quit().await;

        assert_eq!(state.mode, TimerMode::ShortBreak);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(display.last_time().as_deref(), Some("05:00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_stops_host() {
        let host = spawn_host(WidgetConfig::default(), granted());

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let Host { commands, task, .. } = host;
        drop(commands);
        let state = task.await.unwrap();

        assert_eq!(state.remaining_seconds, 1499);
        assert!(!state.running);
    }
}

// ============================================================================
// Completion
// ============================================================================

mod completion_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_work_completion_notifies_once() {
        let host = spawn_host(short_config(), granted());

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(10_500)).await;

        let audio = Arc::clone(&host.audio);
        let notifier = Arc::clone(&host.notifier);
        let display = Arc::clone(&host.display);
        let state = host.quit().await;

        assert_eq!(state.completed_work_sessions, 1);
        assert_eq!(state.remaining_seconds, 3);
        assert!(!state.running);
        assert_eq!(audio.play_count(), 1);
        assert_eq!(notifier.notification_count(), 1);
        assert_eq!(
            display.last_frame(),
            Some(("00:03".to_string(), "1 / 4".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_completion_is_silent() {
        let host = spawn_host(short_config(), granted());

        host.send(ControlCommand::SetMode(TimerMode::LongBreak));
        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(4500)).await;

        let audio = Arc::clone(&host.audio);
        let notifier = Arc::clone(&host.notifier);
        let state = host.quit().await;

        assert_eq!(state.completed_work_sessions, 0);
        assert_eq!(state.remaining_seconds, 4);
        assert_eq!(audio.play_count(), 0);
        assert_eq!(notifier.notification_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_sessions_accumulate() {
        let host = spawn_host(short_config(), granted());

        for _ in 0..3 {
            host.send(ControlCommand::Start);
            tokio::time::sleep(Duration::from_millis(3500)).await;
        }

        let audio = Arc::clone(&host.audio);
        let state = host.quit().await;

        assert_eq!(state.completed_work_sessions, 3);
        assert_eq!(audio.play_count(), 3);
    }
}

// ============================================================================
// Notification Permission
// ============================================================================

mod permission_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_permission_requested_once_at_startup() {
        let host = spawn_host(
            short_config(),
            MockNotificationSender::new(NotificationPermission::Default),
        );
        assert_eq!(host.notifier.request_count(), 1);

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(3500)).await;

        let notifier = Arc::clone(&host.notifier);
        host.quit().await;

        assert_eq!(notifier.request_count(), 1);
        assert_eq!(notifier.notification_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_granted_permission_is_not_requested() {
        let host = spawn_host(short_config(), granted());
        assert_eq!(host.notifier.request_count(), 0);
        host.quit().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refused_request_suppresses_notification() {
        let notifier = MockNotificationSender::new(NotificationPermission::Default);
        notifier.set_grant_on_request(false);
        let host = spawn_host(short_config(), notifier);

        host.send(ControlCommand::Start);
        tokio::time::sleep(Duration::from_millis(3500)).await;

        let audio = Arc::clone(&host.audio);
        let notifier = Arc::clone(&host.notifier);
        let state = host.quit().await;

        assert_eq!(state.completed_work_sessions, 1);
        assert_eq!(audio.play_count(), 1);
        assert_eq!(notifier.notification_count(), 0);
    }
}
