//! Display text formatting for the countdown.

/// Formats remaining seconds as `MM:SS`.
///
/// Both parts are zero-padded to two digits. Minutes are not truncated, so
/// 6000 seconds renders as `"100:00"`.
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Formats the session progress label, e.g. `"2 / 4"`.
pub fn progress_label(completed: u32, target: u32) -> String {
    format!("{} / {}", completed, target)
}
