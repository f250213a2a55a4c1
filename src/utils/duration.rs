// Countdown formatting

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Title line shown while the timer runs, e.g. `24:59 - FocusFlow`
pub fn format_title(secs: u32) -> String {
    format!("{} - FocusFlow", format_clock(secs))
}
