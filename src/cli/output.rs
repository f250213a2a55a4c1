// Output formatting utilities

use crate::models::{Durations, Mode, Task};
use crate::utils::format_clock;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_STRIKE: &str = "\x1b[9m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_GREEN: &str = "\x1b[32m";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// `1 item left` / `N items left`
pub fn items_left_label(active: usize) -> String {
    format!("{} item{} left", active, if active == 1 { "" } else { "s" })
}

/// Render the task list as a table followed by the items-left line
pub fn format_task_list_table(tasks: &[Task], is_tty: bool, width: usize) -> String {
    if tasks.is_empty() {
        return format!("No tasks.\n{}", items_left_label(0));
    }

    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max("ID".len());
    let done_width = "Done".len();
    // ID, two spaces, Done, two spaces, Text
    let text_width = width.saturating_sub(id_width + done_width + 4).max(10);

    let mut output = String::new();
    let header = format!("{:<id_width$}  {:<done_width$}  {}", "ID", "Done", "Text");
    output.push_str(&bold_if_tty(&header, is_tty));
    output.push('\n');
    output.push_str(&"-".repeat((id_width + done_width + 4 + 4).min(width.max(1))));
    output.push('\n');

    for task in tasks {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        let text = truncate_text(&task.text, text_width);
        let text = if task.completed && is_tty {
            format!("{}{}{}{}", ANSI_DIM, ANSI_STRIKE, text, ANSI_RESET)
        } else {
            text
        };
        output.push_str(&format!(
            "{:<id_width$}  {:<done_width$}  {}\n",
            task.id, mark, text
        ));
    }

    let active = tasks.iter().filter(|t| !t.completed).count();
    output.push('\n');
    output.push_str(&items_left_label(active));
    output
}

/// Durations as shown by `settings show`
pub fn format_settings(durations: &Durations) -> String {
    let mut output = String::new();
    for mode in Mode::ALL {
        output.push_str(&format!(
            "{:<12} {} min\n",
            format!("{}:", mode.label()),
            durations.minutes(mode)
        ));
    }
    output.trim_end().to_string()
}

/// One-line timer view: `[Focus] 24:59 running`
pub fn format_timer_line(mode: Mode, seconds_remaining: u32, running: bool, is_tty: bool) -> String {
    let clock = format_clock(seconds_remaining);
    let clock = if running && is_tty {
        format!("{}{}{}", ANSI_FG_GREEN, clock, ANSI_RESET)
    } else {
        bold_if_tty(&clock, is_tty)
    };
    format!(
        "[{}] {} {}",
        mode.label(),
        clock,
        if running { "running" } else { "paused" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, text: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn test_items_left_label() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(3), "3 items left");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_text("héllo wörld", 6), "héllo…");
    }

    #[test]
    fn test_task_table_plain() {
        let tasks = vec![task(1, "Buy milk", false), task(2, "Call Bob", true)];
        let out = format_task_list_table(&tasks, false, 80);
        assert!(out.starts_with("ID  Done  Text"));
        assert!(out.contains("1   [ ]   Buy milk"));
        assert!(out.contains("2   [x]   Call Bob"));
        assert!(out.ends_with("1 item left"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_task_table_tty_styles_completed() {
        let tasks = vec![task(7, "Done thing", true)];
        let out = format_task_list_table(&tasks, true, 80);
        assert!(out.contains(ANSI_STRIKE));
        assert!(out.contains(ANSI_BOLD));
    }

    #[test]
    fn test_task_table_empty() {
        assert_eq!(format_task_list_table(&[], false, 80), "No tasks.\n0 items left");
    }

    #[test]
    fn test_format_settings() {
        let out = format_settings(&Durations::default());
        assert!(out.contains("Focus:       25 min"));
        assert!(out.contains("Short Break: 5 min"));
        assert!(out.contains("Long Break:  15 min"));
    }

    #[test]
    fn test_format_timer_line() {
        assert_eq!(
            format_timer_line(Mode::ShortBreak, 300, false, false),
            "[Short Break] 05:00 paused"
        );
        assert_eq!(
            format_timer_line(Mode::Focus, 1499, true, false),
            "[Focus] 24:59 running"
        );
    }
}
