// Dashboard shown by `focusflow status`

use crate::app::App;
use crate::cli::output::items_left_label;
use crate::models::Mode;
use crate::timer::Scheduler;
use crate::utils::{format_time_of_day, greeting, Clock};

/// Compute the status dashboard: greeting, time of day, tasks, presets
pub fn compute_status<S: Scheduler, C: Clock>(app: &App<S, C>, name: &str) -> String {
    let now = app.clock().local_now();
    let tasks = app.tasks();
    let presets = Mode::ALL
        .iter()
        .map(|mode| format!("{} {}m", mode.label(), app.durations().minutes(*mode)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}\nTime: {}\nTasks: {} ({} total)\nPresets: {}",
        greeting(&now, name),
        format_time_of_day(&now),
        items_left_label(tasks.active_count()),
        tasks.len(),
        presets
    )
}
