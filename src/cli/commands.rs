use clap::{Parser, Subcommand};
use crate::app::{App, Command, Event};
use crate::cli::error::{validate_task_id, UserError};
use crate::cli::interactive::{run_timer_loop, spawn_stdin_reader, LoopOptions, CLOCK_REFRESH};
use crate::cli::output::{format_settings, format_task_list_table, get_terminal_width, is_tty};
use crate::cli::status::compute_status;
use crate::config::Config;
use crate::db::DbConnection;
use crate::models::Mode;
use crate::timer::IntervalScheduler;
use crate::utils::SystemClock;
use anyhow::{Context, Result};
use std::sync::mpsc;

type CliApp = App<IntervalScheduler, SystemClock>;

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "FocusFlow - A Pomodoro timer and to-do list for the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task text (blank text is ignored)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List tasks in the order they were added
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Mark a task as not done
    Undone {
        /// Task ID
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Remove all completed tasks
    Clear,
    /// Timer duration settings
    Settings {
        #[command(subcommand)]
        subcommand: SettingsCommands,
    },
    /// Run the countdown timer interactively
    Timer {
        /// Preset to run: focus, short or long
        #[arg(long, short = 'm')]
        mode: Option<String>,
        /// Wait for `s` instead of starting immediately
        #[arg(long)]
        paused: bool,
        /// Ignore stdin; run until the countdown finishes
        #[arg(long)]
        no_input: bool,
    },
    /// Show greeting, time and a summary of tasks and presets
    Status,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current durations
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Change durations in minutes; invalid values fall back to the defaults
    Set {
        /// Focus length in minutes
        #[arg(long, allow_hyphen_values = true)]
        focus: Option<String>,
        /// Short break length in minutes
        #[arg(long, allow_hyphen_values = true)]
        short: Option<String>,
        /// Long break length in minutes
        #[arg(long, allow_hyphen_values = true)]
        long: Option<String>,
    },
}

/// Parse arguments and run the selected command
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    let config = Config::load();
    handle_command(cli, &config)
}

fn open_app(config: &Config) -> Result<CliApp> {
    let conn = DbConnection::connect(config)
        .context("Failed to connect to database")?;
    App::open(conn, IntervalScheduler::default(), SystemClock)
}

fn handle_command(cli: Cli, config: &Config) -> Result<()> {
    let mut app = open_app(config)?;
    match cli.command {
        Commands::Add { text } => handle_add(&mut app, text),
        Commands::List { json } => handle_list(&app, json),
        Commands::Toggle { id } => handle_toggle(&mut app, &id),
        Commands::Done { id } => handle_set_completed(&mut app, &id, true),
        Commands::Undone { id } => handle_set_completed(&mut app, &id, false),
        Commands::Delete { id } => handle_delete(&mut app, &id),
        Commands::Clear => handle_clear(&mut app),
        Commands::Settings { subcommand } => match subcommand {
            SettingsCommands::Show { json } => handle_settings_show(&app, json),
            SettingsCommands::Set { focus, short, long } => {
                handle_settings_set(&mut app, focus, short, long)
            }
        },
        Commands::Timer { mode, paused, no_input } => {
            handle_timer(&mut app, config, mode, paused, no_input)
        }
        Commands::Status => {
            println!("{}", compute_status(&app, &config.greeting_name));
            Ok(())
        }
    }
}

fn handle_add(app: &mut CliApp, text: Vec<String>) -> Result<()> {
    let text = text.join(" ");
    let events = app.dispatch(Command::AddTask(text))?;
    for event in events {
        if let Event::TaskAdded(task) = event {
            println!("Added task {}: {}", task.id, task.text);
        }
    }
    Ok(())
}

fn handle_list(app: &CliApp, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(app.tasks().tasks())
            .context("Failed to serialize tasks")?;
        println!("{}", out);
    } else {
        println!(
            "{}",
            format_task_list_table(app.tasks().tasks(), is_tty(), get_terminal_width())
        );
    }
    Ok(())
}

fn handle_toggle(app: &mut CliApp, id: &str) -> Result<()> {
    let id = validate_task_id(id)?;
    if app.dispatch(Command::ToggleTask(id))?.is_empty() {
        println!("No task with ID {}.", id);
        return Ok(());
    }
    if let Some(task) = app.tasks().get(id) {
        let state = if task.completed { "done" } else { "not done" };
        println!("Marked task {} {}: {}", id, state, task.text);
    }
    Ok(())
}

fn handle_set_completed(app: &mut CliApp, id: &str, completed: bool) -> Result<()> {
    let id = validate_task_id(id)?;
    if app.dispatch(Command::SetCompleted(id, completed))?.is_empty() {
        println!("No task with ID {}.", id);
        return Ok(());
    }
    let state = if completed { "done" } else { "not done" };
    println!("Marked task {} {}.", id, state);
    Ok(())
}

fn handle_delete(app: &mut CliApp, id: &str) -> Result<()> {
    let id = validate_task_id(id)?;
    let existed = app.tasks().get(id).is_some();
    app.dispatch(Command::DeleteTask(id))?;
    if existed {
        println!("Deleted task {}.", id);
    } else {
        println!("No task with ID {}.", id);
    }
    Ok(())
}

fn handle_clear(app: &mut CliApp) -> Result<()> {
    let before = app.tasks().len();
    app.dispatch(Command::ClearCompleted)?;
    let removed = before - app.tasks().len();
    println!(
        "Cleared {} completed task{}.",
        removed,
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}

fn handle_settings_show(app: &CliApp, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string(app.durations())
            .context("Failed to serialize durations")?;
        println!("{}", out);
    } else {
        println!("{}", format_settings(app.durations()));
    }
    Ok(())
}

fn handle_settings_set(
    app: &mut CliApp,
    focus: Option<String>,
    short: Option<String>,
    long: Option<String>,
) -> Result<()> {
    let current = *app.durations();
    let command = Command::SaveSettings {
        focus: focus.unwrap_or_else(|| current.focus.to_string()),
        short: short.unwrap_or_else(|| current.short.to_string()),
        long: long.unwrap_or_else(|| current.long.to_string()),
    };
    app.dispatch(command)?;
    println!("Saved settings.");
    println!("{}", format_settings(app.durations()));
    Ok(())
}

fn handle_timer(
    app: &mut CliApp,
    config: &Config,
    mode: Option<String>,
    paused: bool,
    no_input: bool,
) -> Result<()> {
    if let Some(mode) = mode {
        let mode = Mode::from_str(&mode).ok_or_else(|| {
            UserError::new(format!(
                "Invalid mode: '{}'. Expected focus, short or long.",
                mode
            ))
        })?;
        app.dispatch(Command::SelectMode(mode))?;
    }
    if !paused {
        app.dispatch(Command::Start)?;
    }

    let tty = is_tty();
    let options = LoopOptions {
        is_tty: tty,
        greeting_name: config.greeting_name.clone(),
        clock_refresh: (tty && !no_input).then_some(CLOCK_REFRESH),
    };
    let input = if no_input {
        // Sender dropped at once: the loop sees closed input
        mpsc::channel().1
    } else {
        spawn_stdin_reader()
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_timer_loop(app, input, &mut out, &options)
}
