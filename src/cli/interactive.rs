// Interactive countdown (`focusflow timer`)
//
// One thread of control handles one event at a time: either a line typed by
// the user or a due tick. A helper thread only forwards stdin lines.

use crate::app::{App, Command, Event};
use crate::cli::output::format_timer_line;
use crate::models::Mode;
use crate::timer::Scheduler;
use crate::utils::{format_time_of_day, format_title, greeting, Clock};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

/// How often the greeting and clock are redrawn while no tick is due
pub const CLOCK_REFRESH: Duration = Duration::from_secs(1);

const KEY_HELP: &str = "s=start p=pause r=reset f=focus b=short break l=long break q=quit";

/// A line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Command(Command),
    Quit,
    Unknown(String),
}

/// Map an input line to a key. Blank lines map to nothing.
pub fn parse_key(line: &str) -> Option<Key> {
    let word = line.trim().to_lowercase();
    let key = match word.as_str() {
        "" => return None,
        "s" | "start" => Key::Command(Command::Start),
        "p" | "pause" => Key::Command(Command::Pause),
        "r" | "reset" => Key::Command(Command::Reset),
        "f" | "focus" => Key::Command(Command::SelectMode(Mode::Focus)),
        "b" | "short" => Key::Command(Command::SelectMode(Mode::ShortBreak)),
        "l" | "long" => Key::Command(Command::SelectMode(Mode::LongBreak)),
        "q" | "quit" | "exit" => Key::Quit,
        _ => Key::Unknown(word),
    };
    Some(key)
}

/// Options for rendering the loop
#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub is_tty: bool,
    pub greeting_name: String,
    /// Redraw interval while the timer is idle; `None` waits for input only
    pub clock_refresh: Option<Duration>,
}

enum Incoming {
    Line(String),
    Tick,
    Redraw,
}

/// Forward stdin lines over a channel. The sender is dropped at EOF.
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the countdown until the user quits, or until input is closed and
/// the timer is idle.
pub fn run_timer_loop<S, C, W>(
    app: &mut App<S, C>,
    input: Receiver<String>,
    out: &mut W,
    options: &LoopOptions,
) -> Result<()>
where
    S: Scheduler,
    C: Clock,
    W: Write,
{
    if options.is_tty {
        writeln!(out, "{}", KEY_HELP)?;
    }
    render_timer(app, out, options)?;

    let mut input_open = true;
    loop {
        let incoming = if input_open {
            match app.scheduler().until_next() {
                Some(wait) => match input.recv_timeout(wait) {
                    Ok(line) => Incoming::Line(line),
                    Err(RecvTimeoutError::Timeout) => Incoming::Tick,
                    Err(RecvTimeoutError::Disconnected) => {
                        input_open = false;
                        continue;
                    }
                },
                None => match options.clock_refresh {
                    Some(refresh) => match input.recv_timeout(refresh) {
                        Ok(line) => Incoming::Line(line),
                        Err(RecvTimeoutError::Timeout) => Incoming::Redraw,
                        Err(RecvTimeoutError::Disconnected) => {
                            input_open = false;
                            continue;
                        }
                    },
                    None => match input.recv() {
                        Ok(line) => Incoming::Line(line),
                        Err(_) => {
                            input_open = false;
                            continue;
                        }
                    },
                },
            }
        } else {
            match app.scheduler().until_next() {
                Some(wait) => {
                    std::thread::sleep(wait);
                    Incoming::Tick
                }
                None => break,
            }
        };

        let events = match incoming {
            Incoming::Tick => app.fire_tick()?,
            Incoming::Redraw => {
                render_timer(app, out, options)?;
                out.flush()?;
                continue;
            }
            Incoming::Line(line) => match parse_key(&line) {
                None => continue,
                Some(Key::Quit) => break,
                Some(Key::Command(command)) => app.dispatch(command)?,
                Some(Key::Unknown(word)) => {
                    end_status_line(out, options)?;
                    writeln!(out, "Unknown key '{}' ({})", word, KEY_HELP)?;
                    render_timer(app, out, options)?;
                    continue;
                }
            },
        };

        render_events(app, &events, out, options)?;
    }

    end_status_line(out, options)?;
    out.flush()?;
    Ok(())
}

fn render_events<S: Scheduler, C: Clock, W: Write>(
    app: &App<S, C>,
    events: &[Event],
    out: &mut W,
    options: &LoopOptions,
) -> Result<()> {
    for event in events {
        match event {
            Event::TimerUpdated { .. } => render_timer(app, out, options)?,
            Event::Completed(mode) => {
                end_status_line(out, options)?;
                // Terminal bell; does not wait for acknowledgement
                writeln!(out, "\x07Time is up! {} finished.", mode.label())?;
            }
            _ => {}
        }
    }
    out.flush()?;
    Ok(())
}

fn render_timer<S: Scheduler, C: Clock, W: Write>(
    app: &App<S, C>,
    out: &mut W,
    options: &LoopOptions,
) -> Result<()> {
    let timer = app.timer();
    let line = format_timer_line(
        timer.mode(),
        timer.seconds_remaining(),
        timer.is_running(),
        options.is_tty,
    );
    if options.is_tty {
        let now = app.clock().local_now();
        // Rewrite the status line and the terminal title in place
        write!(
            out,
            "\r\x1b[2K{}  {} {}\x1b]0;{}\x07",
            line,
            greeting(&now, &options.greeting_name),
            format_time_of_day(&now),
            format_title(timer.seconds_remaining())
        )?;
    } else {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn end_status_line<W: Write>(out: &mut W, options: &LoopOptions) -> Result<()> {
    if options.is_tty {
        writeln!(out)?;
    }
    Ok(())
}
