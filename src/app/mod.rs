//! Application controller.
//!
//! `App` owns every piece of mutable state and is driven by [`Command`]s.
//! Each command runs to completion and reports what changed as [`Event`]s;
//! rendering those is left to the caller.

use anyhow::{Context, Result};
use rusqlite::Connection;
use crate::models::{Durations, Mode, Task, TaskList};
use crate::repo::{SettingsRepo, TaskRepo};
use crate::timer::{Scheduler, TickOutcome, Timer};
use crate::utils::Clock;

/// Input to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    SelectMode(Mode),
    /// One second elapsed. Dropped if the scheduler is not armed.
    Tick,
    AddTask(String),
    ToggleTask(i64),
    SetCompleted(i64, bool),
    DeleteTask(i64),
    ClearCompleted,
    /// Raw settings-form input; unparseable fields fall back to defaults
    SaveSettings {
        focus: String,
        short: String,
        long: String,
    },
}

/// Output of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TimerUpdated {
        mode: Mode,
        seconds_remaining: u32,
        running: bool,
    },
    /// The countdown for `Mode` ran out. Emitted once per expiry.
    Completed(Mode),
    TaskAdded(Task),
    TasksChanged { active: usize },
    SettingsSaved(Durations),
}

/// Timer, task list and settings behind one owner
pub struct App<S: Scheduler, C: Clock> {
    conn: Connection,
    scheduler: S,
    clock: C,
    durations: Durations,
    timer: Timer,
    tasks: TaskList,
}

impl<S: Scheduler, C: Clock> App<S, C> {
    /// Load persisted state and build an idle focus timer
    pub fn open(conn: Connection, scheduler: S, clock: C) -> Result<Self> {
        let durations = SettingsRepo::load(&conn).context("Failed to load durations")?;
        let tasks = TaskRepo::load(&conn).context("Failed to load tasks")?;
        let timer = Timer::new(&durations);
        Ok(Self {
            conn,
            scheduler,
            clock,
            durations,
            timer,
            tasks,
        })
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Deliver the due tick, if the scheduler has one
    pub fn fire_tick(&mut self) -> Result<Vec<Event>> {
        if !self.scheduler.is_armed() {
            return Ok(Vec::new());
        }
        self.scheduler.advance();
        self.dispatch(Command::Tick)
    }

    /// Apply one command
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Event>> {
        log::debug!("dispatch {:?}", command);
        let mut events = Vec::new();

        match command {
            Command::Start => {
                if self.timer.start(&self.durations) {
                    self.scheduler.arm();
                    events.push(self.timer_event());
                }
            }
            Command::Pause => {
                self.scheduler.cancel();
                if self.timer.pause() {
                    events.push(self.timer_event());
                }
            }
            Command::Reset => {
                self.scheduler.cancel();
                self.timer.reset(&self.durations);
                events.push(self.timer_event());
            }
            Command::SelectMode(mode) => {
                self.scheduler.cancel();
                self.timer.select_mode(mode, &self.durations);
                events.push(self.timer_event());
            }
            Command::Tick => {
                if !self.scheduler.is_armed() {
                    log::debug!("Dropping tick: scheduler not armed");
                    return Ok(events);
                }
                match self.timer.tick() {
                    TickOutcome::Ignored => self.scheduler.cancel(),
                    TickOutcome::Counted => events.push(self.timer_event()),
                    TickOutcome::Expired => {
                        self.scheduler.cancel();
                        log::info!("{} countdown finished", self.timer.mode().label());
                        events.push(self.timer_event());
                        events.push(Event::Completed(self.timer.mode()));
                    }
                }
            }
            Command::AddTask(text) => {
                let now = self.clock.now_millis();
                let added = self.tasks.add(&text, now).cloned();
                match added {
                    Some(task) => {
                        self.persist_tasks()?;
                        events.push(Event::TaskAdded(task));
                        events.push(self.tasks_event());
                    }
                    None => log::debug!("Ignoring blank task text"),
                }
            }
            Command::ToggleTask(id) => {
                if self.tasks.toggle(id) {
                    self.persist_tasks()?;
                    events.push(self.tasks_event());
                }
            }
            Command::SetCompleted(id, completed) => {
                if self.tasks.set_completed(id, completed) {
                    self.persist_tasks()?;
                    events.push(self.tasks_event());
                }
            }
            Command::DeleteTask(id) => {
                self.tasks.delete(id);
                self.persist_tasks()?;
                events.push(self.tasks_event());
            }
            Command::ClearCompleted => {
                let removed = self.tasks.clear_completed();
                log::debug!("Cleared {} completed task(s)", removed);
                self.persist_tasks()?;
                events.push(self.tasks_event());
            }
            Command::SaveSettings { focus, short, long } => {
                self.durations = Durations::from_input(&focus, &short, &long);
                SettingsRepo::save(&self.conn, &self.durations)
                    .context("Failed to save durations")?;
                self.timer.apply_durations(&self.durations);
                events.push(Event::SettingsSaved(self.durations));
                events.push(self.timer_event());
            }
        }

        Ok(events)
    }

    fn persist_tasks(&self) -> Result<()> {
        TaskRepo::save(&self.conn, &self.tasks).context("Failed to save tasks")
    }

    fn timer_event(&self) -> Event {
        Event::TimerUpdated {
            mode: self.timer.mode(),
            seconds_remaining: self.timer.seconds_remaining(),
            running: self.timer.is_running(),
        }
    }

    fn tasks_event(&self) -> Event {
        Event::TasksChanged {
            active: self.tasks.active_count(),
        }
    }
}
