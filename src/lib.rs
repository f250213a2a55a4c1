//! FocusFlow - A Pomodoro timer and to-do list for the terminal
//!
//! This library provides the core functionality for FocusFlow, including:
//! - The countdown state machine and its tick scheduler
//! - The task list and its persistence
//! - Timer duration settings
//! - A key-value store on SQLite with schema migrations
//! - The application controller that ties them together
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```no_run
//! use focusflow::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod repo;
pub mod timer;
pub mod utils;
