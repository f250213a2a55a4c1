//! Pomodoro countdown: the state machine and the tick source that drives it.

pub mod machine;
pub mod scheduler;

pub use machine::*;
pub use scheduler::*;
