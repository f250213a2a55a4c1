// Core data models for FocusFlow
// These structs represent the domain entities

pub mod task;
pub mod durations;

pub use task::*;
pub use durations::*;
