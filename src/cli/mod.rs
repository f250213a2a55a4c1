pub mod commands;
pub mod error;
pub mod interactive;
pub mod output;
pub mod status;

pub use commands::*;
pub use output::*;
pub use error::*;
