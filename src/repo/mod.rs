pub mod kv;
pub mod task;
pub mod settings;

pub use kv::*;
pub use task::*;
pub use settings::*;
