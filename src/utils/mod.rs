pub mod clock;
pub mod duration;
pub mod greeting;

pub use clock::*;
pub use duration::*;
pub use greeting::*;
