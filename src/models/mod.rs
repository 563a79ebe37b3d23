//! Core data models.

mod platform;
mod player;
mod rank;
mod stats;

pub use platform::*;
pub use player::*;
pub use rank::*;
pub use stats::*;
