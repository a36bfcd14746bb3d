//! Level Setup
//!
//! Level layouts and spawning of zones, the player and hunters.

pub mod level;

pub use level::*;
