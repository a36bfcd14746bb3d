//! ECS Components
//!
//! Resources and components for faction progress, zones, the player and hunters.

pub mod faction;
pub mod hunter;
pub mod player;
pub mod zone;

pub use faction::*;
pub use hunter::*;
pub use player::*;
pub use zone::*;
