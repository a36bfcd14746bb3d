//! Shared event types and serialization for the faction chase simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers, audio and HUD collaborators depend on it without pulling in
//! the simulation core.

pub mod event;
pub mod faction;
pub mod snapshot;
pub mod timestamp;

// Re-export timestamp types
pub use timestamp::SimTimestamp;

// Re-export faction types
pub use faction::{FactionId, GameOverReason};

// Re-export event types
pub use event::{
    generate_event_id, EventKind, HunterId, HunterState, LoggedEvent, SimEvent, ZoneId,
};

// Re-export snapshot types
pub use snapshot::{
    HunterSnapshot, MaskSnapshot, PlayerSnapshot, ProgressSnapshot, SessionState,
    ThreatIndicator, WorldSnapshot,
};

/// 2D vector type used for every position, velocity and direction.
pub use glam::Vec2;
