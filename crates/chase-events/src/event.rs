//! Event Types
//!
//! Gameplay events emitted by the simulation for renderers, audio and logs.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FactionId, GameOverReason, SimTimestamp};

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// Stable identifier of a hunter within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HunterId(pub u32);

impl fmt::Display for HunterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hunter_{:03}", self.0)
    }
}

/// Identifier of a zone, equal to its registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone_{:03}", self.0)
    }
}

/// Behavior state of a hunter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterState {
    /// Idle patrol around the wander center
    #[default]
    Wandering,
    /// Pursuing the player
    Chasing,
    /// Caught the player; terminal for the encounter
    Attacking,
    /// Walking back to the patrol range after being displaced
    Returning,
}

impl HunterState {
    /// Returns true if no further transitions leave this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, HunterState::Attacking)
    }
}

impl fmt::Display for HunterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HunterState::Wandering => write!(f, "wandering"),
            HunterState::Chasing => write!(f, "chasing"),
            HunterState::Attacking => write!(f, "attacking"),
            HunterState::Returning => write!(f, "returning"),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// The player entered a zone
    ZoneEntered { zone_id: ZoneId, faction: FactionId },
    /// The player left a zone
    ZoneExited { zone_id: ZoneId, faction: FactionId },
    /// A hunter changed behavior state
    HunterStateChanged {
        hunter_id: HunterId,
        from: HunterState,
        to: HunterState,
    },
    /// A hunter was struck hard enough to be displaced
    HunterKnockedBack {
        hunter_id: HunterId,
        impulse: Vec2,
        return_target: Vec2,
    },
    /// A hunter's speed began growing
    SpeedGrowthStarted { hunter_id: HunterId, speed: f32 },
    /// The session ended
    GameOver { reason: GameOverReason },
    /// The session was reset to its initial state
    SessionRestarted,
    SessionPaused,
    SessionResumed,
}

impl EventKind {
    /// Short snake_case label, handy for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::ZoneEntered { .. } => "zone_entered",
            EventKind::ZoneExited { .. } => "zone_exited",
            EventKind::HunterStateChanged { .. } => "hunter_state_changed",
            EventKind::HunterKnockedBack { .. } => "hunter_knocked_back",
            EventKind::SpeedGrowthStarted { .. } => "speed_growth_started",
            EventKind::GameOver { .. } => "game_over",
            EventKind::SessionRestarted => "session_restarted",
            EventKind::SessionPaused => "session_paused",
            EventKind::SessionResumed => "session_resumed",
        }
    }
}

/// A timestamped gameplay event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub timestamp: SimTimestamp,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl SimEvent {
    pub fn new(timestamp: SimTimestamp, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }
}

/// An event with a log-assigned ID, as written to events.jsonl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub event_id: String,
    #[serde(flatten)]
    pub event: SimEvent,
}
