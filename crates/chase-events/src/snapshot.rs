//! Snapshot Types
//!
//! Serialization structs for world snapshots.
//!
//! A snapshot is everything a renderer, minimap or HUD needs to draw one
//! frame: player, hunters, progress meters and the derived mask appearance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{FactionId, GameOverReason, HunterId, HunterState, SimTimestamp, ZoneId};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Playing,
    Paused,
    GameOver,
}

/// Player state visible to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub is_walking: bool,
    pub can_move: bool,
    pub zone_faction: FactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,
}

/// Off-screen indicator hint pointing from the player to a hunter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatIndicator {
    /// Unit direction from the player toward the hunter
    pub bearing: Vec2,
    /// Bearing angle in degrees, counter-clockwise from +X
    pub angle_degrees: f32,
    pub distance: f32,
    /// Indicator scale; closer hunters get larger indicators
    pub scale: f32,
    /// Indicator opacity; fades out as a hunter gets very close
    pub alpha: f32,
}

/// Hunter state visible to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterSnapshot {
    pub hunter_id: HunterId,
    pub position: Vec2,
    pub faction: FactionId,
    pub state: HunterState,
    pub speed: f32,
    /// 0.0 at base speed, 1.0 at max speed
    pub speed_ratio: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat: Option<ThreatIndicator>,
}

/// Faction progress meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub progress_a: f32,
    pub progress_b: f32,
    #[serde(default)]
    pub progress_neutral: f32,
    pub max_progress: f32,
    pub is_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over_reason: Option<GameOverReason>,
}

impl ProgressSnapshot {
    /// Fill fraction for a progress bar, in [0, 1].
    pub fn fill(&self, faction: FactionId) -> f32 {
        let value = match faction {
            FactionId::FactionA => self.progress_a,
            FactionId::FactionB => self.progress_b,
            FactionId::Neutral => return 0.0,
        };
        if self.max_progress <= 0.0 {
            return 0.0;
        }
        (value / self.max_progress).clamp(0.0, 1.0)
    }
}

/// Derived mask appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskSnapshot {
    /// 0.0 = fully faction A, 1.0 = fully faction B
    pub blend: f32,
    /// 0.0 = invisible, 1.0 = fully opaque
    pub intensity: f32,
}

/// Complete world snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub timestamp: SimTimestamp,
    pub session: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerSnapshot>,
    #[serde(default)]
    pub hunters: Vec<HunterSnapshot>,
    pub progress: ProgressSnapshot,
    pub mask: MaskSnapshot,
}

impl WorldSnapshot {
    /// Finds a hunter by ID.
    pub fn hunter(&self, hunter_id: HunterId) -> Option<&HunterSnapshot> {
        self.hunters.iter().find(|h| h.hunter_id == hunter_id)
    }

    /// Number of hunters currently in the given state.
    pub fn count_in_state(&self, state: HunterState) -> usize {
        self.hunters.iter().filter(|h| h.state == state).count()
    }
}
