//! Snapshot Generation
//!
//! Builds serializable world snapshots from the ECS world.

use bevy_ecs::prelude::*;
use chase_events::{
    HunterSnapshot, MaskSnapshot, ProgressSnapshot, SessionState, WorldSnapshot,
};
use std::fs;
use std::path::Path;

use crate::components::{
    FactionProgress, Hunter, HunterKey, MaskAppearance, Player, Position,
};
use crate::config::IndicatorConfig;
use crate::{Session, SimClock};

use super::indicator::threat_indicator;

/// Generates a complete world snapshot.
///
/// `hunters` lists hunter entities in the order they should be reported.
/// Entities that no longer carry hunter components are skipped.
pub fn generate_snapshot(
    world: &World,
    hunters: &[Entity],
    indicator: &IndicatorConfig,
) -> WorldSnapshot {
    let timestamp = world
        .get_resource::<SimClock>()
        .map(|clock| clock.timestamp())
        .unwrap_or_default();
    let session = world
        .get_resource::<Session>()
        .map(|s| s.state)
        .unwrap_or(SessionState::Playing);
    let player = world.get_resource::<Player>();

    let hunters = hunters
        .iter()
        .filter_map(|&entity| {
            let key = world.get::<HunterKey>(entity)?;
            let hunter = world.get::<Hunter>(entity)?;
            let position = world.get::<Position>(entity)?;
            Some(HunterSnapshot {
                hunter_id: key.0,
                position: position.0,
                faction: hunter.faction,
                state: hunter.state,
                speed: hunter.current_speed,
                speed_ratio: hunter.speed_ratio(),
                threat: player.map(|p| threat_indicator(p.position, position.0, indicator)),
            })
        })
        .collect();

    WorldSnapshot {
        timestamp,
        session,
        player: player.map(Player::snapshot),
        hunters,
        progress: world
            .get_resource::<FactionProgress>()
            .map(progress_snapshot)
            .unwrap_or_else(empty_progress),
        mask: world
            .get_resource::<MaskAppearance>()
            .map(|mask| MaskSnapshot {
                blend: mask.blend,
                intensity: mask.intensity,
            })
            .unwrap_or(MaskSnapshot {
                blend: 0.5,
                intensity: 0.0,
            }),
    }
}

fn progress_snapshot(progress: &FactionProgress) -> ProgressSnapshot {
    use chase_events::FactionId;

    ProgressSnapshot {
        progress_a: progress.progress(FactionId::FactionA),
        progress_b: progress.progress(FactionId::FactionB),
        progress_neutral: progress.progress(FactionId::Neutral),
        max_progress: progress.max_progress(),
        is_over: progress.is_over(),
        game_over_reason: progress.game_over_reason(),
    }
}

fn empty_progress() -> ProgressSnapshot {
    ProgressSnapshot {
        progress_a: 0.0,
        progress_b: 0.0,
        progress_neutral: 0.0,
        max_progress: 0.0,
        is_over: false,
        game_over_reason: None,
    }
}

/// Writes a snapshot as pretty-printed JSON.
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &WorldSnapshot) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)
}
