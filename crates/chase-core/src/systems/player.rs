//! Player Systems
//!
//! Movement, zone membership and catch detection for the player resource.
//! Each system degrades to a no-op when the player or zone registry is
//! missing.

use bevy_ecs::prelude::*;
use chase_events::EventKind;
use tracing::{debug, warn};

use crate::components::{
    FactionProgress, Hunter, HunterKey, HunterTuning, Player, Position, ZoneRegistry,
};
use crate::events::TickEvents;
use crate::SimClock;

/// Integrates player movement for this tick.
pub fn move_player(clock: Res<SimClock>, player: Option<ResMut<Player>>) {
    if let Some(mut player) = player {
        player.tick(clock.dt);
    }
}

/// Updates zone membership, emits exit/enter events and credits zone progress.
pub fn check_player_zone(
    clock: Res<SimClock>,
    zones: Option<Res<ZoneRegistry>>,
    player: Option<ResMut<Player>>,
    mut progress: ResMut<FactionProgress>,
    mut events: ResMut<TickEvents>,
) {
    let (Some(zones), Some(mut player)) = (zones, player) else {
        return;
    };
    if !player.can_move {
        return;
    }

    let check = match player.check_zone(&zones, &mut progress, clock.dt) {
        Ok(check) => check,
        Err(e) => {
            warn!(error = %e, "zone progress rejected");
            return;
        }
    };

    let stamp = clock.timestamp();
    if let Some(exited) = check.exited {
        debug!(zone = %exited.zone_id, faction = %exited.faction, "player left zone");
        events.push(
            stamp,
            EventKind::ZoneExited {
                zone_id: exited.zone_id,
                faction: exited.faction,
            },
        );
    }
    if let Some(entered) = check.entered {
        debug!(zone = %entered.zone_id, faction = %entered.faction, "player entered zone");
        events.push(
            stamp,
            EventKind::ZoneEntered {
                zone_id: entered.zone_id,
                faction: entered.faction,
            },
        );
    }
}

/// Ends the game when the player's body touches a rival hunter.
pub fn detect_player_catch(
    tuning: Res<HunterTuning>,
    player: Option<Res<Player>>,
    mut progress: ResMut<FactionProgress>,
    hunters: Query<(&HunterKey, &Hunter, &Position)>,
) {
    let Some(player) = player else {
        return;
    };

    for (key, hunter, position) in hunters.iter() {
        if progress.is_over() {
            break;
        }
        if hunter.faction == player.current_faction {
            continue;
        }
        if player.touching(position.0, tuning.0.body_radius) {
            debug!(hunter = %key.0, "player touched hunter");
            progress.caught_by_hunter(hunter.faction, player.current_faction);
        }
    }
}
