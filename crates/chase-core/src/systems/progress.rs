//! Progress Systems
//!
//! Mask appearance easing at the start of a tick and the game-over latch at
//! the end of it.

use bevy_ecs::prelude::*;
use chase_events::{EventKind, SessionState};
use glam::Vec2;
use tracing::info;

use crate::components::{FactionProgress, MaskAppearance, Player};
use crate::events::TickEvents;
use crate::{Session, SimClock};

/// Eases the mask toward the current progress state.
pub fn advance_mask_appearance(
    clock: Res<SimClock>,
    progress: Res<FactionProgress>,
    mut mask: ResMut<MaskAppearance>,
) {
    mask.update(&progress, clock.dt);
}

/// Freezes the player and closes the session once a faction has won.
pub fn enforce_game_over(
    clock: Res<SimClock>,
    progress: Res<FactionProgress>,
    mut session: ResMut<Session>,
    mut events: ResMut<TickEvents>,
    player: Option<ResMut<Player>>,
) {
    let Some(reason) = progress.game_over_reason() else {
        return;
    };

    if let Some(mut player) = player {
        if player.can_move {
            player.can_move = false;
            player.velocity = Vec2::ZERO;
            player.is_walking = false;
        }
    }

    if session.state != SessionState::GameOver {
        session.state = SessionState::GameOver;
        info!(%reason, tick = clock.tick, "game over");
        events.push(clock.timestamp(), EventKind::GameOver { reason });
    }
}
