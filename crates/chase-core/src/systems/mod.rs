//! ECS Systems
//!
//! Per-tick systems for mask appearance, the player, hunters and the
//! game-over latch, plus the run conditions that gate them.

use bevy_ecs::prelude::*;

use crate::components::FactionProgress;

pub mod hunter;
pub mod player;
pub mod progress;

pub use hunter::update_hunters;
pub use player::{check_player_zone, detect_player_catch, move_player};
pub use progress::{advance_mask_appearance, enforce_game_over};

/// Run condition: true until a faction wins.
pub fn game_active(progress: Res<FactionProgress>) -> bool {
    !progress.is_over()
}
