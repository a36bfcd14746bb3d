//! Hunter System
//!
//! Steps every hunter's state machine against one consistent view of the
//! player and turns the results into events and catches.

use bevy_ecs::prelude::*;
use chase_events::EventKind;
use tracing::info;

use crate::components::{
    FactionProgress, Hunter, HunterKey, HunterTuning, Player, PlayerView, Position,
};
use crate::events::TickEvents;
use crate::{SimClock, SimRng};

/// Advances every hunter by one tick.
///
/// Hunters see the player as it stands after the player step, and never see
/// each other. Iteration follows spawn order, which together with the seeded
/// RNG keeps runs reproducible.
pub fn update_hunters(
    clock: Res<SimClock>,
    tuning: Res<HunterTuning>,
    player: Option<Res<Player>>,
    mut progress: ResMut<FactionProgress>,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<TickEvents>,
    mut hunters: Query<(&HunterKey, &mut Hunter, &mut Position)>,
) {
    let view = player.as_ref().map(|p| PlayerView {
        position: p.position,
        faction: p.current_faction,
    });
    let stamp = clock.timestamp();

    for (key, mut hunter, mut position) in hunters.iter_mut() {
        if progress.is_over() {
            break;
        }

        let step = hunter.step(
            &mut position.0,
            view,
            clock.elapsed,
            clock.dt,
            &tuning.0,
            &mut rng.0,
        );

        if let Some(speed) = step.growth_started {
            info!(hunter = %key.0, speed, "speed growth started");
            events.push(stamp, EventKind::SpeedGrowthStarted { hunter_id: key.0, speed });
        }
        if let Some((impulse, return_target)) = step.knocked_back {
            events.push(
                stamp,
                EventKind::HunterKnockedBack {
                    hunter_id: key.0,
                    impulse,
                    return_target,
                },
            );
        }
        for (from, to) in step.transitions {
            events.push(
                stamp,
                EventKind::HunterStateChanged {
                    hunter_id: key.0,
                    from,
                    to,
                },
            );
        }
        if step.caught_player {
            if let Some(view) = view {
                progress.caught_by_hunter(hunter.faction, view.faction);
            }
        }
    }
}
