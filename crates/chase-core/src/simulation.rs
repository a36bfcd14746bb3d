//! Simulation Driver
//!
//! Owns the ECS world and schedule and advances them one tick at a time.
//! Each tick runs, in order:
//! 1. mask appearance
//! 2. player movement, zone check and catch detection
//! 3. every hunter's state machine
//! 4. the game-over latch, which freezes the player and closes the session
//!
//! Once the session is over, ticks change nothing until [`Simulation::restart`].

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use chase_events::{
    EventKind, FactionId, GameOverReason, HunterId, HunterState, SessionState, SimEvent,
    WorldSnapshot,
};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{info, warn};

use crate::components::{
    FactionProgress, Hunter, MaskAppearance, Player, Position, ZoneError, ZoneRegistry,
};
use crate::config::{ConfigError, SimConfig};
use crate::events::TickEvents;
use crate::output::generate_snapshot;
use crate::setup::{spawn_level, LevelLayout};
use crate::systems::{
    advance_mask_appearance, check_player_zone, detect_player_catch, enforce_game_over,
    game_active, move_player, update_hunters,
};
use crate::{Session, SimClock, SimRng};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("zone error: {0}")]
    Zone(#[from] ZoneError),
    #[error("no hunter with id {0}")]
    UnknownHunter(HunterId),
}

/// What one call to [`Simulation::tick`] produced
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SimEvent>,
    /// Set on the tick the session ended
    pub outcome: Option<GameOverReason>,
}

/// Public view of one hunter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HunterView {
    pub id: HunterId,
    pub position: Vec2,
    pub faction: FactionId,
    pub state: HunterState,
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    config: SimConfig,
    layout: LevelLayout,
    seed: u64,
    roster: Vec<(HunterId, Entity)>,
}

impl Simulation {
    /// Validates the configuration and layout and builds a fresh session.
    pub fn new(config: SimConfig, layout: LevelLayout, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        layout.validate()?;
        let (world, roster) = build_world(&config, &layout, seed)?;
        info!(
            seed,
            level = %layout.name,
            hunters = roster.len(),
            "simulation created"
        );

        Ok(Self {
            world,
            schedule: build_schedule(),
            config,
            layout,
            seed,
            roster,
        })
    }

    /// Built-in arena with default tuning.
    pub fn with_defaults(seed: u64) -> Result<Self, SimError> {
        Self::new(SimConfig::default(), LevelLayout::default_arena(), seed)
    }

    /// Advances the session by `dt` seconds.
    ///
    /// Negative or non-finite steps are treated as zero. Paused and finished
    /// sessions only report events queued by commands since the last tick.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "invalid time step treated as zero");
            0.0
        };

        if self.session() == SessionState::Playing {
            self.world.resource_mut::<SimClock>().advance(dt);
            self.schedule.run(&mut self.world);
        }

        let events = self.world.resource_mut::<TickEvents>().drain();
        let outcome = events.iter().find_map(|event| match event.kind {
            EventKind::GameOver { reason } => Some(reason),
            _ => None,
        });
        TickReport {
            tick: self.world.resource::<SimClock>().tick,
            events,
            outcome,
        }
    }

    /// Sets the movement direction for the coming ticks.
    pub fn set_movement_input(&mut self, direction: Vec2) {
        if let Some(mut player) = self.world.get_resource_mut::<Player>() {
            player.apply_movement_input(direction);
        }
    }

    /// Rebuilds every component from the stored layout and seed.
    pub fn restart(&mut self) -> Result<(), SimError> {
        let (world, roster) = build_world(&self.config, &self.layout, self.seed)?;
        // systems are bound to the world they first ran against
        self.world = world;
        self.schedule = build_schedule();
        self.roster = roster;
        self.push_event(EventKind::SessionRestarted);
        info!(seed = self.seed, "session restarted");
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.session() != SessionState::Playing {
            return;
        }
        self.world.resource_mut::<Session>().state = SessionState::Paused;
        self.push_event(EventKind::SessionPaused);
    }

    pub fn resume(&mut self) {
        if self.session() != SessionState::Paused {
            return;
        }
        self.world.resource_mut::<Session>().state = SessionState::Playing;
        self.push_event(EventKind::SessionResumed);
    }

    /// Sends a hunter back to its patrol range on the next tick.
    pub fn force_hunter_return(&mut self, id: HunterId) -> Result<(), SimError> {
        self.hunter_mut(id)?.force_return();
        Ok(())
    }

    /// Records a physical hit on a hunter.
    pub fn apply_collision(&mut self, id: HunterId, impulse: Vec2) -> Result<(), SimError> {
        let tuning = self.config.hunter;
        self.hunter_mut(id)?.apply_collision(impulse, &tuning);
        Ok(())
    }

    /// Overrides a hunter's speed; returns the resulting speed.
    pub fn set_hunter_speed_multiplier(
        &mut self,
        id: HunterId,
        multiplier: f32,
    ) -> Result<f32, SimError> {
        Ok(self.hunter_mut(id)?.set_speed_multiplier(multiplier)?)
    }

    pub fn player(&self) -> Option<&Player> {
        self.world.get_resource::<Player>()
    }

    pub fn player_mut(&mut self) -> Option<Mut<'_, Player>> {
        self.world.get_resource_mut::<Player>()
    }

    /// Removes the player; hunters fall back to wandering until restart.
    pub fn detach_player(&mut self) -> Option<Player> {
        self.world.remove_resource::<Player>()
    }

    /// Removes the zone registry; zone checks are skipped until restart.
    pub fn detach_zones(&mut self) -> Option<ZoneRegistry> {
        self.world.remove_resource::<ZoneRegistry>()
    }

    pub fn zones(&self) -> Option<&ZoneRegistry> {
        self.world.get_resource::<ZoneRegistry>()
    }

    pub fn hunters(&self) -> Vec<HunterView> {
        self.roster
            .iter()
            .filter_map(|&(id, _)| self.hunter(id))
            .collect()
    }

    pub fn hunter(&self, id: HunterId) -> Option<HunterView> {
        let entity = self.entity(id)?;
        let hunter = self.world.get::<Hunter>(entity)?;
        let position = self.world.get::<Position>(entity)?;
        Some(HunterView {
            id,
            position: position.0,
            faction: hunter.faction,
            state: hunter.state,
        })
    }

    /// Full hunter component, for inspection.
    pub fn hunter_agent(&self, id: HunterId) -> Option<&Hunter> {
        self.world.get::<Hunter>(self.entity(id)?)
    }

    /// Moves a hunter; its state machine is untouched.
    pub fn place_hunter(&mut self, id: HunterId, position: Vec2) -> Result<(), SimError> {
        let entity = self.entity(id).ok_or(SimError::UnknownHunter(id))?;
        let mut current = self
            .world
            .get_mut::<Position>(entity)
            .ok_or(SimError::UnknownHunter(id))?;
        current.0 = position;
        Ok(())
    }

    pub fn progress(&self) -> &FactionProgress {
        self.world.resource::<FactionProgress>()
    }

    pub fn mask(&self) -> &MaskAppearance {
        self.world.resource::<MaskAppearance>()
    }

    pub fn is_over(&self) -> bool {
        self.progress().is_over()
    }

    pub fn session(&self) -> SessionState {
        self.world.resource::<Session>().state
    }

    pub fn clock(&self) -> SimClock {
        *self.world.resource::<SimClock>()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let entities: Vec<Entity> = self.roster.iter().map(|&(_, entity)| entity).collect();
        generate_snapshot(&self.world, &entities, &self.config.indicator)
    }

    fn entity(&self, id: HunterId) -> Option<Entity> {
        self.roster
            .iter()
            .find(|(hunter_id, _)| *hunter_id == id)
            .map(|&(_, entity)| entity)
    }

    fn hunter_mut(&mut self, id: HunterId) -> Result<Mut<'_, Hunter>, SimError> {
        let entity = self.entity(id).ok_or(SimError::UnknownHunter(id))?;
        self.world
            .get_mut::<Hunter>(entity)
            .ok_or(SimError::UnknownHunter(id))
    }

    fn push_event(&mut self, kind: EventKind) {
        let stamp = self.world.resource::<SimClock>().timestamp();
        self.world.resource_mut::<TickEvents>().push(stamp, kind);
    }
}

fn build_world(
    config: &SimConfig,
    layout: &LevelLayout,
    seed: u64,
) -> Result<(World, Vec<(HunterId, Entity)>), SimError> {
    let mut world = World::new();
    world.insert_resource(SimClock::default());
    world.insert_resource(Session::default());
    world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
    world.insert_resource(TickEvents::new());
    world.insert_resource(FactionProgress::new(config.progress.max_progress)?);
    world.insert_resource(MaskAppearance::new(config.progress.mask_transition_speed));

    let roster = spawn_level(&mut world, layout, config)?;
    Ok((world, roster))
}

fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            advance_mask_appearance,
            move_player.run_if(game_active),
            check_player_zone.run_if(game_active),
            detect_player_catch.run_if(game_active),
            update_hunters.run_if(game_active),
            enforce_game_over,
        )
            .chain(),
    );
    schedule
}
