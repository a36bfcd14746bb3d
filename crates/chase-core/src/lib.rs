//! Faction Chase Simulation Core
//!
//! Engine-independent model of a stealth/chase game: a player drifting
//! between two rival faction territories, hunters patrolling and pursuing,
//! and per-faction progress meters that end the session when one saturates.
//!
//! The [`Simulation`] driver owns a `bevy_ecs` world and runs the systems in
//! a fixed single-threaded order each tick.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod events;
pub mod math;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{default_config_toml, ConfigError, SimConfig};
pub use setup::{HunterSpawn, LevelLayout, ZoneSpec};
pub use simulation::{HunterView, SimError, Simulation, TickReport};

pub use chase_events::{
    EventKind, FactionId, GameOverReason, HunterId, HunterState, SessionState, SimEvent,
    SimTimestamp, Vec2, WorldSnapshot, ZoneId,
};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Simulation clock resource
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Ticks completed, including the one in progress
    pub tick: u64,
    /// Length of the tick in progress, in seconds
    pub dt: f32,
    /// Session time in seconds, including the tick in progress
    pub elapsed: f32,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.dt = dt;
        self.elapsed += dt;
    }

    pub fn timestamp(&self) -> SimTimestamp {
        SimTimestamp::new(self.tick, self.elapsed)
    }
}

/// Session lifecycle resource
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
}
