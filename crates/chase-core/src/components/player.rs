//! Player Components
//!
//! The player agent: smoothed movement inside hard bounds, debounced walking
//! state, zone membership and catch overlap.

use bevy_ecs::prelude::*;
use chase_events::{FactionId, PlayerSnapshot, ZoneId};
use glam::Vec2;

use crate::components::faction::{FactionProgress, ProgressError, ProgressOutcome};
use crate::components::zone::ZoneRegistry;
use crate::config::{validate_bounds, ConfigError, PlayerConfig};
use crate::math::{approach, clamp_direction};

/// Axis-aligned rectangle the player can never leave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl MovementBounds {
    pub fn new(min: Vec2, max: Vec2) -> Result<Self, ConfigError> {
        validate_bounds(min, max)?;
        Ok(Self { min, max })
    }

    /// Clamps each axis independently.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A zone the player crossed into or out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneTransition {
    pub zone_id: ZoneId,
    pub faction: FactionId,
}

/// What a zone check changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneCheck {
    pub exited: Option<ZoneTransition>,
    pub entered: Option<ZoneTransition>,
    /// Faction credited with this tick's progress
    pub credited: FactionId,
    pub outcome: ProgressOutcome,
}

/// Resource: the single player agent
#[derive(Resource, Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub current_zone: Option<ZoneId>,
    pub current_faction: FactionId,
    pub can_move: bool,
    pub is_walking: bool,
    input: Vec2,
    bounds: MovementBounds,
    since_walk_flip: f32,
    tuning: PlayerConfig,
}

impl Player {
    /// Creates a player at `spawn`, pulled inside the configured bounds.
    pub fn new(spawn: Vec2, tuning: &PlayerConfig) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let bounds = MovementBounds::new(tuning.bounds_min, tuning.bounds_max)?;
        Ok(Self {
            position: bounds.clamp(spawn),
            velocity: Vec2::ZERO,
            current_zone: None,
            current_faction: FactionId::Neutral,
            can_move: true,
            is_walking: false,
            input: Vec2::ZERO,
            bounds,
            since_walk_flip: tuning.walk_cooldown,
            tuning: tuning.clone(),
        })
    }

    pub fn bounds(&self) -> MovementBounds {
        self.bounds
    }

    /// Replaces the movement bounds and pulls the player inside them.
    pub fn set_movement_bounds(&mut self, min: Vec2, max: Vec2) -> Result<(), ConfigError> {
        self.bounds = MovementBounds::new(min, max)?;
        self.position = self.bounds.clamp(self.position);
        Ok(())
    }

    /// Stores the movement direction used by the next tick.
    pub fn apply_movement_input(&mut self, direction: Vec2) {
        self.input = clamp_direction(direction, self.tuning.input_deadzone);
    }

    /// Direction currently held, after clamping and deadzone.
    pub fn input(&self) -> Vec2 {
        self.input
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.can_move {
            self.velocity = Vec2::ZERO;
            self.is_walking = false;
            return;
        }

        let target = self.input * self.tuning.move_speed;
        let rate = if target != Vec2::ZERO {
            self.tuning.acceleration
        } else {
            self.tuning.deceleration
        };
        self.velocity = approach(self.velocity, target, rate, dt);
        self.position = self.bounds.clamp(self.position + self.velocity * dt);

        self.since_walk_flip += dt;
        let walking = self.velocity.length() > self.tuning.walk_threshold;
        if walking != self.is_walking && self.since_walk_flip >= self.tuning.walk_cooldown {
            self.is_walking = walking;
            self.since_walk_flip = 0.0;
        }
    }

    /// Updates zone membership and credits this tick's zone progress.
    pub fn check_zone(
        &mut self,
        zones: &ZoneRegistry,
        progress: &mut FactionProgress,
        dt: f32,
    ) -> Result<ZoneCheck, ProgressError> {
        let found = zones
            .find_containing(self.position)
            .map(|zone| ZoneTransition {
                zone_id: zone.id,
                faction: zone.faction,
            });

        let mut exited = None;
        let mut entered = None;
        if found.map(|z| z.zone_id) != self.current_zone {
            exited = self
                .current_zone
                .and_then(|id| zones.get(id))
                .map(|zone| ZoneTransition {
                    zone_id: zone.id,
                    faction: zone.faction,
                });
            entered = found;
            self.current_zone = found.map(|z| z.zone_id);
            self.current_faction = found.map(|z| z.faction).unwrap_or(FactionId::Neutral);
        }

        let outcome = progress.add_progress(
            self.current_faction,
            self.tuning.zone_progress_rate * dt,
        )?;
        Ok(ZoneCheck {
            exited,
            entered,
            credited: self.current_faction,
            outcome,
        })
    }

    /// Whether the player's catch shape overlaps a hunter body.
    pub fn touching(&self, hunter_position: Vec2, hunter_radius: f32) -> bool {
        let reach = self.tuning.catch_radius + hunter_radius;
        self.position.distance_squared(hunter_position) <= reach * reach
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            velocity: self.velocity,
            is_walking: self.is_walking,
            can_move: self.can_move,
            zone_faction: self.current_faction,
            zone_id: self.current_zone,
        }
    }
}
