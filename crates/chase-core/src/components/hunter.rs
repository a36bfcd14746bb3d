//! Hunter Components
//!
//! Faction-aligned hunters and their behavior state machine.
//!
//! Each tick a hunter evaluates, in priority order:
//! 1. same-faction suppression (player stands in the hunter's territory)
//! 2. knockback or forced return
//! 3. detection with a hysteresis band
//! 4. attack once a chase closes the distance
//! 5. return completion
//!
//! The state machine lives on [`Hunter`] so it can be stepped without a
//! `World`; `systems::hunter` feeds it the player view and turns the
//! resulting [`HunterStep`] into events and game-over calls.

use bevy_ecs::prelude::*;
use chase_events::{FactionId, HunterId, HunterState};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{positive, ConfigError, HunterConfig};
use crate::math::{clamp_to_disk, inverse_lerp, move_towards, random_point_in_disk};

/// Drift speed below which knockback motion is dropped entirely
const DRIFT_CUTOFF: f32 = 0.1;

/// Component: stable hunter identifier
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunterKey(pub HunterId);

/// Component: world-space position
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Resource: hunter tuning shared by every hunter
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HunterTuning(pub HunterConfig);

/// The patrol disk a hunter was placed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRange {
    pub center: Vec2,
    pub radius: f32,
}

/// A recorded collision, alive until its timer runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionImpulse {
    pub impulse: Vec2,
    pub remaining: f32,
    handled: bool,
}

impl CollisionImpulse {
    pub fn new(impulse: Vec2, lifetime: f32) -> Self {
        Self {
            impulse,
            remaining: lifetime,
            handled: false,
        }
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Where a displaced hunter walks back to, and what it resumes afterwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPlan {
    pub target: Vec2,
    pub resume: HunterState,
}

/// How the player's current territory bears on this hunter's pursuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaseStance {
    /// No player, or the player stands in this hunter's own territory
    #[default]
    Idle,
    /// Player is in rival territory; pursuit is slowed
    Slowed,
    /// Player is in neutral territory
    FullPursuit,
}

impl ChaseStance {
    pub fn between(hunter_faction: FactionId, player_faction: FactionId) -> Self {
        if player_faction == hunter_faction {
            ChaseStance::Idle
        } else if player_faction == FactionId::Neutral {
            ChaseStance::FullPursuit
        } else {
            ChaseStance::Slowed
        }
    }

    /// Multiplier applied to the chase speed.
    pub fn multiplier(self, tuning: &HunterConfig) -> f32 {
        match self {
            ChaseStance::Idle => 0.0,
            ChaseStance::Slowed => tuning.enemy_zone_multiplier,
            ChaseStance::FullPursuit => tuning.neutral_zone_multiplier,
        }
    }
}

/// What a hunter sees of the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub faction: FactionId,
}

/// Everything that happened to one hunter during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HunterStep {
    /// State changes in the order they happened
    pub transitions: Vec<(HunterState, HunterState)>,
    /// Impulse and return target when a knockback started a return
    pub knocked_back: Option<(Vec2, Vec2)>,
    /// Speed at the moment growth kicked in
    pub growth_started: Option<f32>,
    /// The hunter reached the player while chasing
    pub caught_player: bool,
}

/// Component: a faction-aligned hunter
#[derive(Component, Debug, Clone)]
pub struct Hunter {
    pub faction: FactionId,
    pub state: HunterState,
    pub base_speed: f32,
    pub current_speed: f32,
    pub max_speed: f32,
    pub wander_center: Vec2,
    pub wander_target: Vec2,
    pub detection_range: f32,
    pub attack_range: f32,
    pub in_same_faction_zone: bool,
    pub original_range: PatrolRange,
    pub collision: Option<CollisionImpulse>,
    pub return_plan: Option<ReturnPlan>,
    pub stance: ChaseStance,
    knock_velocity: Vec2,
    pending_return: bool,
    wander_timer: f32,
    leash_timer: f32,
    growth_announced: bool,
}

impl Hunter {
    /// Creates a wandering hunter patrolling around `spawn`.
    ///
    /// Rejects tuning that fails [`HunterConfig::validate`].
    pub fn new(
        faction: FactionId,
        spawn: Vec2,
        tuning: &HunterConfig,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            faction,
            state: HunterState::Wandering,
            base_speed: tuning.base_speed,
            current_speed: tuning.base_speed,
            max_speed: tuning.max_speed,
            wander_center: spawn,
            wander_target: spawn,
            detection_range: tuning.detection_range,
            attack_range: tuning.attack_range,
            in_same_faction_zone: false,
            original_range: PatrolRange {
                center: spawn,
                radius: tuning.wander_radius,
            },
            collision: None,
            return_plan: None,
            stance: ChaseStance::Idle,
            knock_velocity: Vec2::ZERO,
            pending_return: false,
            wander_timer: 0.0,
            leash_timer: 0.0,
            growth_announced: false,
        })
    }

    pub fn with_patrol_radius(mut self, radius: f32) -> Result<Self, ConfigError> {
        positive("hunter.patrol_radius", radius)?;
        self.original_range.radius = radius;
        Ok(self)
    }

    pub fn with_detection_range(mut self, range: f32) -> Result<Self, ConfigError> {
        positive("hunter.detection_range", range)?;
        self.detection_range = range;
        Ok(self)
    }

    /// 0.0 at base speed, 1.0 at max speed.
    pub fn speed_ratio(&self) -> f32 {
        inverse_lerp(self.base_speed, self.max_speed, self.current_speed)
    }

    /// Remaining knockback drift velocity.
    pub fn drift(&self) -> Vec2 {
        self.knock_velocity
    }

    /// Wander radius in effect; shrinks while the player is in this hunter's territory.
    pub fn wander_radius(&self, tuning: &HunterConfig) -> f32 {
        if self.in_same_faction_zone {
            self.original_range.radius * tuning.same_faction_wander_scale
        } else {
            self.original_range.radius
        }
    }

    /// Records a physical hit; evaluated on the next step.
    pub fn apply_collision(&mut self, impulse: Vec2, tuning: &HunterConfig) {
        if !impulse.is_finite() {
            return;
        }
        self.collision = Some(CollisionImpulse::new(impulse, tuning.impulse_decay));
    }

    /// Requests a return to the patrol range on the next step.
    pub fn force_return(&mut self) {
        self.pending_return = true;
    }

    /// Overrides the current speed to `base × multiplier`, capped at max speed.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> Result<f32, ConfigError> {
        positive("speed_multiplier", multiplier)?;
        self.current_speed = (self.base_speed * multiplier).min(self.max_speed);
        Ok(self.current_speed)
    }

    /// Advances the state machine and moves the hunter by one tick.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec2,
        player: Option<PlayerView>,
        elapsed: f32,
        dt: f32,
        tuning: &HunterConfig,
        rng: &mut R,
    ) -> HunterStep {
        let mut step = HunterStep::default();
        if self.state.is_terminal() {
            return step;
        }

        self.grow_speed(elapsed, dt, tuning, &mut step);
        self.stance = player
            .map(|p| ChaseStance::between(self.faction, p.faction))
            .unwrap_or(ChaseStance::Idle);

        if player.is_some_and(|p| p.faction == self.faction) {
            self.suppress(position, dt, tuning, rng, &mut step);
            return step;
        }
        if self.in_same_faction_zone {
            self.in_same_faction_zone = false;
            if self.state == HunterState::Wandering {
                self.recenter(*position);
            }
        }

        if self.state == HunterState::Wandering && self.leash_due(*position, dt, tuning) {
            self.pending_return = true;
        }
        if self.state != HunterState::Returning {
            self.check_knockback(*position, tuning, &mut step);
        }
        self.pending_return = false;
        self.decay_collision(dt);

        match self.state {
            HunterState::Returning => self.step_return(position, dt, tuning, &mut step),
            HunterState::Wandering | HunterState::Chasing => match player {
                Some(view) => self.pursue(position, view, dt, tuning, rng, &mut step),
                None => {
                    if self.state == HunterState::Chasing {
                        self.recenter(*position);
                        self.set_state(HunterState::Wandering, &mut step);
                    }
                    self.wander(position, dt, tuning, rng);
                }
            },
            HunterState::Attacking => {}
        }
        step
    }

    fn grow_speed(&mut self, elapsed: f32, dt: f32, tuning: &HunterConfig, step: &mut HunterStep) {
        if !tuning.speed_growth_enabled || elapsed < tuning.growth_start_delay {
            return;
        }
        if self.current_speed >= self.max_speed {
            return;
        }
        if !self.growth_announced {
            self.growth_announced = true;
            step.growth_started = Some(self.current_speed);
        }
        let grown = self.current_speed + tuning.speed_growth_rate * dt;
        self.current_speed = grown.min(self.max_speed);
    }

    fn suppress<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        tuning: &HunterConfig,
        rng: &mut R,
        step: &mut HunterStep,
    ) {
        if !self.in_same_faction_zone {
            self.in_same_faction_zone = true;
            self.recenter(*position);
        }
        self.collision = None;
        self.pending_return = false;
        self.return_plan = None;
        self.knock_velocity = Vec2::ZERO;
        if self.state != HunterState::Wandering {
            self.recenter(*position);
            self.set_state(HunterState::Wandering, step);
        }
        self.wander(position, dt, tuning, rng);
    }

    fn check_knockback(&mut self, position: Vec2, tuning: &HunterConfig, step: &mut HunterStep) {
        let mut impulse = None;
        if let Some(collision) = self.collision.as_mut() {
            if !collision.handled && collision.impulse.length() > tuning.knockback_threshold {
                collision.handled = true;
                impulse = Some(collision.impulse);
            }
        }
        if impulse.is_none() && !self.pending_return {
            return;
        }

        let range = self.original_range;
        let target = clamp_to_disk(
            range.center + (position - range.center) * tuning.return_fraction,
            range.center,
            range.radius,
        );
        self.return_plan = Some(ReturnPlan {
            target,
            resume: self.state,
        });
        self.knock_velocity = impulse.unwrap_or(Vec2::ZERO);
        step.knocked_back = impulse.map(|i| (i, target));
        self.set_state(HunterState::Returning, step);
    }

    fn decay_collision(&mut self, dt: f32) {
        if let Some(collision) = self.collision.as_mut() {
            collision.remaining -= dt;
            if collision.remaining <= 0.0 {
                self.collision = None;
            }
        }
    }

    fn leash_due(&mut self, position: Vec2, dt: f32, tuning: &HunterConfig) -> bool {
        let Some(factor) = tuning.leash_factor else {
            return false;
        };
        self.leash_timer += dt;
        if self.leash_timer < tuning.leash_check_interval {
            return false;
        }
        self.leash_timer = 0.0;
        position.distance(self.original_range.center) > factor * self.original_range.radius
    }

    fn step_return(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        tuning: &HunterConfig,
        step: &mut HunterStep,
    ) {
        let Some(plan) = self.return_plan else {
            self.recenter(*position);
            self.set_state(HunterState::Wandering, step);
            return;
        };

        *position += self.knock_velocity * dt;
        self.knock_velocity *= (1.0 - tuning.knockback_damping * dt).max(0.0);
        if self.knock_velocity.length() < DRIFT_CUTOFF {
            self.knock_velocity = Vec2::ZERO;
        }
        *position = move_towards(*position, plan.target, tuning.return_speed * dt);

        let arrived = position.distance(plan.target) <= tuning.return_arrive_distance;
        let settled = self.knock_velocity.length() <= tuning.return_settle_speed;
        if arrived && settled {
            self.return_plan = None;
            // hits taken on the way back are spent
            self.collision = None;
            self.recenter(*position);
            self.set_state(plan.resume, step);
        }
    }

    fn pursue<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec2,
        player: PlayerView,
        dt: f32,
        tuning: &HunterConfig,
        rng: &mut R,
        step: &mut HunterStep,
    ) {
        let distance = position.distance(player.position);
        if self.state == HunterState::Wandering && distance <= self.detection_range {
            self.set_state(HunterState::Chasing, step);
        } else if self.state == HunterState::Chasing
            && distance > self.detection_range * tuning.lose_sight_factor
        {
            self.recenter(*position);
            self.set_state(HunterState::Wandering, step);
        }

        if self.state != HunterState::Chasing {
            self.wander(position, dt, tuning, rng);
            return;
        }

        let speed = self.current_speed * self.stance.multiplier(tuning);
        *position = move_towards(*position, player.position, speed * dt);
        if position.distance(player.position) <= self.attack_range {
            self.set_state(HunterState::Attacking, step);
            step.caught_player = true;
        }
    }

    fn wander<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        tuning: &HunterConfig,
        rng: &mut R,
    ) {
        self.wander_timer -= dt;
        if position.distance(self.wander_target) < tuning.wander_reach_threshold
            || self.wander_timer <= 0.0
        {
            let radius = self.wander_radius(tuning);
            self.wander_target = random_point_in_disk(rng, self.wander_center, radius);
            self.wander_timer = tuning.wander_interval
                + rng.gen_range(-tuning.wander_jitter..=tuning.wander_jitter);
        }
        *position = move_towards(*position, self.wander_target, self.current_speed * dt);
    }

    fn recenter(&mut self, position: Vec2) {
        self.wander_center = position;
        self.wander_target = position;
        self.wander_timer = 0.0;
    }

    fn set_state(&mut self, to: HunterState, step: &mut HunterStep) {
        if self.state == to {
            return;
        }
        debug!(faction = %self.faction, from = %self.state, %to, "hunter state change");
        step.transitions.push((self.state, to));
        self.state = to;
    }
}
