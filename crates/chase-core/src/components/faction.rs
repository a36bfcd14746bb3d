//! Faction Progress Components
//!
//! Per-faction progress accumulators, the game-over latch, and the mask
//! appearance derived from them.

use bevy_ecs::prelude::*;
use chase_events::{FactionId, GameOverReason};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{positive, ConfigError};
use crate::math::{approach_f32, lerp};

/// Intensity floor once any progress has been made
const MIN_VISIBLE_INTENSITY: f32 = 0.3;

/// Result of a successful `add_progress` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// Progress was recorded and the game continues
    Accumulated,
    /// This call saturated an accumulator and ended the game
    GameOver,
    /// The game was already over; nothing changed
    AlreadyOver,
}

/// Result of the immediate-loss path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Hunter and player share a faction; not a catch
    Ignored,
    /// This catch ended the game
    GameOver,
    /// The game was already over; nothing changed
    AlreadyOver,
}

/// Rejected progress updates
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProgressError {
    #[error("negative progress {amount} for {faction}")]
    NegativeAmount { faction: FactionId, amount: f32 },
    #[error("non-finite progress {amount} for {faction}")]
    NonFinite { faction: FactionId, amount: f32 },
}

/// Resource: per-faction progress meters and the game-over latch
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FactionProgress {
    progress_a: f32,
    progress_b: f32,
    progress_neutral: f32,
    max_progress: f32,
    game_over: Option<GameOverReason>,
}

impl FactionProgress {
    pub fn new(max_progress: f32) -> Result<Self, ConfigError> {
        positive("progress.max_progress", max_progress)?;
        Ok(Self {
            progress_a: 0.0,
            progress_b: 0.0,
            progress_neutral: 0.0,
            max_progress,
            game_over: None,
        })
    }

    /// Adds `amount` to the accumulator for `faction`.
    ///
    /// Neutral progress is tracked but never ends the game. Negative or
    /// non-finite amounts are rejected without touching state.
    pub fn add_progress(
        &mut self,
        faction: FactionId,
        amount: f32,
    ) -> Result<ProgressOutcome, ProgressError> {
        if !amount.is_finite() {
            warn!(%faction, amount, "rejected non-finite progress");
            return Err(ProgressError::NonFinite { faction, amount });
        }
        if amount < 0.0 {
            warn!(%faction, amount, "rejected negative progress");
            return Err(ProgressError::NegativeAmount { faction, amount });
        }
        if self.is_over() {
            return Ok(ProgressOutcome::AlreadyOver);
        }

        let value = match faction {
            FactionId::FactionA => &mut self.progress_a,
            FactionId::FactionB => &mut self.progress_b,
            FactionId::Neutral => {
                self.progress_neutral += amount;
                return Ok(ProgressOutcome::Accumulated);
            }
        };
        *value += amount;

        if *value >= self.max_progress {
            let reason = GameOverReason::AccumulatorSaturated(faction);
            info!(%reason, "progress saturated");
            self.game_over = Some(reason);
            return Ok(ProgressOutcome::GameOver);
        }
        Ok(ProgressOutcome::Accumulated)
    }

    /// Immediate-loss path: a hunter of `hunter_faction` touched the player.
    pub fn caught_by_hunter(
        &mut self,
        hunter_faction: FactionId,
        player_faction: FactionId,
    ) -> CatchOutcome {
        if let Some(reason) = self.game_over {
            warn!(%hunter_faction, %reason, "catch after game over ignored");
            return CatchOutcome::AlreadyOver;
        }
        if hunter_faction == player_faction {
            return CatchOutcome::Ignored;
        }
        let reason = GameOverReason::CaughtByHunter(hunter_faction);
        info!(%reason, "player caught");
        self.game_over = Some(reason);
        CatchOutcome::GameOver
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// Raw accumulator value for a faction.
    pub fn progress(&self, faction: FactionId) -> f32 {
        match faction {
            FactionId::FactionA => self.progress_a,
            FactionId::FactionB => self.progress_b,
            FactionId::Neutral => self.progress_neutral,
        }
    }

    /// Fill fraction in [0, 1]. Neutral has no cap and always reports 0.
    pub fn ratio(&self, faction: FactionId) -> f32 {
        match faction {
            FactionId::Neutral => 0.0,
            rival => (self.progress(rival) / self.max_progress).clamp(0.0, 1.0),
        }
    }

    pub fn max_progress(&self) -> f32 {
        self.max_progress
    }

    /// Combined rival progress.
    pub fn total(&self) -> f32 {
        self.progress_a + self.progress_b
    }

    /// Zeroes every accumulator and clears the game-over latch.
    pub fn reset(&mut self) {
        self.progress_a = 0.0;
        self.progress_b = 0.0;
        self.progress_neutral = 0.0;
        self.game_over = None;
    }
}

/// Resource: the player's mask appearance, eased toward the progress state
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MaskAppearance {
    /// 0.0 = fully faction A, 1.0 = fully faction B
    pub blend: f32,
    /// 0.0 = invisible, 1.0 = fully opaque
    pub intensity: f32,
    transition_speed: f32,
}

impl MaskAppearance {
    pub fn new(transition_speed: f32) -> Self {
        Self {
            blend: 0.5,
            intensity: 0.0,
            transition_speed,
        }
    }

    /// Blend the mask is heading toward.
    pub fn target_blend(progress: &FactionProgress) -> f32 {
        let total = progress.total();
        if total <= 0.0 {
            0.5
        } else {
            progress.progress(FactionId::FactionB) / total
        }
    }

    /// Intensity the mask is heading toward.
    pub fn target_intensity(progress: &FactionProgress) -> f32 {
        let total = progress.total();
        if total <= 0.0 {
            return 0.0;
        }
        let t = (total / progress.max_progress()).clamp(0.0, 1.0);
        lerp(MIN_VISIBLE_INTENSITY, 1.0, t)
    }

    pub fn update(&mut self, progress: &FactionProgress, dt: f32) {
        self.blend = approach_f32(
            self.blend,
            Self::target_blend(progress),
            self.transition_speed,
            dt,
        );
        self.intensity = approach_f32(
            self.intensity,
            Self::target_intensity(progress),
            self.transition_speed,
            dt,
        );
    }
}
