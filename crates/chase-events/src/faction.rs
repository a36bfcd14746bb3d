//! Faction Types
//!
//! The faction vocabulary shared by zones, hunters and the progress model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Allegiance of a zone, a hunter, or the player's current standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactionId {
    /// Unclaimed territory
    #[default]
    Neutral,
    FactionA,
    FactionB,
}

impl FactionId {
    /// Returns true for the two rival factions.
    pub fn is_rival(self) -> bool {
        !matches!(self, FactionId::Neutral)
    }

    /// The rival on the other side, if any.
    pub fn opponent(self) -> Option<FactionId> {
        match self {
            FactionId::FactionA => Some(FactionId::FactionB),
            FactionId::FactionB => Some(FactionId::FactionA),
            FactionId::Neutral => None,
        }
    }

    /// Returns all faction variants.
    pub fn all() -> &'static [FactionId] {
        &[FactionId::Neutral, FactionId::FactionA, FactionId::FactionB]
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactionId::Neutral => write!(f, "neutral"),
            FactionId::FactionA => write!(f, "faction_a"),
            FactionId::FactionB => write!(f, "faction_b"),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cause", content = "faction", rename_all = "snake_case")]
pub enum GameOverReason {
    /// The player's mask progress toward this faction reached the maximum
    AccumulatorSaturated(FactionId),
    /// A hunter of this faction caught the player outside its territory
    CaughtByHunter(FactionId),
}

impl GameOverReason {
    /// The faction responsible for ending the session.
    pub fn faction(&self) -> FactionId {
        match self {
            GameOverReason::AccumulatorSaturated(f) | GameOverReason::CaughtByHunter(f) => *f,
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::AccumulatorSaturated(faction) => {
                write!(f, "fully assimilated by {}", faction)
            }
            GameOverReason::CaughtByHunter(faction) => {
                write!(f, "caught by a {} hunter", faction)
            }
        }
    }
}
