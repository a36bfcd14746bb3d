//! Level Layout
//!
//! Describes where the player starts, which zones exist and where hunters
//! patrol. Layouts load from TOML or come from the built-in arena.

use bevy_ecs::prelude::*;
use chase_events::{FactionId, HunterId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::components::{Hunter, HunterKey, HunterTuning, Player, Position, ZoneRegistry, ZoneShape};
use crate::config::{positive, ConfigError, SimConfig};
use crate::simulation::SimError;

/// A zone to register at level load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    pub faction: FactionId,
    pub center: Vec2,
    pub shape: ZoneShape,
}

/// A hunter to spawn at level load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterSpawn {
    pub faction: FactionId,
    pub position: Vec2,
    /// Overrides `hunter.wander_radius` for this hunter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_radius: Option<f32>,
    /// Overrides `hunter.detection_range` for this hunter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_range: Option<f32>,
}

impl HunterSpawn {
    pub fn new(faction: FactionId, position: Vec2) -> Self {
        Self {
            faction,
            position,
            patrol_radius: None,
            detection_range: None,
        }
    }

    pub fn with_patrol_radius(mut self, radius: f32) -> Self {
        self.patrol_radius = Some(radius);
        self
    }

    pub fn with_detection_range(mut self, range: f32) -> Self {
        self.detection_range = Some(range);
        self
    }
}

/// Complete level description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_spawn: Vec2,
    #[serde(default, rename = "zone")]
    pub zones: Vec<ZoneSpec>,
    #[serde(default, rename = "hunter")]
    pub hunters: Vec<HunterSpawn>,
}

impl LevelLayout {
    pub fn new(name: impl Into<String>, player_spawn: Vec2) -> Self {
        Self {
            name: name.into(),
            player_spawn,
            zones: Vec::new(),
            hunters: Vec::new(),
        }
    }

    pub fn with_zone(
        mut self,
        name: impl Into<String>,
        faction: FactionId,
        center: Vec2,
        shape: ZoneShape,
    ) -> Self {
        self.zones.push(ZoneSpec {
            name: name.into(),
            faction,
            center,
            shape,
        });
        self
    }

    pub fn with_hunter(mut self, spawn: HunterSpawn) -> Self {
        self.hunters.push(spawn);
        self
    }

    /// The built-in two-territory arena.
    pub fn default_arena() -> Self {
        Self::new("border_arena", Vec2::ZERO)
            .with_zone(
                "thornwood_grove",
                FactionId::FactionA,
                Vec2::new(-6.0, 0.0),
                ZoneShape::Circle { radius: 3.5 },
            )
            .with_zone(
                "ironmere_yard",
                FactionId::FactionB,
                Vec2::new(6.0, 0.0),
                ZoneShape::Rect {
                    half_extents: Vec2::new(3.0, 3.0),
                },
            )
            .with_zone(
                "border_shrine",
                FactionId::FactionB,
                Vec2::new(-2.5, 2.5),
                ZoneShape::Circle { radius: 1.5 },
            )
            .with_hunter(
                HunterSpawn::new(FactionId::FactionA, Vec2::new(-6.0, 2.0))
                    .with_patrol_radius(3.0),
            )
            .with_hunter(
                HunterSpawn::new(FactionId::FactionA, Vec2::new(-6.0, -2.0))
                    .with_patrol_radius(3.0),
            )
            .with_hunter(HunterSpawn::new(FactionId::FactionB, Vec2::new(6.0, 0.0)))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let layout: Self = toml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks hunter spawns; zone shapes are checked when registered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.player_spawn.is_finite() {
            return Err(ConfigError::invalid("level.player_spawn", "must be finite"));
        }
        for spawn in &self.hunters {
            if spawn.faction == FactionId::Neutral {
                return Err(ConfigError::invalid(
                    "level.hunter.faction",
                    "hunters must belong to a rival faction",
                ));
            }
            if !spawn.position.is_finite() {
                return Err(ConfigError::invalid("level.hunter.position", "must be finite"));
            }
            if let Some(radius) = spawn.patrol_radius {
                positive("level.hunter.patrol_radius", radius)?;
            }
            if let Some(range) = spawn.detection_range {
                positive("level.hunter.detection_range", range)?;
            }
        }
        Ok(())
    }

    /// Builds the zone registry for this layout.
    pub fn build_zones(&self) -> Result<ZoneRegistry, SimError> {
        let mut zones = ZoneRegistry::new();
        for spec in &self.zones {
            zones.register(spec.name.clone(), spec.faction, spec.center, spec.shape)?;
        }
        Ok(zones)
    }
}

/// Inserts the level's zones and player into `world` and spawns its hunters.
///
/// Returns the hunter roster in spawn order.
pub fn spawn_level(
    world: &mut World,
    layout: &LevelLayout,
    config: &SimConfig,
) -> Result<Vec<(HunterId, Entity)>, SimError> {
    layout.validate()?;
    world.insert_resource(layout.build_zones()?);
    world.insert_resource(Player::new(layout.player_spawn, &config.player)?);
    world.insert_resource(HunterTuning(config.hunter));

    let mut roster = Vec::with_capacity(layout.hunters.len());
    for (index, spawn) in layout.hunters.iter().enumerate() {
        let id = HunterId(index as u32);
        let mut hunter = Hunter::new(spawn.faction, spawn.position, &config.hunter)?;
        if let Some(radius) = spawn.patrol_radius {
            hunter = hunter.with_patrol_radius(radius)?;
        }
        if let Some(range) = spawn.detection_range {
            hunter = hunter.with_detection_range(range)?;
        }
        let entity = world
            .spawn((HunterKey(id), hunter, Position(spawn.position)))
            .id();
        roster.push((id, entity));
    }

    debug!(
        level = %layout.name,
        zones = layout.zones.len(),
        hunters = roster.len(),
        "level spawned"
    );
    Ok(roster)
}
