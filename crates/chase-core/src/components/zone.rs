//! Zone Components
//!
//! Static faction territories and the registry that resolves which zone
//! contains a point.

use bevy_ecs::prelude::*;
use chase_events::{FactionId, ZoneId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of a zone, centered on the zone's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneShape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

impl ZoneShape {
    /// Boundary points count as inside.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            ZoneShape::Circle { radius } => center.distance_squared(point) <= radius * radius,
            ZoneShape::Rect { half_extents } => {
                let offset = (point - center).abs();
                offset.x <= half_extents.x && offset.y <= half_extents.y
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        match *self {
            ZoneShape::Circle { radius } => {
                if radius.is_finite() && radius > 0.0 {
                    Ok(())
                } else {
                    Err(format!("circle radius must be positive, got {}", radius))
                }
            }
            ZoneShape::Rect { half_extents } => {
                if half_extents.is_finite() && half_extents.x > 0.0 && half_extents.y > 0.0 {
                    Ok(())
                } else {
                    Err(format!(
                        "rect half extents must be positive, got {}",
                        half_extents
                    ))
                }
            }
        }
    }
}

/// A static faction-tagged region
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub faction: FactionId,
    pub center: Vec2,
    pub shape: ZoneShape,
}

impl Zone {
    pub fn contains(&self, point: Vec2) -> bool {
        self.shape.contains(self.center, point)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("zone `{name}`: {reason}")]
    InvalidShape { name: String, reason: String },
    #[error("zone `{name}`: center must be finite")]
    NonFiniteCenter { name: String },
}

/// Resource: every zone registered for the current level
#[derive(Resource, Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a zone; its ID is its registration index.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        faction: FactionId,
        center: Vec2,
        shape: ZoneShape,
    ) -> Result<ZoneId, ZoneError> {
        let name = name.into();
        if !center.is_finite() {
            return Err(ZoneError::NonFiniteCenter { name });
        }
        if let Err(reason) = shape.validate() {
            return Err(ZoneError::InvalidShape { name, reason });
        }

        let id = ZoneId(self.zones.len() as u32);
        self.zones.push(Zone {
            id,
            name,
            faction,
            center,
            shape,
        });
        Ok(id)
    }

    /// Finds the zone containing `point`.
    ///
    /// Where zones overlap, the one whose center is nearest to `point` wins;
    /// on equal distance the earlier registration wins.
    pub fn find_containing(&self, point: Vec2) -> Option<&Zone> {
        let mut best: Option<(&Zone, f32)> = None;
        for zone in self.zones.iter().filter(|z| z.contains(point)) {
            let distance = zone.center.distance_squared(point);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((zone, distance)),
            }
        }
        best.map(|(zone, _)| zone)
    }

    /// Faction controlling `point`; Neutral outside every zone.
    pub fn faction_at(&self, point: Vec2) -> FactionId {
        self.find_containing(point)
            .map(|zone| zone.faction)
            .unwrap_or(FactionId::Neutral)
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(radius: f32) -> ZoneShape {
        ZoneShape::Circle { radius }
    }

    #[test]
    fn test_shape_contains() {
        let c = circle(2.0);
        assert!(c.contains(Vec2::ZERO, Vec2::new(2.0, 0.0)));
        assert!(!c.contains(Vec2::ZERO, Vec2::new(2.0, 0.1)));

        let r = ZoneShape::Rect {
            half_extents: Vec2::new(3.0, 1.0),
        };
        assert!(r.contains(Vec2::new(1.0, 1.0), Vec2::new(-2.0, 2.0)));
        assert!(!r.contains(Vec2::new(1.0, 1.0), Vec2::new(-2.0, 2.5)));
    }

    #[test]
    fn test_register_rejects_bad_shapes() {
        let mut registry = ZoneRegistry::new();
        assert!(matches!(
            registry.register("a", FactionId::FactionA, Vec2::ZERO, circle(0.0)),
            Err(ZoneError::InvalidShape { .. })
        ));
        assert!(registry
            .register(
                "b",
                FactionId::FactionB,
                Vec2::ZERO,
                ZoneShape::Rect {
                    half_extents: Vec2::new(1.0, -1.0)
                }
            )
            .is_err());
        assert!(matches!(
            registry.register("c", FactionId::FactionA, Vec2::new(f32::NAN, 0.0), circle(1.0)),
            Err(ZoneError::NonFiniteCenter { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_no_zone_means_neutral() {
        let mut registry = ZoneRegistry::new();
        registry
            .register("a", FactionId::FactionA, Vec2::new(-5.0, 0.0), circle(1.0))
            .unwrap();

        assert!(registry.find_containing(Vec2::ZERO).is_none());
        assert_eq!(registry.faction_at(Vec2::ZERO), FactionId::Neutral);
        assert_eq!(registry.faction_at(Vec2::new(-5.0, 0.5)), FactionId::FactionA);
    }

    #[test]
    fn test_nearest_center_wins_overlap() {
        let mut registry = ZoneRegistry::new();
        let a = registry
            .register("a", FactionId::FactionA, Vec2::new(-1.0, 0.0), circle(3.0))
            .unwrap();
        let b = registry
            .register("b", FactionId::FactionB, Vec2::new(1.0, 0.0), circle(3.0))
            .unwrap();

        assert_eq!(registry.find_containing(Vec2::new(-0.5, 0.0)).unwrap().id, a);
        assert_eq!(registry.find_containing(Vec2::new(0.5, 0.0)).unwrap().id, b);
        assert_eq!(registry.find_containing(Vec2::new(1.9, 1.0)).unwrap().id, b);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let mut registry = ZoneRegistry::new();
        let first = registry
            .register("first", FactionId::FactionB, Vec2::new(-1.0, 0.0), circle(2.0))
            .unwrap();
        registry
            .register("second", FactionId::FactionA, Vec2::new(1.0, 0.0), circle(2.0))
            .unwrap();

        assert_eq!(registry.find_containing(Vec2::ZERO).unwrap().id, first);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let mut registry = ZoneRegistry::new();
        registry
            .register("a", FactionId::FactionA, Vec2::ZERO, circle(4.0))
            .unwrap();
        registry
            .register(
                "b",
                FactionId::FactionB,
                Vec2::new(2.0, 0.0),
                ZoneShape::Rect {
                    half_extents: Vec2::new(2.0, 2.0),
                },
            )
            .unwrap();

        let point = Vec2::new(1.2, 0.3);
        let first = registry.find_containing(point).map(|z| z.id);
        for _ in 0..10 {
            assert_eq!(registry.find_containing(point).map(|z| z.id), first);
        }
        assert_eq!(registry.get(ZoneId(1)).unwrap().name, "b");
        assert!(registry.get(ZoneId(7)).is_none());
        assert_eq!(registry.iter().count(), 2);
    }
}
