//! Geometry Utilities
//!
//! Small vector helpers shared by the player and hunter logic.

use glam::Vec2;
use rand::Rng;

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        return target;
    }
    current + to_target / distance * max_delta
}

/// Clamps a direction to unit length and zeroes it inside the deadzone.
pub fn clamp_direction(direction: Vec2, deadzone: f32) -> Vec2 {
    if !direction.is_finite() {
        return Vec2::ZERO;
    }
    let clamped = direction.clamp_length_max(1.0);
    if clamped.length() < deadzone {
        Vec2::ZERO
    } else {
        clamped
    }
}

/// Blends `current` toward `target` by `rate * dt`, with the blend capped at 1.
pub fn approach(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Scalar version of [`approach`].
pub fn approach_f32(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to [0, 1].
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Pulls `point` back inside the disk of `radius` around `center`.
pub fn clamp_to_disk(point: Vec2, center: Vec2, radius: f32) -> Vec2 {
    center + (point - center).clamp_length_max(radius)
}

/// Uniformly samples a point inside the disk of `radius` around `center`.
pub fn random_point_in_disk<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let r = radius * rng.gen::<f32>().sqrt();
    center + Vec2::new(angle.cos(), angle.sin()) * r
}
