//! Threat Indicators
//!
//! Direction, size and opacity hints for drawing off-screen hunter markers
//! around the player.

use chase_events::ThreatIndicator;
use glam::Vec2;

use crate::config::IndicatorConfig;
use crate::math::lerp;

/// Opacity of an indicator for a hunter standing on the player
const MIN_ALPHA: f32 = 0.3;

/// Builds the indicator pointing from `player` to `hunter`.
///
/// Scale shrinks linearly from `max_scale` at distance 0 to `min_scale` at
/// `max_distance`. Inside `fade_distance` the indicator fades toward
/// [`MIN_ALPHA`], since the hunter itself is then on screen.
pub fn threat_indicator(player: Vec2, hunter: Vec2, config: &IndicatorConfig) -> ThreatIndicator {
    let offset = hunter - player;
    let distance = offset.length();
    let bearing = offset.normalize_or_zero();

    let t = (distance / config.max_distance).clamp(0.0, 1.0);
    let scale = lerp(config.max_scale, config.min_scale, t);
    let alpha = if distance < config.fade_distance {
        lerp(MIN_ALPHA, 1.0, distance / config.fade_distance)
    } else {
        1.0
    };

    ThreatIndicator {
        bearing,
        angle_degrees: bearing.y.atan2(bearing.x).to_degrees(),
        distance,
        scale,
        alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_alpha() {
        let config = IndicatorConfig::default();

        let close = threat_indicator(Vec2::ZERO, Vec2::new(5.0, 0.0), &config);
        assert_eq!(close.bearing, Vec2::X);
        assert_eq!(close.angle_degrees, 0.0);
        assert!((close.scale - 1.4).abs() < 1e-5);
        assert!((close.alpha - 0.65).abs() < 1e-5);

        let far = threat_indicator(Vec2::ZERO, Vec2::new(0.0, 80.0), &config);
        assert!((far.angle_degrees - 90.0).abs() < 1e-4);
        assert_eq!(far.scale, 0.5);
        assert_eq!(far.alpha, 1.0);
    }

    #[test]
    fn test_overlapping_hunter() {
        let config = IndicatorConfig::default();
        let indicator = threat_indicator(Vec2::ONE, Vec2::ONE, &config);
        assert_eq!(indicator.bearing, Vec2::ZERO);
        assert_eq!(indicator.scale, 1.5);
        assert!((indicator.alpha - 0.3).abs() < 1e-6);
    }
}
