//! Tunable constants for the simulation, cameras and orbit rings.

use std::f64::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Solar-system settings. Every field has a default, so a JSON override only
/// needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolarConfig {
    /// Clock advance per tick at speed 1.
    pub base_step: f64,
    /// Planet self-rotation per tick at speed 1, in radians.
    pub spin_step: f64,
    /// Speed multiplier at startup.
    pub initial_speed: f64,
    /// Orbit camera: horizontal circle radius.
    pub orbit_radius: f32,
    /// Orbit camera: angular rate of the circle.
    pub orbit_rate: f32,
    /// Orbit camera: vertical bob amplitude.
    pub bob_amplitude: f32,
    /// Orbit camera: height the bob oscillates around.
    pub bob_offset: f32,
    pub bob_rate: f32,
    /// Top camera height above the sun.
    pub top_height: f32,
    /// Follow camera offset from the followed planet.
    pub follow_offset: [f32; 3],
    /// Orbit ring half-width either side of the orbit distance.
    pub ring_half_width: f32,
    pub ring_segments: u32,
    pub ring_opacity: f32,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            base_step: 0.005,
            spin_step: 0.01,
            initial_speed: 1.0,
            orbit_radius: 200.0,
            orbit_rate: 0.1,
            bob_amplitude: 50.0,
            bob_offset: 50.0,
            bob_rate: 0.05,
            top_height: 250.0,
            follow_offset: [10.0, 5.0, 10.0],
            ring_half_width: 0.1,
            ring_segments: 128,
            ring_opacity: 0.3,
        }
    }
}

impl SolarConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_f64 = [
            ("base_step", self.base_step),
            ("spin_step", self.spin_step),
            ("initial_speed", self.initial_speed),
        ];
        for (name, value) in finite_f64 {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        let [fx, fy, fz] = self.follow_offset;
        let finite_f32 = [
            ("orbit_radius", self.orbit_radius),
            ("orbit_rate", self.orbit_rate),
            ("bob_amplitude", self.bob_amplitude),
            ("bob_offset", self.bob_offset),
            ("bob_rate", self.bob_rate),
            ("top_height", self.top_height),
            ("follow_offset.x", fx),
            ("follow_offset.y", fy),
            ("follow_offset.z", fz),
            ("ring_half_width", self.ring_half_width),
            ("ring_opacity", self.ring_opacity),
        ];
        for (name, value) in finite_f32 {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.base_step < 0.0 {
            return Err(ConfigError::Invalid(format!("base_step must not be negative, got {}", self.base_step)));
        }
        if self.initial_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_speed must not be negative, got {}",
                self.initial_speed
            )));
        }
        if self.top_height <= 0.0 {
            return Err(ConfigError::Invalid(format!("top_height must be positive, got {}", self.top_height)));
        }
        if self.ring_half_width < 0.0 {
            return Err(ConfigError::Invalid("ring_half_width must not be negative".into()));
        }
        if self.ring_segments < 3 {
            return Err(ConfigError::Invalid(format!("ring_segments must be at least 3, got {}", self.ring_segments)));
        }
        if !(0.0..=1.0).contains(&self.ring_opacity) {
            return Err(ConfigError::Invalid(format!("ring_opacity must be in 0..=1, got {}", self.ring_opacity)));
        }
        Ok(())
    }

    pub fn follow_offset(&self) -> Vec3 {
        Vec3::from_array(self.follow_offset)
    }

    /// Orbit camera eye position at clock time `t`.
    /// Angles are reduced in f64 so long sessions keep full precision.
    pub fn orbit_eye(&self, t: f64) -> Vec3 {
        let angle = (f64::from(self.orbit_rate) * t).rem_euclid(TAU) as f32;
        let bob = (f64::from(self.bob_rate) * t).rem_euclid(TAU) as f32;
        Vec3::new(
            angle.sin() * self.orbit_radius,
            bob.sin() * self.bob_amplitude + self.bob_offset,
            angle.cos() * self.orbit_radius,
        )
    }

    pub fn top_eye(&self) -> Vec3 {
        Vec3::new(0.0, self.top_height, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_keeps_defaults() {
        let config = SolarConfig::from_json("{}").unwrap();
        assert_eq!(config, SolarConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SolarConfig::from_json(r#"{"base_step": 0.01, "ring_segments": 64}"#).unwrap();
        assert_eq!(config.base_step, 0.01);
        assert_eq!(config.ring_segments, 64);
        assert_eq!(config.spin_step, 0.01);
        assert_eq!(config.top_height, 250.0);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            SolarConfig::from_json(r#"{"ring_segments": 2}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SolarConfig::from_json(r#"{"ring_opacity": 1.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SolarConfig::from_json(r#"{"base_step": -1}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_override_is_parse_error() {
        assert!(matches!(SolarConfig::from_json("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            SolarConfig::from_json(r#"{"top_height": "high"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn orbit_eye_at_time_zero() {
        let eye = SolarConfig::default().orbit_eye(0.0);
        assert!((eye - Vec3::new(0.0, 50.0, 200.0)).length() < 1e-4);
    }

    #[test]
    fn orbit_eye_follows_circle_and_bob() {
        let config = SolarConfig::default();
        for t in [0.505_f64, 12.0, 250.0] {
            let eye = config.orbit_eye(t);
            let expected = Vec3::new(
                ((0.1 * t).sin() * 200.0) as f32,
                ((0.05 * t).sin() * 50.0 + 50.0) as f32,
                ((0.1 * t).cos() * 200.0) as f32,
            );
            assert!((eye - expected).length() < 1e-3, "t={t}: {eye} vs {expected}");
        }
    }

    #[test]
    fn orbit_eye_stays_on_circle() {
        let config = SolarConfig::default();
        for t in [0.3, 7.0, 42.5] {
            let eye = config.orbit_eye(t);
            let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
            assert!((horizontal - 200.0).abs() < 1e-3);
            assert!(eye.y >= 0.0 && eye.y <= 100.0 + 1e-4);
        }
    }
}
