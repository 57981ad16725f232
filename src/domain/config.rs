//! Simulation configuration.
//!
//! A `SimConfig` is built once (from a preset, JSON, or both), validated,
//! and then treated as immutable for the lifetime of a simulation.

use serde::{Deserialize, Serialize};

use crate::core::SimError;

use super::body::{Kinematics, MassPolicy};
use super::presets::Preset;

/// Rectangular drawing area, origin at the top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn shorter_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Centre range `[r, w-r] x [r, h-r]` for a disc of `radius`, or `None` if it cannot fit
    pub fn safe_rect(&self, radius: f32) -> Option<(f32, f32, f32, f32)> {
        let (x0, x1) = (radius, self.width - radius);
        let (y0, y1) = (radius, self.height - radius);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0, x1, y0, y1))
    }
}

/// How radii are drawn for a batch of new bodies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusSpec {
    Uniform { min: f32, max: f32 },
    /// `min + (max-min)·(i/(n-1))^exponent`, shuffled
    Curve { min: f32, max: f32, exponent: f32 },
    Fixed { values: Vec<f32> },
    /// Fractions of the viewport's shorter side
    ViewportFraction { min: f32, max: f32 },
}

impl RadiusSpec {
    /// Largest radius this can produce in `viewport`
    pub fn max_radius(&self, viewport: &Viewport) -> f32 {
        match self {
            RadiusSpec::Uniform { max, .. } | RadiusSpec::Curve { max, .. } => *max,
            RadiusSpec::Fixed { values } => values.iter().copied().fold(0.0, f32::max),
            RadiusSpec::ViewportFraction { max, .. } => max * viewport.shorter_side(),
        }
    }

    fn validate(&self) -> Result<(), SimError> {
        let range = |min: f32, max: f32| -> Result<(), SimError> {
            if !(min.is_finite() && max.is_finite() && min > 0.0 && max >= min) {
                return Err(SimError::config("radii", format!("need 0 < min <= max, got {min}..{max}")));
            }
            Ok(())
        };
        match self {
            RadiusSpec::Uniform { min, max } => range(*min, *max),
            RadiusSpec::Curve { min, max, exponent } => {
                range(*min, *max)?;
                if !(exponent.is_finite() && *exponent > 0.0) {
                    return Err(SimError::config("radii.exponent", format!("must be positive, got {exponent}")));
                }
                Ok(())
            }
            RadiusSpec::Fixed { values } => {
                if values.is_empty() {
                    return Err(SimError::config("radii.values", "must not be empty"));
                }
                if let Some(bad) = values.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
                    return Err(SimError::config("radii.values", format!("must be positive, got {bad}")));
                }
                Ok(())
            }
            RadiusSpec::ViewportFraction { min, max } => {
                range(*min, *max)?;
                if *max >= 0.5 {
                    return Err(SimError::config("radii.max", format!("fraction must be < 0.5, got {max}")));
                }
                Ok(())
            }
        }
    }
}

/// How initial velocities are drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VelocitySpec {
    /// Random heading, magnitude `speed·U(1-jitter, 1+jitter)`
    Polar { speed: f32, jitter: f32 },
    /// Each component `U(-speed/2, speed/2)`
    Axis { speed: f32 },
    /// `Axis` scaled by `reference_radius / radius`
    InverseRadius { speed: f32, reference_radius: f32 },
}

impl VelocitySpec {
    fn validate(&self) -> Result<(), SimError> {
        let speed = match *self {
            VelocitySpec::Polar { speed, jitter } => {
                if !(0.0..1.0).contains(&jitter) {
                    return Err(SimError::config("velocity.jitter", format!("must be in [0, 1), got {jitter}")));
                }
                speed
            }
            VelocitySpec::Axis { speed } => speed,
            VelocitySpec::InverseRadius { speed, reference_radius } => {
                if !(reference_radius.is_finite() && reference_radius > 0.0) {
                    return Err(SimError::config(
                        "velocity.reference_radius",
                        format!("must be positive, got {reference_radius}"),
                    ));
                }
                speed
            }
        };
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(SimError::config("velocity.speed", format!("must be >= 0, got {speed}")));
        }
        Ok(())
    }
}

/// How penetration depth is split between the two bodies of a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSplit {
    Equal,
    /// Smaller bodies move further
    RadiusWeighted,
    /// Lighter bodies move further
    MassWeighted,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionSpec {
    pub split: CorrectionSplit,
    /// Multiplier on penetration depth (1.0 = exact separation)
    pub overshoot: f32,
}

impl Default for CorrectionSpec {
    fn default() -> Self {
        Self { split: CorrectionSplit::Equal, overshoot: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Re-run placement for every body
    Replace,
    /// Map centres proportionally into the new viewport
    Rescale,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub count: usize,
    /// Inclusive clamp applied by `set_count`
    pub count_bounds: (usize, usize),
    pub radii: RadiusSpec,
    pub velocity: VelocitySpec,
    pub mass_policy: MassPolicy,
    /// Velocity factor kept on wall impact, in (0, 1]
    pub wall_damping: f32,
    /// Proportional push-back past the wall, in [0, 1)
    pub spring_back: f32,
    /// Coefficient of restitution for body contacts, in (0, 1]
    pub restitution: f32,
    pub air_resistance: Option<f32>,
    pub max_speed: Option<f32>,
    pub gravity: Option<f32>,
    /// Velocity components slower than this get kicked back up to it
    pub stall_speed: Option<f32>,
    pub correction: CorrectionSpec,
    /// Grid cell size as a multiple of the largest radius
    pub cell_size_factor: f32,
    pub placement_attempts: u32,
    pub resize_policy: ResizePolicy,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Preset::Drift.config()
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Start from a named preset and overlay the top-level keys present in `json`
    pub fn from_json_with_preset(preset: &str, json: &str) -> Result<Self, SimError> {
        let base = Preset::by_name(preset)?.config();
        let mut merged = serde_json::to_value(&base)?;
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        if let (Some(dst), serde_json::Value::Object(src)) = (merged.as_object_mut(), overrides) {
            for (key, value) in src {
                dst.insert(key, value);
            }
        }
        let config: SimConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let (lo, hi) = self.count_bounds;
        if lo > hi {
            return Err(SimError::config("count_bounds", format!("min {lo} exceeds max {hi}")));
        }
        if self.count < lo || self.count > hi {
            return Err(SimError::config("count", format!("{} outside bounds {lo}..={hi}", self.count)));
        }
        self.radii.validate()?;
        self.velocity.validate()?;
        if !(self.wall_damping > 0.0 && self.wall_damping <= 1.0) {
            return Err(SimError::config("wall_damping", format!("must be in (0, 1], got {}", self.wall_damping)));
        }
        if !(0.0..1.0).contains(&self.spring_back) {
            return Err(SimError::config("spring_back", format!("must be in [0, 1), got {}", self.spring_back)));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(SimError::config("restitution", format!("must be in (0, 1], got {}", self.restitution)));
        }
        if let Some(air) = self.air_resistance {
            if !(0.0..1.0).contains(&air) {
                return Err(SimError::config("air_resistance", format!("must be in [0, 1), got {air}")));
            }
        }
        if let Some(max) = self.max_speed {
            if !(max.is_finite() && max > 0.0) {
                return Err(SimError::config("max_speed", format!("must be positive, got {max}")));
            }
        }
        if let Some(g) = self.gravity {
            if !g.is_finite() {
                return Err(SimError::config("gravity", "must be finite"));
            }
        }
        if let Some(stall) = self.stall_speed {
            if !(stall.is_finite() && stall >= 0.0) {
                return Err(SimError::config("stall_speed", format!("must be >= 0, got {stall}")));
            }
        }
        let overshoot = self.correction.overshoot;
        if !(1.0..=1.5).contains(&overshoot) {
            return Err(SimError::config("correction.overshoot", format!("must be in [1, 1.5], got {overshoot}")));
        }
        if !(self.cell_size_factor.is_finite() && self.cell_size_factor >= 2.0) {
            return Err(SimError::config(
                "cell_size_factor",
                format!("must be >= 2 (one diameter), got {}", self.cell_size_factor),
            ));
        }
        if self.placement_attempts == 0 {
            return Err(SimError::config("placement_attempts", "must be at least 1"));
        }
        Ok(())
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            gravity: self.gravity.unwrap_or(0.0),
            air_resistance: self.air_resistance.unwrap_or(0.0),
            max_speed: self.max_speed,
        }
    }

    /// Broad-phase cell size for `viewport`, widened to cover `largest_live`
    /// (bodies sampled for an earlier viewport can outgrow the current radii)
    pub fn cell_size(&self, viewport: &Viewport, largest_live: f32) -> f32 {
        (self.radii.max_radius(viewport).max(largest_live) * self.cell_size_factor).max(1.0)
    }

    pub fn clamp_count(&self, n: usize) -> usize {
        n.clamp(self.count_bounds.0, self.count_bounds.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_non_positive_sides() {
        assert!(Viewport::new(0.0, 10.0).is_err());
        assert!(Viewport::new(10.0, -1.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 10.0).is_err());
        assert!(Viewport::new(10.0, 10.0).is_ok());
    }

    #[test]
    fn safe_rect_is_none_when_disc_cannot_fit() {
        let vp = Viewport::new(100.0, 60.0).unwrap();
        assert_eq!(vp.safe_rect(10.0), Some((10.0, 90.0, 10.0, 50.0)));
        assert_eq!(vp.safe_rect(30.0), None);
        assert_eq!(vp.safe_rect(31.0), None);
    }

    #[test]
    fn default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_catches_bad_restitution() {
        let config = SimConfig { restitution: 0.0, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfiguration { field: "restitution", .. })
        ));
    }

    #[test]
    fn validate_catches_bad_radius_range() {
        let config = SimConfig { radii: RadiusSpec::Uniform { min: 0.0, max: 10.0 }, ..SimConfig::default() };
        assert!(config.validate().is_err());
        let config = SimConfig { radii: RadiusSpec::Fixed { values: vec![] }, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_small_cells() {
        let config = SimConfig { cell_size_factor: 1.5, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_overrides_apply_on_top_of_preset() {
        let config = SimConfig::from_json_with_preset("calm", r#"{"count": 7, "restitution": 0.5}"#).unwrap();
        assert_eq!(config.count, 7);
        assert_eq!(config.restitution, 0.5);
        assert_eq!(config.wall_damping, Preset::Calm.config().wall_damping);
    }

    #[test]
    fn json_round_trips_through_validation() {
        let json = SimConfig::default().to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), SimConfig::default());
    }

    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = SimConfig::from_json_with_preset("drift", r#"{"wall_damping": 1.5}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { field: "wall_damping", .. }));
    }

    #[test]
    fn cell_size_tracks_largest_radius() {
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let config = Preset::Drift.config();
        assert_eq!(config.cell_size(&vp, 0.0), 45.0 * 2.5);
        assert_eq!(config.cell_size(&vp, 60.0), 60.0 * 2.5);
    }
}
