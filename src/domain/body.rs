use serde::{Deserialize, Serialize};

use crate::core::{SimError, Vec2};

/// How a body's mass is derived from its radius
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassPolicy {
    /// `mass = radius`
    Radius,
    /// `mass = π·radius²`
    Area,
}

impl MassPolicy {
    #[inline]
    pub fn mass_for(self, radius: f32) -> f32 {
        match self {
            MassPolicy::Radius => radius,
            MassPolicy::Area => std::f32::consts::PI * radius * radius,
        }
    }
}

/// Per-tick motion rules shared by every body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    /// Added to `velocity.y` before the position update
    pub gravity: f32,
    /// Fraction of velocity lost each tick (0 = none)
    pub air_resistance: f32,
    pub max_speed: Option<f32>,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self { gravity: 0.0, air_resistance: 0.0, max_speed: None }
    }
}

/// Circular body
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Centre in viewport coordinates
    pub pos: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    radius: f32,
    mass: f32,
    /// Stable style slot handed to the renderer
    style: u32,
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite radius/mass
    pub fn new(pos: Vec2, velocity: Vec2, radius: f32, policy: MassPolicy) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::config("radius", format!("must be positive, got {radius}")));
        }
        let mass = policy.mass_for(radius);
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::config("mass", format!("must be positive, got {mass}")));
        }
        Ok(Self::from_parts(pos, velocity, radius, mass, 0))
    }

    /// Radius and mass must already be validated
    pub(crate) fn from_parts(pos: Vec2, velocity: Vec2, radius: f32, mass: f32, style: u32) -> Self {
        debug_assert!(radius > 0.0 && mass > 0.0);
        Self { pos, velocity, radius, mass, style }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn style(&self) -> u32 {
        self.style
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True when the two discs overlap by more than `tolerance`
    pub fn overlaps(&self, other: &Body, tolerance: f32) -> bool {
        let min_dist = self.radius + other.radius - tolerance;
        min_dist > 0.0 && self.pos.distance_squared(other.pos) < min_dist * min_dist
    }

    /// Advance one tick: gravity, air resistance, speed clamp, then `pos += velocity`
    pub fn integrate(&mut self, k: &Kinematics) {
        self.velocity.y += k.gravity;
        if k.air_resistance > 0.0 {
            self.velocity *= 1.0 - k.air_resistance;
        }
        if let Some(max) = k.max_speed {
            self.clamp_speed(max);
        }
        self.pos += self.velocity;
    }

    /// Rescale velocity uniformly so `|v| <= max`, keeping direction
    pub fn clamp_speed(&mut self, max: f32) {
        let speed_sq = self.velocity.length_squared();
        if speed_sq > max * max {
            self.velocity *= max / speed_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_policies() {
        assert_eq!(MassPolicy::Radius.mass_for(20.0), 20.0);
        let area = MassPolicy::Area.mass_for(2.0);
        assert!((area - 4.0 * std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, 0.0, MassPolicy::Radius).is_err());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, -3.0, MassPolicy::Area).is_err());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, f32::NAN, MassPolicy::Area).is_err());
    }

    #[test]
    fn integrate_moves_by_velocity() {
        let mut b = Body::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, -1.0), 5.0, MassPolicy::Radius).unwrap();
        b.integrate(&Kinematics::default());
        assert_eq!(b.pos, Vec2::new(12.0, 9.0));
        assert_eq!(b.velocity, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn speed_clamp_preserves_direction() {
        let mut b = Body::new(Vec2::ZERO, Vec2::new(30.0, 40.0), 5.0, MassPolicy::Radius).unwrap();
        b.integrate(&Kinematics { max_speed: Some(10.0), ..Kinematics::default() });
        assert!((b.speed() - 10.0).abs() < 1e-4);
        assert!((b.velocity.x - 6.0).abs() < 1e-4);
        assert!((b.velocity.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn air_resistance_and_gravity() {
        let mut b = Body::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0, MassPolicy::Radius).unwrap();
        b.integrate(&Kinematics { gravity: 0.5, air_resistance: 0.1, max_speed: None });
        assert!((b.velocity.x - 9.0).abs() < 1e-5);
        assert!((b.velocity.y - 0.45).abs() < 1e-5);
    }
}
