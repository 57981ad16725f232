//! Initial, mutually non-overlapping placement of new bodies.
//!
//! Each body gets a bounded number of rejection-sampling attempts inside the
//! safe rectangle. A body that cannot be placed is dropped and reported; the
//! simulation simply runs with fewer bodies.

use crate::core::{Diagnostic, SimRng, Vec2};
use crate::domain::{Body, RadiusSpec, SimConfig, VelocitySpec, Viewport};

#[derive(Debug, Default)]
pub struct PlacementReport {
    pub placed: Vec<Body>,
    pub dropped: Vec<Diagnostic>,
}

pub struct PlacementGenerator<'a> {
    config: &'a SimConfig,
    viewport: Viewport,
}

impl<'a> PlacementGenerator<'a> {
    pub fn new(config: &'a SimConfig, viewport: Viewport) -> Self {
        Self { config, viewport }
    }

    /// Draw `n` radii according to `config.radii`
    pub fn sample_radii(&self, n: usize, rng: &mut SimRng) -> Vec<f32> {
        let mut radii = match &self.config.radii {
            RadiusSpec::Uniform { min, max } => (0..n).map(|_| rng.range(*min, *max)).collect(),
            RadiusSpec::Curve { min, max, exponent } => {
                let mut radii: Vec<f32> = (0..n)
                    .map(|i| {
                        let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
                        min + (max - min) * t.powf(*exponent)
                    })
                    .collect();
                rng.shuffle(&mut radii);
                radii
            }
            RadiusSpec::Fixed { values } => {
                let mut radii: Vec<f32> = values.iter().copied().cycle().take(n).collect();
                rng.shuffle(&mut radii);
                radii
            }
            RadiusSpec::ViewportFraction { min, max } => {
                let side = self.viewport.shorter_side();
                (0..n).map(|_| side * rng.range(*min, *max)).collect()
            }
        };
        radii.truncate(n);
        radii
    }

    pub fn initial_velocity(&self, radius: f32, rng: &mut SimRng) -> Vec2 {
        match self.config.velocity {
            VelocitySpec::Polar { speed, jitter } => {
                let magnitude = speed * rng.range(1.0 - jitter, 1.0 + jitter);
                Vec2::from_angle(rng.angle()) * magnitude
            }
            VelocitySpec::Axis { speed } => axis_velocity(speed, rng),
            VelocitySpec::InverseRadius { speed, reference_radius } => {
                axis_velocity(speed, rng) * (reference_radius / radius)
            }
        }
    }

    /// Try to find a centre for `radius` clear of every body in `existing`
    pub fn find_slot(&self, radius: f32, existing: &[Body], rng: &mut SimRng) -> Option<Vec2> {
        let (x0, x1, y0, y1) = self.viewport.safe_rect(radius)?;
        for _ in 0..self.config.placement_attempts {
            let candidate = Vec2::new(rng.range(x0, x1), rng.range(y0, y1));
            let clear = existing.iter().all(|b| {
                let min_dist = b.radius() + radius;
                b.pos.distance_squared(candidate) >= min_dist * min_dist
            });
            if clear {
                return Some(candidate);
            }
        }
        None
    }

    /// Place one body per radius, each against `existing` plus those already placed.
    ///
    /// Style slots are assigned sequentially from `first_style`.
    pub fn place(
        &self,
        radii: &[f32],
        existing: &[Body],
        first_style: u32,
        rng: &mut SimRng,
    ) -> PlacementReport {
        let mut report = PlacementReport {
            placed: Vec::with_capacity(radii.len()),
            dropped: Vec::new(),
        };
        let mut occupied: Vec<Body> = existing.to_vec();
        let mut style = first_style;

        for &radius in radii {
            let attempts = if self.viewport.safe_rect(radius).is_some() {
                self.config.placement_attempts
            } else {
                0
            };
            let Some(pos) = self.find_slot(radius, &occupied, rng) else {
                log::warn!("dropping body r={radius:.1}: no free slot after {attempts} attempts");
                report.dropped.push(Diagnostic::PlacementExhausted { radius, attempts });
                continue;
            };
            let velocity = self.initial_velocity(radius, rng);
            let mass = self.config.mass_policy.mass_for(radius);
            let body = Body::from_parts(pos, velocity, radius, mass, style);
            style = style.wrapping_add(1);
            occupied.push(body.clone());
            report.placed.push(body);
        }

        report
    }

    /// Sample `n` radii and place them
    pub fn populate(&self, n: usize, existing: &[Body], first_style: u32, rng: &mut SimRng) -> PlacementReport {
        let radii = self.sample_radii(n, rng);
        self.place(&radii, existing, first_style, rng)
    }
}

fn axis_velocity(speed: f32, rng: &mut SimRng) -> Vec2 {
    let half = speed * 0.5;
    Vec2::new(rng.range(-half, half), rng.range(-half, half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Preset;

    fn config_with(radii: RadiusSpec) -> SimConfig {
        SimConfig { radii, ..Preset::Drift.config() }
    }

    #[test]
    fn placed_bodies_do_not_overlap_and_fit() {
        let config = Preset::Drift.config();
        let vp = Viewport::new(1280.0, 720.0).unwrap();
        let mut rng = SimRng::seeded(3);
        let report = PlacementGenerator::new(&config, vp).populate(config.count, &[], 0, &mut rng);

        assert_eq!(report.placed.len() + report.dropped.len(), config.count);
        for (i, a) in report.placed.iter().enumerate() {
            assert!(a.pos.x >= a.radius() && a.pos.x <= vp.width() - a.radius());
            assert!(a.pos.y >= a.radius() && a.pos.y <= vp.height() - a.radius());
            for b in &report.placed[i + 1..] {
                assert!(!a.overlaps(b, 0.0));
            }
        }
    }

    #[test]
    fn oversized_body_is_dropped_without_sampling() {
        let vp = Viewport::new(400.0, 200.0).unwrap();
        let config = config_with(RadiusSpec::Fixed { values: vec![101.0] });
        let mut rng = SimRng::seeded(9);
        let report = PlacementGenerator::new(&config, vp).place(&[101.0], &[], 0, &mut rng);

        assert!(report.placed.is_empty());
        assert_eq!(report.dropped, vec![Diagnostic::PlacementExhausted { radius: 101.0, attempts: 0 }]);
    }

    #[test]
    fn crowded_viewport_drops_instead_of_failing() {
        let vp = Viewport::new(100.0, 100.0).unwrap();
        let config = SimConfig { placement_attempts: 20, ..config_with(RadiusSpec::Fixed { values: vec![30.0] }) };
        let mut rng = SimRng::seeded(5);
        let report = PlacementGenerator::new(&config, vp).place(&[30.0; 6], &[], 0, &mut rng);

        assert!(!report.placed.is_empty());
        assert!(!report.dropped.is_empty());
        assert_eq!(report.placed.len() + report.dropped.len(), 6);
    }

    #[test]
    fn curve_radii_span_the_range() {
        let config = config_with(RadiusSpec::Curve { min: 10.0, max: 50.0, exponent: 1.5 });
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let mut rng = SimRng::seeded(1);
        let mut radii = PlacementGenerator::new(&config, vp).sample_radii(5, &mut rng);
        radii.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(radii[0], 10.0);
        assert_eq!(radii[4], 50.0);
        assert!((radii[2] - (10.0 + 40.0 * 0.5f32.powf(1.5))).abs() < 1e-4);
    }

    #[test]
    fn viewport_fraction_scales_with_shorter_side() {
        let config = config_with(RadiusSpec::ViewportFraction { min: 0.2, max: 0.3 });
        let vp = Viewport::new(1000.0, 500.0).unwrap();
        let mut rng = SimRng::seeded(2);
        for r in PlacementGenerator::new(&config, vp).sample_radii(20, &mut rng) {
            assert!((100.0..150.0).contains(&r));
        }
    }

    #[test]
    fn new_bodies_avoid_existing_ones() {
        let config = Preset::Soft.config();
        let vp = Viewport::new(600.0, 400.0).unwrap();
        let mut rng = SimRng::seeded(11);
        let gen = PlacementGenerator::new(&config, vp);
        let first = gen.populate(5, &[], 0, &mut rng);
        let second = gen.populate(5, &first.placed, 5, &mut rng);

        for a in &second.placed {
            assert!(a.style() >= 5);
            for b in &first.placed {
                assert!(!a.overlaps(b, 0.0));
            }
        }
    }

    #[test]
    fn polar_velocity_respects_jitter() {
        let config = SimConfig { velocity: VelocitySpec::Polar { speed: 10.0, jitter: 0.2 }, ..Preset::Drift.config() };
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let mut rng = SimRng::seeded(8);
        let gen = PlacementGenerator::new(&config, vp);
        for _ in 0..50 {
            let speed = gen.initial_velocity(20.0, &mut rng).length();
            assert!((7.999..=12.001).contains(&speed));
        }
    }
}
