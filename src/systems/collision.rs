//! Narrow-phase contact resolution for candidate pairs.
//!
//! For each overlapping pair the bodies are first pushed apart along the
//! contact normal, then an impulse is applied if they are still approaching.
//! Pairs are processed sequentially in candidate order, which is
//! deterministic for a given body order.

use crate::core::{Diagnostic, Vec2};
use crate::domain::{Body, CorrectionSpec, CorrectionSplit, SimConfig};

/// Centres closer than this (squared) have no usable contact normal
pub const DEGENERATE_DIST_SQ: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactParams {
    pub restitution: f32,
    pub correction: CorrectionSpec,
}

impl ContactParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self { restitution: config.restitution, correction: config.correction }
    }
}

impl Default for ContactParams {
    fn default() -> Self {
        Self { restitution: 1.0, correction: CorrectionSpec::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contact {
    /// Discs do not overlap; nothing changed
    Separated,
    /// Coincident centres; skipped
    Degenerate,
    /// Pushed apart, velocities already separating
    Corrected { depth: f32 },
    /// Pushed apart and an impulse of magnitude `impulse` exchanged
    Resolved { depth: f32, impulse: f32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContactStats {
    pub contacts: u32,
    pub impulses: u32,
    pub degenerate: u32,
}

/// Fractions of the correction applied to `a` and `b`; they sum to 1
#[inline]
fn split_weights(split: CorrectionSplit, a: &Body, b: &Body) -> (f32, f32) {
    let (wa, wb) = match split {
        CorrectionSplit::Equal => return (0.5, 0.5),
        CorrectionSplit::RadiusWeighted => (b.radius(), a.radius()),
        CorrectionSplit::MassWeighted => (a.inv_mass(), b.inv_mass()),
    };
    let total = wa + wb;
    (wa / total, wb / total)
}

/// Resolve one pair in place.
///
/// The normal points from `b` to `a`, so a positive impulse pushes `a` along
/// it and `b` against it.
pub fn resolve_pair(a: &mut Body, b: &mut Body, params: &ContactParams) -> Contact {
    let delta = a.pos - b.pos;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius() + b.radius();

    if dist_sq >= min_dist * min_dist {
        return Contact::Separated;
    }
    if dist_sq <= DEGENERATE_DIST_SQ {
        return Contact::Degenerate;
    }

    let dist = dist_sq.sqrt();
    let normal = delta * (1.0 / dist);

    // Positional correction
    let depth = min_dist - dist;
    let push = depth * params.correction.overshoot;
    let (wa, wb) = split_weights(params.correction.split, a, b);
    a.pos += normal * (push * wa);
    b.pos -= normal * (push * wb);

    // Impulse
    let vel_along_normal = (a.velocity - b.velocity).dot(normal);
    if vel_along_normal >= 0.0 {
        return Contact::Corrected { depth };
    }
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let j = -(1.0 + params.restitution) * vel_along_normal / (inv_a + inv_b);
    a.velocity += normal * (j * inv_a);
    b.velocity -= normal * (j * inv_b);

    Contact::Resolved { depth, impulse: j }
}

/// Two distinct mutable elements of `bodies`, `i != j`
#[inline]
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Resolve every candidate pair once, in order.
///
/// Coincident pairs are skipped and recorded in `diagnostics`.
pub fn resolve_candidates(
    bodies: &mut [Body],
    pairs: &[(usize, usize)],
    params: &ContactParams,
    diagnostics: &mut Vec<Diagnostic>,
) -> ContactStats {
    let mut stats = ContactStats::default();

    for &(i, j) in pairs {
        if i == j || i >= bodies.len() || j >= bodies.len() {
            continue;
        }
        let (a, b) = pair_mut(bodies, i, j);
        match resolve_pair(a, b, params) {
            Contact::Separated => {}
            Contact::Degenerate => {
                log::debug!("skipping coincident pair ({i}, {j})");
                diagnostics.push(Diagnostic::DegenerateGeometry { first: i, second: j });
                stats.degenerate += 1;
            }
            Contact::Corrected { .. } => stats.contacts += 1,
            Contact::Resolved { .. } => {
                stats.contacts += 1;
                stats.impulses += 1;
            }
        }
    }

    stats
}

/// Total momentum of a set of bodies
pub fn total_momentum(bodies: &[Body]) -> Vec2 {
    bodies.iter().fold(Vec2::ZERO, |acc, b| acc + b.momentum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimRng;
    use crate::domain::MassPolicy;

    fn body(x: f32, y: f32, vx: f32, vy: f32, r: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), r, MassPolicy::Area).unwrap()
    }

    fn elastic() -> ContactParams {
        ContactParams::default()
    }

    #[test]
    fn head_on_equal_masses_swap_velocities() {
        let mut a = body(0.0, 0.0, 5.0, 0.0, 20.0);
        let mut b = body(39.0, 0.0, -5.0, 0.0, 20.0);
        let contact = resolve_pair(&mut a, &mut b, &elastic());
        assert!(matches!(contact, Contact::Resolved { .. }));
        assert!((a.velocity.x + 5.0).abs() < 1e-4);
        assert!((b.velocity.x - 5.0).abs() < 1e-4);
        assert!(a.velocity.y.abs() < 1e-6 && b.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn momentum_is_conserved() {
        let mut a = body(100.0, 100.0, 3.0, -1.0, 30.0);
        let mut b = body(140.0, 110.0, -2.0, 4.0, 15.0);
        let before = a.momentum() + b.momentum();
        resolve_pair(&mut a, &mut b, &ContactParams { restitution: 0.8, ..elastic() });
        let after = a.momentum() + b.momentum();
        assert!((before - after).length() < 1e-2 * before.length().max(1.0));
    }

    #[test]
    fn kinetic_energy_never_grows() {
        let mut rng = SimRng::seeded(17);
        for _ in 0..200 {
            let mut a = body(0.0, 0.0, rng.range(-8.0, 8.0), rng.range(-8.0, 8.0), rng.range(5.0, 40.0));
            let r = rng.range(5.0, 40.0);
            let offset = Vec2::from_angle(rng.angle()) * rng.range(1.0, a.radius() + r - 0.5);
            let mut b = body(offset.x, offset.y, rng.range(-8.0, 8.0), rng.range(-8.0, 8.0), r);
            let e = rng.range(0.1, 1.0);
            let before = a.kinetic_energy() + b.kinetic_energy();
            resolve_pair(&mut a, &mut b, &ContactParams { restitution: e, ..elastic() });
            let after = a.kinetic_energy() + b.kinetic_energy();
            assert!(after <= before * (1.0 + 1e-4) + 1e-3, "energy grew {before} -> {after}");
        }
    }

    #[test]
    fn separated_pair_is_left_alone() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0);
        let mut b = body(25.0, 0.0, -1.0, 0.0, 10.0);
        let (a0, b0) = (a.clone(), b.clone());
        assert_eq!(resolve_pair(&mut a, &mut b, &elastic()), Contact::Separated);
        assert_eq!((a, b), (a0, b0));
    }

    #[test]
    fn second_pass_is_a_no_op_after_correction() {
        let mut a = body(0.0, 0.0, 0.0, 0.0, 10.0);
        let mut b = body(12.0, 0.0, 0.0, 0.0, 10.0);
        let params = ContactParams { correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.2 }, ..elastic() };
        assert!(matches!(resolve_pair(&mut a, &mut b, &params), Contact::Corrected { .. }));
        let (a1, b1) = (a.clone(), b.clone());
        assert_eq!(resolve_pair(&mut a, &mut b, &params), Contact::Separated);
        assert_eq!((a, b), (a1, b1));
    }

    #[test]
    fn correction_separates_the_pair() {
        for split in [CorrectionSplit::Equal, CorrectionSplit::RadiusWeighted, CorrectionSplit::MassWeighted] {
            let mut a = body(50.0, 50.0, 1.0, 0.0, 25.0);
            let mut b = body(70.0, 60.0, -1.0, 0.0, 10.0);
            let params = ContactParams { correction: CorrectionSpec { split, overshoot: 1.0 }, ..elastic() };
            resolve_pair(&mut a, &mut b, &params);
            assert!(!a.overlaps(&b, 1e-3), "{split:?} left overlap");
        }
    }

    #[test]
    fn radius_weighted_moves_smaller_body_further() {
        let mut a = body(0.0, 0.0, 0.0, 0.0, 30.0);
        let mut b = body(30.0, 0.0, 0.0, 0.0, 10.0);
        let params = ContactParams { correction: CorrectionSpec { split: CorrectionSplit::RadiusWeighted, overshoot: 1.0 }, ..elastic() };
        resolve_pair(&mut a, &mut b, &params);
        assert!((a.pos.x + 2.5).abs() < 1e-4);
        assert!((b.pos.x - 37.5).abs() < 1e-4);
    }

    #[test]
    fn coincident_centres_are_reported_not_resolved() {
        let mut bodies = vec![body(10.0, 10.0, 1.0, 0.0, 5.0), body(10.0, 10.0, -1.0, 0.0, 5.0)];
        let before = bodies.clone();
        let mut diagnostics = Vec::new();
        let stats = resolve_candidates(&mut bodies, &[(0, 1)], &elastic(), &mut diagnostics);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(diagnostics, vec![Diagnostic::DegenerateGeometry { first: 0, second: 1 }]);
        assert_eq!(bodies, before);
        assert!(bodies.iter().all(|b| b.pos.x.is_finite() && b.velocity.x.is_finite()));
    }

    #[test]
    fn candidates_counts_contacts_and_impulses() {
        let mut bodies = vec![
            body(0.0, 0.0, 2.0, 0.0, 10.0),
            body(15.0, 0.0, -2.0, 0.0, 10.0),
            body(200.0, 0.0, 0.0, 0.0, 10.0),
        ];
        let before = total_momentum(&bodies);
        let mut diagnostics = Vec::new();
        let stats = resolve_candidates(&mut bodies, &[(0, 1), (1, 2)], &elastic(), &mut diagnostics);
        assert_eq!(stats, ContactStats { contacts: 1, impulses: 1, degenerate: 0 });
        assert!(diagnostics.is_empty());
        assert!((total_momentum(&bodies) - before).length() < 1e-2);
    }

    #[test]
    fn pair_mut_handles_either_order() {
        let mut bodies = vec![body(0.0, 0.0, 0.0, 0.0, 1.0), body(5.0, 0.0, 0.0, 0.0, 2.0)];
        let (a, b) = pair_mut(&mut bodies, 1, 0);
        assert_eq!((a.radius(), b.radius()), (2.0, 1.0));
    }
}
