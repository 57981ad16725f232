//! Wall reflection, applied per axis after integration.

use crate::domain::{Body, SimConfig, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPolicy {
    /// Fraction of the normal velocity kept on impact, in (0, 1]
    pub damping: f32,
    /// Overshoot is mirrored back into the viewport scaled by this factor
    pub spring_back: f32,
}

impl WallPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self { damping: config.wall_damping, spring_back: config.spring_back }
    }
}

impl Default for WallPolicy {
    fn default() -> Self {
        Self { damping: 1.0, spring_back: 0.0 }
    }
}

/// Resolve one axis. Returns `(position, velocity, hit)`.
///
/// After a hit the velocity always points back into the viewport, so a body
/// that was already moving away is never turned around into the wall.
#[inline]
pub fn resolve_axis(p: f32, v: f32, r: f32, max: f32, policy: &WallPolicy) -> (f32, f32, bool) {
    let hi = max - r;
    if hi < r {
        // Disc wider than the axis: park it in the middle
        return (max * 0.5, v, false);
    }
    if p < r {
        let p = (r + (r - p) * policy.spring_back).min(hi);
        (p, v.abs() * policy.damping, true)
    } else if p > hi {
        let p = (hi - (p - hi) * policy.spring_back).max(r);
        (p, -v.abs() * policy.damping, true)
    } else {
        (p, v, false)
    }
}

/// Resolve both axes independently; returns the number of walls hit (0..=2)
pub fn resolve_walls(body: &mut Body, viewport: &Viewport, policy: &WallPolicy) -> u32 {
    let r = body.radius();
    let (x, vx, hit_x) = resolve_axis(body.pos.x, body.velocity.x, r, viewport.width(), policy);
    let (y, vy, hit_y) = resolve_axis(body.pos.y, body.velocity.y, r, viewport.height(), policy);
    body.pos.x = x;
    body.pos.y = y;
    body.velocity.x = vx;
    body.velocity.y = vy;
    hit_x as u32 + hit_y as u32
}

/// Clamp a centre into the safe band without touching velocity
pub fn clamp_into(body: &mut Body, viewport: &Viewport) {
    let r = body.radius();
    let clamp = |p: f32, max: f32| if max - r < r { max * 0.5 } else { p.clamp(r, max - r) };
    body.pos.x = clamp(body.pos.x, viewport.width());
    body.pos.y = clamp(body.pos.y, viewport.height());
}
