#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::SimRng;
use crate::domain::{Body, Kinematics, Viewport};
use crate::systems::boundary::{resolve_walls, WallPolicy};

use super::SimulationCore;

/// Push any velocity component slower than `floor` back up to `±floor`.
/// Returns the number of components kicked.
pub(super) fn apply_stall_floor(bodies: &mut [Body], floor: f32, rng: &mut SimRng) -> u32 {
    let mut kicks = 0;
    for body in bodies.iter_mut() {
        if body.velocity.x.abs() < floor {
            body.velocity.x = floor * rng.sign();
            kicks += 1;
        }
        if body.velocity.y.abs() < floor {
            body.velocity.y = floor * rng.sign();
            kicks += 1;
        }
    }
    kicks
}

#[inline]
fn advance(body: &mut Body, kinematics: &Kinematics, viewport: &Viewport, walls: &WallPolicy) -> u32 {
    body.integrate(kinematics);
    resolve_walls(body, viewport, walls)
}

/// Integrate every body then reflect it off the walls; returns wall hits
pub(super) fn integrate_and_bound(core: &mut SimulationCore) -> u32 {
    let kinematics = core.kinematics;
    let viewport = core.viewport;
    let walls = core.walls;

    #[cfg(feature = "parallel")]
    {
        core.bodies
            .par_iter_mut()
            .map(|b| advance(b, &kinematics, &viewport, &walls))
            .sum()
    }
    #[cfg(not(feature = "parallel"))]
    {
        core.bodies
            .iter_mut()
            .map(|b| advance(b, &kinematics, &viewport, &walls))
            .sum()
    }
}
