use crate::core::{SimError, SimRng};
use crate::domain::{Body, SimConfig, Viewport};
use crate::spatial::SpatialGrid;
use crate::systems::{ContactParams, WallPolicy};

use super::perf_stats::TickStats;
use super::render_extract::FrameBuffer;
use super::{SimState, SimulationCore};

pub(super) fn create_core(config: SimConfig, viewport: Viewport) -> Result<SimulationCore, SimError> {
    config.validate()?;

    let rng = match config.seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_host(),
    };
    let grid = SpatialGrid::new(config.cell_size(&viewport, 0.0));
    let target_count = config.count;

    Ok(SimulationCore {
        kinematics: config.kinematics(),
        walls: WallPolicy::from_config(&config),
        contact: ContactParams::from_config(&config),
        config,
        viewport,
        bodies: Vec::with_capacity(target_count),
        grid,
        rng,
        state: SimState::Uninitialized,
        target_count,
        next_style: 0,
        frame: 0,
        diagnostics: Vec::new(),
        frame_buffer: FrameBuffer::with_capacity(target_count),
        perf_enabled: false,
        stats: TickStats::default(),
    })
}

/// Refresh everything derived from `core.config` and `core.viewport`
pub(super) fn apply_config(core: &mut SimulationCore) {
    core.kinematics = core.config.kinematics();
    core.walls = WallPolicy::from_config(&core.config);
    core.contact = ContactParams::from_config(&core.config);
    reshape_grid(core);
}

/// Size grid cells for the current radii and every live body
pub(super) fn reshape_grid(core: &mut SimulationCore) {
    let largest = core.bodies.iter().map(Body::radius).fold(0.0, f32::max);
    core.grid.reshape(core.config.cell_size(&core.viewport, largest));
}
