use crate::core::{Diagnostic, SimError};
use crate::domain::{ResizePolicy, SimConfig, Viewport};
use crate::systems::boundary::clamp_into;
use crate::systems::{PlacementGenerator, PlacementReport};

use super::{init, render_extract, SimState, SimulationCore};

/// Append `n` freshly placed bodies, placed against the ones already present
fn populate(core: &mut SimulationCore, n: usize) {
    if n == 0 {
        return;
    }
    let report = PlacementGenerator::new(&core.config, core.viewport).populate(
        n,
        &core.bodies,
        core.next_style,
        &mut core.rng,
    );
    absorb(core, report);
}

fn absorb(core: &mut SimulationCore, report: PlacementReport) {
    core.next_style = core.next_style.wrapping_add(report.placed.len() as u32);
    core.bodies.extend(report.placed);
    core.diagnostics.extend(report.dropped);
}

/// Drop every body and place `target_count` new ones
fn replace_all(core: &mut SimulationCore) {
    core.bodies.clear();
    core.diagnostics.clear();
    core.next_style = 0;
    let n = core.target_count;
    populate(core, n);
    render_extract::refresh_frame_buffer(core);
}

pub(super) fn start(core: &mut SimulationCore) -> bool {
    if core.state != SimState::Uninitialized {
        return false;
    }
    replace_all(core);
    core.state = SimState::Running;
    log::info!(
        "started: {} of {} bodies placed in {}x{}",
        core.bodies.len(),
        core.target_count,
        core.viewport.width(),
        core.viewport.height()
    );
    true
}

pub(super) fn stop(core: &mut SimulationCore) -> bool {
    if core.state == SimState::Stopped {
        return false;
    }
    core.state = SimState::Stopped;
    core.bodies = Vec::new();
    core.diagnostics.clear();
    core.frame_buffer.clear();
    log::info!("stopped after {} frames", core.frame);
    true
}

pub(super) fn set_count(core: &mut SimulationCore, n: usize) -> usize {
    match core.state {
        SimState::Stopped => return 0,
        SimState::Uninitialized => {
            core.target_count = core.config.clamp_count(n);
            return core.target_count;
        }
        SimState::Running => {}
    }

    let target = core.config.clamp_count(n);
    core.target_count = target;
    core.diagnostics.clear();

    if target < core.bodies.len() {
        core.bodies.truncate(target);
    } else {
        let missing = target - core.bodies.len();
        populate(core, missing);
    }
    render_extract::refresh_frame_buffer(core);

    log::info!("count set to {} (requested {n}, placed {})", target, core.bodies.len());
    core.bodies.len()
}

pub(super) fn restart(core: &mut SimulationCore) -> bool {
    if core.state != SimState::Running {
        return false;
    }
    replace_all(core);
    log::info!("restarted with {} bodies", core.bodies.len());
    true
}

pub(super) fn reconfigure(core: &mut SimulationCore, config: SimConfig) -> Result<(), SimError> {
    if core.state == SimState::Stopped {
        return Err(SimError::Stopped);
    }
    config.validate()?;

    core.config = config;
    core.target_count = core.config.count;
    init::apply_config(core);
    log::info!("reconfigured");

    if core.state == SimState::Running {
        replace_all(core);
    }
    Ok(())
}

pub(super) fn resize(core: &mut SimulationCore, width: f32, height: f32) -> Result<(), SimError> {
    if core.state == SimState::Stopped {
        return Err(SimError::Stopped);
    }
    let viewport = Viewport::new(width, height)?;
    let old = core.viewport;
    core.viewport = viewport;
    init::apply_config(core);

    if core.state != SimState::Running {
        return Ok(());
    }

    match core.config.resize_policy {
        ResizePolicy::Replace => replace_all(core),
        ResizePolicy::Rescale => {
            rescale(core, old, viewport);
            render_extract::refresh_frame_buffer(core);
        }
    }
    log::info!(
        "resized {}x{} -> {}x{} ({} bodies)",
        old.width(),
        old.height(),
        width,
        height,
        core.bodies.len()
    );
    Ok(())
}

/// Map centres proportionally into `new`, dropping bodies that no longer fit
fn rescale(core: &mut SimulationCore, old: Viewport, new: Viewport) {
    let sx = new.width() / old.width();
    let sy = new.height() / old.height();
    core.diagnostics.clear();

    let diagnostics = &mut core.diagnostics;
    core.bodies.retain_mut(|body| {
        let radius = body.radius();
        if new.safe_rect(radius).is_none() {
            log::warn!("dropping body r={radius:.1}: too large for {}x{}", new.width(), new.height());
            diagnostics.push(Diagnostic::PlacementExhausted { radius, attempts: 0 });
            return false;
        }
        body.pos.x *= sx;
        body.pos.y *= sy;
        clamp_into(body, &new);
        true
    });
}
