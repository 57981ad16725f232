use super::{render_extract, step_collisions, step_motion};
use super::{PerfTimer, SimState, SimulationCore};

/// One tick: broad phase -> narrow phase -> stall floor -> integrate + walls -> frame.
///
/// Returns false (and changes nothing) unless the simulation is running.
pub(super) fn tick(core: &mut SimulationCore) -> bool {
    if core.state != SimState::Running {
        return false;
    }

    let perf_on = core.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    core.stats.reset();
    core.diagnostics.clear();

    // === BROAD PHASE ===
    let pairs = if perf_on {
        let (pairs, ms) = PerfTimer::measure(|| step_collisions::broad_phase(core));
        core.stats.broad_phase_ms = ms;
        pairs
    } else {
        step_collisions::broad_phase(core)
    };
    core.stats.candidate_pairs = pairs as u32;
    core.stats.occupied_cells = core.grid.occupied_cells() as u32;

    // === NARROW PHASE ===
    if perf_on {
        let t0 = PerfTimer::start();
        step_collisions::narrow_phase(core);
        core.stats.narrow_phase_ms = t0.elapsed_ms();
    } else {
        step_collisions::narrow_phase(core);
    }

    // === MOTION ===
    if let Some(floor) = core.config.stall_speed {
        core.stats.stall_kicks = step_motion::apply_stall_floor(&mut core.bodies, floor, &mut core.rng);
    }
    let wall_hits = if perf_on {
        let (hits, ms) = PerfTimer::measure(|| step_motion::integrate_and_bound(core));
        core.stats.integrate_ms = ms;
        hits
    } else {
        step_motion::integrate_and_bound(core)
    };
    core.stats.wall_hits = wall_hits;

    core.frame += 1;
    render_extract::refresh_frame_buffer(core);

    core.stats.body_count = core.bodies.len() as u32;
    core.stats.kinetic_energy = core.total_kinetic_energy();
    if let Some(t) = step_start {
        core.stats.step_ms = t.elapsed_ms();
    }
    true
}
