//! Simulation - owns the body set and drives it one tick at a time
//!
//! `SimulationCore` only orchestrates; the physics lives in `systems/`:
//! - placement for new bodies
//! - broad phase in `spatial::grid`
//! - narrow phase and wall reflection
//!
//! Lifecycle: `Uninitialized -> Running -> Stopped` (terminal).

use crate::core::{Diagnostic, SimError, SimRng};
use crate::domain::{Body, Kinematics, SimConfig, Viewport};
use crate::spatial::SpatialGrid;
use crate::systems::{ContactParams, WallPolicy};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "host/host.rs"]
mod host;
#[path = "step/step_collisions.rs"]
mod step_collisions;
#[path = "step/step_motion.rs"]
mod step_motion;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use host::{FrameScheduler, ManualScheduler, RenderSink, StyleHint};
pub use perf_stats::TickStats;
pub use render_extract::{FrameBuffer, FRAME_STRIDE};

use perf_timer::PerfTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Uninitialized,
    Running,
    Stopped,
}

impl SimState {
    pub fn as_str(self) -> &'static str {
        match self {
            SimState::Uninitialized => "uninitialized",
            SimState::Running => "running",
            SimState::Stopped => "stopped",
        }
    }
}

/// One independent simulation instance
pub struct SimulationCore {
    config: SimConfig,
    viewport: Viewport,
    bodies: Vec<Body>,
    grid: SpatialGrid,
    rng: SimRng,
    state: SimState,

    // Derived from `config`, refreshed on reconfigure
    kinematics: Kinematics,
    walls: WallPolicy,
    contact: ContactParams,

    /// Count requested by the host; may exceed `bodies.len()` after drops
    target_count: usize,
    next_style: u32,
    frame: u64,

    diagnostics: Vec<Diagnostic>,
    frame_buffer: FrameBuffer,

    // Perf metrics
    perf_enabled: bool,
    stats: TickStats,
}

impl SimulationCore {
    /// Validate `config` and build an idle simulation with no bodies
    pub fn new(config: SimConfig, viewport: Viewport) -> Result<Self, SimError> {
        init::create_core(config, viewport)
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Diagnostics from the last tick or placing command
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Enable or disable per-tick timings (counters are always collected)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn tick_stats(&self) -> TickStats {
        settings::tick_stats(self)
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        settings::total_kinetic_energy(self)
    }

    // === LIFECYCLE ===

    /// Place the configured number of bodies and begin running
    pub fn start(&mut self) -> bool {
        commands::start(self)
    }

    /// Stop for good and release every body
    pub fn stop(&mut self) -> bool {
        commands::stop(self)
    }

    /// Grow or shrink the body set; returns the resulting body count
    pub fn set_count(&mut self, n: usize) -> usize {
        commands::set_count(self, n)
    }

    /// Re-run placement and velocity initialisation for the current count
    pub fn restart(&mut self) -> bool {
        commands::restart(self)
    }

    /// Replace the configuration and restart
    pub fn reconfigure(&mut self, config: SimConfig) -> Result<(), SimError> {
        commands::reconfigure(self, config)
    }

    /// Apply a new viewport according to the configured resize policy
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        commands::resize(self, width, height)
    }

    // === STEPPING ===

    /// Advance one tick; a no-op unless running
    pub fn tick(&mut self) -> bool {
        step::tick(self)
    }

    /// Draw every body into `sink`; returns the number drawn
    pub fn render(&self, sink: &mut dyn RenderSink) -> usize {
        render_extract::render_to(self, sink)
    }

    /// Tick, render, and request the next frame while still running
    pub fn run_frame(&mut self, sink: &mut dyn RenderSink, scheduler: &mut dyn FrameScheduler) -> bool {
        render_extract::run_frame(self, sink, scheduler)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
