use super::host::{FrameScheduler, RenderSink, StyleHint};
use super::{SimState, SimulationCore};
use crate::domain::Body;

/// Floats per body in the frame buffer: `x, y, radius, style`
pub const FRAME_STRIDE: usize = 4;

/// Flat per-frame body data the host can read straight out of wasm memory
#[derive(Debug, Default)]
pub struct FrameBuffer {
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn with_capacity(bodies: usize) -> Self {
        Self { data: Vec::with_capacity(bodies * FRAME_STRIDE) }
    }

    pub(crate) fn fill(&mut self, bodies: &[Body]) {
        self.data.clear();
        for body in bodies {
            self.data.extend_from_slice(&[body.pos.x, body.pos.y, body.radius(), body.style() as f32]);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Length in floats
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn body_count(&self) -> usize {
        self.data.len() / FRAME_STRIDE
    }
}

pub(super) fn refresh_frame_buffer(core: &mut SimulationCore) {
    core.frame_buffer.fill(&core.bodies);
}

pub(super) fn render_to(core: &SimulationCore, sink: &mut dyn RenderSink) -> usize {
    for body in &core.bodies {
        let style = StyleHint { index: body.style(), speed: body.speed() };
        sink.render_body(body.pos, body.radius(), style);
    }
    core.bodies.len()
}

/// Tick, draw, then schedule the next frame only if still running.
/// Nothing is drawn or scheduled once the simulation has left `Running`.
pub(super) fn run_frame(
    core: &mut SimulationCore,
    sink: &mut dyn RenderSink,
    scheduler: &mut dyn FrameScheduler,
) -> bool {
    if !core.tick() {
        return false;
    }
    render_to(core, sink);
    if core.state == SimState::Running {
        scheduler.request_frame();
    }
    true
}
