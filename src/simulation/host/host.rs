//! Seams to the host page: where bodies are drawn and how the next frame is requested.

use crate::core::Vec2;

/// Per-body hints the host uses to pick stroke and colour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleHint {
    /// Stable style slot assigned at placement
    pub index: u32,
    pub speed: f32,
}

/// Receives every body once per frame, after physics for that frame is final
pub trait RenderSink {
    fn render_body(&mut self, position: Vec2, radius: f32, style: StyleHint);
}

/// Host-supplied mechanism for invoking the next tick
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that only counts requests; the caller drives ticks itself
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requested: u64,
    pending: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Consume the pending request, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
        self.pending = true;
    }
}
