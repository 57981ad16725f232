use wasm_bindgen::prelude::*;

use crate::core::{SimError, Vec2};
use crate::domain::{Preset, SimConfig, Viewport};

use super::host::{FrameScheduler, RenderSink, StyleHint};
use super::perf_stats::TickStats;
use super::render_extract::FRAME_STRIDE;
use super::SimulationCore;

fn js_err(e: SimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Calls `callback(x, y, radius, style, speed)` for each body.
/// The first exception is kept and the remaining bodies are skipped.
struct JsRenderSink<'a> {
    callback: &'a js_sys::Function,
    error: Option<JsValue>,
}

impl RenderSink for JsRenderSink<'_> {
    fn render_body(&mut self, position: Vec2, radius: f32, style: StyleHint) {
        if self.error.is_some() {
            return;
        }
        let args = js_sys::Array::new();
        args.push(&JsValue::from_f64(position.x as f64));
        args.push(&JsValue::from_f64(position.y as f64));
        args.push(&JsValue::from_f64(radius as f64));
        args.push(&JsValue::from_f64(style.index as f64));
        args.push(&JsValue::from_f64(style.speed as f64));
        if let Err(e) = self.callback.apply(&JsValue::NULL, &args) {
            self.error = Some(e);
        }
    }
}

/// Wraps the host's `scheduleNextFrame`, e.g. `() => requestAnimationFrame(loop)`
struct JsScheduler<'a> {
    callback: &'a js_sys::Function,
    error: Option<JsValue>,
}

impl FrameScheduler for JsScheduler<'_> {
    fn request_frame(&mut self) {
        if let Err(e) = self.callback.call0(&JsValue::NULL) {
            self.error = Some(e);
        }
    }
}

#[wasm_bindgen]
pub struct World {
    core: SimulationCore,
}

impl World {
    fn build(config: SimConfig, width: f32, height: f32) -> Result<World, JsValue> {
        let viewport = Viewport::new(width, height).map_err(js_err)?;
        let core = SimulationCore::new(config, viewport).map_err(js_err)?;
        Ok(World { core })
    }

    pub fn core(&self) -> &SimulationCore {
        &self.core
    }
}

#[wasm_bindgen]
impl World {
    /// Create an idle world using the default preset
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<World, JsValue> {
        Self::build(SimConfig::default(), width, height)
    }

    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(name: &str, width: f32, height: f32) -> Result<World, JsValue> {
        let preset = Preset::by_name(name).map_err(js_err)?;
        Self::build(preset.config(), width, height)
    }

    /// Preset with top-level fields overridden by `overrides` (JSON object)
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(preset: &str, overrides: &str, width: f32, height: f32) -> Result<World, JsValue> {
        let config = SimConfig::from_json_with_preset(preset, overrides).map_err(js_err)?;
        Self::build(config, width, height)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.viewport().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.viewport().height() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn target_count(&self) -> u32 { self.core.target_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String { self.core.state().as_str().to_string() }

    // === LIFECYCLE ===

    pub fn start(&mut self) -> bool {
        self.core.start()
    }

    pub fn stop(&mut self) -> bool {
        self.core.stop()
    }

    pub fn set_count(&mut self, n: u32) -> u32 {
        self.core.set_count(n as usize) as u32
    }

    pub fn restart(&mut self) -> bool {
        self.core.restart()
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(js_err)
    }

    /// Replace the whole configuration (preset + overrides) and restart
    pub fn reconfigure(&mut self, preset: &str, overrides: &str) -> Result<(), JsValue> {
        let config = SimConfig::from_json_with_preset(preset, overrides).map_err(js_err)?;
        self.core.reconfigure(config).map_err(js_err)
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        self.core.config().to_json().map_err(js_err)
    }

    // === STEPPING ===

    pub fn tick(&mut self) -> bool {
        self.core.tick()
    }

    /// Call `callback(x, y, radius, style, speed)` once per body
    pub fn render(&self, callback: &js_sys::Function) -> Result<u32, JsValue> {
        let mut sink = JsRenderSink { callback, error: None };
        let drawn = self.core.render(&mut sink);
        match sink.error {
            Some(e) => Err(e),
            None => Ok(drawn as u32),
        }
    }

    /// Tick, render through `render`, then call `schedule` while still running
    pub fn run_frame(&mut self, render: &js_sys::Function, schedule: &js_sys::Function) -> Result<bool, JsValue> {
        let mut sink = JsRenderSink { callback: render, error: None };
        let mut scheduler = JsScheduler { callback: schedule, error: None };
        let ticked = self.core.run_frame(&mut sink, &mut scheduler);
        if let Some(e) = sink.error.or(scheduler.error) {
            return Err(e);
        }
        Ok(ticked)
    }

    // === FRAME BUFFER ===

    /// Pointer to `[x, y, radius, style]` per body (for zero-copy reads)
    pub fn frame_ptr(&self) -> *const f32 {
        self.core.frame_buffer().as_ptr()
    }

    /// Length of the frame buffer in floats
    pub fn frame_len(&self) -> usize {
        self.core.frame_buffer().len()
    }

    pub fn frame_stride(&self) -> usize {
        FRAME_STRIDE
    }

    // === DIAGNOSTICS ===

    /// Enable or disable per-tick timings (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick snapshot (timings are zero when perf is disabled)
    pub fn get_tick_stats(&self) -> TickStats {
        self.core.tick_stats()
    }

    pub fn diagnostics_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.core.diagnostics()).map_err(|e| js_err(e.into()))
    }
}
