//! Rebound Engine - circular-body physics for decorative page effects, in WASM
//!
//! Architecture:
//! - core/       - Vec2, randomness, errors, logging
//! - domain/     - Body, configuration, presets
//! - spatial/    - Uniform-grid broad phase
//! - systems/    - Placement, walls, narrow-phase contacts
//! - simulation/ - Tick orchestration, lifecycle, wasm facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install_logger();
    web_sys::console::log_1(&"Rebound WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names accepted by `World.fromPreset`
#[wasm_bindgen]
pub fn preset_names() -> Vec<JsValue> {
    domain::Preset::names().into_iter().map(JsValue::from_str).collect()
}

// Re-export main types
pub use crate::core::{Diagnostic, SimError, Vec2};
pub use domain::{Body, Preset, SimConfig, Viewport};
pub use simulation::{
    FrameScheduler, ManualScheduler, RenderSink, SimState, SimulationCore, StyleHint, TickStats, World,
};
