use wasm_bindgen::prelude::*;

/// Snapshot of the last tick.
///
/// Counters are always filled; the `*_ms` timings stay zero unless perf
/// metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub(super) step_ms: f64,
    pub(super) broad_phase_ms: f64,
    pub(super) narrow_phase_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) candidate_pairs: u32,
    pub(super) contacts: u32,
    pub(super) impulses: u32,
    pub(super) degenerate_pairs: u32,
    pub(super) wall_hits: u32,
    pub(super) stall_kicks: u32,
    pub(super) body_count: u32,
    pub(super) occupied_cells: u32,
    pub(super) kinetic_energy: f32,
}

impl TickStats {
    pub(crate) fn reset(&mut self) {
        *self = TickStats::default();
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn broad_phase_ms(&self) -> f64 { self.broad_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn narrow_phase_ms(&self) -> f64 { self.narrow_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn candidate_pairs(&self) -> u32 { self.candidate_pairs }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn degenerate_pairs(&self) -> u32 { self.degenerate_pairs }
    #[wasm_bindgen(getter)]
    pub fn wall_hits(&self) -> u32 { self.wall_hits }
    #[wasm_bindgen(getter)]
    pub fn stall_kicks(&self) -> u32 { self.stall_kicks }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn kinetic_energy(&self) -> f32 { self.kinetic_energy }
}
