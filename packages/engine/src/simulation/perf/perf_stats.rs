use wasm_bindgen::prelude::*;

/// Timings and counters from the most recent tick/step.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) rigid_ms: f64,
    pub(super) shimmer_ms: f64,
    pub(super) shimmer_pulses: u32,
    pub(super) contacts: u32,
    pub(super) pairs: u32,
    pub(super) body_count: u32,
    pub(super) tower_bodies: u32,
    pub(super) frame: u64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn rigid_ms(&self) -> f64 { self.rigid_ms }
    #[wasm_bindgen(getter)]
    pub fn shimmer_ms(&self) -> f64 { self.shimmer_ms }
    #[wasm_bindgen(getter)]
    pub fn shimmer_pulses(&self) -> u32 { self.shimmer_pulses }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn pairs(&self) -> u32 { self.pairs }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn tower_bodies(&self) -> u32 { self.tower_bodies }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
}
