//! Seedable randomness for placement, initial velocities and stall kicks.
//!
//! Every simulation owns its own generator so instances never share state.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub struct SimRng {
    inner: SmallRng,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self { inner: SmallRng::seed_from_u64(seed) }
    }

    /// Seed from host entropy (fixed seeds come from `SimConfig::seed`)
    pub fn from_host() -> Self {
        Self::seeded(host_seed())
    }

    /// Uniform sample in `[lo, hi)`; degenerate ranges return `lo`
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.inner.gen_range(lo..hi)
        } else {
            lo
        }
    }

    #[inline]
    pub fn sign(&mut self) -> f32 {
        if self.inner.gen_bool(0.5) { 1.0 } else { -1.0 }
    }

    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

#[cfg(target_arch = "wasm32")]
fn host_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = js_sys::Date::now() as u64;
    (hi << 32) ^ lo
}

#[cfg(not(target_arch = "wasm32"))]
fn host_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}
