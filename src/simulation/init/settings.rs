use super::perf_stats::TickStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(core: &mut SimulationCore, enabled: bool) {
    core.perf_enabled = enabled;
}

pub(super) fn tick_stats(core: &SimulationCore) -> TickStats {
    core.stats.clone()
}

pub(super) fn total_kinetic_energy(core: &SimulationCore) -> f32 {
    core.bodies.iter().map(|b| b.kinetic_energy()).sum()
}
