use crate::systems::collision::resolve_candidates;

use super::{init, SimulationCore};

/// Rebuild the grid and collect candidate pairs; returns the pair count
pub(super) fn broad_phase(core: &mut SimulationCore) -> usize {
    init::reshape_grid(core);
    core.grid.rebuild(&core.bodies);
    core.grid.candidate_pairs().len()
}

/// Resolve the pairs gathered by `broad_phase`
pub(super) fn narrow_phase(core: &mut SimulationCore) {
    let contact = resolve_candidates(
        &mut core.bodies,
        core.grid.pairs(),
        &core.contact,
        &mut core.diagnostics,
    );
    core.stats.contacts = contact.contacts;
    core.stats.impulses = contact.impulses;
    core.stats.degenerate_pairs = contact.degenerate;
}
