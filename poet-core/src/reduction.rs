//! Reduction policy: shrinking the live frontier set without losing any
//! verdict a past-time operator could still need.
//!
//! A frontier's cut admits at most one deliverable event per process (the
//! process's unique next local event, per [`crate::deliverability`]). Once
//! every process has taken its edge out of a frontier, that frontier can
//! never again be the target of `on_event`'s deliverability search — it is
//! provably non-maximal and will never be revisited. Pruning converts it
//! from [`FrontierState::Live`] to [`FrontierState::Pruned`], discarding its
//! cut and propositions but keeping the verdict cache children still need
//! for `EY`/`AY`/`EP`/`AP`/`EH`/`AH`/`ES`/`AS` lookups. The graph node and
//! its edges are never removed — only shrunk — since a live descendant may
//! still read a pruned ancestor's cache at any time.

use std::collections::HashMap;

use crate::frontier::{FrontierGraph, FrontierId, FrontierState};

/// Prune every fully-covered, still-live frontier. Returns the number of
/// frontiers pruned this pass.
pub fn reduce(
    graph: &mut FrontierGraph,
    cut_index: &mut HashMap<Vec<u64>, FrontierId>,
    total_processes: usize,
) -> usize {
    let candidates: Vec<FrontierId> = graph
        .node_indices()
        .filter(|&id| {
            matches!(&graph[id], FrontierState::Live { .. })
                && graph[id].is_fully_covered(total_processes)
        })
        .collect();

    for &id in &candidates {
        if let Some(state) = graph.node_weight_mut(id) {
            let cut = state.cut().to_vec();
            prune_in_place(state);
            cut_index.remove(&cut);
        }
    }
    candidates.len()
}

fn prune_in_place(state: &mut FrontierState) {
    let placeholder = FrontierState::Pruned {
        cut: Vec::new(),
        verdict_cache: HashMap::new(),
    };
    let owned = std::mem::replace(state, placeholder);
    *state = owned.into_pruned();
}
