//! Frontiers (consistent cuts / global states) and the DAG they form.
//!
//! Frontiers are referenced by integer id (a `petgraph` `NodeIndex`) into a
//! flat, indexable `StableDiGraph` rather than through owned references to
//! each other — the design note in spec.md §9: "no cycles ever arise
//! because edges always increase some `cut[i]` by one," and a stable graph
//! keeps ids valid across node removal, which the reduction policy needs.

use std::collections::{BTreeSet, HashMap};

use petgraph::stable_graph::StableDiGraph;

use crate::formula::NodeId;

pub type FrontierId = petgraph::stable_graph::NodeIndex<u32>;

/// Edge weight: the id of the event whose delivery produced this edge.
pub type EventEdge = String;

pub type FrontierGraph = StableDiGraph<FrontierState, EventEdge>;

/// A frontier's state. `Live` frontiers carry their full cut and
/// propositions; `Pruned` ("tombstoned") frontiers retain only the verdict
/// cache still-reachable past operators may need, per the Reduction
/// Policy's verdict-preservation requirement.
#[derive(Clone, Debug)]
pub enum FrontierState {
    Live {
        cut: Vec<u64>,
        props: BTreeSet<String>,
        verdict_cache: HashMap<NodeId, bool>,
        /// Processes for which an outgoing edge already exists. A frontier's
        /// cut admits at most one deliverable event per process (the
        /// process's unique next local event); once every process is
        /// covered, this frontier can never again be a deliverable target
        /// for any future event, and is safe to prune.
        covered: BTreeSet<usize>,
    },
    Pruned {
        cut: Vec<u64>,
        verdict_cache: HashMap<NodeId, bool>,
    },
}

impl FrontierState {
    pub fn new_live(cut: Vec<u64>, props: BTreeSet<String>) -> Self {
        FrontierState::Live {
            cut,
            props,
            verdict_cache: HashMap::new(),
            covered: BTreeSet::new(),
        }
    }

    /// Record that `processes` now each have an outgoing edge from this
    /// frontier. No-op on an already-pruned frontier.
    pub fn mark_covered(&mut self, processes: &[usize]) {
        if let FrontierState::Live { covered, .. } = self {
            covered.extend(processes.iter().copied());
        }
    }

    /// True once every process has had its unique next-event edge taken
    /// from this frontier — it can never be a deliverable target again.
    pub fn is_fully_covered(&self, total_processes: usize) -> bool {
        match self {
            FrontierState::Live { covered, .. } => covered.len() >= total_processes,
            FrontierState::Pruned { .. } => true,
        }
    }

    pub fn cut(&self) -> &[u64] {
        match self {
            FrontierState::Live { cut, .. } => cut,
            FrontierState::Pruned { cut, .. } => cut,
        }
    }

    pub fn props(&self) -> BTreeSet<String> {
        match self {
            FrontierState::Live { props, .. } => props.clone(),
            FrontierState::Pruned { .. } => BTreeSet::new(),
        }
    }

    pub fn is_pruned(&self) -> bool {
        matches!(self, FrontierState::Pruned { .. })
    }

    pub fn cached(&self, node: NodeId) -> Option<bool> {
        match self {
            FrontierState::Live { verdict_cache, .. }
            | FrontierState::Pruned { verdict_cache, .. } => verdict_cache.get(&node).copied(),
        }
    }

    pub fn cache_insert(&mut self, node: NodeId, value: bool) {
        match self {
            FrontierState::Live { verdict_cache, .. } => {
                verdict_cache.insert(node, value);
            }
            FrontierState::Pruned { .. } => {
                debug_assert!(false, "cannot cache onto a pruned frontier");
            }
        }
    }

    /// Snapshot the full verdict cache, dropping cut/props — the summary a
    /// pruned frontier retains for future past-operator lookups.
    pub fn into_pruned(self) -> Self {
        match self {
            FrontierState::Live {
                cut, verdict_cache, ..
            } => FrontierState::Pruned { cut, verdict_cache },
            pruned @ FrontierState::Pruned { .. } => pruned,
        }
    }
}
