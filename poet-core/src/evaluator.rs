//! PCTL evaluator: walks the frontier DAG past-directed, memoizing every
//! subformula's verdict at every frontier.
//!
//! Frontiers are processed in increasing id order (parents are always
//! created — and therefore evaluated — before their children, since a cut
//! only ever grows). That lets each frontier be evaluated in one bottom-up
//! pass over the AST that looks only at its immediate parents' already-
//! committed caches; no recursive descent into the DAG itself is needed,
//! which is the "explicit worklist instead of naive recursion" design note
//! in spec.md §9 applied at the DAG level (the AST-level recursion below is
//! bounded by formula size, not trace length).

use std::collections::{BTreeSet, HashMap};

use petgraph::Direction;

use crate::formula::ast::{Formula, FormulaKind, NodeId};
use crate::frontier::{FrontierGraph, FrontierId};

/// Evaluate every subformula of `formula` at `frontier` and commit the
/// results into its verdict cache. Returns the formula's (root node's)
/// truth value at `frontier`.
///
/// `frontier`'s parents must already be fully evaluated — true for any
/// frontier freshly created by the State Manager, and for re-targeted
/// existing frontiers after cache invalidation (see
/// [`crate::state_manager`]).
pub fn evaluate_frontier(
    graph: &mut FrontierGraph,
    root_id: FrontierId,
    formula: &Formula,
    frontier: FrontierId,
) -> bool {
    let props = graph[frontier].props();
    let is_root = frontier == root_id;
    let mut local: HashMap<NodeId, bool> = HashMap::new();
    let value = eval_node(formula, frontier, is_root, &props, graph, &mut local);

    if let Some(state) = graph.node_weight_mut(frontier) {
        for (id, v) in local {
            state.cache_insert(id, v);
        }
    }
    value
}

fn eval_node(
    f: &Formula,
    frontier: FrontierId,
    is_root: bool,
    props: &BTreeSet<String>,
    graph: &FrontierGraph,
    local: &mut HashMap<NodeId, bool>,
) -> bool {
    if let Some(v) = local.get(&f.id) {
        return *v;
    }
    let value = match &f.kind {
        FormulaKind::Atom(p) => props.contains(p),
        FormulaKind::True => true,
        FormulaKind::False => false,
        FormulaKind::Not(a) => !eval_node(a, frontier, is_root, props, graph, local),
        FormulaKind::And(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            x && y
        }
        FormulaKind::Or(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            x || y
        }
        FormulaKind::Implies(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            !x || y
        }
        FormulaKind::Iff(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            x == y
        }
        FormulaKind::ExistsYesterday(a) => {
            eval_node(a, frontier, is_root, props, graph, local);
            exists_parent_cached(graph, frontier, a.id)
        }
        FormulaKind::ForallYesterday(a) => {
            eval_node(a, frontier, is_root, props, graph, local);
            is_root || forall_parent_cached(graph, frontier, a.id)
        }
        FormulaKind::ExistsPast(a) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            x || exists_parent_cached(graph, frontier, f.id)
        }
        FormulaKind::ForallPast(a) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            // No `is_root` shortcut here: at the root `forall_parent_cached`
            // already reports false (no parents to universally quantify
            // over), so AP doesn't inherit AY's vacuous truth the way a
            // bare `AY` formula would.
            x || forall_parent_cached(graph, frontier, f.id)
        }
        FormulaKind::ExistsHistorically(a) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            // Root terminates the chain: ⟦EH a⟧(root) = ⟦a⟧(root).
            if is_root {
                x
            } else {
                x && exists_parent_cached(graph, frontier, f.id)
            }
        }
        FormulaKind::ForallHistorically(a) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            if is_root {
                x
            } else {
                x && forall_parent_cached(graph, frontier, f.id)
            }
        }
        FormulaKind::ExistsSince(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            y || (x && exists_parent_cached(graph, frontier, f.id))
        }
        FormulaKind::ForallSince(a, b) => {
            let x = eval_node(a, frontier, is_root, props, graph, local);
            let y = eval_node(b, frontier, is_root, props, graph, local);
            y || (x && !is_root && forall_parent_cached(graph, frontier, f.id))
        }
    };
    local.insert(f.id, value);
    value
}

fn exists_parent_cached(graph: &FrontierGraph, frontier: FrontierId, node: NodeId) -> bool {
    graph
        .neighbors_directed(frontier, Direction::Incoming)
        .any(|parent| {
            let cached = graph[parent].cached(node);
            debug_assert!(cached.is_some(), "evaluator invariant: missing parent cache entry");
            cached.unwrap_or(false)
        })
}

fn forall_parent_cached(graph: &FrontierGraph, frontier: FrontierId, node: NodeId) -> bool {
    let mut saw_parent = false;
    for parent in graph.neighbors_directed(frontier, Direction::Incoming) {
        saw_parent = true;
        let cached = graph[parent].cached(node);
        debug_assert!(cached.is_some(), "evaluator invariant: missing parent cache entry");
        if cached != Some(true) {
            return false;
        }
    }
    saw_parent
}

/// Invalidate temporal-operator cache entries across `frontier` and every
/// transitively reachable descendant — required when a new parent edge is
/// added to an already-evaluated frontier (the State Manager's merge case).
/// Returns the affected frontiers in ascending id order, which is also
/// their topological order (a cut only ever grows, so ids are allocated in
/// dependency order) — the order the caller must re-evaluate them in for
/// `exists_parent_cached`/`forall_parent_cached` to see committed parent
/// values.
///
/// Clearing the whole cache rather than only the temporal-operator entries
/// is always sound (boolean connectives recompute to the same value) and
/// simpler; re-evaluation cost is bounded by formula size per frontier.
pub fn invalidate_descendants(graph: &mut FrontierGraph, frontier: FrontierId) -> Vec<FrontierId> {
    let mut stack = vec![frontier];
    let mut seen = std::collections::HashSet::new();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let children: Vec<FrontierId> = graph.neighbors_directed(id, Direction::Outgoing).collect();
        if let Some(state) = graph.node_weight_mut(id) {
            if let crate::frontier::FrontierState::Live { verdict_cache, .. } = state {
                verdict_cache.clear();
            }
        }
        stack.extend(children);
    }
    let mut affected: Vec<FrontierId> = seen.into_iter().collect();
    affected.sort();
    affected
}
