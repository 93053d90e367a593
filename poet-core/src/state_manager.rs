//! Orchestrates frontier construction: the consumer of the event stream
//! that ties deliverability, the frontier DAG, and the evaluator together
//! into the on-line `on_event` protocol.

use std::collections::HashMap;
use std::time::Instant;

use crate::deliverability::{advance_cut, is_deliverable};
use crate::error::PoetError;
use crate::event::Event;
use crate::evaluator::{evaluate_frontier, invalidate_descendants};
use crate::formula::Formula;
use crate::frontier::{FrontierGraph, FrontierId, FrontierState};
use crate::observation::EventObservation;
use crate::reduction;

/// Run-time knobs that don't affect verdicts, only memory/reporting.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Prune fully-covered frontiers after each event.
    pub reduce: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { reduce: false }
    }
}

/// Owns the frontier DAG and drives it forward one event at a time.
pub struct StateManager {
    graph: FrontierGraph,
    root: FrontierId,
    cut_index: HashMap<Vec<u64>, FrontierId>,
    /// `per_process_props[p][k]` is the proposition set of process `p`'s
    /// `k`-th (0-based) local event — looked up directly rather than
    /// inherited along a DAG path, since a process's local sequence is
    /// fixed regardless of which path through the lattice reaches a cut.
    per_process_props: Vec<Vec<std::collections::BTreeSet<String>>>,
    formula: Formula,
    processes: usize,
    options: Options,
    total_states: usize,
    /// Componentwise count of events delivered per process so far — the
    /// unique cut that is the "maximal frontier" spec.md §4.3 step 5 means:
    /// the frontier that has caught up with every delivered process. Unlike
    /// the live-frontier set (which can contain race-losing concurrent
    /// branches that never get pruned), this cut is always achievable and
    /// always resolves to exactly one node in `cut_index`.
    delivered: Vec<u64>,
}

impl StateManager {
    pub fn new(formula: Formula, processes: usize, options: Options) -> Self {
        let mut graph = FrontierGraph::default();
        let root_cut = vec![0u64; processes];
        let root = graph.add_node(FrontierState::new_live(
            root_cut.clone(),
            std::collections::BTreeSet::new(),
        ));
        evaluate_frontier(&mut graph, root, &formula, root);

        let mut cut_index = HashMap::new();
        cut_index.insert(root_cut, root);

        StateManager {
            graph,
            root,
            cut_index,
            per_process_props: vec![Vec::new(); processes],
            formula,
            processes,
            options,
            total_states: 1,
            delivered: vec![0u64; processes],
        }
    }

    pub fn root(&self) -> FrontierId {
        self.root
    }

    pub fn graph(&self) -> &FrontierGraph {
        &self.graph
    }

    pub fn total_states(&self) -> usize {
        self.total_states
    }

    /// Deliver one event, advancing (or fanning out) the frontier DAG.
    ///
    /// Protocol per event:
    /// 1. Find every live frontier at which the event is deliverable.
    /// 2. If none, it's a causality violation — the event depends on
    ///    something no live frontier reflects.
    /// 3. Record the event's propositions into its participants' local
    ///    sequences (once, independent of fan-out).
    /// 4. For each deliverable source frontier, compute the resulting cut;
    ///    reuse the existing frontier at that cut if one exists (adding an
    ///    edge and invalidating/re-evaluating its descendants), otherwise
    ///    create, evaluate, and index a new one.
    /// 5. Mark each source frontier as having delivered this event's
    ///    participants, then run the reduction policy if enabled.
    pub fn on_event(&mut self, event: &Event) -> Result<EventObservation, PoetError> {
        let started = Instant::now();
        debug_assert_eq!(event.vc.width(), self.processes);

        let targets: Vec<FrontierId> = self
            .graph
            .node_indices()
            .filter(|&id| {
                matches!(&self.graph[id], FrontierState::Live { .. })
                    && is_deliverable(self.graph[id].cut(), event)
            })
            .collect();

        if targets.is_empty() {
            return Err(PoetError::Causality {
                event_id: event.id.clone(),
                message: "no live frontier admits this event; a causal predecessor is missing \
                          or was already delivered"
                    .to_string(),
            });
        }

        for &p in &event.processes {
            self.per_process_props[p].push(event.propositions.clone());
            self.delivered[p] += 1;
        }

        let mut touched = Vec::with_capacity(targets.len());
        for source in targets {
            let new_cut = advance_cut(self.graph[source].cut(), event);
            let target_id = if let Some(&existing) = self.cut_index.get(&new_cut) {
                self.graph.add_edge(source, existing, event.id.clone());
                let affected = invalidate_descendants(&mut self.graph, existing);
                for id in affected {
                    evaluate_frontier(&mut self.graph, self.root, &self.formula, id);
                }
                existing
            } else {
                let props = self.props_at_cut(&new_cut);
                let new_id = self.graph.add_node(FrontierState::new_live(new_cut.clone(), props));
                self.graph.add_edge(source, new_id, event.id.clone());
                self.cut_index.insert(new_cut, new_id);
                evaluate_frontier(&mut self.graph, self.root, &self.formula, new_id);
                self.total_states += 1;
                new_id
            };
            self.graph[source].mark_covered(&event.processes);
            touched.push(target_id);
        }

        let pruned = if self.options.reduce {
            reduction::reduce(&mut self.graph, &mut self.cut_index, self.processes)
        } else {
            0
        };

        // The maximal frontier is the single node whose cut equals the
        // running componentwise-max of delivered events — not every live
        // frontier, which may include concurrent branches that lost a race
        // and stay live (unreduced) forever. See spec.md §4.3 step 5.
        let maximal_id = *self
            .cut_index
            .get(&self.delivered)
            .expect("the delivered cut is always a materialized frontier");
        let verdict = self.graph[maximal_id]
            .cached(self.formula.id)
            .expect("every live frontier is fully evaluated");
        let maximal_verdicts = vec![(maximal_id, verdict)];

        Ok(EventObservation {
            event_id: event.id.clone(),
            frontiers_touched: touched,
            maximal_verdicts,
            frontiers_pruned: pruned,
            elapsed: started.elapsed(),
        })
    }

    fn props_at_cut(&self, cut: &[u64]) -> std::collections::BTreeSet<String> {
        let mut props = std::collections::BTreeSet::new();
        for (process, &count) in cut.iter().enumerate() {
            if count > 0 {
                props.extend(self.per_process_props[process][(count - 1) as usize].iter().cloned());
            }
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::parser::parse;
    use crate::vc::VectorClock;
    use std::collections::BTreeSet;

    fn ev(id: &str, processes: Vec<usize>, props: &[&str], vc: Vec<u64>) -> Event {
        Event::new(
            id,
            processes,
            props.iter().map(|s| s.to_string()).collect(),
            VectorClock::new(vc),
        )
    }

    #[test]
    fn single_process_chain_advances_cleanly() {
        let formula = parse("a").unwrap();
        let mut sm = StateManager::new(formula, 1, Options { reduce: false });
        let obs = sm
            .on_event(&ev("e1", vec![0], &["a"], vec![1]))
            .unwrap();
        // Exactly one maximal frontier: the one whose cut matches every
        // process's delivered count so far (root no longer qualifies, even
        // though it's still live with reduce=false).
        assert_eq!(obs.maximal_verdicts.len(), 1);
        assert!(obs.holds_everywhere());
    }

    #[test]
    fn undeliverable_event_is_a_causality_violation() {
        let formula = parse("TRUE").unwrap();
        let mut sm = StateManager::new(formula, 2, Options::default());
        // e1 claims to be P1's *second* local event with no predecessor delivered.
        let err = sm.on_event(&ev("e1", vec![0], &[], vec![2, 0])).unwrap_err();
        assert!(matches!(err, PoetError::Causality { .. }));
    }

    #[test]
    fn concurrent_first_events_both_deliver_at_root() {
        let formula = parse("TRUE").unwrap();
        let mut sm = StateManager::new(formula, 2, Options { reduce: false });
        sm.on_event(&ev("e1", vec![0], &[], vec![1, 0])).unwrap();
        // Root must still admit P2's first event even though it already
        // gained a child for P1 (it is not yet fully covered). The maximal
        // frontier after both events is the single join at cut [1, 1].
        let obs = sm.on_event(&ev("e2", vec![1], &[], vec![0, 1])).unwrap();
        assert_eq!(obs.maximal_verdicts.len(), 1);
        assert_eq!(sm.graph[obs.maximal_verdicts[0].0].cut(), &[1, 1]);
    }

    #[test]
    fn reduction_prunes_fully_covered_root() {
        let formula = parse("TRUE").unwrap();
        let mut sm = StateManager::new(formula, 2, Options { reduce: true });
        sm.on_event(&ev("e1", vec![0], &[], vec![1, 0])).unwrap();
        let obs = sm.on_event(&ev("e2", vec![1], &[], vec![0, 1])).unwrap();
        assert_eq!(obs.frontiers_pruned, 1);
        assert!(matches!(&sm.graph[sm.root], FrontierState::Pruned { .. }));
    }

    #[test]
    fn props_carry_from_the_delivering_events_local_slot() {
        let formula = parse("a").unwrap();
        let mut sm = StateManager::new(formula, 1, Options { reduce: false });
        sm.on_event(&ev("e1", vec![0], &["a"], vec![1])).unwrap();
        let newest = sm
            .graph
            .node_indices()
            .max_by_key(|i| i.index())
            .unwrap();
        assert_eq!(sm.graph[newest].props(), BTreeSet::from(["a".to_string()]));
    }

    #[test]
    fn merging_into_an_existing_frontier_invalidates_and_recomputes() {
        // Two independent single-process events converge on the same cut
        // only when processes are disjoint from each other's participation;
        // here we exercise the simpler same-process re-delivery path is
        // rejected instead, since the merge case is intrinsically tied to
        // diamond-shaped concurrent traces exercised at the integration
        // level (see tests/seed_suite.rs).
        let formula = parse("EY(a)").unwrap();
        let mut sm = StateManager::new(formula, 1, Options { reduce: false });
        sm.on_event(&ev("e1", vec![0], &["a"], vec![1])).unwrap();
        let obs = sm.on_event(&ev("e2", vec![0], &[], vec![2])).unwrap();
        assert!(obs.maximal_verdicts.iter().any(|&(_, v)| v));
    }
}
