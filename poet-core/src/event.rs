//! Immutable event records, as delivered off the trace stream.

use std::collections::BTreeSet;

use crate::vc::VectorClock;

/// One event from the trace. Participant processes are stored as 0-based
/// indices (`"P1"` in the trace format becomes `0` here); see
/// [`crate::trace`] for the translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub processes: Vec<usize>,
    pub propositions: BTreeSet<String>,
    pub vc: VectorClock,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        mut processes: Vec<usize>,
        propositions: BTreeSet<String>,
        vc: VectorClock,
    ) -> Self {
        processes.sort_unstable();
        processes.dedup();
        Self {
            id: id.into(),
            processes,
            propositions,
            vc,
        }
    }

    pub fn participates(&self, process: usize) -> bool {
        self.processes.binary_search(&process).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processes_are_sorted_and_deduped() {
        let e = Event::new(
            "e1",
            vec![2, 0, 2],
            BTreeSet::new(),
            VectorClock::zero(3),
        );
        assert_eq!(e.processes, vec![0, 2]);
        assert!(e.participates(0));
        assert!(!e.participates(1));
    }
}
