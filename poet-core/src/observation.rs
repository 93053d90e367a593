//! Per-event and end-of-run observability records, consumed by
//! `poet-cli`'s output renderers.

use std::time::Duration;

use crate::frontier::FrontierId;

/// What happened when one event was delivered: which frontier(s) it
/// produced or merged into, and the formula's verdict at the frontier that
/// is maximal afterward — the one whose cut equals every process's
/// delivered-event count (spec.md §4.3 step 5), not every still-live
/// frontier (concurrent branches that lost a race can stay live forever
/// without ever being maximal again).
#[derive(Clone, Debug)]
pub struct EventObservation {
    pub event_id: String,
    pub frontiers_touched: Vec<FrontierId>,
    pub maximal_verdicts: Vec<(FrontierId, bool)>,
    pub frontiers_pruned: usize,
    pub elapsed: Duration,
}

impl EventObservation {
    /// True iff the formula holds at every maximal frontier (today, always
    /// exactly one — kept as a conjunction over a `Vec` for forward
    /// compatibility and to make the aggregation explicit at call sites).
    pub fn holds_everywhere(&self) -> bool {
        self.maximal_verdicts.iter().all(|&(_, v)| v)
    }
}

/// Aggregate statistics over an entire run, reported at EOF or on demand.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub total_events: usize,
    pub total_states: usize,
    pub max_event_time: Option<Duration>,
    pub min_event_time: Option<Duration>,
    pub total_event_time: Duration,
    /// Holds iff the formula was true at every maximal frontier after the
    /// final event (no maximal frontier ever witnessed a violation).
    pub final_verdict: bool,
}

impl RunSummary {
    pub fn record(&mut self, obs: &EventObservation) {
        self.total_events += 1;
        self.total_event_time += obs.elapsed;
        self.max_event_time = Some(self.max_event_time.map_or(obs.elapsed, |m| m.max(obs.elapsed)));
        self.min_event_time = Some(self.min_event_time.map_or(obs.elapsed, |m| m.min(obs.elapsed)));
        self.final_verdict = obs.holds_everywhere();
    }

    pub fn avg_event_time(&self) -> Duration {
        if self.total_events == 0 {
            Duration::ZERO
        } else {
            self.total_event_time / self.total_events as u32
        }
    }
}
