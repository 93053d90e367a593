//! Vector-clock deliverability (spec.md §4.2): a pure, side-effect-free
//! predicate over a frontier's cut and a candidate event.

use crate::event::Event;

/// Is `event` deliverable at the frontier whose local-index cut is `cut`?
///
/// 1. Every participating process's next local event at this cut is
///    exactly `event` (`cut[i] == vc(event)[i] - 1`).
/// 2. Every non-participating process's cut already reflects everything
///    `event` depends on (`cut[j] >= vc(event)[j]`).
pub fn is_deliverable(cut: &[u64], event: &Event) -> bool {
    debug_assert_eq!(cut.len(), event.vc.width());
    for i in 0..cut.len() {
        let participates = event.participates(i);
        let vc_i = event.vc.get(i);
        if participates {
            if vc_i == 0 || cut[i] != vc_i - 1 {
                return false;
            }
        } else if cut[i] < vc_i {
            return false;
        }
    }
    true
}

/// The cut reached by delivering `event` at `cut`: participating processes'
/// indices advance by one, everyone else is unchanged.
pub fn advance_cut(cut: &[u64], event: &Event) -> Vec<u64> {
    let mut next = cut.to_vec();
    for &p in &event.processes {
        next[p] += 1;
    }
    next
}
