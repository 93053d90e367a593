//! Per-event and summary renderers, one per `--output-level`.

use poet_core::frontier::FrontierGraph;
use poet_core::{EventObservation, RunSummary};

use crate::cli::OutputLevel;

pub fn render_event(level: OutputLevel, obs: &EventObservation, graph: &FrontierGraph) {
    match level {
        OutputLevel::Nothing => {}
        OutputLevel::Experiment => {
            println!("{} {}", obs.event_id, if obs.holds_everywhere() { "PASS" } else { "FAIL" });
        }
        OutputLevel::Default => {
            println!(
                "{}: {} ({} pruned, {:?})",
                obs.event_id,
                if obs.holds_everywhere() { "holds" } else { "violated" },
                obs.frontiers_pruned,
                obs.elapsed,
            );
        }
        OutputLevel::MaxState | OutputLevel::Debug => {
            println!("{}:", obs.event_id);
            for &(id, verdict) in &obs.maximal_verdicts {
                let marker = if verdict { "holds" } else { "VIOLATED" };
                if level == OutputLevel::Debug {
                    println!(
                        "  frontier {:?} cut={:?}: {}",
                        id,
                        graph[id].cut(),
                        marker
                    );
                } else {
                    println!("  {}", marker);
                }
            }
        }
    }
}

pub fn render_summary(level: OutputLevel, summary: &RunSummary) {
    if level == OutputLevel::Nothing {
        return;
    }
    println!();
    println!("events delivered : {}", summary.total_events);
    println!("states created   : {}", summary.total_states);
    if let (Some(min), Some(max)) = (summary.min_event_time, summary.max_event_time) {
        println!(
            "event time       : min {min:?}, max {max:?}, avg {:?}",
            summary.avg_event_time()
        );
    }
    println!(
        "final verdict    : {}",
        if summary.final_verdict { "HOLDS" } else { "VIOLATED" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::stable_graph::NodeIndex;

    #[test]
    fn experiment_level_is_one_line_per_event() {
        let mut graph = FrontierGraph::default();
        let _ = graph.add_node(poet_core::frontier::FrontierState::new_live(
            vec![0],
            Default::default(),
        ));
        let obs = EventObservation {
            event_id: "e1".into(),
            frontiers_touched: vec![],
            maximal_verdicts: vec![(NodeIndex::new(0), true)],
            frontiers_pruned: 0,
            elapsed: std::time::Duration::ZERO,
        };
        render_event(OutputLevel::Experiment, &obs, &graph);
    }
}
