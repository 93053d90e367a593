//! Trace JSON schema: the on-disk format the engine's event stream is read
//! from, and the semantic validation (width, participant ranges) that turns
//! it into [`Event`]s. Opening the file and reporting I/O errors is a
//! `poet-cli` concern; the schema and its validation are core domain logic,
//! living in the engine crate rather than the binary.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::PoetError;
use crate::event::Event;
use crate::vc::VectorClock;

#[derive(Deserialize)]
struct RawTrace {
    processes: usize,
    #[serde(default)]
    process_names: Option<Vec<String>>,
    events: Vec<RawEvent>,
}

/// `[event_id, participants, propositions, vc]`, exactly as §6 specifies.
type RawEvent = (String, Vec<String>, Vec<String>, Vec<u64>);

/// A parsed, width-validated trace: the process count, optional display
/// names, and the event list in arrival order.
#[derive(Clone, Debug)]
pub struct Trace {
    pub processes: usize,
    pub process_names: Option<Vec<String>>,
    pub events: Vec<Event>,
}

impl Trace {
    pub fn from_json(text: &str) -> Result<Trace, PoetError> {
        let raw: RawTrace = serde_json::from_str(text).map_err(|e| PoetError::TraceFormat {
            message: format!("invalid JSON: {e}"),
        })?;

        if let Some(names) = &raw.process_names {
            if names.len() != raw.processes {
                return Err(PoetError::TraceFormat {
                    message: format!(
                        "process_names has {} entries, expected {}",
                        names.len(),
                        raw.processes
                    ),
                });
            }
        }

        let mut events = Vec::with_capacity(raw.events.len());
        for (id, participants, propositions, vc) in raw.events {
            if vc.len() != raw.processes {
                return Err(PoetError::TraceFormat {
                    message: format!(
                        "event {id}: vc has width {}, expected {}",
                        vc.len(),
                        raw.processes
                    ),
                });
            }
            if participants.is_empty() {
                return Err(PoetError::TraceFormat {
                    message: format!("event {id}: participants must be non-empty"),
                });
            }
            let mut processes = Vec::with_capacity(participants.len());
            for p in &participants {
                processes.push(parse_participant(p, raw.processes, &id)?);
            }
            let propositions: BTreeSet<String> = propositions.into_iter().collect();
            events.push(Event::new(id, processes, propositions, VectorClock::new(vc)));
        }

        Ok(Trace {
            processes: raw.processes,
            process_names: raw.process_names,
            events,
        })
    }

    /// Display name for a process, falling back to `P<k>` (1-based).
    pub fn process_name(&self, process: usize) -> String {
        match &self.process_names {
            Some(names) => names[process].clone(),
            None => format!("P{}", process + 1),
        }
    }
}

/// Parse a participant identifier of the form `"Pk"`, `k` in `1..=n`, into a
/// 0-based process index.
fn parse_participant(raw: &str, n: usize, event_id: &str) -> Result<usize, PoetError> {
    let digits = raw.strip_prefix('P').ok_or_else(|| PoetError::TraceFormat {
        message: format!("event {event_id}: participant {raw:?} is not of the form \"Pk\""),
    })?;
    let k: usize = digits.parse().map_err(|_| PoetError::TraceFormat {
        message: format!("event {event_id}: participant {raw:?} is not of the form \"Pk\""),
    })?;
    if k == 0 || k > n {
        return Err(PoetError::TraceFormat {
            message: format!("event {event_id}: participant {raw:?} out of range 1..={n}"),
        });
    }
    Ok(k - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_trace() {
        let json = r#"{
            "processes": 2,
            "events": [
                ["e1", ["P1"], ["a"], [1, 0]],
                ["e2", ["P2"], ["b"], [0, 1]],
                ["e3", ["P1", "P2"], ["c"], [2, 2]]
            ]
        }"#;
        let trace = Trace::from_json(json).unwrap();
        assert_eq!(trace.processes, 2);
        assert_eq!(trace.events.len(), 3);
        assert_eq!(trace.events[0].processes, vec![0]);
        assert_eq!(trace.events[2].processes, vec![0, 1]);
        assert_eq!(trace.process_name(0), "P1");
    }

    #[test]
    fn rejects_vc_width_mismatch() {
        let json = r#"{"processes":2,"events":[["e1",["P1"],[],[1]]]}"#;
        let err = Trace::from_json(json).unwrap_err();
        assert!(matches!(err, PoetError::TraceFormat { .. }));
    }

    #[test]
    fn rejects_out_of_range_participant() {
        let json = r#"{"processes":1,"events":[["e1",["P2"],[],[1]]]}"#;
        let err = Trace::from_json(json).unwrap_err();
        assert!(matches!(err, PoetError::TraceFormat { .. }));
    }

    #[test]
    fn allows_empty_propositions() {
        let json = r#"{"processes":1,"events":[["e1",["P1"],[],[1]]]}"#;
        let trace = Trace::from_json(json).unwrap();
        assert!(trace.events[0].propositions.is_empty());
    }

    #[test]
    fn uses_process_names_when_present() {
        let json = r#"{
            "processes": 2,
            "process_names": ["client", "server"],
            "events": []
        }"#;
        let trace = Trace::from_json(json).unwrap();
        assert_eq!(trace.process_name(1), "server");
    }
}
