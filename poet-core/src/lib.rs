//! Core PCTL-over-vector-clocks verification engine.
//!
//! Consumes a partial-order execution trace as a stream of vector-clock
//! annotated events and an already-parsed PCTL formula, incrementally
//! building the frontier lattice (consistent-cut DAG) the trace induces and
//! evaluating the formula at every frontier as it is created.

pub mod deliverability;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod formula;
pub mod frontier;
pub mod observation;
pub mod reduction;
pub mod state_manager;
pub mod trace;
pub mod vc;

pub use error::{PoetError, Position, Result};
pub use event::Event;
pub use formula::{parse, Formula, FormulaKind};
pub use observation::{EventObservation, RunSummary};
pub use state_manager::{Options, StateManager};
pub use trace::Trace;
pub use vc::VectorClock;
