//! Command-line argument surface for `poet`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Check whether an observed partial-order execution trace satisfies a
/// past-time PCTL property, frontier by frontier, as events are delivered.
#[derive(Parser, Debug)]
#[command(name = "poet")]
#[command(about = "Runtime verification of partial-order traces against past-time PCTL properties")]
#[command(long_about = r#"
poet checks whether an observed, vector-clock-annotated partial-order
execution satisfies a past-time branching-temporal-logic (PCTL) property.
It builds the consistent-cut frontier lattice the trace induces and
evaluates the property at every frontier as events are delivered.

Examples:
  # Check a trace against a property, default output
  poet -p spec.pctl -t trace.json

  # Enable frontier-DAG reduction and dump per-event state detail
  poet -p spec.pctl -t trace.json --reduce --output-level max_state

  # Emit the frontier DAG as DOT for visualization
  poet -p spec.pctl -t trace.json --visual frontiers.dot
"#)]
pub struct Cli {
    /// Path to a file containing a single PCTL property.
    #[arg(short = 'p', long = "property")]
    pub property: PathBuf,

    /// Path to the trace JSON file.
    #[arg(short = 't', long = "trace")]
    pub trace: PathBuf,

    /// Prune fully-covered frontiers from the live set as the trace runs.
    /// Off by default; pass to enable reduction.
    #[arg(short = 'r', long = "reduce", default_value_t = false)]
    pub reduce: bool,

    /// Write the final frontier DAG as Graphviz DOT to this path.
    #[arg(short = 'v', long = "visual")]
    pub visual: Option<PathBuf>,

    /// How much per-event detail to print to stdout.
    #[arg(long = "output-level", value_enum, default_value_t = OutputLevel::Default)]
    pub output_level: OutputLevel,

    /// Write logs to this file instead of (or in addition to) stderr.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Comma-separated `target=level` directives layered on top of
    /// `RUST_LOG`/the default filter, e.g. `poet_core::evaluator=debug`.
    #[arg(long = "log-categories")]
    pub log_categories: Option<String>,
}

/// Verbosity of the per-event and summary output `poet` prints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputLevel {
    /// No per-event output; only the final exit code reflects the verdict.
    Nothing,
    /// One line per event: a compact pass/fail marker.
    Experiment,
    /// One line per event plus the run summary (the default).
    Default,
    /// Full per-maximal-frontier verdict breakdown after every event.
    MaxState,
    /// Everything `max_state` prints, plus frontier ids and cut vectors.
    Debug,
}
