mod cli;
mod logging;
mod output;
mod visual;

use std::process::ExitCode;

use clap::Parser;
use poet_core::state_manager::Options;
use poet_core::{formula, PoetError, RunSummary, StateManager, Trace};

use cli::Cli;

/// Exit codes, sysexits-flavored: 0 on run completion regardless of the
/// property's verdict, 2 on malformed input (property/trace failed to
/// parse, rejected before any event is processed), 1 on a causality
/// violation (partial run, partial verdict printed first), 70
/// (`EX_SOFTWARE`) on a broken evaluator invariant — a bug, not a user
/// error.
const EXIT_OK: u8 = 0;
const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_CAUSALITY: u8 = 1;
const EXIT_INTERNAL: u8 = 70;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref(), cli.log_categories.as_deref());

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("poet: {e}");
            ExitCode::from(EXIT_INTERNAL)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let property_src = std::fs::read_to_string(&cli.property)
        .map_err(|e| anyhow::anyhow!("reading property file {}: {e}", cli.property.display()))?;
    let trace_src = std::fs::read_to_string(&cli.trace)
        .map_err(|e| anyhow::anyhow!("reading trace file {}: {e}", cli.trace.display()))?;

    let formula = match formula::parse(&property_src) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("poet: property error: {e}");
            return Ok(EXIT_INPUT_ERROR);
        }
    };
    tracing::info!(property = %formula, "parsed property");

    let trace = match Trace::from_json(&trace_src) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("poet: trace error: {e}");
            return Ok(EXIT_INPUT_ERROR);
        }
    };
    tracing::info!(processes = trace.processes, events = trace.events.len(), "loaded trace");

    let mut manager = StateManager::new(formula, trace.processes, Options { reduce: cli.reduce });
    let mut summary = RunSummary::default();

    for event in &trace.events {
        let observation = match manager.on_event(event) {
            Ok(obs) => obs,
            Err(PoetError::Causality { event_id, message }) => {
                eprintln!("poet: causality violation at event {event_id}: {message}");
                output::render_summary(cli.output_level, &summary);
                return Ok(EXIT_CAUSALITY);
            }
            Err(e) => {
                eprintln!("poet: internal error: {e}");
                return Ok(EXIT_INTERNAL);
            }
        };

        tracing::debug!(event = %event.id, holds = observation.holds_everywhere(), "delivered");
        output::render_event(cli.output_level, &observation, manager.graph());
        summary.total_states = manager.total_states();
        summary.record(&observation);
    }

    output::render_summary(cli.output_level, &summary);

    if let Some(path) = &cli.visual {
        visual::write_dot(manager.graph(), path)
            .map_err(|e| anyhow::anyhow!("writing --visual output to {}: {e}", path.display()))?;
    }

    Ok(EXIT_OK)
}
