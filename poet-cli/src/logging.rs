//! Tracing setup: env-filtered console logging by default, optionally
//! mirrored (or redirected) to a file, with per-module overrides layered
//! in from `--log-categories`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Guard that must stay alive for the lifetime of the process when logging
/// to a file — dropping it flushes and stops the background writer thread.
pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init(log_file: Option<&Path>, log_categories: Option<&str>) -> LogGuard {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_categories = log_categories.filter(|c| !c.eq_ignore_ascii_case("none"));
    if let Some(categories) = log_categories {
        for directive in categories.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(e) => eprintln!("poet: ignoring invalid --log-categories directive {directive:?}: {e}"),
            }
        }
    }

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .unwrap_or_else(|e| panic!("poet: cannot open --log-file {}: {e}", path.display()));
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            LogGuard {
                _file_guard: Some(guard),
            }
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            LogGuard { _file_guard: None }
        }
    }
}
