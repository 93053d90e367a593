use thiserror::Error;

/// A `(line, column)` position in PCTL source text, 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// All terminal failure modes the engine surfaces, per the error kinds the
/// trace/property pipeline can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoetError {
    /// PCTL source failed to parse.
    #[error("parse error at {position}: {message}")]
    Parse { position: Position, message: String },

    /// Trace JSON structure is malformed: wrong shape, vc length mismatch,
    /// participant id out of range, etc.
    #[error("trace format error: {message}")]
    TraceFormat { message: String },

    /// An event arrived that is not deliverable at any existing frontier and
    /// is not the first event of any of its participating processes.
    #[error("causality violation at event {event_id}: {message}")]
    Causality { event_id: String, message: String },

    /// An internal inconsistency was detected (dangling edge, missing cache
    /// entry where one is mandatory, etc). This is a bug class, not a user
    /// input error, and aborts the run.
    #[error("evaluator invariant violated: {message}")]
    Invariant { message: String },
}

pub type Result<T> = std::result::Result<T, PoetError>;
