//! Error taxonomy for the log → table pipeline.
//!
//! Every variant names the invariant that was violated and the identifiers
//! involved. None of them is recoverable: a report built after skipping a bad
//! run would compare the wrong numbers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A line the ingestor recognised but could not accept.
    #[error("malformed log at {source_name}:{line_no}: {reason}\n  line: {line:?}")]
    MalformedLog {
        source_name: String,
        line_no: usize,
        line: String,
        reason: &'static str,
    },

    /// The same `(system, query)` marker appeared twice.
    #[error(
        "duplicate run key: case={system} query={query} seen again at {source_name}:{line_no} \
         (each system/query pair may be benchmarked once per report)"
    )]
    DuplicateRunKey {
        system: String,
        query: String,
        source_name: String,
        line_no: usize,
    },

    /// Load and query samples of one run cannot be paired by trial.
    #[error(
        "length mismatch in run case={system} query={query}: \
         {load} load sample(s) but {duration} query sample(s)"
    )]
    LengthMismatch {
        system: String,
        query: String,
        load: usize,
        duration: usize,
    },

    /// A committed run without a single timing sample.
    #[error("empty run case={system} query={query}: no timing samples recorded")]
    EmptyRun { system: String, query: String },

    /// A trial's load + query sum does not fit in a `u64` of milliseconds.
    #[error("trial total overflows in run case={system} query={query}: trial {trial} exceeds u64 milliseconds")]
    TrialOverflow {
        system: String,
        query: String,
        trial: usize,
    },

    /// The inputs held no `Running case=` marker at all.
    #[error("no benchmark runs found in {}: expected `Running case=<system> query=<query>` markers", .sources.join(", "))]
    NoRuns { sources: Vec<String> },

    /// A requested column does not exist in the data.
    #[error("unknown system {system:?}: not present in the data (available: {})", .available.join(", "))]
    UnknownSystem {
        system: String,
        available: Vec<String>,
    },

    /// Two distinct runs were renamed onto the same display key.
    #[error("label collision: more than one run is displayed as system={system:?} query={query:?}")]
    LabelCollision { system: String, query: String },

    /// A requested column was listed more than once.
    #[error("system {system:?} listed more than once in the display order")]
    DuplicateSystem { system: String },
}
