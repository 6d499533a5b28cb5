//! Error taxonomy for parsing and aggregating benchmark logs.

use thiserror::Error;

/// Errors raised by the parsing and statistics stages.
///
/// Only `MissingBaseline`, `MissingProfileEntry` and `NoProfiledRun` end a
/// computation; the others are contained per file or per run by the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BenchError {
    /// Expected for unrelated files in the scan directory.
    #[error("file name {0:?} does not match <variations>-t<n>-i<n>.txt")]
    InvalidFilename(String),

    #[error("{file}:{line}: {reason}")]
    MalformedLog {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("unknown duration unit in {0:?}")]
    UnknownDurationUnit(String),

    #[error("unknown variation {0:?}")]
    UnknownVariation(String),

    #[error("no baseline sample for the original version at t = 1")]
    MissingBaseline,

    #[error("{file}: profiling table has no entry {id:?}")]
    MissingProfileEntry { file: String, id: String },

    #[error("no run carries a profiling table")]
    NoProfiledRun,
}
