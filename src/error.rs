use std::path::PathBuf;

use thiserror::Error;

/** A fallible outcome of the loader, the driver, or the CLI boundary, one
variant per distinct failure semantics.

`InfeasibleRealization` and `UnsolvableInstance` are deliberately absent:
the former is recovered inside the search engine via backtracking and
never escapes it, the latter is a normal [`crate::search::SearchOutcome::NotFound`]
return, not an error.
*/
#[derive(Debug, Error)]
pub enum CpppError {
    /// The loader could not parse an instance out of the input stream.
    #[error("malformed input (instance #{instance}, {stage:?}): {reason}")]
    MalformedInput {
        /// zero-based index of the instance being read when parsing failed
        instance: usize,
        /// which part of the instance grammar the parser was in
        stage: MalformedInputStage,
        /// human-readable description of what was expected
        reason: String,
    },

    /// The input file could not be opened or read.
    #[error("could not read input file {path:?}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output destination could not be opened or written to.
    #[error("could not open output file {path:?}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log destination could not be opened.
    #[error("could not open log file {path:?}: {source}")]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Distinguishes the three `exit_code` buckets a malformed instance can fall
/// into (§6.2's "malformed input at various stages").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedInputStage {
    /// the `n m` header tokens were missing or not integers
    Header,
    /// a cell token was missing or not `0`/`1`
    Cells,
    /// the stream ended partway through an instance
    MidInstance,
}
