//! Error types for pipeline runs.
//!
//! Fatal errors (I/O, configuration, sink write failures) abort the run and
//! surface here. Malformed records are not errors: they are counted by the
//! statistics collector and logged, and never unwind past the worker that
//! encountered them.

use std::io;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal errors that terminate a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Failed to open an input or output path.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Read or mmap failure on the byte source.
    #[error("read error on {source_id}: {source}")]
    Read {
        source_id: String,
        #[source]
        source: io::Error,
    },

    /// Sink write failure; triggers run cancellation.
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// Invalid configuration, reported before any processing begins.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A pipeline thread panicked.
    #[error("worker thread panicked")]
    WorkerPanic,
}
