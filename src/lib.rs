//! # csvpipe
//!
//! A streaming, memory-bounded, parallel CSV processing engine.
//!
//! ## Overview
//!
//! csvpipe reads delimited tabular data of arbitrary size (files up to
//! ~100GB, or stdin), optionally projects a subset of columns, and writes
//! the result while using constant memory relative to input size:
//!
//! - **Record-aligned chunking**: a single-threaded splitter owns the
//!   quote-state machine, so chunk boundaries never fall inside a quoted
//!   field, even when the field spans several read buffers
//! - **Parallel parsing**: a fixed pool of workers parses chunks
//!   independently; bounded channels give backpressure on both sides
//! - **Order-preserving reassembly**: chunk sequence numbers are the sole
//!   ordering truth; output is byte-identical regardless of thread count
//! - **Column projection**: ordered 1-based indices, duplicates and
//!   reordering permitted
//! - **Run statistics**: atomic counters for bytes, records, and malformed
//!   rows, snapshotted after the pipeline drains
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csvpipe::{Config, Projection, resolve_input, resolve_output, run};
//! use std::path::Path;
//!
//! fn main() -> csvpipe::Result<()> {
//!     let config = Config {
//!         projection: Some(Projection::parse("3,1")?),
//!         ..Config::default()
//!     };
//!     let source = resolve_input(Some(Path::new("data.csv")), config.buffer_size)?;
//!     let sink = resolve_output(None, config.buffer_size)?; // stdout
//!     let summary = run(source, sink, &config)?;
//!     eprintln!("{} records in {:?}", summary.records_written, summary.elapsed);
//!     Ok(())
//! }
//! ```
//!
//! ## Dialect
//!
//! The dialect is fixed (no auto-detection): comma delimiter, `"` quote,
//! doubled-quote escaping, `\n` or `\r\n` record separators. An empty line
//! is a record with a single empty field. Output re-applies quoting only to
//! fields that require it.
//!
//! ## Features
//!
//! - `mmap` (default) - memory-mapped input for regular files via `memmap2`

// Core modules
pub mod config;
pub mod error;
pub mod io;
pub mod parser;
pub mod pipeline;
pub mod projector;
pub mod record;
pub mod splitter;
pub mod stats;
pub mod writer;

// Re-exports for convenience
pub use config::{Config, DEFAULT_BUFFER_SIZE, MalformedPolicy};
pub use error::{PipelineError, Result};
pub use io::{ByteSource, MemorySink, MemorySource, ReaderSource, resolve_input, resolve_output};
pub use pipeline::run;
pub use projector::Projection;
pub use record::{Batch, Chunk, Field, Record};
pub use stats::{RunStats, RunSummary};

#[cfg(feature = "mmap")]
pub use io::MmapSource;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
