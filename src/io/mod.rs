//! Byte-oriented I/O: sources and sinks.
//!
//! This module provides:
//! - `ByteSource`: the range-based input trait all sources implement
//! - `ReaderSource`: buffered reads from files and stdin
//! - `MmapSource`: memory-mapped files (feature `mmap`)
//! - `MemorySource` / `MemorySink`: in-memory implementations for testing
//! - `resolve_input` / `resolve_output`: path-or-stdio resolution

mod memory;
mod source;
mod std_io;

#[cfg(feature = "mmap")]
mod mmap;

pub use memory::{MemorySink, MemorySource};
pub use source::ByteSource;
pub use std_io::ReaderSource;

#[cfg(feature = "mmap")]
pub use mmap::MmapSource;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Resolve an input path (or stdin for `None`) to a byte source.
///
/// Regular non-empty files are memory-mapped when the `mmap` feature is
/// enabled; everything else goes through buffered reads. Both paths expose
/// the same range-based interface, so downstream stages are source-agnostic.
pub fn resolve_input(path: Option<&Path>, buffer_size: usize) -> Result<Box<dyn ByteSource>> {
    match path {
        Some(p) => {
            let id = p.display().to_string();
            let file = File::open(p).map_err(|e| PipelineError::Open {
                path: id.clone(),
                source: e,
            })?;
            #[cfg(feature = "mmap")]
            {
                if let Some(src) = mmap::MmapSource::try_new(&id, &file, buffer_size) {
                    return Ok(Box::new(src));
                }
            }
            Ok(Box::new(ReaderSource::new(id, file, buffer_size)))
        }
        None => Ok(Box::new(ReaderSource::new("-", io::stdin(), buffer_size))),
    }
}

/// Resolve an output path (or stdout for `None`) to a buffered writer.
pub fn resolve_output(path: Option<&Path>, buffer_size: usize) -> Result<Box<dyn Write + Send>> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|e| PipelineError::Open {
                path: p.display().to_string(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::with_capacity(buffer_size, file)))
        }
        None => Ok(Box::new(BufWriter::with_capacity(
            buffer_size,
            io::stdout(),
        ))),
    }
}
