//! Byte source trait definition.

use std::fmt;
use std::io;

/// Trait for range-based byte sources.
///
/// Implementors yield successive raw byte ranges of at most the configured
/// buffer size until the input is exhausted. An I/O failure here is fatal
/// for the whole run.
pub trait ByteSource: Send + fmt::Debug {
    /// Identifier for this source, used in error messages and logging.
    /// Convention: "-" for stdin, the path for files.
    fn id(&self) -> &str;

    /// The next byte range, or `None` at end of input.
    ///
    /// The returned slice is only valid until the next call.
    fn next_range(&mut self) -> io::Result<Option<&[u8]>>;
}
