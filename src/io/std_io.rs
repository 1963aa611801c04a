//! Buffered byte source over any reader (files, stdin).

use std::fmt;
use std::io::{self, Read};

use super::ByteSource;

/// Byte source backed by a plain reader.
///
/// Reads at most `buffer_size` bytes per range into an internal buffer.
#[derive(Debug)]
pub struct ReaderSource<R> {
    id: String,
    reader: R,
    buf: Vec<u8>,
}

impl<R: Read + Send + fmt::Debug> ReaderSource<R> {
    pub fn new(id: impl Into<String>, reader: R, buffer_size: usize) -> Self {
        Self {
            id: id.into(),
            reader,
            buf: vec![0; buffer_size.max(1)],
        }
    }
}

impl<R: Read + Send + fmt::Debug> ByteSource for ReaderSource<R> {
    fn id(&self) -> &str {
        &self.id
    }

    fn next_range(&mut self) -> io::Result<Option<&[u8]>> {
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(&self.buf[..n])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
