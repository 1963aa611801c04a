//! In-memory I/O implementations for testing.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::ByteSource;

/// In-memory byte source for testing.
///
/// Yields ranges of at most `buffer_size` bytes, like the real sources.
#[derive(Debug, Clone)]
pub struct MemorySource {
    id: String,
    data: Vec<u8>,
    pos: usize,
    buffer_size: usize,
}

impl MemorySource {
    pub fn new(id: impl Into<String>, data: Vec<u8>, buffer_size: usize) -> Self {
        Self {
            id: id.into(),
            data,
            pos: 0,
            buffer_size: buffer_size.max(1),
        }
    }

    pub fn from_string(id: impl Into<String>, data: impl Into<String>, buffer_size: usize) -> Self {
        Self::new(id, data.into().into_bytes(), buffer_size)
    }
}

impl ByteSource for MemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn next_range(&mut self) -> io::Result<Option<&[u8]>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let end = (self.pos + self.buffer_size).min(self.data.len());
        let range = &self.data[self.pos..end];
        self.pos = end;
        Ok(Some(range))
    }
}

/// In-memory output sink for testing.
///
/// Cloning shares the underlying buffer, so a test can keep one handle and
/// hand a writer to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer handle the pipeline can own.
    pub fn writer(&self) -> Box<dyn Write + Send> {
        Box::new(MemoryWriteHandle {
            buf: self.buf.clone(),
        })
    }

    /// Contents written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.buf.lock().unwrap().clone()
    }

    /// Contents written so far, as a string.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

struct MemoryWriteHandle {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for MemoryWriteHandle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
