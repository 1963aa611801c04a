//! Memory-mapped byte source for seekable files.
//!
//! Ranges come straight out of the mapping with no copy into process
//! memory; the interface is identical to the buffered path, so downstream
//! stages cannot tell the difference.

use std::fs::File;

use memmap2::Mmap;
use tracing::debug;

use super::ByteSource;

/// Byte source backed by a memory-mapped file.
#[derive(Debug)]
pub struct MmapSource {
    id: String,
    map: Mmap,
    pos: usize,
    buffer_size: usize,
}

impl MmapSource {
    /// Try to map a file, falling back to `None` when the file is empty,
    /// not a regular file, or the mapping fails.
    pub fn try_new(id: &str, file: &File, buffer_size: usize) -> Option<Self> {
        let meta = file.metadata().ok()?;
        if !meta.is_file() || meta.len() == 0 {
            return None;
        }
        // Safety: the mapping is read-only and private to this source; the
        // file is expected not to be truncated underneath a running pipeline.
        match unsafe { Mmap::map(file) } {
            Ok(map) => Some(Self {
                id: id.to_string(),
                map,
                pos: 0,
                buffer_size: buffer_size.max(1),
            }),
            Err(e) => {
                debug!(path = id, error = %e, "mmap failed, using buffered reads");
                None
            }
        }
    }
}

impl ByteSource for MmapSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn next_range(&mut self) -> std::io::Result<Option<&[u8]>> {
        if self.pos >= self.map.len() {
            return Ok(None);
        }
        let end = (self.pos + self.buffer_size).min(self.map.len());
        let range = &self.map[self.pos..end];
        self.pos = end;
        Ok(Some(range))
    }
}
