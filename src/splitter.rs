//! Record-aligned chunk splitting.
//!
//! The splitter is the single-threaded owner of quote-state continuity: it
//! consumes raw byte ranges from the byte source and emits chunks whose
//! boundaries always fall on a record boundary, even when a quoted field
//! contains newlines or spans several read buffers. Downstream parsing can
//! therefore be stateless per chunk.

use memchr::{memchr, memchr2};

use crate::record::{Chunk, QUOTE};

/// Quote-scanning state carried across byte ranges.
///
/// A quote character toggles quote state wherever it appears; `QuotePending`
/// marks a quote seen inside a quoted field whose meaning is decided by the
/// next byte (another quote = escaped quote, anything else = closing quote).
/// The pending state is what makes the two-character escape sequence safe
/// across a buffer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    Quoted,
    QuotePending,
}

/// Converts the raw byte stream into record-aligned chunks without ever
/// materializing the whole input.
///
/// Feed byte ranges with [`push`](Self::push); call [`finish`](Self::finish)
/// at end of input to flush the tail. Sequence numbers start at 0 and are
/// strictly increasing with no gaps.
#[derive(Debug)]
pub struct RecordSplitter {
    /// Target chunk size; a chunk is emitted once at least this many bytes
    /// are buffered and a record boundary exists.
    target: usize,
    /// Unemitted bytes: everything after the last chunk boundary.
    carry: Vec<u8>,
    /// Index into `carry` up to which the state machine has scanned.
    scanned: usize,
    /// End index (exclusive) of the last confirmed record boundary in `carry`.
    last_boundary: Option<usize>,
    state: QuoteState,
    next_seq: u64,
    /// Input byte offset of `carry[0]`.
    offset: u64,
}

impl RecordSplitter {
    pub fn new(target: usize) -> Self {
        Self {
            target: target.max(1),
            carry: Vec::new(),
            scanned: 0,
            last_boundary: None,
            state: QuoteState::Unquoted,
            next_seq: 0,
            offset: 0,
        }
    }

    /// Current quote state, for end-of-input diagnostics.
    pub fn state(&self) -> QuoteState {
        self.state
    }

    /// Consume the next byte range and emit a chunk if enough record-aligned
    /// bytes have accumulated.
    pub fn push(&mut self, range: &[u8]) -> Option<Chunk> {
        self.carry.extend_from_slice(range);
        self.scan();
        if self.carry.len() >= self.target {
            if let Some(end) = self.last_boundary {
                return Some(self.take_chunk(end));
            }
        }
        None
    }

    /// Flush the remaining tail as the final chunk.
    ///
    /// If input ended inside an open quote the tail is still emitted; the
    /// parser reports the unterminated record as malformed rather than
    /// silently truncating it.
    pub fn finish(mut self) -> Option<Chunk> {
        if self.carry.is_empty() {
            return None;
        }
        let end = self.carry.len();
        Some(self.take_chunk(end))
    }

    /// Advance the quote-state machine over the unscanned part of `carry`,
    /// recording the last unquoted record separator seen.
    fn scan(&mut self) {
        let mut i = self.scanned;
        while i < self.carry.len() {
            match self.state {
                QuoteState::Unquoted => {
                    match memchr2(b'\n', QUOTE, &self.carry[i..]) {
                        None => i = self.carry.len(),
                        Some(rel) => {
                            let pos = i + rel;
                            if self.carry[pos] == b'\n' {
                                self.last_boundary = Some(pos + 1);
                            } else {
                                self.state = QuoteState::Quoted;
                            }
                            i = pos + 1;
                        }
                    }
                }
                QuoteState::Quoted => match memchr(QUOTE, &self.carry[i..]) {
                    None => i = self.carry.len(),
                    Some(rel) => {
                        self.state = QuoteState::QuotePending;
                        i = i + rel + 1;
                    }
                },
                QuoteState::QuotePending => {
                    if self.carry[i] == QUOTE {
                        // Escaped quote; still inside the field.
                        self.state = QuoteState::Quoted;
                        i += 1;
                    } else {
                        // The pending quote closed the field; reprocess this
                        // byte in unquoted state (it may be a separator).
                        self.state = QuoteState::Unquoted;
                    }
                }
            }
        }
        self.scanned = i;
    }

    /// Split off `carry[..end]` as the next chunk.
    fn take_chunk(&mut self, end: usize) -> Chunk {
        let rest = self.carry.split_off(end);
        let bytes = std::mem::replace(&mut self.carry, rest);
        let chunk = Chunk {
            seq: self.next_seq,
            offset: self.offset,
            bytes,
        };
        self.next_seq += 1;
        self.offset += end as u64;
        self.scanned -= end;
        self.last_boundary = None;
        chunk
    }
}
