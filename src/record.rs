//! Core data model: fields, records, chunks, and batches.

/// Field delimiter of the fixed dialect.
pub const DELIMITER: u8 = b',';
/// Quote character of the fixed dialect.
pub const QUOTE: u8 = b'"';

/// One column value within a record.
///
/// Holds the unescaped bytes: the quote wrapper is stripped and doubled
/// quotes are collapsed to a single literal quote at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Unescaped field bytes.
    pub data: Vec<u8>,
    /// Whether the field was quoted in the source.
    pub quoted: bool,
}

impl Field {
    /// Create a field from unescaped bytes.
    pub fn new(data: Vec<u8>, quoted: bool) -> Self {
        Self { data, quoted }
    }

    /// An empty, unquoted field (used for out-of-range projection indices).
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            quoted: false,
        }
    }
}

/// One logical row: an ordered sequence of fields.
pub type Record = Vec<Field>;

/// A record-aligned contiguous byte range produced by the splitter.
///
/// Boundaries never fall inside a quoted field. Sequence numbers start at 0
/// and are strictly increasing with no gaps; they are the sole source of
/// truth for output ordering.
#[derive(Debug)]
pub struct Chunk {
    /// Sequence number assigned at split time.
    pub seq: u64,
    /// Byte offset of the chunk start within the input, for diagnostics.
    pub offset: u64,
    /// The raw chunk bytes.
    pub bytes: Vec<u8>,
}

/// All records parsed from one chunk, tagged with the chunk's sequence
/// number. Emitted to the reassembler exactly once per chunk.
#[derive(Debug)]
pub struct Batch {
    /// Sequence number of the originating chunk.
    pub seq: u64,
    /// Parsed records, in input order. Malformed records are included only
    /// under [`MalformedPolicy::KeepPartial`](crate::config::MalformedPolicy).
    pub records: Vec<Record>,
    /// Total records encountered in the chunk, including skipped ones.
    pub seen: u64,
    /// Records whose field count did not match the expected column count,
    /// or whose final quote was never closed.
    pub malformed: u64,
}
