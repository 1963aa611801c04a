//! Chunk parsing: bytes to records.
//!
//! Parsing is stateless across chunks; the splitter guarantees that chunk
//! boundaries are record-aligned, so the same quote machine restarts cleanly
//! at the top of every chunk. Only the final chunk of a run can end inside
//! an open quote (an unterminated record), and that record is reported as
//! malformed rather than aborting anything.

use memchr::memchr;
use tracing::warn;

use crate::config::MalformedPolicy;
use crate::record::{Batch, Chunk, DELIMITER, Field, QUOTE, Record};

/// Count the fields of the first record in `bytes`.
///
/// Used once per run, on the first chunk, to establish the expected column
/// count before any chunk is dispatched.
pub fn count_record_fields(bytes: &[u8]) -> usize {
    let mut fields = 1;
    let mut in_quotes = false;
    let mut pending_quote = false;
    for &b in bytes {
        if pending_quote {
            pending_quote = false;
            if b == QUOTE {
                continue;
            }
            in_quotes = false;
        }
        if in_quotes {
            if b == QUOTE {
                pending_quote = true;
            }
        } else if b == QUOTE {
            in_quotes = true;
        } else if b == DELIMITER {
            fields += 1;
        } else if b == b'\n' {
            break;
        }
    }
    fields
}

/// Turns one chunk's bytes into a [`Batch`] of records.
pub struct RecordParser {
    expected_fields: usize,
    policy: MalformedPolicy,
}

impl RecordParser {
    pub fn new(expected_fields: usize, policy: MalformedPolicy) -> Self {
        Self {
            expected_fields,
            policy,
        }
    }

    /// Parse a whole chunk. The chunk is consumed; records only carry its
    /// sequence number.
    pub fn parse_chunk(&self, chunk: Chunk) -> Batch {
        let bytes = &chunk.bytes[..];
        let mut batch = Batch {
            seq: chunk.seq,
            records: Vec::new(),
            seen: 0,
            malformed: 0,
        };

        let mut fields: Record = Vec::new();
        let mut field_start = 0usize;
        let mut record_start = 0usize;
        let mut in_quotes = false;
        let mut pending_quote = false;
        let mut pos = 0usize;

        while pos < bytes.len() {
            if pending_quote {
                pending_quote = false;
                if bytes[pos] == QUOTE {
                    pos += 1;
                    continue;
                }
                in_quotes = false;
            }
            if in_quotes {
                if bytes[pos] == QUOTE {
                    pending_quote = true;
                }
                pos += 1;
                continue;
            }
            match bytes[pos] {
                QUOTE => {
                    in_quotes = true;
                    pos += 1;
                }
                DELIMITER => {
                    fields.push(extract_field(&bytes[field_start..pos]));
                    pos += 1;
                    field_start = pos;
                }
                b'\n' => {
                    let mut end = pos;
                    // CRLF: the carriage return belongs to the separator.
                    if end > field_start && bytes[end - 1] == b'\r' {
                        end -= 1;
                    }
                    fields.push(extract_field(&bytes[field_start..end]));
                    self.finish_record(
                        &mut batch,
                        std::mem::take(&mut fields),
                        chunk.offset + record_start as u64,
                        false,
                    );
                    pos += 1;
                    field_start = pos;
                    record_start = pos;
                }
                _ => pos += 1,
            }
        }

        // Tail without a trailing newline: still a record. Only the final
        // chunk of the input can reach here with an open quote.
        if field_start < bytes.len() || !fields.is_empty() {
            fields.push(extract_field(&bytes[field_start..]));
            let unterminated = in_quotes && !pending_quote;
            self.finish_record(
                &mut batch,
                std::mem::take(&mut fields),
                chunk.offset + record_start as u64,
                unterminated,
            );
        }

        batch
    }

    /// Apply the malformed-record policy to a completed record.
    fn finish_record(&self, batch: &mut Batch, record: Record, offset: u64, unterminated: bool) {
        batch.seen += 1;
        let wrong_width = record.len() != self.expected_fields;
        if unterminated || wrong_width {
            batch.malformed += 1;
            if unterminated {
                warn!(offset, "unterminated quoted field at end of input");
            } else {
                warn!(
                    offset,
                    got = record.len(),
                    expected = self.expected_fields,
                    "malformed record: wrong field count"
                );
            }
            if self.policy == MalformedPolicy::Skip {
                return;
            }
        }
        batch.records.push(record);
    }
}

/// Unwrap and unescape one raw field.
///
/// A field counts as quoted only when it begins and ends with a quote;
/// doubled quotes inside collapse to a single literal quote. All other
/// bytes, delimiters included, pass through untouched.
fn extract_field(raw: &[u8]) -> Field {
    if raw.len() >= 2 && raw[0] == QUOTE && raw[raw.len() - 1] == QUOTE {
        let inner = &raw[1..raw.len() - 1];
        return Field::new(unescape(inner), true);
    }
    // Unterminated quoted field: strip the opening quote so the partial
    // content survives under the keep-partial policy.
    if !raw.is_empty() && raw[0] == QUOTE {
        return Field::new(unescape(&raw[1..]), true);
    }
    Field::new(raw.to_vec(), false)
}

/// Collapse doubled quotes to single literal quotes.
fn unescape(inner: &[u8]) -> Vec<u8> {
    if memchr(QUOTE, inner).is_none() {
        return inner.to_vec();
    }
    let mut out = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        out.push(inner[i]);
        if inner[i] == QUOTE && i + 1 < inner.len() && inner[i + 1] == QUOTE {
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}
