//! CSV re-serialization.
//!
//! Output mirrors the input dialect: comma delimiter, `\n` record
//! terminator, quoting re-applied only to fields that require it (fields
//! containing a delimiter, quote, or record-separator byte). Quotes inside
//! quoted output are doubled.

use std::io::{self, Write};

use memchr::{memchr, memchr3};

use crate::record::{DELIMITER, Field, QUOTE, Record};

/// Whether a field must be quoted on output.
fn needs_quoting(data: &[u8]) -> bool {
    memchr3(DELIMITER, QUOTE, b'\n', data).is_some() || memchr(b'\r', data).is_some()
}

fn write_field(out: &mut dyn Write, field: &Field) -> io::Result<()> {
    if !needs_quoting(&field.data) {
        return out.write_all(&field.data);
    }
    out.write_all(&[QUOTE])?;
    let mut rest = &field.data[..];
    while let Some(idx) = memchr(QUOTE, rest) {
        out.write_all(&rest[..=idx])?;
        out.write_all(&[QUOTE])?;
        rest = &rest[idx + 1..];
    }
    out.write_all(rest)?;
    out.write_all(&[QUOTE])
}

/// Serialize one record, terminated with `\n`.
pub fn write_record(out: &mut dyn Write, record: &Record) -> io::Result<()> {
    for (i, field) in record.iter().enumerate() {
        if i > 0 {
            out.write_all(&[DELIMITER])?;
        }
        write_field(out, field)?;
    }
    out.write_all(b"\n")
}
