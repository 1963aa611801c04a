//! Tests for CSV re-serialization.

use crate::record::Field;
use crate::writer::write_record;

fn serialize(fields: &[(&str, bool)]) -> String {
    let record = fields
        .iter()
        .map(|(v, quoted)| Field::new(v.as_bytes().to_vec(), *quoted))
        .collect();
    let mut out = Vec::new();
    write_record(&mut out, &record).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn plain_fields_are_not_quoted() {
    assert_eq!(serialize(&[("a", false), ("b", false)]), "a,b\n");
}

#[test]
fn source_quoting_is_not_preserved_when_unneeded() {
    // A field quoted in the source but containing nothing special is
    // written bare; quoting is re-applied only to fields that require it.
    assert_eq!(serialize(&[("a", true), ("b", false)]), "a,b\n");
}

#[test]
fn delimiter_forces_quoting() {
    assert_eq!(serialize(&[("x,y", false)]), "\"x,y\"\n");
}

#[test]
fn quote_is_doubled_and_forces_quoting() {
    assert_eq!(serialize(&[("say \"hi\"", false)]), "\"say \"\"hi\"\"\"\n");
}

#[test]
fn record_separators_force_quoting() {
    assert_eq!(serialize(&[("a\nb", false)]), "\"a\nb\"\n");
    assert_eq!(serialize(&[("a\rb", false)]), "\"a\rb\"\n");
}

#[test]
fn empty_record_is_just_a_newline() {
    assert_eq!(serialize(&[("", false)]), "\n");
}
