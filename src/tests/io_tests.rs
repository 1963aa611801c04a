//! Tests for byte sources and sinks.

use std::fs;
use std::io::{Cursor, Write};

use crate::io::{ByteSource, MemorySink, MemorySource, ReaderSource, resolve_input, resolve_output};

fn drain(source: &mut dyn ByteSource, max_range: usize) -> Vec<u8> {
    let mut all = Vec::new();
    while let Some(range) = source.next_range().unwrap() {
        assert!(range.len() <= max_range, "range exceeds buffer size");
        assert!(!range.is_empty(), "ranges are never empty");
        all.extend_from_slice(range);
    }
    all
}

#[test]
fn reader_source_yields_bounded_ranges() {
    let data = b"0123456789abcdef!".to_vec();
    let mut source = ReaderSource::new("cursor", Cursor::new(data.clone()), 4);
    assert_eq!(source.id(), "cursor");
    assert_eq!(drain(&mut source, 4), data);
}

#[test]
fn memory_source_yields_bounded_ranges() {
    let data = b"hello world".to_vec();
    let mut source = MemorySource::new("mem", data.clone(), 3);
    assert_eq!(drain(&mut source, 3), data);
}

#[test]
fn memory_sink_collects_writes() {
    let sink = MemorySink::new();
    let mut writer = sink.writer();
    writer.write_all(b"abc").unwrap();
    writer.write_all(b"def").unwrap();
    drop(writer);
    assert_eq!(sink.contents(), b"abcdef");
    assert_eq!(sink.contents_string(), "abcdef");
}

#[test]
fn resolve_input_reads_files_through_the_same_interface() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.csv");
    fs::write(&path, b"a,b\nc,d\n").unwrap();

    let mut source = resolve_input(Some(&path), 4).unwrap();
    assert_eq!(drain(&mut *source, 4), b"a,b\nc,d\n");
}

#[test]
fn resolve_input_missing_file_reports_path() {
    let err = resolve_input(Some(std::path::Path::new("/no/such/file.csv")), 64).unwrap_err();
    assert!(err.to_string().contains("/no/such/file.csv"));
}

#[test]
fn resolve_output_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    {
        let mut sink = resolve_output(Some(&path), 64).unwrap();
        sink.write_all(b"x,y\n").unwrap();
        sink.flush().unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"x,y\n");
}

#[cfg(feature = "mmap")]
mod mmap {
    use super::drain;
    use crate::io::MmapSource;
    use std::fs;

    #[test]
    fn mmap_source_yields_bounded_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, b"a,b\nc,d\n").unwrap();

        let file = fs::File::open(&path).unwrap();
        let mut source =
            MmapSource::try_new("input.csv", &file, 3).expect("regular file should map");
        assert_eq!(drain(&mut source, 3), b"a,b\nc,d\n");
    }

    #[test]
    fn empty_file_falls_back_to_buffered_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, b"").unwrap();

        let file = fs::File::open(&path).unwrap();
        assert!(MmapSource::try_new("empty.csv", &file, 64).is_none());
    }
}
