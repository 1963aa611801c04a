//! Internal test modules.

use crate::config::Config;
use crate::io::{MemorySink, MemorySource};
use crate::pipeline::run;
use crate::stats::RunSummary;

mod io_tests;
mod splitter_tests;
mod stats_tests;
mod writer_tests;

/// Run the full pipeline over an in-memory input, returning the output
/// bytes as a string plus the run summary.
pub(crate) fn run_to_string(input: &str, config: &Config) -> (String, RunSummary) {
    let source = Box::new(MemorySource::from_string("test", input, config.buffer_size));
    let sink = MemorySink::new();
    let summary = run(source, sink.writer(), config).expect("pipeline run should succeed");
    (sink.contents_string(), summary)
}

/// A config with a small buffer and explicit thread count, so tests can
/// force chunk boundaries into interesting places.
pub(crate) fn small_config(buffer_size: usize, threads: usize) -> Config {
    Config {
        buffer_size,
        threads: Some(threads),
        ..Config::default()
    }
}
