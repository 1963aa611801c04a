//! The processing pipeline: split, dispatch, parse, reassemble, write.
//!
//! Thread layout: one splitter thread (the sole owner of quote-state
//! continuity), a fixed pool of parser workers, and one writer thread (the
//! sole point of sink mutation). Bounded channels on both sides of the
//! worker pool realize backpressure: the splitter blocks when all workers
//! are busy and the in-flight queue is full, so memory stays at a small
//! constant multiple of `buffer_size * thread_count` regardless of input
//! size.
//!
//! Output order is restored from chunk sequence numbers alone: the writer
//! keeps an expected-next counter and parks early batches in a holding map
//! until the gap closes.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::{debug, info, warn};

use crate::config::{Config, MalformedPolicy};
use crate::error::{PipelineError, Result};
use crate::io::ByteSource;
use crate::parser::{RecordParser, count_record_fields};
use crate::projector::Projection;
use crate::record::{Batch, Chunk};
use crate::splitter::{QuoteState, RecordSplitter};
use crate::stats::{RunStats, RunSummary};
use crate::writer::write_record;

/// How many chunks (and batches) may be in flight per worker.
const INFLIGHT_PER_WORKER: usize = 2;

/// Progress log interval, in records written.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Run the pipeline: read CSV from `source`, optionally project columns,
/// and write the result to `sink` in input order.
///
/// Returns the run statistics on success. Fatal errors (I/O, configuration,
/// sink write failures) abort the run; malformed records are counted and
/// handled per [`Config::malformed`] without aborting.
pub fn run(
    source: Box<dyn ByteSource>,
    sink: Box<dyn Write + Send>,
    config: &Config,
) -> Result<RunSummary> {
    config.validate()?;

    let workers = config.worker_count();
    let capacity = workers * INFLIGHT_PER_WORKER;
    let stats = Arc::new(RunStats::new());
    let cancel = Arc::new(AtomicBool::new(false));
    let expected_fields: Arc<OnceLock<usize>> = Arc::new(OnceLock::new());

    info!(
        workers,
        buffer_size = config.buffer_size,
        output_columns = config.projection.as_ref().map(Projection::width),
        "starting pipeline run"
    );

    let (chunk_tx, chunk_rx) = bounded::<Chunk>(capacity);
    let (batch_tx, batch_rx) = bounded::<Batch>(capacity);

    let splitter_handle = {
        let stats = stats.clone();
        let cancel = cancel.clone();
        let expected_fields = expected_fields.clone();
        let buffer_size = config.buffer_size;
        thread::spawn(move || split_loop(source, chunk_tx, buffer_size, expected_fields, stats, cancel))
    };

    let mut worker_handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let chunk_rx = chunk_rx.clone();
        let batch_tx = batch_tx.clone();
        let stats = stats.clone();
        let cancel = cancel.clone();
        let expected_fields = expected_fields.clone();
        let policy = config.malformed;
        worker_handles.push(thread::spawn(move || {
            worker_loop(chunk_rx, batch_tx, expected_fields, policy, stats, cancel)
        }));
    }
    drop(chunk_rx);
    drop(batch_tx);

    let writer_handle = {
        let stats = stats.clone();
        let cancel = cancel.clone();
        let projection = config.projection.clone();
        thread::spawn(move || write_loop(batch_rx, sink, projection, stats, cancel))
    };

    let split_result = splitter_handle
        .join()
        .map_err(|_| PipelineError::WorkerPanic)?;
    for handle in worker_handles {
        handle.join().map_err(|_| PipelineError::WorkerPanic)?;
    }
    let write_result = writer_handle
        .join()
        .map_err(|_| PipelineError::WorkerPanic)?;

    let outcome = split_result.and(write_result);
    let summary = stats.summary();
    if let Err(e) = outcome {
        debug!(
            bytes_read = summary.bytes_read,
            records_written = summary.records_written,
            "run aborted; partial statistics flushed"
        );
        return Err(e);
    }

    info!(
        records_read = summary.records_read,
        records_written = summary.records_written,
        malformed = summary.malformed_records,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "pipeline run complete"
    );
    Ok(summary)
}

/// Splitter thread: read byte ranges, emit record-aligned chunks.
fn split_loop(
    mut source: Box<dyn ByteSource>,
    chunk_tx: Sender<Chunk>,
    buffer_size: usize,
    expected_fields: Arc<OnceLock<usize>>,
    stats: Arc<RunStats>,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    let source_id = source.id().to_string();
    let mut splitter = RecordSplitter::new(buffer_size);

    loop {
        if cancel.load(Ordering::Relaxed) {
            return Ok(());
        }
        match source.next_range() {
            Err(e) => {
                cancel.store(true, Ordering::Relaxed);
                return Err(PipelineError::Read {
                    source_id,
                    source: e,
                });
            }
            Ok(None) => break,
            Ok(Some(range)) => {
                stats.add_bytes_read(range.len() as u64);
                let chunk = splitter.push(range);
                if let Some(chunk) = chunk {
                    if dispatch(&chunk_tx, chunk, &expected_fields).is_err() {
                        // Downstream hung up (cancellation); stop emitting.
                        return Ok(());
                    }
                }
            }
        }
    }

    if splitter.state() != QuoteState::Unquoted {
        warn!(source = %source_id, "input ended inside a quoted field");
    }
    if let Some(chunk) = splitter.finish() {
        let _ = dispatch(&chunk_tx, chunk, &expected_fields);
    }
    Ok(())
}

/// Send one chunk, establishing the expected column count from the very
/// first record before anything is dispatched.
fn dispatch(
    chunk_tx: &Sender<Chunk>,
    chunk: Chunk,
    expected_fields: &OnceLock<usize>,
) -> std::result::Result<(), crossbeam_channel::SendError<Chunk>> {
    if chunk.seq == 0 {
        let _ = expected_fields.set(count_record_fields(&chunk.bytes));
    }
    chunk_tx.send(chunk)
}

/// Parser worker: pull chunks, parse, push batches. Workers never
/// communicate with each other.
fn worker_loop(
    chunk_rx: Receiver<Chunk>,
    batch_tx: Sender<Batch>,
    expected_fields: Arc<OnceLock<usize>>,
    policy: MalformedPolicy,
    stats: Arc<RunStats>,
    cancel: Arc<AtomicBool>,
) {
    while let Ok(chunk) = chunk_rx.recv() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        // Set by the splitter before chunk 0 was dispatched; the fallback
        // can only run if this worker somehow races the first dispatch.
        let expected = *expected_fields.get_or_init(|| count_record_fields(&chunk.bytes));
        let parser = RecordParser::new(expected, policy);
        let batch = parser.parse_chunk(chunk);
        stats.add_records_read(batch.seen);
        stats.add_malformed_records(batch.malformed);
        if batch_tx.send(batch).is_err() {
            break;
        }
    }
}

/// Writer thread: restore input order from sequence numbers and serialize
/// exactly once. Sole point of output-stream mutation.
fn write_loop(
    batch_rx: Receiver<Batch>,
    mut sink: Box<dyn Write + Send>,
    projection: Option<Projection>,
    stats: Arc<RunStats>,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    let mut pending: BTreeMap<u64, Batch> = BTreeMap::new();
    let mut next_seq = 0u64;
    let mut written = 0u64;

    while let Ok(batch) = batch_rx.recv() {
        pending.insert(batch.seq, batch);
        while let Some(batch) = pending.remove(&next_seq) {
            if let Err(e) = write_batch(&mut *sink, &batch, projection.as_ref(), &stats, &mut written)
            {
                cancel.store(true, Ordering::Relaxed);
                return Err(PipelineError::Write(e));
            }
            next_seq += 1;
        }
    }

    if let Err(e) = sink.flush() {
        cancel.store(true, Ordering::Relaxed);
        return Err(PipelineError::Write(e));
    }
    Ok(())
}

fn write_batch(
    sink: &mut dyn Write,
    batch: &Batch,
    projection: Option<&Projection>,
    stats: &RunStats,
    written: &mut u64,
) -> std::io::Result<()> {
    for record in &batch.records {
        match projection {
            Some(p) => write_record(sink, &p.apply(record))?,
            None => write_record(sink, record)?,
        }
        stats.add_records_written(1);
        *written += 1;
        if *written % PROGRESS_INTERVAL == 0 {
            debug!(records = *written, "progress");
        }
    }
    Ok(())
}
