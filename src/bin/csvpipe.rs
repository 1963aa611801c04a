//! Command-line interface for the csvpipe engine.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;

use csvpipe::{
    Config, MalformedPolicy, Projection, Result, RunSummary, resolve_input, resolve_output, run,
};

#[derive(Parser)]
#[command(
    name = "csvpipe",
    version,
    about = "High-performance CSV processor for large files (up to 100GB)",
    long_about = "A memory-efficient, parallel CSV processor designed to handle very large \
                  files with constant memory usage and input-order output."
)]
struct Cli {
    /// Input CSV file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Select specific fields (comma-separated, 1-based indexing)
    #[arg(short, long, value_delimiter = ',')]
    fields: Option<Vec<usize>>,

    /// Buffer size in bytes (default: 64KB)
    #[arg(long, default_value_t = csvpipe::DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Number of worker threads (default: auto-detect)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Pass malformed records through instead of skipping them
    #[arg(long)]
    keep_partial: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show processing statistics
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(summary) => {
            if cli.stats {
                print_stats(&summary);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn execute(cli: &Cli) -> Result<RunSummary> {
    let projection = match &cli.fields {
        Some(fields) => Some(Projection::from_one_based(fields)?),
        None => None,
    };
    let config = Config {
        buffer_size: cli.buffer_size,
        threads: cli.threads,
        projection,
        malformed: if cli.keep_partial {
            MalformedPolicy::KeepPartial
        } else {
            MalformedPolicy::Skip
        },
    };

    info!(?config, "starting csvpipe");
    let source = resolve_input(cli.input.as_deref(), config.buffer_size)?;
    let sink = resolve_output(cli.output.as_deref(), config.buffer_size)?;
    run(source, sink, &config)
}

/// Render the run summary to stderr.
fn print_stats(summary: &RunSummary) {
    eprintln!("\n=== Processing Statistics ===");
    eprintln!("Bytes read:        {}", summary.bytes_read);
    eprintln!("Records read:      {}", summary.records_read);
    eprintln!("Records written:   {}", summary.records_written);
    eprintln!("Malformed records: {}", summary.malformed_records);
    eprintln!("Elapsed:           {:?}", summary.elapsed);
    eprintln!("Records/second:    {:.2}", summary.records_per_second());
    eprintln!(
        "Throughput:        {:.2} MB/s",
        summary.bytes_per_second() / (1024.0 * 1024.0)
    );
}
