//! Per-run configuration settings.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::projector::Projection;

/// Default I/O buffer size in bytes (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Policy for records whose field count differs from the established
/// column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Count the record and drop it from the output.
    #[default]
    Skip,
    /// Count the record and pass it through with the fields it has.
    KeepPartial,
}

/// Immutable settings for one pipeline run.
///
/// Established before the pipeline starts; invalid values are rejected by
/// [`Config::validate`] before any byte of input is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Read buffer size in bytes; also the target chunk size.
    pub buffer_size: usize,
    /// Number of parser workers (`None` = number of available cores).
    pub threads: Option<usize>,
    /// Optional column projection applied to every record.
    pub projection: Option<Projection>,
    /// Handling of records with the wrong field count.
    pub malformed: MalformedPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            threads: None,
            projection: None,
            malformed: MalformedPolicy::default(),
        }
    }
}

impl Config {
    /// Check the configuration for fatal errors.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(PipelineError::Config(
                "buffer size must be at least 1 byte".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(PipelineError::Config(
                "thread count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Effective number of parser workers.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}
