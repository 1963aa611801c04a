//! Column projection: selection and reordering of fields by 1-based index.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::record::{Field, Record};

/// An ordered list of column selections, resolved once before processing
/// begins and applied identically to every record (header row included).
///
/// Indices are 1-based in user-facing form; duplicates and reordering are
/// permitted. An index that is out of range for a particular record yields
/// an empty field in its position rather than an error, since row-to-row
/// column counts may vary in malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Zero-based indices, in output order.
    indices: Vec<usize>,
}

impl Projection {
    /// Build a projection from 1-based indices.
    ///
    /// Fails with a configuration error on an empty list or an index of 0.
    pub fn from_one_based(indices: &[usize]) -> Result<Self> {
        if indices.is_empty() {
            return Err(PipelineError::Config(
                "field selection must name at least one column".into(),
            ));
        }
        let mut zero_based = Vec::with_capacity(indices.len());
        for &idx in indices {
            if idx == 0 {
                return Err(PipelineError::Config(
                    "field indices are 1-based; 0 is not a valid column".into(),
                ));
            }
            zero_based.push(idx - 1);
        }
        Ok(Self {
            indices: zero_based,
        })
    }

    /// Parse a comma-separated list of 1-based indices, e.g. `"3,1"`.
    pub fn parse(list: &str) -> Result<Self> {
        let mut indices = Vec::new();
        for part in list.split(',') {
            let idx: usize = part.trim().parse().map_err(|_| {
                PipelineError::Config(format!("invalid field index: {part:?}"))
            })?;
            indices.push(idx);
        }
        Self::from_one_based(&indices)
    }

    /// Number of output columns this projection produces.
    pub fn width(&self) -> usize {
        self.indices.len()
    }

    /// Rewrite a record to the selected fields in the requested order.
    ///
    /// Out-of-range indices produce empty fields.
    pub fn apply(&self, record: &Record) -> Record {
        self.indices
            .iter()
            .map(|&idx| record.get(idx).cloned().unwrap_or_else(Field::empty))
            .collect()
    }
}
