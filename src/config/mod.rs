//! Run configuration.
//!
//! This module provides:
//! - `Config`: immutable per-run settings, validated before processing starts
//! - `MalformedPolicy`: what to do with records of the wrong field count

mod spec;

pub use spec::{Config, DEFAULT_BUFFER_SIZE, MalformedPolicy};
