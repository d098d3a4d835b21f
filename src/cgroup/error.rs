//! Error types for container discovery and metric collection.

use std::path::PathBuf;

use thiserror::Error;

use crate::fsutil::CounterReadError;

/// Errors surfaced while discovering containers or reading their metrics.
///
/// Every variant is fatal for the current run: there is no per-container
/// skip/continue path, and the report is never partially emitted.
#[derive(Debug, Error)]
pub enum Error {
    /// The discovery path is missing or unreadable.
    #[error("failed to list containers under `{path}`: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A controller file for one container could not be read or parsed.
    #[error("failed to collect metrics for container '{container}': {source}")]
    Metric {
        container: String,
        #[source]
        source: CounterReadError,
    },

    #[error("error during I/O: {0}")]
    Io(#[from] std::io::Error),
}
