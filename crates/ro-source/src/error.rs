//! Source errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while obtaining raw running-order tables.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading a local HTML file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured URL is unusable.
    #[error("invalid source URL: {reason}")]
    InvalidUrl { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    /// A day plan label is not a `dd.mm.yyyy` date.
    #[error("invalid day label {label:?}: {source}")]
    InvalidDayLabel {
        label: String,
        #[source]
        source: chrono::ParseError,
    },
}
