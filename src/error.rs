//! Error types for the conversion boundary.
//!
//! Parsing and layout never fail; only reading input and writing the
//! document can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML writer failed to emit an event.
    #[error("Failed to render document: {0}")]
    Render(#[from] std::io::Error),

    #[error("Rendered document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("No tables found")]
    NoTables,
}
