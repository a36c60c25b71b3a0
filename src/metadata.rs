//! Offline decoding of contract metadata.
//!
//! Useful when `metadata.json` was obtained without the repository,
//! e.g. from a build directory or an IPFS gateway.

use std::{fs, io, path::Path};
use thiserror::Error;

use crate::api::Metadata;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("[E010] Malformed metadata document: {0}\n\nSuggestions:\n  • Check that the input is the compiler's metadata.json\n  • Make sure the document isn't truncated")]
    Malformed(#[from] serde_json::Error),

    #[error("[E011] Failed to read metadata file: {0}")]
    Io(#[from] io::Error),
}

impl MetadataError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "E010",
            Self::Io(_) => "E011",
        }
    }
}

/// # Errors
///
/// Fails if `data` isn't JSON or doesn't have the metadata shape.
pub fn parse_metadata(data: &str) -> Result<Metadata, MetadataError> {
    Ok(serde_json::from_str(data)?)
}

/// # Errors
///
/// Fails if the file can't be read or isn't valid metadata.
pub fn read_metadata(path: impl AsRef<Path>) -> Result<Metadata, MetadataError> {
    let data = fs::read_to_string(path)?;
    parse_metadata(&data)
}
