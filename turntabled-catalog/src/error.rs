//! Catalog error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading the track catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read track catalog '{}': {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse track catalog '{}': {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("track catalog '{}' is empty", .0.display())]
    Empty(PathBuf),
}
