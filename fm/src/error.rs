//! Migration error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a single migration pipeline
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("YAML serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
