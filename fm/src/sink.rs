//! YAML output
//!
//! Records are serialized in block style with keys in declaration order,
//! `null` for absent optional fields and UTF-8 text left unescaped.
//! Destinations are overwritten without backup.

use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{MigrateError, Result};

/// Render a record as YAML
pub fn to_yaml<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_yaml::to_string(record)?)
}

/// Write a record to `path`, replacing any existing file
pub fn write_yaml<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let content = to_yaml(record)?;
    fs::write(path, &content).map_err(|source| MigrateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
