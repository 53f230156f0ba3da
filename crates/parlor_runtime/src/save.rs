//! Save-file serialization using `MessagePack`.
//!
//! A save file is a serialized [`Snapshot`]: the mutable half of the
//! world plus score, hints, sequence state, and the turn counter.
//! Verb tables, hooks, and daemons are code, so they are rebuilt by
//! the game on load rather than stored.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use parlor_engine::Snapshot;
use parlor_foundation::{EngineError, Result};

/// Serializes a snapshot to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns [`EngineError::Save`] if serialization fails.
pub fn to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(snapshot).map_err(|e| EngineError::Save(e.to_string()))
}

/// Deserializes a snapshot from `MessagePack` bytes.
///
/// # Errors
///
/// Returns [`EngineError::Save`] if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Snapshot> {
    rmp_serde::from_slice(bytes).map_err(|e| EngineError::Save(e.to_string()))
}

/// Saves a snapshot to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be created or
/// written to, or [`EngineError::Save`] if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        EngineError::Io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(snapshot)?;

    writer.write_all(&bytes).map_err(|e| {
        EngineError::Io(format!(
            "failed to write to file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    writer.flush().map_err(|e| {
        EngineError::Io(format!(
            "failed to flush file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    Ok(())
}

/// Loads a snapshot from a file.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be read, or
/// [`EngineError::Save`] if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let file = File::open(path.as_ref()).map_err(|e| {
        EngineError::Io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        EngineError::Io(format!(
            "failed to read file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    from_bytes(&bytes)
}
