//! Versioned JSON state files, written atomically.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

/// State persisted with a format version.
pub trait Versioned {
    const VERSION: u32;

    fn version(&self) -> u32;
}

/// Load state from a JSON file
///
/// If the file doesn't exist, returns `T::default()`.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_state<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned + Default + Versioned,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no {} file yet, starting empty", what);
        return Ok(T::default());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file at {}", what, path.display()))?;

    let state: T = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load {} from {}", what, path.display()))?;

    if state.version() != T::VERSION {
        anyhow::bail!("Unsupported {} version: {}", what, state.version());
    }

    Ok(state)
}

/// Save state to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if it
/// doesn't exist.
pub fn save_state<T: Serialize>(path: &Path, state: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state)
        .with_context(|| format!("Failed to serialize {}", what))?;

    file.commit()
        .with_context(|| format!("Failed to save {} to {}", what, path.display()))?;

    tracing::debug!(path = %path.display(), "saved {}", what);
    Ok(())
}
