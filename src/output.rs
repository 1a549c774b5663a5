//! Output directory handling.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenerateError, Result};

/// Make sure `path` is a directory, creating it and its parents if missing.
///
/// Fails with [`GenerateError::NotADirectory`] when something other than a
/// directory already sits at `path`. New directories get mode `0o744` on Unix.
/// Returns the absolute, canonical form of `path`.
pub fn validate_output_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.exists() {
        if !path.is_dir() {
            return Err(GenerateError::NotADirectory(path.to_path_buf()));
        }
    } else {
        create_dir(path)?;
        debug!(path = %path.display(), "created output directory");
    }

    Ok(fs::canonicalize(path)?)
}

#[cfg(unix)]
fn create_dir(path: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o744)
        .create(path)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
