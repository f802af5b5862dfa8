//! Atomic file replacement
//!
//! Writes a payload to a temp file in the target's own directory and then
//! renames it over the target, so readers observe either the previous
//! complete file or the new complete file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

use crate::error::{CacheError, Result};

use super::address::TEMP_PREFIX;

/// Create `dir` and all missing ancestors
///
/// An already existing directory is success, which makes concurrent
/// creation of the same bank safe.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(CacheError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Atomically replace `target` with `bytes`
///
/// `target` must live directly in `dir` and `dir` must exist. The rename
/// replaces an existing target in a single step on every platform (on
/// Windows via `MoveFileExW` with `MOVEFILE_REPLACE_EXISTING`).
///
/// If anything fails the temp file is removed when its handle drops; a
/// killed process may leave one behind, which is never read.
pub(crate) fn atomic_write(dir: &Path, target: &Path, bytes: &[u8], sync: bool) -> Result<()> {
    let write_err = |source: io::Error| CacheError::Write {
        path: target.to_path_buf(),
        source,
    };

    let mut temp = Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(write_err)?;

    tracing::trace!("Writing {} bytes to {}", bytes.len(), temp.path().display());

    temp.write_all(bytes).map_err(write_err)?;
    temp.flush().map_err(write_err)?;
    if sync {
        temp.as_file().sync_all().map_err(write_err)?;
    }

    temp.persist(target).map_err(|e| write_err(e.error))?;

    Ok(())
}
