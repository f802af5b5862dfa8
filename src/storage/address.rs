//! Bank/key addressing
//!
//! Maps `(bank, key)` pairs onto paths under the cache root and back.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{CacheError, Result};

/// Prefix of in-flight temp files inside a bank directory
///
/// Keys may not start with it, and `list` never reports names carrying it.
pub const TEMP_PREFIX: &str = ".~tmp";

/// Join path segments onto a base
pub fn join_segments<I, P>(base: &Path, segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut path = base.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path
}

/// Normalize a bank name into a relative path
///
/// `.` is dropped, `..` pops the previous component and root/prefix
/// components are ignored. The result is never empty and never climbs
/// above the cache root.
pub fn normalize_bank(bank: &str) -> Result<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(bank).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(CacheError::InvalidAddress(format!(
                        "bank {:?} escapes the cache root",
                        bank
                    )));
                }
            }
        }
    }

    if parts.is_empty() {
        return Err(CacheError::InvalidAddress(format!(
            "bank {:?} does not name a directory",
            bank
        )));
    }

    Ok(parts.into_iter().collect())
}

/// Reject keys that could not be stored as a single file in a bank
pub fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "must not be empty"
    } else if key == "." || key == ".." {
        "must not be a relative directory name"
    } else if key.contains('/') || key.contains('\\') {
        "must not contain a path separator"
    } else if key.starts_with(TEMP_PREFIX) {
        "must not use the temp file prefix"
    } else {
        return Ok(());
    };

    Err(CacheError::InvalidAddress(format!("key {:?} {}", key, reason)))
}

/// `<root>/<bank>`
pub fn bank_dir(root: &Path, bank: &str) -> Result<PathBuf> {
    Ok(join_segments(root, [normalize_bank(bank)?]))
}

/// `<root>/<bank>/<key>.<ext>`
pub fn key_file(root: &Path, bank: &str, key: &str, extension: &str) -> Result<PathBuf> {
    validate_key(key)?;
    let file_name = PathBuf::from(format!("{}.{}", key, extension));
    Ok(join_segments(root, [normalize_bank(bank)?, file_name]))
}

/// `<root>/<bank>.<ext>`, the compound file for a bank
///
/// The extension is appended to the last component, never substituted, so
/// a bank named `v1.2` maps to `v1.2.p`.
pub fn compound_file(root: &Path, bank: &str, extension: &str) -> Result<PathBuf> {
    let mut path: OsString = bank_dir(root, bank)?.into_os_string();
    path.push(".");
    path.push(extension);
    Ok(PathBuf::from(path))
}

/// Strip `.<ext>` from a directory entry name, else pass it through
///
/// The stem must stay non-empty: a file named exactly `.p` is returned
/// unchanged.
pub fn strip_extension<'a>(name: &'a str, extension: &str) -> &'a str {
    let Some(stem) = name.strip_suffix(extension) else {
        return name;
    };
    match stem.strip_suffix('.') {
        Some(bare) if !bare.is_empty() => bare,
        _ => name,
    }
}
