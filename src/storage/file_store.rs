//! FileStore
//!
//! Stateless bank/key store over a directory tree.
//!
//! ## Responsibilities
//! - Map `(bank, key)` to `<root>/<bank>/<key>.<ext>`
//! - Write entries through temp file + atomic rename
//! - Fall back to compound `<root>/<bank>.<ext>` files on fetch
//! - Report absence as a sentinel, never as an error

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::serializer::{Bincode, Serializer};

use super::address::{self, TEMP_PREFIX};
use super::atomic::{atomic_write, ensure_dir};

/// Name reported in `StorageId::backend`
pub const BACKEND_NAME: &str = "localfs";

/// Identifies where a store's data lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageId {
    pub backend: &'static str,
    pub root: PathBuf,
}

/// Filesystem-backed key-value cache
///
/// ## Concurrency:
/// - No locks and no interior state; every method takes `&self`
/// - Readers never observe a partial entry because writers only rename
///   complete temp files into place
/// - Concurrent `store` calls to one key are last-rename-wins
#[derive(Debug, Clone)]
pub struct FileStore<S = Bincode> {
    /// Store configuration (cache root, write options)
    config: Config,

    /// Value encoding; also fixes the entry file extension
    serializer: S,
}

impl FileStore<Bincode> {
    /// Create a store with the default bincode serializer
    pub fn new(config: Config) -> Self {
        Self::with_serializer(config, Bincode)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified cache directory
    pub fn open_path(path: &Path) -> Self {
        Self::new(Config::builder().cache_dir(path).build())
    }
}

impl<S: Serializer> FileStore<S> {
    /// Create a store with a custom serializer
    pub fn with_serializer(config: Config, serializer: S) -> Self {
        Self { config, serializer }
    }

    /// Store `value` under `(bank, key)`
    ///
    /// Steps:
    /// 1. Create the bank directory (existing is fine)
    /// 2. Encode the value in memory
    /// 3. Write it to a temp file beside the target
    /// 4. Rename the temp file over `<bank>/<key>.<ext>`
    pub fn store<T: Serialize + ?Sized>(&self, bank: &str, key: &str, value: &T) -> Result<()> {
        let target = address::key_file(self.root(), bank, key, self.serializer.extension())?;
        let dir = address::bank_dir(self.root(), bank)?;

        ensure_dir(&dir)?;

        let bytes = self.serializer.encode(value)?;
        atomic_write(&dir, &target, &bytes, self.config.sync_writes)?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(())
    }

    /// Fetch the value stored under `(bank, key)`
    ///
    /// Search order:
    /// 1. Per-key file `<bank>/<key>.<ext>`
    /// 2. Compound file `<bank>.<ext>`, looking `key` up in its mapping
    ///
    /// Returns:
    /// - `Ok(Some(value))`: found in either location
    /// - `Ok(None)`: neither file exists
    /// - `Err(MissingKey)`: the compound file exists but lacks `key`
    pub fn fetch<T: DeserializeOwned>(&self, bank: &str, key: &str) -> Result<Option<T>> {
        let ext = self.serializer.extension();

        let key_path = address::key_file(self.root(), bank, key, ext)?;
        if key_path.is_file() {
            let bytes = read_file(&key_path)?;
            return self.decode(&key_path, &bytes).map(Some);
        }

        // The bank may itself be a file holding several keys
        let compound_path = address::compound_file(self.root(), bank, ext)?;
        if compound_path.is_file() {
            let bytes = read_file(&compound_path)?;
            let mut mapping: HashMap<String, T> = self.decode(&compound_path, &bytes)?;
            return match mapping.remove(key) {
                Some(value) => Ok(Some(value)),
                None => Err(CacheError::MissingKey {
                    path: compound_path,
                    key: key.to_string(),
                }),
            };
        }

        tracing::debug!("Cache file {} does not exist", key_path.display());
        Ok(None)
    }

    /// Last modification time of `(bank, key)` in seconds since the epoch
    ///
    /// Only the per-key file is consulted; a value reachable through a
    /// compound file reports `None` here even though `fetch` returns it.
    pub fn updated(&self, bank: &str, key: &str) -> Result<Option<i64>> {
        let key_path = address::key_file(self.root(), bank, key, self.serializer.extension())?;

        if !key_path.is_file() {
            tracing::warn!("Cache file {} does not exist", key_path.display());
            return Ok(None);
        }

        let metadata_err = |source: io::Error| CacheError::Metadata {
            path: key_path.clone(),
            source,
        };

        let modified = fs::metadata(&key_path)
            .and_then(|m| m.modified())
            .map_err(metadata_err)?;

        let secs = match modified.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };

        Ok(Some(secs))
    }

    /// Remove a whole bank, or a single key within it
    ///
    /// Returns `Ok(false)` when there is nothing to remove. Compound files
    /// are never removed by key.
    pub fn flush(&self, bank: &str, key: Option<&str>) -> Result<bool> {
        let (target, removed) = match key {
            None => {
                let target = address::bank_dir(self.root(), bank)?;
                if !target.is_dir() {
                    return Ok(false);
                }
                let removed = fs::remove_dir_all(&target);
                (target, removed)
            }
            Some(key) => {
                let target =
                    address::key_file(self.root(), bank, key, self.serializer.extension())?;
                if !target.is_file() {
                    return Ok(false);
                }
                let removed = fs::remove_file(&target);
                (target, removed)
            }
        };

        removed.map_err(|source| CacheError::Remove {
            path: target.clone(),
            source,
        })?;

        tracing::debug!("Flushed {}", target.display());
        Ok(true)
    }

    /// List the entries of a bank
    ///
    /// Entry files are reported by bare key, sub-banks by directory name.
    /// Order follows the filesystem listing.
    pub fn list(&self, bank: &str) -> Result<Vec<String>> {
        let base = address::bank_dir(self.root(), bank)?;
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let list_err = |source: io::Error| CacheError::ListDir {
            path: base.clone(),
            source,
        };

        let ext = self.serializer.extension();
        let mut keys = Vec::new();

        for entry in fs::read_dir(&base).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            // In-flight or abandoned writes
            if name.starts_with(TEMP_PREFIX) {
                continue;
            }

            keys.push(address::strip_extension(&name, ext).to_string());
        }

        tracing::trace!("Listed {} entries in {}", keys.len(), base.display());
        Ok(keys)
    }

    /// Check whether a bank, or a key within it, exists
    ///
    /// Only the per-key file counts; compound files are not consulted.
    /// Never fails: a malformed bank or key cannot exist on disk and
    /// reads as `false`, as does any filesystem failure.
    pub fn contains(&self, bank: &str, key: Option<&str>) -> bool {
        let probe = match key {
            None => address::bank_dir(self.root(), bank).map(|dir| dir.is_dir()),
            Some(key) => address::key_file(self.root(), bank, key, self.serializer.extension())
                .map(|file| file.is_file()),
        };
        probe.unwrap_or(false)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the cache root
    pub fn root(&self) -> &Path {
        &self.config.cache_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the serializer
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Identify the data location of this store
    pub fn storage_id(&self) -> StorageId {
        StorageId {
            backend: BACKEND_NAME,
            root: self.config.cache_dir.clone(),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn decode<T: DeserializeOwned>(&self, path: &Path, bytes: &[u8]) -> Result<T> {
        self.serializer.decode(bytes).map_err(|e| CacheError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl<S: Serializer + Clone> FileStore<S> {
    /// A handle over a different cache root with the same serializer and
    /// write options
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        let mut config = self.config.clone();
        config.cache_dir = root.into();
        Self::with_serializer(config, self.serializer.clone())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CacheError::Read {
        path: path.to_path_buf(),
        source,
    })
}
