//! # localfs-cache
//!
//! A persistent key-value cache stored as a directory tree:
//! - Two-level `(bank, key)` addressing, banks may nest
//! - Atomic writes via same-directory temp file + rename
//! - Legacy compound bank files readable on fetch
//! - Stateless, lock-free facade safe across threads and processes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FileStore                             │
//! │      store / fetch / updated / flush / list / contains       │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!        ┌──────────────┐               ┌──────────────┐
//!        │  Serializer  │               │   Address    │
//!        │  (bincode)   │               │ (bank/key →  │
//!        └──────────────┘               │    path)     │
//!                                       └──────┬───────┘
//!                                              │
//!                                              ▼
//!                                      ┌──────────────┐
//!                                      │ Atomic write │
//!                                      │ (tmp+rename) │
//!                                      └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use localfs_cache::{Config, FileStore};
//!
//! let store = FileStore::new(Config::builder().cache_dir("/var/cache/app").build());
//! store.store("minions/host1", "data", &vec![1u32, 2, 3])?;
//!
//! let data: Option<Vec<u32>> = store.fetch("minions/host1", "data")?;
//! assert_eq!(data, Some(vec![1, 2, 3]));
//! # Ok::<(), localfs_cache::CacheError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod serializer;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CacheError, Result};
pub use config::Config;
pub use serializer::{Bincode, Serializer};
pub use storage::{FileStore, StorageId};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of localfs-cache
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
