//! Storage Module
//!
//! Persistent bank/key storage laid out as a plain directory tree.
//!
//! ## Responsibilities
//! - Translate `(bank, key)` addresses to paths under the cache root
//! - Replace entry files atomically (temp file + rename)
//! - Enumerate, probe and remove banks and keys
//!
//! ## On-Disk Layout
//! ```text
//! {cache_dir}/
//! ├── minions/                 bank "minions"
//! │   ├── host1/               bank "minions/host1"
//! │   │   ├── data.p           key "data"
//! │   │   └── .~tmpXXXXXX      in-flight write (never listed)
//! │   └── mine.p               key "mine"
//! └── legacy.p                 compound file: {key -> value} for bank "legacy"
//! ```
//!
//! Every entry file is the serialized value and nothing else; the mtime is
//! the only metadata.

pub mod address;
mod atomic;
mod file_store;

pub use address::TEMP_PREFIX;
pub use file_store::{FileStore, StorageId, BACKEND_NAME};
