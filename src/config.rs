//! Configuration for localfs-cache
//!
//! Centralized configuration with sensible defaults. A `Config` is handed to
//! the store once at startup; operations never consult global state.

use std::path::PathBuf;

/// Main configuration for a FileStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all banks
    /// Internal structure:
    ///   {cache_dir}/
    ///     ├── <bank>/<key>.p    (per-key entries)
    ///     └── <bank>.p          (compound entries, read-only)
    pub cache_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// fsync each temp file before renaming it into place
    pub sync_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./cache"),
            sync_writes: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the cache directory (root for all banks)
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = path.into();
        self
    }

    /// Enable or disable fsync before rename
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.config.sync_writes = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert!(config.sync_writes);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .cache_dir("/var/cache/app")
            .sync_writes(false)
            .build();

        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/app"));
        assert!(!config.sync_writes);
    }
}
