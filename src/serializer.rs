//! Serializer Module
//!
//! Encodes values to bytes and back. The store is format-agnostic; it only
//! needs the encoding to round-trip and a fixed file extension that tags
//! every entry written with it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

/// Value encoding used by a FileStore
pub trait Serializer {
    /// File extension (without the leading dot) for entries in this format
    fn extension(&self) -> &str;

    /// Encode a value into bytes
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes produced by `encode`
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact binary encoding backed by bincode
///
/// Values whose `Deserialize` impl relies on `deserialize_any` (such as
/// untagged enums) cannot be decoded by bincode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bincode;

impl Bincode {
    pub const EXTENSION: &'static str = "p";
}

impl Serializer for Bincode {
    fn extension(&self) -> &str {
        Self::EXTENSION
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Grains {
        os: String,
        cpus: u32,
        roles: Vec<String>,
    }

    #[test]
    fn test_struct_round_trip() {
        let grains = Grains {
            os: "Debian".to_string(),
            cpus: 8,
            roles: vec!["web".to_string(), "db".to_string()],
        };

        let bytes = Bincode.encode(&grains).unwrap();
        let decoded: Grains = Bincode.decode(&bytes).unwrap();

        assert_eq!(decoded, grains);
    }

    #[test]
    fn test_mapping_round_trip() {
        let mut mapping = HashMap::new();
        mapping.insert("k".to_string(), 42u64);

        let bytes = Bincode.encode(&mapping).unwrap();
        let decoded: HashMap<String, u64> = Bincode.decode(&bytes).unwrap();

        assert_eq!(decoded.get("k"), Some(&42));
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        let result: Result<String> = Bincode.decode(&[0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_extension() {
        assert_eq!(Bincode.extension(), "p");
    }
}
