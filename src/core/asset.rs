//! Binary assets and their attachment-style encoding.
//!
//! Asset property values expose a readable byte stream. The
//! [`AssetEncoder`] turns them (or lists of them) into base64 strings a
//! search backend's attachment processor can ingest.

use crate::core::error::{IndexerError, Result};
use crate::core::value::Value;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Debug;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// A binary resource referenced from a node property
pub trait Asset: Debug + Send + Sync {
    /// Stable identifier, used when the asset is serialized or stringified
    fn identifier(&self) -> &str;

    /// Open a fresh stream over the asset's bytes
    fn open(&self) -> std::io::Result<Box<dyn Read + '_>>;
}

/// Asset backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileAsset {
    identifier: String,
    path: PathBuf,
}

impl FileAsset {
    /// Create an asset for `path`, identified by the path itself
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            identifier: path.to_string_lossy().into_owned(),
            path,
        }
    }

    /// Create an asset with an explicit identifier
    pub fn with_identifier(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Asset for FileAsset {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(std::fs::File::open(&self.path)?))
    }
}

/// Asset held in memory
#[derive(Debug, Clone)]
pub struct InMemoryAsset {
    identifier: String,
    bytes: Vec<u8>,
}

impl InMemoryAsset {
    pub fn new(identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes: bytes.into(),
        }
    }
}

impl Asset for InMemoryAsset {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }
}

/// Encodes asset values as base64 for attachment indexing.
#[derive(Debug, Clone)]
pub struct AssetEncoder {
    /// Largest asset (in bytes) that will be read
    max_bytes: u64,
}

impl AssetEncoder {
    /// Create an encoder that refuses assets larger than `max_bytes`
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Create an encoder from a megabyte limit, as configured
    pub fn from_megabytes(max_size_mb: usize) -> Self {
        Self::new((max_size_mb as u64) * 1024 * 1024)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Encode a value for attachment indexing.
    ///
    /// - `Null` stays `Null`
    /// - lists are encoded element by element, preserving order
    /// - assets become their base64-encoded content
    /// - anything else is rejected with `UnsupportedAssetType`
    pub fn encode(&self, value: &Value) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::List(items) => items
                .iter()
                .map(|item| self.encode(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Value::Asset(asset) => self.encode_asset(asset.as_ref()).map(Value::String),
            other => Err(IndexerError::UnsupportedAssetType(
                other.type_name().to_string(),
            )),
        }
    }

    fn encode_asset(&self, asset: &dyn Asset) -> Result<String> {
        let mut bytes = Vec::new();
        // Read one byte past the limit so oversized assets are detected
        // without buffering them entirely
        asset
            .open()?
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)?;

        if bytes.len() as u64 > self.max_bytes {
            return Err(IndexerError::AssetTooLarge {
                identifier: asset.identifier().to_string(),
                limit_bytes: self.max_bytes,
            });
        }

        tracing::trace!(
            "Encoded asset {} ({} bytes)",
            asset.identifier(),
            bytes.len()
        );
        Ok(STANDARD.encode(&bytes))
    }
}

impl Default for AssetEncoder {
    fn default() -> Self {
        Self::from_megabytes(crate::core::config::DEFAULT_MAX_ASSET_SIZE_MB)
    }
}

/// Encode a value with the default size limit
pub fn index_asset(value: &Value) -> Result<Value> {
    AssetEncoder::default().encode(value)
}
