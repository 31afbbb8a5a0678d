//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! It allows the document facade to be decoupled from the specific S3 SDK
//! implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::ObjectPath;

/// Metadata for an object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Human-readable size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// User metadata (`x-amz-meta-*`), keys without the prefix
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object of known size
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            size_human: Some(humansize::format_size(size.max(0) as u64, humansize::BINARY)),
            ..Default::default()
        }
    }

    /// Look up a user metadata value, ignoring ASCII case of the key
    ///
    /// S3 lowercases metadata keys on the wire, so a value written as
    /// `Author` comes back as `author`.
    pub fn user_metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Options for a put operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Content type of the object
    pub content_type: Option<String>,

    /// User metadata to attach
    pub metadata: HashMap<String, String>,
}

impl PutOptions {
    /// Options carrying only a content type
    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            metadata: HashMap::new(),
        }
    }

    /// Attach user metadata
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object
    async fn put_object(
        &self,
        path: &ObjectPath,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<ObjectInfo>;

    /// Get object content as bytes
    async fn get_object(&self, path: &ObjectPath) -> Result<Vec<u8>>;

    /// Get object metadata, including user metadata
    async fn head_object(&self, path: &ObjectPath) -> Result<ObjectInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_file() {
        let info = ObjectInfo::file("test.txt", 1024);
        assert_eq!(info.key, "test.txt");
        assert_eq!(info.size_bytes, Some(1024));
        assert_eq!(info.size_human.as_deref(), Some("1 KiB"));
        assert!(info.metadata.is_empty());
    }

    #[test]
    fn test_user_metadata_ignores_case() {
        let mut info = ObjectInfo::file("test.txt", 1);
        info.metadata.insert("author".into(), "ada".into());
        assert_eq!(info.user_metadata("Author"), Some("ada"));
        assert_eq!(info.user_metadata("author"), Some("ada"));
        assert_eq!(info.user_metadata("missing"), None);
    }

    #[test]
    fn test_put_options() {
        let options = PutOptions::content_type("text/plain");
        assert_eq!(options.content_type.as_deref(), Some("text/plain"));
        assert!(options.metadata.is_empty());

        let meta = HashMap::from([("k".to_string(), "v".to_string())]);
        let options = options.with_metadata(meta.clone());
        assert_eq!(options.metadata, meta);
    }
}
