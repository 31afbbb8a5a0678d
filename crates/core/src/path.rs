//! Path parsing
//!
//! Handles parsing of object paths in the format: bucket/key
//! The path is split on the first slash; the key keeps any further slashes.

use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed path pointing to an object in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPath {
    /// Bucket name
    pub bucket: String,
    /// Object key (may be empty or contain further slashes)
    pub key: String,
}

impl ObjectPath {
    /// Create a new ObjectPath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Return a copy of this path with `suffix` appended to the key
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            bucket: self.bucket.clone(),
            key: format!("{}{suffix}", self.key),
        }
    }

    /// Get the full path as a string (bucket/key)
    pub fn to_full_path(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_full_path())
    }
}

impl FromStr for ObjectPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_path(s)
    }
}

/// Parse a path string into an ObjectPath
///
/// A valid path contains at least one `/`. Everything before the first
/// slash is the bucket, everything after it is the key.
pub fn parse_path(path: &str) -> Result<ObjectPath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    let Some((bucket, key)) = path.split_once('/') else {
        return Err(Error::InvalidPath(format!(
            "{path} (expected format: bucket/key)"
        )));
    };

    if bucket.is_empty() {
        return Err(Error::InvalidPath(format!(
            "{path} (bucket name cannot be empty)"
        )));
    }

    Ok(ObjectPath::new(bucket, key))
}
