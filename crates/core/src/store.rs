//! Document facade
//!
//! Saves and loads JSON documents and plain-text objects at `bucket/key`
//! paths. Documents live at `<key>.json`, text at `<key>.txt`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::path::parse_path;
use crate::traits::{ObjectInfo, ObjectStore, PutOptions};

/// A string-keyed JSON document
pub type Document = serde_json::Map<String, serde_json::Value>;

/// User metadata attached to text objects
pub type Metadata = HashMap<String, String>;

/// Suffix appended to document keys
pub const JSON_SUFFIX: &str = ".json";
/// Suffix appended to text keys
pub const TEXT_SUFFIX: &str = ".txt";
/// Content type of stored documents
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Content type of stored text
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Facade over an [`ObjectStore`] for documents and text
#[derive(Clone)]
pub struct DocumentStore {
    store: Arc<dyn ObjectStore>,
}

impl DocumentStore {
    /// Create a facade over the given store
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Serialize `document` as JSON and store it at `<path>.json`
    pub async fn save_map(&self, path: &str, document: &Document) -> Result<ObjectInfo> {
        let target = parse_path(path)?.with_suffix(JSON_SUFFIX);
        let data = serde_json::to_vec(document)?;

        tracing::debug!(object = %target, size = data.len(), "Saving document");
        self.store
            .put_object(&target, data, PutOptions::content_type(JSON_CONTENT_TYPE))
            .await
    }

    /// Store `text` at `<path>.txt`
    pub async fn save_text(&self, path: &str, text: &str) -> Result<ObjectInfo> {
        self.save_text_with_metadata(path, text, &Metadata::new())
            .await
    }

    /// Store `text` at `<path>.txt` with `metadata` attached as user metadata
    pub async fn save_text_with_metadata(
        &self,
        path: &str,
        text: &str,
        metadata: &Metadata,
    ) -> Result<ObjectInfo> {
        let target = parse_path(path)?.with_suffix(TEXT_SUFFIX);

        tracing::debug!(
            object = %target,
            size = text.len(),
            metadata_keys = metadata.len(),
            "Saving text"
        );
        let options = PutOptions::content_type(TEXT_CONTENT_TYPE).with_metadata(metadata.clone());
        self.store
            .put_object(&target, text.as_bytes().to_vec(), options)
            .await
    }

    /// Load the document stored at `<path>.json`
    pub async fn load_map(&self, path: &str) -> Result<Document> {
        let target = parse_path(path)?.with_suffix(JSON_SUFFIX);

        tracing::debug!(object = %target, "Loading document");
        let data = self.store.get_object(&target).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Load the text stored at `<path>.txt`
    pub async fn load_text(&self, path: &str) -> Result<String> {
        let (text, _) = self.load_text_with_metadata(path, &[]).await?;
        Ok(text)
    }

    /// Load the text stored at `<path>.txt` along with the requested
    /// user metadata values
    ///
    /// Every requested key is present in the returned map; keys the object
    /// does not carry map to an empty string. When `keys` is empty the
    /// object is not stat-ed.
    pub async fn load_text_with_metadata(
        &self,
        path: &str,
        keys: &[&str],
    ) -> Result<(String, Metadata)> {
        let target = parse_path(path)?.with_suffix(TEXT_SUFFIX);

        tracing::debug!(object = %target, keys = keys.len(), "Loading text");
        let data = self.store.get_object(&target).await?;
        let text = String::from_utf8(data)?;

        let mut metadata = Metadata::new();
        if !keys.is_empty() {
            let info = self.store.head_object(&target).await?;
            metadata = select_metadata(&info, keys);
        }

        Ok((text, metadata))
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

fn select_metadata(info: &ObjectInfo, keys: &[&str]) -> Metadata {
    keys.iter()
        .map(|key| {
            let value = info.user_metadata(key).unwrap_or_default();
            (key.to_string(), value.to_string())
        })
        .collect()
}
