//! Process-global document facade
//!
//! A single S3-backed [`DocumentStore`] is built on first use. Its settings
//! come from [`configure`] when that was called beforehand, otherwise from
//! the `MINIO_*` environment variables (see [`StorageConfig::from_env`]).

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;

use ds_core::{
    Document, DocumentStore, Error, Metadata, ObjectInfo, Result, StorageConfig, parse_path,
};

use crate::client::S3Client;

/// Explicit configuration handed over by [`configure`]
#[derive(Debug, PartialEq)]
enum ConfigSlot {
    Unset,
    Explicit(StorageConfig),
    /// Client initialization has started and read the slot
    Claimed,
}

static CONFIG_SLOT: Mutex<ConfigSlot> = Mutex::new(ConfigSlot::Unset);
static STORE: OnceCell<DocumentStore> = OnceCell::const_new();

/// Set the storage configuration used by the global facade
///
/// Must be called before the first save or load; once client initialization
/// has started this returns [`Error::Config`].
pub fn configure(config: StorageConfig) -> Result<()> {
    let mut slot = config_slot()?;
    if *slot == ConfigSlot::Claimed {
        return Err(Error::Config(
            "Storage client is already initialized; configure it before first use".into(),
        ));
    }

    tracing::debug!(endpoint = %config.endpoint, use_ssl = config.use_ssl, "Storage configured");
    *slot = ConfigSlot::Explicit(config);
    Ok(())
}

fn config_slot() -> Result<MutexGuard<'static, ConfigSlot>> {
    CONFIG_SLOT
        .lock()
        .map_err(|_| Error::General("Storage configuration lock poisoned".into()))
}

/// Take the explicit configuration and lock out later [`configure`] calls
fn claim_config() -> Result<Option<StorageConfig>> {
    let mut slot = config_slot()?;
    match std::mem::replace(&mut *slot, ConfigSlot::Claimed) {
        ConfigSlot::Explicit(config) => Ok(Some(config)),
        ConfigSlot::Unset | ConfigSlot::Claimed => Ok(None),
    }
}

/// Undo [`claim_config`] after a failed initialization
fn release_config(explicit: Option<StorageConfig>) -> Result<()> {
    let mut slot = config_slot()?;
    *slot = match explicit {
        Some(config) => ConfigSlot::Explicit(config),
        None => ConfigSlot::Unset,
    };
    Ok(())
}

async fn build_store(explicit: Option<StorageConfig>) -> Result<DocumentStore> {
    let config = match explicit {
        Some(config) => config,
        None => StorageConfig::from_env()?,
    };

    tracing::info!(endpoint = %config.endpoint, "Initializing storage client");
    let client = S3Client::new(config).await?;
    Ok(DocumentStore::new(Arc::new(client)))
}

async fn document_store() -> Result<&'static DocumentStore> {
    STORE
        .get_or_try_init(|| async {
            let explicit = claim_config()?;
            let built = build_store(explicit.clone()).await;
            if built.is_err() {
                release_config(explicit)?;
            }
            built
        })
        .await
}

/// Serialize `document` as JSON and store it at `<path>.json`
pub async fn save_map(path: &str, document: &Document) -> Result<ObjectInfo> {
    parse_path(path)?;
    document_store().await?.save_map(path, document).await
}

/// Store `text` at `<path>.txt`
pub async fn save_text(path: &str, text: &str) -> Result<ObjectInfo> {
    parse_path(path)?;
    document_store().await?.save_text(path, text).await
}

/// Store `text` at `<path>.txt` with `metadata` attached as user metadata
pub async fn save_text_with_metadata(
    path: &str,
    text: &str,
    metadata: &Metadata,
) -> Result<ObjectInfo> {
    parse_path(path)?;
    document_store()
        .await?
        .save_text_with_metadata(path, text, metadata)
        .await
}

/// Load the document stored at `<path>.json`
pub async fn load_map(path: &str) -> Result<Document> {
    parse_path(path)?;
    document_store().await?.load_map(path).await
}

/// Load the text stored at `<path>.txt`
pub async fn load_text(path: &str) -> Result<String> {
    parse_path(path)?;
    document_store().await?.load_text(path).await
}

/// Load the text stored at `<path>.txt` and the requested metadata values
pub async fn load_text_with_metadata(path: &str, keys: &[&str]) -> Result<(String, Metadata)> {
    parse_path(path)?;
    document_store()
        .await?
        .load_text_with_metadata(path, keys)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests share the process-wide state and must never trigger
    // client initialization.

    #[tokio::test]
    async fn test_invalid_path_fails_before_initialization() {
        let err = save_text("nobucket", "hello").await.unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        let err = load_map("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        assert!(!STORE.initialized());
    }

    #[test]
    fn test_configure_until_claimed() {
        let first = StorageConfig::new("localhost:9000", "access", "secret").with_ssl(false);
        let second = StorageConfig::new("localhost:9001", "access", "secret");

        configure(first.clone()).unwrap();
        assert_eq!(*config_slot().unwrap(), ConfigSlot::Explicit(first.clone()));

        assert_eq!(claim_config().unwrap(), Some(first.clone()));
        let err = configure(second.clone()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(*config_slot().unwrap(), ConfigSlot::Claimed);

        release_config(Some(first)).unwrap();
        configure(second.clone()).unwrap();
        assert_eq!(*config_slot().unwrap(), ConfigSlot::Explicit(second));

        release_config(None).unwrap();
        assert!(!STORE.initialized());
    }
}
