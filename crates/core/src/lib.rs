//! ds-core: Core library for the docstore object-storage helpers
//!
//! This crate provides the core functionality for docstore, including:
//! - Configuration resolution (explicit, environment, config file)
//! - Path parsing (`bucket/key`)
//! - ObjectStore trait for S3 operations
//! - DocumentStore facade for JSON documents and text objects
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the facade to be tested against a mock store.

pub mod config;
pub mod error;
pub mod path;
pub mod store;
pub mod traits;

pub use config::{Config, ConfigManager, StorageConfig};
pub use error::{Error, Result};
pub use path::{ObjectPath, parse_path};
pub use store::{Document, DocumentStore, Metadata};
pub use traits::{ObjectInfo, ObjectStore, PutOptions};
