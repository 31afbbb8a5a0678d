//! ds-s3: S3 SDK adapter for docstore
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate, and the process-global document facade
//! built on top of it. It is the only crate that directly depends on
//! the AWS SDK.

pub mod client;
pub mod global;

pub use client::S3Client;
pub use global::{
    configure, load_map, load_text, load_text_with_metadata, save_map, save_text,
    save_text_with_metadata,
};
