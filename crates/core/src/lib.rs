//! bucketit-core: Core library for the bucketit upload CLI
//!
//! This crate provides the core functionality for bucketit, including:
//! - Configuration management
//! - Object key resolution
//! - Batch upload orchestration
//! - ObjectStore trait for the storage backend
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the orchestrator to be tested against a mock store.

pub mod batch;
pub mod config;
pub mod error;
pub mod key;
pub mod traits;

pub use batch::{run, BatchResult, UploadOutcome, UploadRequest};
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use key::KeyResolver;
pub use traits::{ObjectStore, UploadedObject};
