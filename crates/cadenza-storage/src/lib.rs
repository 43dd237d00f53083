//! Cadenza Storage Library
//!
//! This crate provides the storage abstraction and implementations for the
//! pipeline functions, plus the object relocator built on top of them.
//!
//! # Keys and prefixes
//!
//! Object keys are opaque strings in a bucket's flat namespace. A "prefix"
//! is a string prefix of a key, not a directory; by convention prefixes end
//! in `/` but that is assumed, not enforced. Keys must not contain `..` or a
//! leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod relocate;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use cadenza_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use relocate::Relocator;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
