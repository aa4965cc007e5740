pub mod client;

pub use client::{FetchedObject, S3Client};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Trait for the object-store operations the pipeline needs.
/// The store is an injected dependency so tests can substitute a fake.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object's body together with its user metadata
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject>;

    /// Upload bytes under a key, returning the destination location
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        metadata: &HashMap<String, String>,
    ) -> Result<String>;

    /// Delete an object
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}
