use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::collections::HashMap;

use super::ObjectStore;

/// Wrapper around AWS S3 client
pub struct S3Client {
    client: Client,
}

/// An object's body together with its user metadata
#[derive(Debug, Clone)]
pub struct FetchedObject {
    pub body: Bytes,
    pub metadata: HashMap<String, String>,
}

impl S3Client {
    /// Create a new S3 client using default AWS configuration,
    /// optionally overriding the region
    pub async fn new(region: Option<String>) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        let client = Client::new(&config);
        Ok(S3Client { client })
    }

    /// Wrap a preconfigured SDK client (used by tests to point at localstack)
    pub fn from_client(client: Client) -> Self {
        S3Client { client }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context(format!("Failed to get object s3://{}/{}", bucket, key))?;

        let metadata = resp.metadata().cloned().unwrap_or_default();

        let body = resp
            .body
            .collect()
            .await
            .context("Failed to read object body")?
            .into_bytes();

        Ok(FetchedObject { body, metadata })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        metadata: &HashMap<String, String>,
    ) -> Result<String> {
        let mut req = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body));

        if !metadata.is_empty() {
            req = req.set_metadata(Some(metadata.clone()));
        }

        req.send()
            .await
            .context(format!("Failed to put object s3://{}/{}", bucket, key))?;

        Ok(format!("s3://{}/{}", bucket, key))
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context(format!("Failed to delete object s3://{}/{}", bucket, key))?;

        Ok(())
    }
}
