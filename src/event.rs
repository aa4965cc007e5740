//! Adapter for S3 "object created" notifications.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::pipeline::DecompressCommand;

/// An S3 object-created notification, as delivered to a triggered function
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

/// One record inside an [`S3Event`]
#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

/// The bucket/object pair a record points at
#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3BucketRef,
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    pub key: String,
}

impl S3Event {
    /// Parse a notification from its JSON encoding
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse S3 event")
    }

    /// Adapt the event's first record to a pipeline command.
    ///
    /// Event-triggered runs delete the source archive on success and
    /// narrate progress; target bucket and prefix default to the source.
    pub fn to_command(&self) -> Result<DecompressCommand> {
        let record = self
            .records
            .first()
            .ok_or_else(|| anyhow!("S3 event contains no records"))?;

        let mut command =
            DecompressCommand::new(&record.s3.bucket.name, &record.s3.object.key);
        command.delete_source_on_success = true;
        command.verbose = true;
        Ok(command)
    }
}
