use anyhow::{Context, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The fetched archive held in local scratch storage.
///
/// The zip reader needs random access, so the downloaded body is persisted
/// to a uniquely named temp file before parsing. Uniqueness matters because
/// multiple runs may execute concurrently in the same environment. The file
/// is removed when the value is dropped, so every pipeline exit path
/// releases it.
pub struct StagedArchive {
    file: NamedTempFile,
    metadata: HashMap<String, String>,
}

impl StagedArchive {
    /// Persist fetched bytes to a uniquely named local file, carrying the
    /// source object's captured metadata alongside.
    pub fn write(body: &Bytes, metadata: HashMap<String, String>) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("s3unzip-")
            .suffix(".zip")
            .tempfile()
            .context("Failed to create local staging file")?;

        file.write_all(body)
            .context("Failed to write archive to staging file")?;
        file.flush().context("Failed to flush staging file")?;

        Ok(StagedArchive { file, metadata })
    }

    /// Location of the staged file on disk
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Metadata captured from the source object (empty unless the command
    /// asked for it)
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Sniff the staged file's content type from its signature
    pub fn content_type(&self) -> Option<&'static str> {
        infer::get_from_path(self.path())
            .ok()
            .flatten()
            .map(|kind| kind.mime_type())
    }

    /// Whether the staged file carries the zip signature
    pub fn is_zip(&self) -> bool {
        self.content_type() == Some("application/zip")
    }
}
