//! The decompress-and-republish pipeline.
//!
//! Sequences fetch, local staging, validation, entry enumeration, the
//! fan-out of per-entry uploads, and conditional cleanup. Every failure
//! category is a distinct [`DecompressError`] variant so callers can react
//! to outcomes instead of scraping log output.

pub mod runner;

pub use runner::run;

use thiserror::Error;

/// The immutable input describing one pipeline run's source, destination,
/// and options.
#[derive(Debug, Clone)]
pub struct DecompressCommand {
    /// Bucket holding the zip archive
    pub source_bucket: String,
    /// Key of the zip archive
    pub source_key: String,
    /// Bucket entries are uploaded to; the source bucket when `None`
    pub target_bucket: Option<String>,
    /// Key prefix for uploaded entries; joined with `/` when non-empty
    pub target_prefix: String,
    /// Delete the source archive once every entry has uploaded
    pub delete_source_on_success: bool,
    /// Copy the source object's metadata onto every uploaded entry
    pub copy_metadata: bool,
    /// Narrate pipeline progress on stdout
    pub verbose: bool,
    /// Region override, applied by whichever shell constructs the store
    /// client (the client itself is injected into the pipeline)
    pub region: Option<String>,
}

impl DecompressCommand {
    /// Create a command with every option at its default
    pub fn new(source_bucket: impl Into<String>, source_key: impl Into<String>) -> Self {
        DecompressCommand {
            source_bucket: source_bucket.into(),
            source_key: source_key.into(),
            target_bucket: None,
            target_prefix: String::new(),
            delete_source_on_success: false,
            copy_metadata: false,
            verbose: false,
            region: None,
        }
    }

    /// Bucket uploads actually go to
    pub fn upload_bucket(&self) -> &str {
        self.target_bucket.as_deref().unwrap_or(&self.source_bucket)
    }
}

/// A successfully republished entry
#[derive(Debug, Clone)]
pub struct UploadedObject {
    /// Entry name inside the archive
    pub entry: String,
    /// Destination location, e.g. `s3://bucket/prefix/name`
    pub location: String,
}

/// A single entry that failed to upload
#[derive(Debug)]
pub struct UploadFailure {
    /// Entry name inside the archive
    pub entry: String,
    /// What went wrong for this entry
    pub error: anyhow::Error,
}

/// Report of a fully successful run
#[derive(Debug)]
pub struct DecompressSummary {
    /// Every uploaded entry, in archive order
    pub uploaded: Vec<UploadedObject>,
    /// Whether the source archive was deleted
    pub source_deleted: bool,
    /// Set when deletion was requested but failed; the run still counts as
    /// a success for purposes of the uploaded data
    pub delete_error: Option<String>,
}

/// Why a pipeline run stopped
#[derive(Debug, Error)]
pub enum DecompressError {
    /// A required command field was missing or empty; no I/O was attempted
    #[error("missing or empty {0} in command")]
    InvalidCommand(&'static str),

    /// The source object could not be downloaded
    #[error("failed to fetch source object: {0:#}")]
    Fetch(anyhow::Error),

    /// The fetched bytes could not be persisted to local scratch storage
    #[error("failed to stage archive locally: {0:#}")]
    Stage(anyhow::Error),

    /// The staged file does not carry the zip signature
    #[error("source object is not a zip archive (detected {})", detected.as_deref().unwrap_or("unknown"))]
    NotZip {
        /// Content type the sniffer resolved, when it resolved one
        detected: Option<String>,
    },

    /// The staged file looked like a zip but could not be parsed
    #[error("failed to read zip archive: {0:#}")]
    Corrupt(anyhow::Error),

    /// The archive contains no entries
    #[error("the zip archive was empty")]
    EmptyArchive,

    /// One or more entry uploads failed. Entries that did upload are listed
    /// in `uploaded`; the source archive is left in place.
    #[error("{} of {} entry uploads failed", failures.len(), failures.len() + uploaded.len())]
    Upload {
        failures: Vec<UploadFailure>,
        uploaded: Vec<UploadedObject>,
    },
}

/// Compute the destination key for an archive entry.
///
/// The entry name is passed through verbatim so the archive's internal
/// directory structure is reproduced exactly under the prefix.
pub fn destination_key(prefix: &str, entry_name: &str) -> String {
    if prefix.is_empty() {
        entry_name.to_string()
    } else {
        format!("{prefix}/{entry_name}")
    }
}
