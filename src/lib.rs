//! # s3unzip
//!
//! Decompress a zip archive stored in S3 back into individual S3 objects.
//!
//! The pipeline fetches the archive, stages it to a uniquely named local
//! scratch file, verifies the staged bytes really are a zip, enumerates the
//! archive's entries, republishes every entry under an optional key prefix,
//! and finally deletes the source archive when asked to. Uploads fan out
//! concurrently and are joined as a complete set before any cleanup
//! decision is made; the staging file is released on every exit path.
//!
//! The store client is injected, so tests (and S3-compatible endpoints like
//! localstack) can substitute their own.
//!
//! ## Example
//!
//! ```no_run
//! use s3unzip::pipeline::{self, DecompressCommand};
//! use s3unzip::s3::S3Client;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = S3Client::new(None).await?;
//!
//!     let mut command = DecompressCommand::new("my-bucket", "archive.zip");
//!     command.target_prefix = "extracted".to_string();
//!
//!     let summary = pipeline::run(&client, &command).await?;
//!     println!("{} entries uploaded", summary.uploaded.len());
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod event;
pub mod pipeline;
pub mod s3;
pub mod stage;
pub mod ui;

pub use event::S3Event;
pub use pipeline::{DecompressCommand, DecompressError, DecompressSummary};
pub use s3::{ObjectStore, S3Client};
