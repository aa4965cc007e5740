use futures::future::join_all;
use humansize::{DECIMAL, format_size};
use std::collections::HashMap;

use crate::archive::{self, ArchiveEntry};
use crate::s3::ObjectStore;
use crate::stage::StagedArchive;

use super::{
    DecompressCommand, DecompressError, DecompressSummary, UploadFailure, UploadedObject,
    destination_key,
};

/// Run the decompress-and-republish pipeline for one command.
///
/// A run touches one source object and one local staging file. The staging
/// file is released on every exit path, including the archive-corruption
/// one. Uploads fan out concurrently, one per entry; the full outcome set
/// is joined before any cleanup decision, so a single failed entry can
/// never race the others. The source archive is deleted only when deletion
/// was requested and every entry uploaded.
pub async fn run(
    store: &dyn ObjectStore,
    command: &DecompressCommand,
) -> Result<DecompressSummary, DecompressError> {
    if command.source_bucket.is_empty() {
        return Err(DecompressError::InvalidCommand("source bucket"));
    }
    if command.source_key.is_empty() {
        return Err(DecompressError::InvalidCommand("source key"));
    }

    let fetched = store
        .fetch(&command.source_bucket, &command.source_key)
        .await
        .map_err(DecompressError::Fetch)?;

    if command.verbose {
        println!(
            "Zip file '{}' found in bucket '{}' ({})",
            command.source_key,
            command.source_bucket,
            format_size(fetched.body.len(), DECIMAL)
        );
    }

    let metadata = if command.copy_metadata {
        fetched.metadata
    } else {
        HashMap::new()
    };

    if command.copy_metadata && command.verbose {
        println!(
            "Carrying source metadata: {}",
            serde_json::to_string(&metadata).unwrap_or_default()
        );
    }

    let staged = StagedArchive::write(&fetched.body, metadata).map_err(DecompressError::Stage)?;

    if !staged.is_zip() {
        return Err(DecompressError::NotZip {
            detected: staged.content_type().map(String::from),
        });
    }

    let entries = archive::zip::read_entries(staged.path()).map_err(DecompressError::Corrupt)?;
    if entries.is_empty() {
        return Err(DecompressError::EmptyArchive);
    }

    if command.verbose {
        println!("Decompressing {} entries...", entries.len());
    }

    // Fan out one upload per entry; a failed entry must not cancel the
    // others, so the complete set is joined before anything is decided.
    let uploads = entries
        .into_iter()
        .map(|entry| upload_entry(store, command, entry, staged.metadata()));
    let outcomes = join_all(uploads).await;

    let mut uploaded = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(object) => uploaded.push(object),
            Err(failure) => failures.push(failure),
        }
    }

    drop(staged);
    if command.verbose {
        println!("Local staging file deleted.");
    }

    if !failures.is_empty() {
        return Err(DecompressError::Upload { failures, uploaded });
    }

    let mut summary = DecompressSummary {
        uploaded,
        source_deleted: false,
        delete_error: None,
    };

    if command.delete_source_on_success {
        // A failed delete is not fatal: the uploaded data is intact
        match store
            .delete(&command.source_bucket, &command.source_key)
            .await
        {
            Ok(()) => {
                summary.source_deleted = true;
                if command.verbose {
                    println!("Source file '{}' deleted.", command.source_key);
                }
            }
            Err(error) => {
                summary.delete_error = Some(format!("{error:#}"));
            }
        }
    }

    Ok(summary)
}

/// Upload one archive entry to its computed destination
async fn upload_entry(
    store: &dyn ObjectStore,
    command: &DecompressCommand,
    entry: ArchiveEntry,
    metadata: &HashMap<String, String>,
) -> Result<UploadedObject, UploadFailure> {
    let key = destination_key(&command.target_prefix, &entry.name);
    let size = entry.data.len();

    match store
        .put(command.upload_bucket(), &key, entry.data, metadata)
        .await
    {
        Ok(location) => {
            if command.verbose {
                println!(
                    "Entry decompressed to {} ({})",
                    location,
                    format_size(size, DECIMAL)
                );
            }
            Ok(UploadedObject {
                entry: entry.name,
                location,
            })
        }
        Err(error) => Err(UploadFailure {
            entry: entry.name,
            error,
        }),
    }
}
