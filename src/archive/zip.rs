use anyhow::{Context, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::ArchiveEntry;

/// Read every entry of a zip archive, decompressing each fully into memory.
///
/// The entry set is fixed at enumeration time. An unparseable archive or an
/// entry that fails to decompress surfaces as an error; deciding what an
/// empty entry set means is left to the caller.
pub fn read_entries(path: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(path).context("Failed to open staged archive")?;
    let mut archive = ZipArchive::new(file).context("Failed to parse zip archive")?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .context(format!("Failed to read zip entry {}", i))?;

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut data)
            .context(format!("Failed to decompress zip entry '{}'", entry.name()))?;

        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            data: Bytes::from(data),
        });
    }

    Ok(entries)
}
