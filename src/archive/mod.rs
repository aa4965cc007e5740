pub mod zip;

use bytes::Bytes;

/// One named byte payload inside an archive.
///
/// The name is the entry's archive-relative path, taken verbatim. Directory
/// entries come through like files, with a trailing `/` and an empty
/// payload, so republishing the set reproduces the archive's internal
/// structure exactly.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Entry path as recorded in the archive
    pub name: String,
    /// Fully decompressed content
    pub data: Bytes,
}

impl ArchiveEntry {
    /// Whether this entry is a directory marker
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }
}
