//! Documents stored inside the default archive format.

use serde::{Deserialize, Serialize};

use super::checksum::sha256_hex;
use crate::package::PackageManifest;

/// Current version of the default archive format.
pub const ARCHIVE_FORMAT_VERSION: u32 = 1;

/// One file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// In-package path.
    pub path: String,

    /// SHA-256 of `data` (lowercase hex).
    pub sha256: String,

    /// File contents.
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    /// Create an entry, computing its checksum.
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            sha256: sha256_hex(&data),
            data,
        }
    }

    /// Whether the stored checksum matches the contents.
    pub fn is_intact(&self) -> bool {
        sha256_hex(&self.data) == self.sha256
    }
}

/// Decoded archive: the manifest and entries in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveContents {
    pub manifest: PackageManifest,
    pub entries: Vec<ArchiveEntry>,
}

impl ArchiveContents {
    /// Total size of all entry contents in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.data.len() as u64).sum()
    }
}

/// Archive body as written; borrows the manifest to avoid a copy.
#[derive(Serialize)]
pub(super) struct ArchiveBodyRef<'a> {
    pub manifest: &'a PackageManifest,
    pub entries: Vec<ArchiveEntry>,
}

/// Archive body as read back.
#[derive(Deserialize)]
pub(super) struct ArchiveBody {
    pub manifest: PackageManifest,
    pub entries: Vec<ArchiveEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_checksum_computed() {
        let entry = ArchiveEntry::new("a.txt", b"abc".to_vec());
        assert_eq!(entry.sha256, sha256_hex(b"abc"));
        assert!(entry.is_intact());
    }

    #[test]
    fn test_entry_detects_tampering() {
        let mut entry = ArchiveEntry::new("a.txt", b"abc".to_vec());
        entry.data.push(b'!');
        assert!(!entry.is_intact());
    }
}
