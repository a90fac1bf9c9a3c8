//! Error types for the archive module.

use std::io;

use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while writing or reading archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// I/O error on the archive stream.
    #[error("archive I/O error: {0}")]
    Io(#[from] io::Error),

    /// A package file's contents could not be read.
    #[error("failed to read package file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The archive document could not be encoded.
    #[error("failed to encode archive: {0}")]
    Encode(#[source] bincode::Error),

    /// The archive document could not be decoded.
    #[error("failed to decode archive: {0}")]
    Decode(#[source] bincode::Error),

    /// The archive was written by an unknown format version.
    #[error("unsupported archive format version {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    /// An entry's contents do not match its recorded checksum.
    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_checksum_mismatch_display() {
        let err = ArchiveError::ChecksumMismatch {
            path: "lib/a.dll".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("lib/a.dll"));
        assert!(msg.contains("abc123"));
        assert!(msg.contains("def456"));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ArchiveError::UnsupportedFormat {
            found: 9,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported archive format version 9 (expected 1)"
        );
    }

    #[test]
    fn test_error_source_io() {
        let err = ArchiveError::ReadFile {
            path: "a".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none() {
        let err = ArchiveError::UnsupportedFormat {
            found: 2,
            expected: 1,
        };
        assert!(err.source().is_none());
    }
}
