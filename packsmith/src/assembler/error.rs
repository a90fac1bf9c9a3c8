//! Error types for package assembly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that fail a build.
///
/// Failures while removing a staging file are never reported here; they are
/// swallowed by the staging guard.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Metadata cannot produce a package (blank id or no version).
    #[error("invalid package metadata: {0}")]
    InvalidMetadata(String),

    /// A temporary staging file could not be allocated.
    #[error("failed to allocate staging file: {0}")]
    StagingFailed(#[source] io::Error),

    /// The output file could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the archive to the output file failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    /// Copying the staging file onto the target failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
