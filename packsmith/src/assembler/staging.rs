//! Scoped ownership of a staging file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs::FileSystem;

/// A temporary file that is removed when the guard is dropped.
///
/// Removal is best-effort: if it fails the error is discarded, so a build's
/// outcome depends only on whether the target was produced.
pub(crate) struct StagingFile<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
}

impl<'a, F: FileSystem> StagingFile<'a, F> {
    /// Allocate a new temporary file through `fs`.
    pub(crate) fn allocate(fs: &'a F) -> std::io::Result<Self> {
        let path = fs.allocate_temp_path()?;
        debug!(path = %path.display(), "allocated staging file");
        Ok(Self { fs, path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: FileSystem> Drop for StagingFile<'_, F> {
    fn drop(&mut self) {
        if !self.fs.exists(&self.path) {
            return;
        }
        if let Err(e) = self.fs.remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "ignoring staging cleanup failure");
        }
    }
}
