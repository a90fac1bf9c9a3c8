//! The real filesystem.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::FileSystem;

/// Prefix of temporary files allocated for staging.
const TEMP_PREFIX: &str = "packsmith-";

/// Suffix of temporary files allocated for staging.
const TEMP_SUFFIX: &str = ".tmp";

/// [`FileSystem`] backed by the local disk.
///
/// Temporary files are created in the staging directory, which defaults to
/// the system temporary directory.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    staging_dir: PathBuf,
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFileSystem {
    /// Create a filesystem that stages in the system temporary directory.
    pub fn new() -> Self {
        Self {
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Create a filesystem that stages in `staging_dir`.
    pub fn with_staging_dir(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    /// Directory where temporary files are allocated.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }
}

impl FileSystem for LocalFileSystem {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn allocate_temp_path(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.staging_dir)?;

        tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.staging_dir)?
            .into_temp_path()
            .keep()
            .map_err(|e| e.error)
    }
}
