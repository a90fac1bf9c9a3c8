//! Filesystem collaborator.
//!
//! The assembler performs all of its file operations through the
//! [`FileSystem`] trait so that the atomic-write behavior can be exercised
//! against an in-memory fake with injected failures.
//!
//! - [`LocalFileSystem`]: the real disk, with temporary files allocated by
//!   the `tempfile` crate
//! - [`MemoryFileSystem`]: an in-memory map of paths to bytes, with
//!   configurable failures for writes, copies and removals

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File operations needed to persist a package.
///
/// All operations are synchronous and may fail.
pub trait FileSystem {
    /// Create or truncate the file at `path` and open it for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>>;

    /// Copy the bytes of `from` onto `to`, overwriting `to` if it exists.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete the file at `path`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Allocate a new, uniquely named temporary file and return its path.
    ///
    /// The file exists (empty) when this returns; the caller owns it and is
    /// responsible for removing it.
    fn allocate_temp_path(&self) -> io::Result<PathBuf>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        (**self).create(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).copy(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn allocate_temp_path(&self) -> io::Result<PathBuf> {
        (**self).allocate_temp_path()
    }
}
