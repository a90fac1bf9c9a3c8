//! Package assembly: in-memory builds and atomic on-disk builds.
//!
//! # Overview
//!
//! [`PackageAssembler`] combines [`PackageMetadata`] with a file list. It can
//! either finalize the result into a [`BuiltPackage`] held in memory, or
//! serialize it through its [`ArchiveWriter`] to a file using its
//! [`FileSystem`].
//!
//! # Staged Writes
//!
//! Writing an archive straight onto an existing file truncates that file
//! first, so a failure halfway through leaves a corrupt artifact behind.
//! [`SaveMode::Staged`] avoids this:
//!
//! ```text
//! allocate temp ──► write archive to temp ──► copy temp over target ──► remove temp
//!                        │ fails                    │ fails                 │ fails
//!                        ▼                          ▼                       ▼
//!                 target untouched,          error returned,          ignored
//!                 error returned             temp removed
//! ```
//!
//! The temporary file is owned by a guard that removes it on every exit
//! path. Failing to remove it never fails the build.
//!
//! # Example
//!
//! ```
//! use packsmith::assembler::{PackageAssembler, SaveMode};
//! use packsmith::archive::GzipArchiveWriter;
//! use packsmith::fs::{FileSystem, MemoryFileSystem};
//! use packsmith::metadata::PackageMetadata;
//! use packsmith::package::MemoryFile;
//! use semver::Version;
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new();
//! let assembler = PackageAssembler::with_collaborators(GzipArchiveWriter::new(), fs.clone());
//!
//! let metadata = PackageMetadata::new("Contoso.Core", Version::new(1, 0, 0));
//! let files = vec![MemoryFile::shared("lib/core.dll", b"\x00\x01".to_vec())];
//!
//! assembler
//!     .build_to_file(&metadata, files, Path::new("/out/core.spkg"), SaveMode::Staged)
//!     .unwrap();
//!
//! assert!(fs.exists(Path::new("/out/core.spkg")));
//! assert!(fs.leftover_temp_files().is_empty());
//! ```

mod error;
mod staging;

pub use error::{BuildError, BuildResult};

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::archive::{ArchiveError, ArchiveWriter, GzipArchiveWriter};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::metadata::{normalize, PackageMetadata};
use crate::package::{BuiltPackage, PackageBuilder, PackageManifest, SharedFile};
use staging::StagingFile;

/// How an archive is written to its target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Write to a temporary file, then copy it over the target.
    #[default]
    Staged,

    /// Write straight to the target.
    Direct,
}

impl From<bool> for SaveMode {
    /// `true` selects [`SaveMode::Staged`].
    fn from(use_staging_file: bool) -> Self {
        if use_staging_file {
            SaveMode::Staged
        } else {
            SaveMode::Direct
        }
    }
}

/// Builds packages from metadata and files.
///
/// The archive writer and the filesystem are injected so either can be
/// replaced; [`PackageAssembler::new`] uses [`GzipArchiveWriter`] and
/// [`LocalFileSystem`].
#[derive(Debug, Clone)]
pub struct PackageAssembler<W = GzipArchiveWriter, F = LocalFileSystem> {
    writer: W,
    fs: F,
}

impl PackageAssembler {
    /// Create an assembler using the default archive format and the local disk.
    pub fn new() -> Self {
        Self::with_collaborators(GzipArchiveWriter::new(), LocalFileSystem::new())
    }
}

impl Default for PackageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ArchiveWriter, F: FileSystem> PackageAssembler<W, F> {
    /// Create an assembler from explicit collaborators.
    pub fn with_collaborators(writer: W, fs: F) -> Self {
        Self { writer, fs }
    }

    /// The archive writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Build a package held entirely in memory.
    ///
    /// Performs no I/O; identical inputs produce identical packages.
    pub fn build_in_memory<I>(
        &self,
        metadata: &PackageMetadata,
        files: I,
    ) -> BuildResult<BuiltPackage>
    where
        I: IntoIterator<Item = SharedFile>,
    {
        prepare(metadata, files).build()
    }

    /// Build a package and write its archive to `target`.
    ///
    /// With [`SaveMode::Staged`], an existing file at `target` is only
    /// overwritten after the whole archive was written successfully to a
    /// temporary file.
    pub fn build_to_file<I>(
        &self,
        metadata: &PackageMetadata,
        files: I,
        target: &Path,
        mode: SaveMode,
    ) -> BuildResult<()>
    where
        I: IntoIterator<Item = SharedFile>,
    {
        let builder = prepare(metadata, files);
        let manifest = builder.manifest()?;

        match mode {
            SaveMode::Direct => {
                self.write_archive(&manifest, &builder, target)?;
            }
            SaveMode::Staged => {
                let staging =
                    StagingFile::allocate(&self.fs).map_err(BuildError::StagingFailed)?;
                self.write_archive(&manifest, &builder, staging.path())?;

                debug!(
                    from = %staging.path().display(),
                    to = %target.display(),
                    "copying staged archive onto target"
                );
                self.fs
                    .copy(staging.path(), target)
                    .map_err(|e| BuildError::CopyFailed {
                        from: staging.path().to_path_buf(),
                        to: target.to_path_buf(),
                        source: e,
                    })?;
            }
        }

        info!(
            package = %manifest,
            files = builder.files.len(),
            path = %target.display(),
            ?mode,
            "wrote package archive"
        );
        Ok(())
    }

    /// Create `path` and serialize the archive into it.
    fn write_archive(
        &self,
        manifest: &PackageManifest,
        builder: &PackageBuilder,
        path: &Path,
    ) -> BuildResult<()> {
        let mut out = self.fs.create(path).map_err(|e| BuildError::CreateFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.writer
            .write(manifest, &builder.files, &mut *out)
            .map_err(|e| BuildError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        out.flush().map_err(|e| BuildError::WriteFailed {
            path: path.to_path_buf(),
            source: ArchiveError::Io(e),
        })
    }
}

/// Normalize metadata into a fresh builder and attach the files.
fn prepare<I>(metadata: &PackageMetadata, files: I) -> PackageBuilder
where
    I: IntoIterator<Item = SharedFile>,
{
    let mut builder = normalize(metadata);
    builder.add_files(files);
    builder
}

/// Build a package in memory with the default collaborators.
pub fn build_package<I>(metadata: &PackageMetadata, files: I) -> BuildResult<BuiltPackage>
where
    I: IntoIterator<Item = SharedFile>,
{
    PackageAssembler::new().build_in_memory(metadata, files)
}

/// Write a package archive to `target` with the default collaborators.
pub fn save_package<I>(
    metadata: &PackageMetadata,
    files: I,
    target: &Path,
    mode: SaveMode,
) -> BuildResult<()>
where
    I: IntoIterator<Item = SharedFile>,
{
    PackageAssembler::new().build_to_file(metadata, files, target, mode)
}
