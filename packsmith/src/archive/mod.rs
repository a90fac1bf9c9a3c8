//! Package archive serialization.
//!
//! The assembler never depends on a particular archive layout: it hands the
//! finalized manifest and file list to an [`ArchiveWriter`]. This module
//! defines that collaborator and ships a default format.
//!
//! # Default Format
//!
//! [`GzipArchiveWriter`] produces a gzip stream holding two bincode values:
//!
//! ```text
//! gzip(
//!   format_version: u32
//!   body {
//!     manifest: PackageManifest,
//!     entries: [ { path, sha256, data }, ... ],   // build order, duplicates kept
//!   }
//! )
//! ```
//!
//! The version comes first so an unknown format is rejected before the body
//! is decoded.
//!
//! The gzip header carries no timestamp, so identical inputs always produce
//! identical bytes. [`read_archive`] decodes the format and verifies every
//! entry's SHA-256 checksum.

mod checksum;
mod error;
mod format;
mod gzip;

pub use checksum::sha256_hex;
pub use error::{ArchiveError, ArchiveResult};
pub use format::{ArchiveContents, ArchiveEntry, ARCHIVE_FORMAT_VERSION};
pub use gzip::{read_archive, GzipArchiveWriter};

use std::io::Write;

use crate::package::{PackageManifest, SharedFile};

/// Serializes a package into a byte stream.
///
/// Implementations treat the output as opaque bytes; the assembler decides
/// where those bytes go (a staging file, the target file, or memory).
pub trait ArchiveWriter {
    /// Write the archive for `manifest` and `files` to `out`.
    ///
    /// Files are written in the order given.
    fn write(
        &self,
        manifest: &PackageManifest,
        files: &[SharedFile],
        out: &mut dyn Write,
    ) -> ArchiveResult<()>;
}

impl<W: ArchiveWriter + ?Sized> ArchiveWriter for &W {
    fn write(
        &self,
        manifest: &PackageManifest,
        files: &[SharedFile],
        out: &mut dyn Write,
    ) -> ArchiveResult<()> {
        (**self).write(manifest, files, out)
    }
}
