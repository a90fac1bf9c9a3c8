//! Default archive format: bincode document in a gzip stream.

use std::io::{Read, Write};

use bincode::Options;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use super::error::{ArchiveError, ArchiveResult};
use super::format::{
    ArchiveBody, ArchiveBodyRef, ArchiveContents, ArchiveEntry, ARCHIVE_FORMAT_VERSION,
};
use super::ArchiveWriter;
use crate::package::{read_contents, PackageManifest, SharedFile};

/// Default gzip compression level.
const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Bincode settings of the archive format: fixed-width integers, as written
/// by `bincode::serialize`.
fn codec() -> impl Options + Copy {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// Writes packages in the default gzip archive format.
#[derive(Debug, Clone, Copy)]
pub struct GzipArchiveWriter {
    level: Compression,
}

impl Default for GzipArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GzipArchiveWriter {
    /// Create a writer with the default compression level.
    pub fn new() -> Self {
        Self::with_level(DEFAULT_COMPRESSION_LEVEL)
    }

    /// Create a writer with a compression level from 0 (none) to 9 (best).
    ///
    /// Levels above 9 are clamped.
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }

    /// The configured compression level.
    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl ArchiveWriter for GzipArchiveWriter {
    fn write(
        &self,
        manifest: &PackageManifest,
        files: &[SharedFile],
        out: &mut dyn Write,
    ) -> ArchiveResult<()> {
        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let data = read_contents(file.as_ref()).map_err(|e| ArchiveError::ReadFile {
                path: file.path().to_string(),
                source: e,
            })?;
            entries.push(ArchiveEntry::new(file.path(), data));
        }

        let mut encoder = GzEncoder::new(out, self.level);
        codec()
            .serialize_into(&mut encoder, &ARCHIVE_FORMAT_VERSION)
            .map_err(encode_error)?;
        codec()
            .serialize_into(&mut encoder, &ArchiveBodyRef { manifest, entries })
            .map_err(encode_error)?;
        encoder.finish()?.flush()?;

        debug!(package = %manifest, files = files.len(), "encoded archive");
        Ok(())
    }
}

/// Decode an archive written by [`GzipArchiveWriter`].
///
/// Rejects unknown format versions and entries whose contents do not match
/// their recorded checksum. The stream is decompressed first and no length
/// prefix may exceed the decompressed size, so a corrupt prefix fails with
/// [`ArchiveError::Decode`] instead of allocating.
pub fn read_archive<R: Read>(reader: R) -> ArchiveResult<ArchiveContents> {
    let mut document = Vec::new();
    GzDecoder::new(reader).read_to_end(&mut document)?;

    let options = codec().with_limit(document.len() as u64);
    let mut input = document.as_slice();

    let format_version: u32 = options
        .deserialize_from(&mut input)
        .map_err(decode_error)?;
    if format_version != ARCHIVE_FORMAT_VERSION {
        return Err(ArchiveError::UnsupportedFormat {
            found: format_version,
            expected: ARCHIVE_FORMAT_VERSION,
        });
    }

    let body: ArchiveBody = options
        .deserialize_from(&mut input)
        .map_err(decode_error)?;

    if let Some(entry) = body.entries.iter().find(|entry| !entry.is_intact()) {
        return Err(ArchiveError::ChecksumMismatch {
            path: entry.path.clone(),
            expected: entry.sha256.clone(),
            actual: super::sha256_hex(&entry.data),
        });
    }

    Ok(ArchiveContents {
        manifest: body.manifest,
        entries: body.entries,
    })
}

/// Surface I/O failures on the output stream as plain I/O errors.
fn encode_error(e: bincode::Error) -> ArchiveError {
    match *e {
        bincode::ErrorKind::Io(io) => ArchiveError::Io(io),
        other => ArchiveError::Encode(Box::new(other)),
    }
}

fn decode_error(e: bincode::Error) -> ArchiveError {
    match *e {
        bincode::ErrorKind::Io(io) => ArchiveError::Io(io),
        other => ArchiveError::Decode(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{MemoryFile, PackageBuilder};
    use semver::Version;
    use std::io;

    fn manifest() -> PackageManifest {
        let mut builder = PackageBuilder::new();
        builder.id = "Archive.Test".to_string();
        builder.version = Some(Version::new(1, 0, 0));
        builder.add_tags(["a", "b"]);
        builder.manifest().unwrap()
    }

    fn encode(files: &[SharedFile]) -> Vec<u8> {
        let mut out = Vec::new();
        GzipArchiveWriter::new()
            .write(&manifest(), files, &mut out)
            .unwrap();
        out
    }

    /// A writer that accepts a fixed number of bytes, then fails.
    struct FullDisk {
        remaining: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_round_trip() {
        let files = vec![
            MemoryFile::shared("lib/a.dll", vec![0u8, 1, 2, 3]),
            MemoryFile::shared("lib/a.dll", "duplicate path"),
            MemoryFile::shared("readme.txt", "hello"),
        ];

        let contents = read_archive(encode(&files).as_slice()).unwrap();

        assert_eq!(contents.manifest, manifest());
        let paths: Vec<&str> = contents.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["lib/a.dll", "lib/a.dll", "readme.txt"]);
        assert_eq!(contents.entries[1].data, b"duplicate path");
        assert_eq!(contents.total_size(), 4 + 14 + 5);
    }

    #[test]
    fn test_output_is_deterministic() {
        let files = vec![MemoryFile::shared("a.txt", "same")];
        assert_eq!(encode(&files), encode(&files));
    }

    #[test]
    fn test_output_is_gzip() {
        let bytes = encode(&[]);
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_compression_level_clamped() {
        assert_eq!(GzipArchiveWriter::with_level(42).level(), 9);
        assert_eq!(GzipArchiveWriter::default().level(), DEFAULT_COMPRESSION_LEVEL);
    }

    #[test]
    fn test_unreadable_file_fails() {
        let files = vec![crate::package::PhysicalFile::shared(
            "missing.txt",
            "/nonexistent/missing.txt",
        )];
        let mut out = Vec::new();
        let err = GzipArchiveWriter::new()
            .write(&manifest(), &files, &mut out)
            .unwrap_err();

        assert!(matches!(err, ArchiveError::ReadFile { ref path, .. } if path == "missing.txt"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let files = vec![MemoryFile::shared("big.bin", vec![7u8; 64 * 1024])];
        let mut disk = FullDisk { remaining: 16 };
        let err = GzipArchiveWriter::with_level(0)
            .write(&manifest(), &files, &mut disk)
            .unwrap_err();

        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_read_rejects_unknown_format() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        bincode::serialize_into(&mut encoder, &99u32).unwrap();
        let bytes = encoder.finish().unwrap();

        let err = read_archive(bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::UnsupportedFormat {
                found: 99,
                expected: ARCHIVE_FORMAT_VERSION
            }
        ));
    }

    #[test]
    fn test_read_rejects_corrupted_entry() {
        let manifest = manifest();
        let mut entry = ArchiveEntry::new("a.txt", b"original".to_vec());
        entry.data = b"tampered".to_vec();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        bincode::serialize_into(&mut encoder, &ARCHIVE_FORMAT_VERSION).unwrap();
        bincode::serialize_into(
            &mut encoder,
            &ArchiveBodyRef {
                manifest: &manifest,
                entries: vec![entry],
            },
        )
        .unwrap();
        let bytes = encoder.finish().unwrap();

        let err = read_archive(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ArchiveError::ChecksumMismatch { ref path, .. } if path == "a.txt"));
    }

    #[test]
    fn test_read_rejects_huge_length_prefix() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        bincode::serialize_into(&mut encoder, &ARCHIVE_FORMAT_VERSION).unwrap();
        bincode::serialize_into(&mut encoder, &(1u64 << 40)).unwrap();
        encoder.write_all(b"Archive.Test").unwrap();
        let bytes = encoder.finish().unwrap();

        let err = read_archive(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ArchiveError::Decode(_)));
    }

    #[test]
    fn test_format_matches_plain_bincode() {
        let mut expected = Vec::new();
        bincode::serialize_into(&mut expected, &ARCHIVE_FORMAT_VERSION).unwrap();

        let mut actual = Vec::new();
        codec()
            .serialize_into(&mut actual, &ARCHIVE_FORMAT_VERSION)
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_read_rejects_garbage() {
        let result = read_archive(&b"definitely not an archive"[..]);
        assert!(result.is_err());
    }
}
