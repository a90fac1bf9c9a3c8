//! Package content files.
//!
//! A [`PackageFile`] is a named content entry: a logical path inside the
//! package plus a source of bytes. Files are shared between the builder, the
//! built package and the archive writer as [`SharedFile`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

/// A file shared between builder, built package and archive writer.
pub type SharedFile = Arc<dyn PackageFile>;

/// A content entry of a package.
///
/// Implementations supply the in-package path and a fresh byte stream on
/// every call to [`open`](PackageFile::open). Paths are not checked for
/// uniqueness; duplicates are passed through to the archive layer.
pub trait PackageFile: fmt::Debug + Send + Sync {
    /// Logical path inside the package, `/`-separated.
    fn path(&self) -> &str;

    /// Open a new reader over the file contents.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Read the complete contents of a package file.
pub fn read_contents(file: &dyn PackageFile) -> io::Result<Vec<u8>> {
    let mut reader = file.open()?;
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// A package file whose contents are held in memory.
///
/// # Example
///
/// ```
/// use packsmith::package::{read_contents, MemoryFile};
///
/// let file = MemoryFile::new("content/readme.txt", b"hello".to_vec());
/// assert_eq!(read_contents(&file).unwrap(), b"hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    path: String,
    data: Bytes,
}

impl MemoryFile {
    /// Create a file from a path and its contents.
    pub fn new(path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// Create a file and wrap it for sharing.
    pub fn shared(path: impl Into<String>, data: impl Into<Bytes>) -> SharedFile {
        Arc::new(Self::new(path, data))
    }

    /// The file contents.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl PackageFile for MemoryFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}

/// A package file backed by a file on disk.
///
/// The disk file is opened lazily each time the contents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalFile {
    path: String,
    source: PathBuf,
}

impl PhysicalFile {
    /// Create a file that reads `source` and appears at `path` in the package.
    pub fn new(path: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a file and wrap it for sharing.
    pub fn shared(path: impl Into<String>, source: impl Into<PathBuf>) -> SharedFile {
        Arc::new(Self::new(path, source))
    }

    /// Path of the backing file on disk.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl PackageFile for PhysicalFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(&self.source)?;
        Ok(Box::new(BufReader::new(file)))
    }
}
