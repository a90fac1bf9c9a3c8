//! The finalized, immutable package.

use std::fmt;

use semver::Version;

use super::file::{MemoryFile, SharedFile};
use super::manifest::PackageManifest;
use crate::archive::ArchiveContents;
use crate::validation::{self, Issues, RuleSlot};

/// A built package: finalized metadata plus its file set.
///
/// Built packages are immutable. They are produced by
/// [`PackageBuilder::build`](super::PackageBuilder::build) or decoded from an
/// archive with [`BuiltPackage::from_archive`], and are what validation rules
/// run against.
#[derive(Debug, Clone)]
pub struct BuiltPackage {
    manifest: PackageManifest,
    files: Vec<SharedFile>,
}

impl BuiltPackage {
    pub(crate) fn new(manifest: PackageManifest, files: Vec<SharedFile>) -> Self {
        Self { manifest, files }
    }

    /// Reconstruct a package from decoded archive contents.
    pub fn from_archive(contents: ArchiveContents) -> Self {
        let files = contents
            .entries
            .into_iter()
            .map(|entry| MemoryFile::shared(entry.path, entry.data))
            .collect();

        Self::new(contents.manifest, files)
    }

    /// Package metadata.
    pub fn manifest(&self) -> &PackageManifest {
        &self.manifest
    }

    /// Package identifier.
    pub fn id(&self) -> &str {
        &self.manifest.id
    }

    /// Package version.
    pub fn version(&self) -> &Version {
        &self.manifest.version
    }

    /// All files in build order.
    pub fn files(&self) -> &[SharedFile] {
        &self.files
    }

    /// The first file with the given in-package path.
    pub fn file(&self, path: &str) -> Option<&SharedFile> {
        self.files.iter().find(|file| file.path() == path)
    }

    /// In-package paths of all files, in build order.
    pub fn file_paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path()).collect()
    }

    /// Run validation rules against this package.
    ///
    /// See [`validation::validate`].
    pub fn validate<'a>(&'a self, rules: &'a [RuleSlot], source: &'a str) -> Issues<'a> {
        validation::validate(self, rules, source)
    }
}

impl fmt::Display for BuiltPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} files)", self.manifest, self.files.len())
    }
}
