//! Mutable builder state for one package build.

use semver::Version;
use tracing::debug;
use url::Url;

use super::built::BuiltPackage;
use super::file::SharedFile;
use super::manifest::PackageManifest;
use crate::assembler::{BuildError, BuildResult};
use crate::metadata::{DependencySet, FrameworkAssemblyReference, PackageReferenceSet};

/// In-progress package: normalized metadata plus the ordered file list.
///
/// A builder is created fresh for each build, filled by
/// [`copy_metadata`](crate::metadata::copy_metadata) and by adding files, and
/// then finalized with [`build`](Self::build) or handed to an archive writer
/// by the assembler.
///
/// List fields accumulate: adding never replaces what is already there, and
/// duplicates are kept in insertion order. Tags are the exception: they form
/// a set, so a tag already present is not added again.
///
/// # Example
///
/// ```
/// use semver::Version;
/// use packsmith::package::{MemoryFile, PackageBuilder};
///
/// let mut builder = PackageBuilder::new();
/// builder.id = "Contoso.Core".to_string();
/// builder.version = Some(Version::new(1, 0, 0));
/// builder.add_tags(["core", "utilities", "core"]);
/// builder.add_file(MemoryFile::shared("lib/core.dll", vec![0u8; 4]));
///
/// let package = builder.build().unwrap();
/// assert_eq!(package.manifest().tags, vec!["core", "utilities"]);
/// assert_eq!(package.files().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageBuilder {
    pub id: String,
    pub version: Option<Version>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub owners: Vec<String>,
    pub icon_url: Option<Url>,
    pub license_url: Option<Url>,
    pub project_url: Option<Url>,
    pub require_license_acceptance: bool,
    pub serviceable: bool,
    pub development_dependency: bool,
    pub description: String,
    pub summary: Option<String>,
    pub release_notes: Option<String>,
    pub copyright: Option<String>,
    pub language: Option<String>,
    pub tags: Vec<String>,
    pub dependency_sets: Vec<DependencySet>,
    pub framework_references: Vec<FrameworkAssemblyReference>,
    pub package_assembly_references: Vec<PackageReferenceSet>,
    pub min_client_version: Option<Version>,
    pub files: Vec<SharedFile>,
}

impl PackageBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add tags in order, skipping any tag already in the set.
    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref();
            if !self.tags.iter().any(|existing| existing == tag) {
                self.tags.push(tag.to_string());
            }
        }
    }

    /// Append one file.
    pub fn add_file(&mut self, file: SharedFile) {
        self.files.push(file);
    }

    /// Append files in the order given.
    pub fn add_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = SharedFile>,
    {
        self.files.extend(files);
    }

    /// Snapshot the metadata as a manifest.
    ///
    /// Fails if the id is blank or no version was set.
    pub fn manifest(&self) -> BuildResult<PackageManifest> {
        if self.id.trim().is_empty() {
            return Err(BuildError::InvalidMetadata(
                "package id must not be empty".to_string(),
            ));
        }
        let version = self.version.clone().ok_or_else(|| {
            BuildError::InvalidMetadata(format!("package '{}' has no version", self.id))
        })?;

        Ok(PackageManifest {
            id: self.id.clone(),
            version,
            title: self.title.clone(),
            authors: self.authors.clone(),
            owners: self.owners.clone(),
            icon_url: self.icon_url.clone(),
            license_url: self.license_url.clone(),
            project_url: self.project_url.clone(),
            require_license_acceptance: self.require_license_acceptance,
            serviceable: self.serviceable,
            development_dependency: self.development_dependency,
            description: self.description.clone(),
            summary: self.summary.clone(),
            release_notes: self.release_notes.clone(),
            copyright: self.copyright.clone(),
            language: self.language.clone(),
            tags: self.tags.clone(),
            dependency_sets: self.dependency_sets.clone(),
            framework_references: self.framework_references.clone(),
            package_assembly_references: self.package_assembly_references.clone(),
            min_client_version: self.min_client_version.clone(),
        })
    }

    /// Finalize into an immutable in-memory package.
    pub fn build(self) -> BuildResult<BuiltPackage> {
        let manifest = self.manifest()?;
        debug!(package = %manifest, files = self.files.len(), "built package in memory");
        Ok(BuiltPackage::new(manifest, self.files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::MemoryFile;

    fn valid_builder() -> PackageBuilder {
        let mut builder = PackageBuilder::new();
        builder.id = "A".to_string();
        builder.version = Some(Version::new(1, 0, 0));
        builder
    }

    #[test]
    fn test_add_tags_preserves_order_and_skips_duplicates() {
        let mut builder = PackageBuilder::new();
        builder.add_tags(["b", "a"]);
        builder.add_tags(vec!["a".to_string(), "c".to_string()]);
        assert_eq!(builder.tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_files_appends() {
        let mut builder = PackageBuilder::new();
        builder.add_file(MemoryFile::shared("a", "1"));
        builder.add_files(vec![MemoryFile::shared("b", "2"), MemoryFile::shared("a", "3")]);

        let paths: Vec<&str> = builder.files.iter().map(|f| f.path()).collect();
        assert_eq!(paths, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_build_rejects_empty_id() {
        let mut builder = valid_builder();
        builder.id = "  ".to_string();

        let err = builder.build().unwrap_err();
        assert!(matches!(err, BuildError::InvalidMetadata(_)));
    }

    #[test]
    fn test_build_rejects_missing_version() {
        let mut builder = valid_builder();
        builder.version = None;

        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("no version"));
    }

    #[test]
    fn test_build_keeps_files_in_order() {
        let mut builder = valid_builder();
        builder.add_file(MemoryFile::shared("z.txt", "z"));
        builder.add_file(MemoryFile::shared("a.txt", "a"));

        let package = builder.build().unwrap();
        assert_eq!(package.file_paths(), vec!["z.txt", "a.txt"]);
    }

    #[test]
    fn test_manifest_copies_fields() {
        let mut builder = valid_builder();
        builder.title = Some("Title".to_string());
        builder.authors = vec!["x".to_string(), "x".to_string()];
        builder.serviceable = true;

        let manifest = builder.manifest().unwrap();
        assert_eq!(manifest.title.as_deref(), Some("Title"));
        assert_eq!(manifest.authors, vec!["x", "x"]);
        assert!(manifest.serviceable);
    }
}
