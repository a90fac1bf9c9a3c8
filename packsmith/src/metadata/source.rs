//! The declared metadata of a package.
//!
//! [`PackageMetadata`] is the read-only input to every build. Identity
//! (id and version) is mandatory; every other field defaults when absent.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::dependency::{DependencySet, FrameworkAssemblyReference, PackageReferenceSet};

/// Errors that can occur while loading metadata from a file.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The metadata file could not be opened.
    #[error("failed to read metadata file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metadata file is not a valid metadata document.
    #[error("invalid metadata in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Declared package metadata.
///
/// This is the metadata source a build starts from. It is never modified by
/// the build; the normalizer copies it into a
/// [`PackageBuilder`](crate::package::PackageBuilder).
///
/// # JSON Form
///
/// The struct deserializes from JSON. Only `id` and `version` are required:
///
/// ```json
/// {
///   "id": "Contoso.Logging",
///   "version": "1.2.0",
///   "authors": ["Contoso"],
///   "tags": "logging diagnostics",
///   "license_url": "https://contoso.example/license"
/// }
/// ```
///
/// # Example
///
/// ```
/// use semver::Version;
/// use packsmith::metadata::PackageMetadata;
///
/// let metadata = PackageMetadata::new("Contoso.Logging", Version::new(1, 2, 0));
///
/// assert_eq!(metadata.id, "Contoso.Logging");
/// assert!(metadata.authors.is_empty());
/// assert!(metadata.tags.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package identifier.
    pub id: String,

    /// Package version.
    pub version: Version,

    /// Human-friendly title.
    #[serde(default)]
    pub title: Option<String>,

    /// Package authors, in declaration order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Package owners, in declaration order.
    #[serde(default)]
    pub owners: Vec<String>,

    /// URL of the package icon.
    #[serde(default)]
    pub icon_url: Option<Url>,

    /// URL of the package license.
    #[serde(default)]
    pub license_url: Option<Url>,

    /// URL of the project home page.
    #[serde(default)]
    pub project_url: Option<Url>,

    /// Whether consumers must accept the license before installing.
    #[serde(default)]
    pub require_license_acceptance: bool,

    /// Whether the package is serviceable.
    #[serde(default)]
    pub serviceable: bool,

    /// Whether the package is a development-only dependency.
    #[serde(default)]
    pub development_dependency: bool,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,

    /// Release notes for this version.
    #[serde(default)]
    pub release_notes: Option<String>,

    /// Copyright notice.
    #[serde(default)]
    pub copyright: Option<String>,

    /// Content language (e.g. `en-US`).
    #[serde(default)]
    pub language: Option<String>,

    /// Tags as a single space-delimited string.
    #[serde(default)]
    pub tags: Option<String>,

    /// Dependency sets, grouped by target framework.
    #[serde(default)]
    pub dependency_sets: Vec<DependencySet>,

    /// Framework assemblies the package requires.
    #[serde(default)]
    pub framework_references: Vec<FrameworkAssemblyReference>,

    /// Package assemblies that are referenced by consumers.
    #[serde(default)]
    pub package_assembly_references: Vec<PackageReferenceSet>,

    /// Minimum client version required to consume the package.
    #[serde(default)]
    pub min_client_version: Option<Version>,
}

impl PackageMetadata {
    /// Create metadata with the mandatory identity and every other field empty.
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            version,
            title: None,
            authors: Vec::new(),
            owners: Vec::new(),
            icon_url: None,
            license_url: None,
            project_url: None,
            require_license_acceptance: false,
            serviceable: false,
            development_dependency: false,
            description: String::new(),
            summary: None,
            release_notes: None,
            copyright: None,
            language: None,
            tags: None,
            dependency_sets: Vec::new(),
            framework_references: Vec::new(),
            package_assembly_references: Vec::new(),
            min_client_version: None,
        }
    }
}

/// Load package metadata from a JSON file.
pub fn load_metadata(path: &Path) -> Result<PackageMetadata, MetadataError> {
    let file = File::open(path).map_err(|e| MetadataError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| MetadataError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
