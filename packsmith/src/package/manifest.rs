//! Finalized package metadata.

use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::metadata::{
    DependencySet, FrameworkAssemblyReference, PackageReferenceSet,
};

/// Metadata of a finished package.
///
/// Produced by [`PackageBuilder`](super::PackageBuilder) when a package is
/// built, and stored verbatim inside package archives. Unlike
/// [`PackageMetadata`](crate::metadata::PackageMetadata), tags are already
/// split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub id: String,
    pub version: Version,
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
}

impl fmt::Display for PackageManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.id, self.version)
    }
}
