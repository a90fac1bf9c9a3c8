//! Dependency and reference types carried in package metadata.

use std::fmt;

use semver::VersionReq;
use serde::{Deserialize, Serialize};

/// A dependency on another package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDependency {
    /// Identifier of the package depended on.
    pub id: String,

    /// Accepted versions. `None` accepts any version.
    #[serde(default)]
    pub version_req: Option<VersionReq>,
}

impl PackageDependency {
    /// Create a dependency that accepts any version.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version_req: None,
        }
    }

    /// Restrict the dependency to the given version requirement.
    pub fn with_version_req(mut self, req: VersionReq) -> Self {
        self.version_req = Some(req);
        self
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_req {
            Some(req) => write!(f, "{} ({})", self.id, req),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Dependencies that apply to one target framework.
///
/// A set without a target framework applies to every framework.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencySet {
    /// Target framework moniker (e.g. `net8.0`).
    #[serde(default)]
    pub target_framework: Option<String>,

    /// Dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<PackageDependency>,
}

impl DependencySet {
    /// Create a dependency set for a target framework.
    pub fn new(target_framework: Option<String>, dependencies: Vec<PackageDependency>) -> Self {
        Self {
            target_framework,
            dependencies,
        }
    }
}

/// A framework assembly the package requires from the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkAssemblyReference {
    /// Assembly name (e.g. `System.Net.Http`).
    pub assembly_name: String,

    /// Frameworks the reference applies to. Empty means all.
    #[serde(default)]
    pub supported_frameworks: Vec<String>,
}

impl FrameworkAssemblyReference {
    /// Create a reference that applies to every framework.
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            supported_frameworks: Vec::new(),
        }
    }
}

/// Package assemblies exposed to consumers for one target framework.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageReferenceSet {
    /// Target framework moniker. `None` applies to every framework.
    #[serde(default)]
    pub target_framework: Option<String>,

    /// Assembly file names (e.g. `Contoso.Core.dll`).
    #[serde(default)]
    pub references: Vec<String>,
}
