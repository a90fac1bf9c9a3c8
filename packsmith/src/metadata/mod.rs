//! Package metadata and normalization.
//!
//! This module defines the metadata a package is declared with and the
//! normalizer that copies it into a [`PackageBuilder`](crate::package::PackageBuilder).
//!
//! # Overview
//!
//! - **PackageMetadata**: The declared metadata source (identity, descriptive
//!   text, list-valued fields, URLs, flags)
//! - **Dependency types**: Dependency sets, framework assembly references and
//!   package assembly reference sets
//! - **Tags**: Space-delimited tag parsing
//! - **Normalizer**: Copies a metadata source into builder state
//!
//! # Normalization Rules
//!
//! ```text
//! PackageMetadata                 PackageBuilder
//! ├── id, version, title ...  ──► copied verbatim
//! ├── authors, owners ...     ──► appended in order (duplicates kept)
//! └── tags: "a  b c"          ──► tag set ["a", "b", "c"]
//! ```

mod dependency;
mod normalize;
mod source;
mod tags;

pub use dependency::{
    DependencySet, FrameworkAssemblyReference, PackageDependency, PackageReferenceSet,
};
pub use normalize::{copy_metadata, normalize};
pub use source::{load_metadata, MetadataError, PackageMetadata};
pub use tags::parse_tags;
