//! Packsmith - package assembly and validation
//!
//! This library turns declared package metadata plus a set of content files
//! into a versioned package, either held in memory or persisted to disk as an
//! archive, and runs pluggable validation rules against the result.
//!
//! # Overview
//!
//! ```text
//! PackageMetadata + files
//!         │
//!         ▼
//! metadata::normalize ──► PackageBuilder ──► PackageAssembler ──► BuiltPackage / archive on disk
//!                                                                      │
//!                                                                      ▼
//!                                                  validation::validate ──► PackageIssue*
//! ```
//!
//! - [`metadata`]: the metadata source type and the normalizer
//! - [`package`]: package files, the builder state and the built package
//! - [`archive`]: archive writer collaborator and the default gzip format
//! - [`fs`]: filesystem collaborator (real disk and in-memory fake)
//! - [`assembler`]: in-memory builds and atomic on-disk builds
//! - [`validation`]: rule execution with per-rule fault isolation
//! - [`config`]: INI configuration file
//!
//! # Example
//!
//! ```
//! use packsmith::assembler::PackageAssembler;
//! use packsmith::metadata::PackageMetadata;
//! use packsmith::package::MemoryFile;
//! use semver::Version;
//!
//! let mut metadata = PackageMetadata::new("Contoso.Logging", Version::new(1, 2, 0));
//! metadata.authors.push("Contoso".to_string());
//! metadata.tags = Some("logging diagnostics".to_string());
//!
//! let files = vec![MemoryFile::shared("lib/contoso.dll", b"binary".to_vec())];
//!
//! let package = PackageAssembler::new()
//!     .build_in_memory(&metadata, files)
//!     .unwrap();
//!
//! assert_eq!(package.id(), "Contoso.Logging");
//! assert_eq!(package.manifest().tags, vec!["logging", "diagnostics"]);
//! ```

pub mod archive;
pub mod assembler;
pub mod config;
pub mod fs;
pub mod metadata;
pub mod package;
pub mod validation;

// Re-export the most commonly used types
pub use assembler::{build_package, save_package, BuildError, BuildResult, PackageAssembler, SaveMode};
pub use metadata::PackageMetadata;
pub use package::{BuiltPackage, PackageBuilder, PackageFile, SharedFile};
pub use validation::{validate, PackageIssue, PackageRule};
