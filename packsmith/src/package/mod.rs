//! Package types: content files, builder state and built packages.
//!
//! # Type Hierarchy
//!
//! ```text
//! PackageBuilder (mutable)            BuiltPackage (immutable)
//! ├── id, version, ...  ── build() ─► ├── manifest: PackageManifest
//! ├── tags: Vec<String>               └── files: Vec<SharedFile>
//! └── files: Vec<SharedFile>
//! ```
//!
//! Files are trait objects ([`PackageFile`]) so that content can come from
//! memory ([`MemoryFile`]), from disk ([`PhysicalFile`]), or from any other
//! source a caller provides.

mod builder;
mod built;
mod file;
mod manifest;
mod naming;

pub use builder::PackageBuilder;
pub use built::BuiltPackage;
pub use file::{read_contents, MemoryFile, PackageFile, PhysicalFile, SharedFile};
pub use manifest::PackageManifest;

// Naming utilities
pub use naming::{archive_filename, package_path, ARCHIVE_EXTENSION};
