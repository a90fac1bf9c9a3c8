//! Centralized package naming conventions.
//!
//! This module is the single source of truth for package naming:
//! - Archive filenames (e.g., `Contoso.Logging.1.2.0.spkg`)
//! - In-package file paths (e.g., `lib/net8.0/Contoso.Logging.dll`)
//!
//! All other modules should use these functions rather than constructing names directly.

use std::path::{Component, Path};

use semver::Version;

/// File extension of package archives.
pub const ARCHIVE_EXTENSION: &str = "spkg";

/// Generate the archive filename for a package.
///
/// # Format
///
/// `{id}.{version}.spkg`
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use packsmith::package::archive_filename;
///
/// assert_eq!(
///     archive_filename("Contoso.Logging", &Version::new(1, 2, 0)),
///     "Contoso.Logging.1.2.0.spkg"
/// );
/// ```
pub fn archive_filename(id: &str, version: &Version) -> String {
    format!("{}.{}.{}", id, version, ARCHIVE_EXTENSION)
}

/// Convert a filesystem path into an in-package path.
///
/// The path is taken relative to `base` when it lies beneath it, and its
/// components are joined with `/` regardless of platform. Returns `None` if
/// the result would be empty or would escape the package root.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use packsmith::package::package_path;
///
/// assert_eq!(
///     package_path(Path::new("/work/out/lib/a.dll"), Path::new("/work/out")),
///     Some("lib/a.dll".to_string())
/// );
/// assert_eq!(package_path(Path::new("../secret"), Path::new(".")), None);
/// ```
pub fn package_path(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).unwrap_or(path);

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
