//! Copies declared metadata into builder state.

use super::source::PackageMetadata;
use super::tags::parse_tags;
use crate::package::PackageBuilder;

/// Create a fresh builder populated from `source`.
///
/// # Example
///
/// ```
/// use semver::Version;
/// use packsmith::metadata::{normalize, PackageMetadata};
///
/// let mut source = PackageMetadata::new("Contoso.Core", Version::new(1, 0, 0));
/// source.tags = Some("  core   utilities ".to_string());
///
/// let builder = normalize(&source);
/// assert_eq!(builder.id, "Contoso.Core");
/// assert_eq!(builder.tags, vec!["core", "utilities"]);
/// ```
pub fn normalize(source: &PackageMetadata) -> PackageBuilder {
    let mut builder = PackageBuilder::new();
    copy_metadata(source, &mut builder);
    builder
}

/// Copy every field of `source` into `builder`.
///
/// Scalars overwrite the builder's values. List fields are appended in source
/// order, keeping duplicates. Tags are parsed from the space-delimited string
/// and added to the builder's tag set.
pub fn copy_metadata(source: &PackageMetadata, builder: &mut PackageBuilder) {
    builder.id = source.id.clone();
    builder.version = Some(source.version.clone());
    builder.title = source.title.clone();
    builder.authors.extend(source.authors.iter().cloned());
    builder.owners.extend(source.owners.iter().cloned());
    builder.icon_url = source.icon_url.clone();
    builder.license_url = source.license_url.clone();
    builder.project_url = source.project_url.clone();
    builder.require_license_acceptance = source.require_license_acceptance;
    builder.serviceable = source.serviceable;
    builder.development_dependency = source.development_dependency;
    builder.description = source.description.clone();
    builder.summary = source.summary.clone();
    builder.release_notes = source.release_notes.clone();
    builder.copyright = source.copyright.clone();
    builder.language = source.language.clone();
    builder.add_tags(parse_tags(source.tags.as_deref()));
    builder
        .dependency_sets
        .extend(source.dependency_sets.iter().cloned());
    builder
        .framework_references
        .extend(source.framework_references.iter().cloned());
    builder
        .package_assembly_references
        .extend(source.package_assembly_references.iter().cloned());
    builder.min_client_version = source.min_client_version.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        DependencySet, FrameworkAssemblyReference, PackageDependency, PackageReferenceSet,
    };
    use semver::{Version, VersionReq};
    use url::Url;

    fn full_metadata() -> PackageMetadata {
        let mut source = PackageMetadata::new("Contoso.Full", Version::new(3, 1, 4));
        source.title = Some("Contoso Full".to_string());
        source.authors = vec!["alice".to_string(), "bob".to_string(), "alice".to_string()];
        source.owners = vec!["contoso".to_string()];
        source.icon_url = Some(Url::parse("https://contoso.example/icon.png").unwrap());
        source.license_url = Some(Url::parse("https://contoso.example/license").unwrap());
        source.project_url = Some(Url::parse("https://contoso.example/").unwrap());
        source.require_license_acceptance = true;
        source.serviceable = true;
        source.development_dependency = true;
        source.description = "Everything set".to_string();
        source.summary = Some("summary".to_string());
        source.release_notes = Some("notes".to_string());
        source.copyright = Some("(c) Contoso".to_string());
        source.language = Some("en-US".to_string());
        source.tags = Some("one  two three".to_string());
        source.dependency_sets = vec![
            DependencySet::new(
                Some("net8.0".to_string()),
                vec![PackageDependency::new("Dep.A")
                    .with_version_req(VersionReq::parse("^1.0").unwrap())],
            ),
            DependencySet::default(),
        ];
        source.framework_references = vec![
            FrameworkAssemblyReference::new("System.Xml"),
            FrameworkAssemblyReference::new("System.Xml"),
        ];
        source.package_assembly_references = vec![PackageReferenceSet {
            target_framework: None,
            references: vec!["Contoso.Full.dll".to_string()],
        }];
        source.min_client_version = Some(Version::new(2, 5, 0));
        source
    }

    #[test]
    fn test_normalize_preserves_every_field() {
        let source = full_metadata();
        let builder = normalize(&source);

        assert_eq!(builder.id, source.id);
        assert_eq!(builder.version.as_ref(), Some(&source.version));
        assert_eq!(builder.title, source.title);
        assert_eq!(builder.authors, source.authors);
        assert_eq!(builder.owners, source.owners);
        assert_eq!(builder.icon_url, source.icon_url);
        assert_eq!(builder.license_url, source.license_url);
        assert_eq!(builder.project_url, source.project_url);
        assert_eq!(builder.require_license_acceptance, source.require_license_acceptance);
        assert_eq!(builder.serviceable, source.serviceable);
        assert_eq!(builder.development_dependency, source.development_dependency);
        assert_eq!(builder.description, source.description);
        assert_eq!(builder.summary, source.summary);
        assert_eq!(builder.release_notes, source.release_notes);
        assert_eq!(builder.copyright, source.copyright);
        assert_eq!(builder.language, source.language);
        assert_eq!(builder.tags, vec!["one", "two", "three"]);
        assert_eq!(builder.dependency_sets, source.dependency_sets);
        assert_eq!(builder.framework_references, source.framework_references);
        assert_eq!(
            builder.package_assembly_references,
            source.package_assembly_references
        );
        assert_eq!(builder.min_client_version, source.min_client_version);
        assert!(builder.files.is_empty());
    }

    #[test]
    fn test_list_fields_keep_duplicates() {
        let builder = normalize(&full_metadata());
        assert_eq!(builder.authors, vec!["alice", "bob", "alice"]);
        assert_eq!(builder.framework_references.len(), 2);
    }

    #[test]
    fn test_copy_appends_to_existing_lists() {
        let mut builder = PackageBuilder::new();
        builder.authors.push("existing".to_string());
        builder.dependency_sets.push(DependencySet::default());

        copy_metadata(&full_metadata(), &mut builder);

        assert_eq!(builder.authors, vec!["existing", "alice", "bob", "alice"]);
        assert_eq!(builder.dependency_sets.len(), 3);
    }

    #[test]
    fn test_missing_tags_yield_empty_set() {
        let source = PackageMetadata::new("A", Version::new(1, 0, 0));
        assert!(normalize(&source).tags.is_empty());

        let mut empty = source.clone();
        empty.tags = Some(String::new());
        assert!(normalize(&empty).tags.is_empty());
    }

    #[test]
    fn test_round_trip_through_manifest() {
        let source = full_metadata();
        let manifest = normalize(&source).manifest().unwrap();

        assert_eq!(manifest.id, source.id);
        assert_eq!(manifest.version, source.version);
        assert_eq!(manifest.authors, source.authors);
        assert_eq!(manifest.dependency_sets, source.dependency_sets);
        assert_eq!(manifest.min_client_version, source.min_client_version);
    }
}
