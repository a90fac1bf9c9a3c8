//! `packsmith inspect`: print the contents of an archive.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;
use console::style;
use packsmith::archive::{read_archive, ArchiveContents};

use super::format_size;
use crate::error::CliError;

/// Arguments for `packsmith inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Archive to inspect
    pub archive: PathBuf,
}

/// Run `packsmith inspect`.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let file = File::open(&args.archive).map_err(|source| CliError::Open {
        path: args.archive.clone(),
        source,
    })?;

    let contents = read_archive(BufReader::new(file)).map_err(|source| CliError::Inspect {
        path: args.archive.clone(),
        source,
    })?;

    print!("{}", render(&contents));
    Ok(())
}

/// Human-readable summary of an archive.
fn render(contents: &ArchiveContents) -> String {
    let manifest = &contents.manifest;
    let mut out = String::new();

    out.push_str(&format!("{}\n", style(manifest).bold()));
    if let Some(title) = &manifest.title {
        out.push_str(&format!("  Title:       {}\n", title));
    }
    if !manifest.authors.is_empty() {
        out.push_str(&format!("  Authors:     {}\n", manifest.authors.join(", ")));
    }
    if !manifest.description.is_empty() {
        out.push_str(&format!("  Description: {}\n", manifest.description));
    }
    if !manifest.tags.is_empty() {
        out.push_str(&format!("  Tags:        {}\n", manifest.tags.join(" ")));
    }
    for set in &manifest.dependency_sets {
        let framework = set.target_framework.as_deref().unwrap_or("any");
        for dependency in &set.dependencies {
            out.push_str(&format!("  Depends:     {} [{}]\n", dependency, framework));
        }
    }

    out.push_str(&format!(
        "\n{} ({}, {})\n",
        style("Files").bold(),
        contents.entries.len(),
        format_size(contents.total_size())
    ));
    for entry in &contents.entries {
        out.push_str(&format!(
            "  {:>10}  {}\n",
            format_size(entry.data.len() as u64),
            entry.path
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith::archive::ArchiveEntry;
    use packsmith::package::MemoryFile;
    use packsmith::{build_package, PackageMetadata};
    use semver::Version;

    fn contents() -> ArchiveContents {
        let mut metadata = PackageMetadata::new("Inspect.Me", Version::new(0, 3, 0));
        metadata.authors = vec!["ann".to_string()];
        metadata.tags = Some("a b".to_string());
        let package = build_package(&metadata, vec![MemoryFile::shared("x.txt", "12345")]).unwrap();

        ArchiveContents {
            manifest: package.manifest().clone(),
            entries: vec![ArchiveEntry::new("x.txt", b"12345".to_vec())],
        }
    }

    #[test]
    fn test_render_lists_manifest_and_files() {
        console::set_colors_enabled(false);
        let text = render(&contents());

        assert!(text.contains("Inspect.Me v0.3.0"));
        assert!(text.contains("Authors:     ann"));
        assert!(text.contains("Tags:        a b"));
        assert!(text.contains("Files (1, 5 B)"));
        assert!(text.contains("5 B  x.txt"));
    }

    #[test]
    fn test_run_missing_archive() {
        let args = InspectArgs {
            archive: PathBuf::from("/definitely/not/here.spkg"),
        };
        assert!(matches!(run(args), Err(CliError::Open { .. })));
    }
}
