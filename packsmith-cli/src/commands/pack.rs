//! `packsmith pack`: build an archive from metadata and files on disk.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use console::style;
use packsmith::config::ConfigFile;
use packsmith::metadata::load_metadata;
use packsmith::package::{archive_filename, package_path, PhysicalFile};
use packsmith::{PackageAssembler, PackageMetadata, SaveMode, SharedFile};
use tracing::debug;

use crate::error::CliError;

/// Arguments for `packsmith pack`.
#[derive(Debug, Args)]
pub struct PackArgs {
    /// Package metadata (JSON)
    #[arg(long, short)]
    pub metadata: PathBuf,

    /// Archive to write. If this is a directory, the archive is named
    /// `<id>.<version>.spkg` inside it.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Write straight to the output instead of through a staging file
    #[arg(long)]
    pub direct: bool,

    /// Directory that in-package paths are relative to
    #[arg(long, default_value = ".")]
    pub base: PathBuf,

    /// Content files, as FILE or FILE=PKG_PATH
    pub files: Vec<FileArg>,
}

/// A content file argument.
///
/// The in-package path is whatever follows the last `=`, so a source path may
/// itself contain `=` as long as an explicit package path is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArg {
    /// File on disk.
    pub source: PathBuf,
    /// Explicit in-package path, if given.
    pub package_path: Option<String>,
}

impl FromStr for FileArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, package_path) = match s.rsplit_once('=') {
            Some((source, target)) => (source, Some(target.to_string())),
            None => (s, None),
        };

        if source.is_empty() {
            return Err(format!("missing file in '{}'", s));
        }

        Ok(Self {
            source: PathBuf::from(source),
            package_path,
        })
    }
}

impl FileArg {
    /// Resolve to a package file, computing the in-package path.
    fn resolve(&self, base: &Path) -> Result<SharedFile, CliError> {
        let path = match &self.package_path {
            Some(explicit) => package_path(Path::new(explicit), Path::new("")),
            None => package_path(&self.source, base),
        }
        .ok_or_else(|| CliError::InvalidFileArg(self.to_string()))?;

        Ok(PhysicalFile::shared(path, self.source.clone()))
    }
}

impl std::fmt::Display for FileArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.package_path {
            Some(target) => write!(f, "{}={}", self.source.display(), target),
            None => write!(f, "{}", self.source.display()),
        }
    }
}

/// Archive file name for a package, refusing ids that would leave the
/// output directory.
fn default_archive_name(metadata: &PackageMetadata) -> Result<String, CliError> {
    let id = metadata.id.as_str();
    if id.contains(['/', '\\']) || id.contains("..") {
        return Err(CliError::InvalidPackageId(id.to_string()));
    }
    Ok(archive_filename(id, &metadata.version))
}

/// Run `packsmith pack`.
pub fn run(args: PackArgs, config: &ConfigFile) -> Result<(), CliError> {
    let metadata = load_metadata(&args.metadata)?;

    let files = args
        .files
        .iter()
        .map(|file| file.resolve(&args.base))
        .collect::<Result<Vec<_>, _>>()?;

    let target = if args.output.is_dir() {
        args.output.join(default_archive_name(&metadata)?)
    } else {
        args.output
    };

    let mode = if args.direct {
        SaveMode::Direct
    } else {
        config.save_mode()
    };

    debug!(
        files = files.len(),
        target = %target.display(),
        ?mode,
        "packing"
    );

    let file_count = files.len();
    let assembler =
        PackageAssembler::with_collaborators(config.archive_writer(), config.file_system());
    assembler.build_to_file(&metadata, files, &target, mode)?;

    println!(
        "{} {} v{} ({} files) -> {}",
        style("Packed").green().bold(),
        metadata.id,
        metadata.version,
        file_count,
        target.display()
    );

    Ok(())
}
