//! CLI error type.

use std::io;
use std::path::PathBuf;

use packsmith::archive::ArchiveError;
use packsmith::config::ConfigError;
use packsmith::metadata::MetadataError;
use packsmith::BuildError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to read archive {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("package id '{0}' cannot be used as an archive file name")]
    InvalidPackageId(String),

    #[error("invalid file argument '{0}': expected FILE or FILE=PKG_PATH inside the package")]
    InvalidFileArg(String),
}
