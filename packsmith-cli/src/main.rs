//! Packsmith CLI - build and inspect package archives.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use packsmith::config::ConfigFile;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::inspect::InspectArgs;
use commands::pack::PackArgs;
use error::CliError;

/// Build and inspect package archives.
#[derive(Debug, Parser)]
#[command(name = "packsmith", version, about)]
struct Cli {
    /// Config file (defaults to ~/.packsmith/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a package archive from metadata and files
    Pack(PackArgs),
    /// Print the manifest and file list of an archive
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    init_logging(&config);

    match cli.command {
        Commands::Pack(args) => commands::pack::run(args, &config),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}

/// Install the log subscriber. `RUST_LOG` overrides the configured filter.
fn init_logging(config: &ConfigFile) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pack() {
        let cli = Cli::parse_from([
            "packsmith",
            "pack",
            "--metadata",
            "package.json",
            "--output",
            "out.spkg",
            "--direct",
            "--config",
            "custom.ini",
            "a.dll=lib/a.dll",
            "readme.txt",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("custom.ini")));
        match cli.command {
            Commands::Pack(args) => {
                assert!(args.direct);
                assert_eq!(args.metadata, PathBuf::from("package.json"));
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.files[0].package_path.as_deref(), Some("lib/a.dll"));
            }
            other => panic!("expected pack, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::parse_from(["packsmith", "inspect", "a.spkg"]);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.archive, PathBuf::from("a.spkg")),
            other => panic!("expected inspect, got {:?}", other),
        }
    }
}
