//! Configuration file support.
//!
//! Settings live in an INI file, by default `~/.packsmith/config.ini`:
//!
//! ```ini
//! [build]
//! use_staging_file = true
//! staging_dir = /var/tmp/packsmith
//! compression_level = 6
//!
//! [logging]
//! filter = info
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::archive::GzipArchiveWriter;
use crate::assembler::SaveMode;
use crate::fs::LocalFileSystem;

/// Directory under the home directory holding the config file.
const CONFIG_DIR: &str = ".packsmith";

/// Config file name.
const CONFIG_FILE: &str = "config.ini";

/// Highest gzip compression level.
const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Errors from loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value '{value}' for {section}.{key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings for building archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Write through a temporary file first.
    pub use_staging_file: bool,
    /// Where temporary files are created. `None` means the system temp dir.
    pub staging_dir: Option<PathBuf>,
    /// Gzip level, 0-9.
    pub compression_level: u32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            use_staging_file: true,
            staging_dir: None,
            compression_level: 6,
        }
    }
}

/// Settings for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `packsmith=debug`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub build: BuildSettings,
    pub logging: LoggingSettings,
}

/// Default location of the config file, if a home directory is known.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl ConfigFile {
    /// Load from the default location.
    ///
    /// Returns defaults when there is no home directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. Returns defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Read {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(parse) => ConfigError::Parse {
                path: path.to_path_buf(),
                message: parse.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("build")) {
            if let Some(value) = section.get("use_staging_file") {
                config.build.use_staging_file = parse_bool("build", "use_staging_file", value)?;
            }
            if let Some(value) = section.get("staging_dir") {
                let value = value.trim();
                if !value.is_empty() {
                    config.build.staging_dir = Some(PathBuf::from(value));
                }
            }
            if let Some(value) = section.get("compression_level") {
                config.build.compression_level = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|level| *level <= MAX_COMPRESSION_LEVEL)
                    .ok_or_else(|| invalid("build", "compression_level", value))?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(value) = section.get("filter") {
                let value = value.trim();
                if value.is_empty() {
                    return Err(invalid("logging", "filter", value));
                }
                config.logging.filter = value.to_string();
            }
        }

        Ok(config)
    }

    /// Write the settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("build"))
            .set("use_staging_file", self.build.use_staging_file.to_string())
            .set("compression_level", self.build.compression_level.to_string());
        if let Some(dir) = &self.build.staging_dir {
            ini.with_section(Some("build"))
                .set("staging_dir", dir.to_string_lossy().into_owned());
        }
        ini.with_section(Some("logging"))
            .set("filter", self.logging.filter.as_str());

        ini.write_to_file(path).map_err(write_error)
    }

    /// Save mode implied by `use_staging_file`.
    pub fn save_mode(&self) -> SaveMode {
        SaveMode::from(self.build.use_staging_file)
    }

    /// Local filesystem using the configured staging directory.
    pub fn file_system(&self) -> LocalFileSystem {
        match &self.build.staging_dir {
            Some(dir) => LocalFileSystem::with_staging_dir(dir.clone()),
            None => LocalFileSystem::new(),
        }
    }

    /// Archive writer using the configured compression level.
    pub fn archive_writer(&self) -> GzipArchiveWriter {
        GzipArchiveWriter::with_level(self.build.compression_level)
    }
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(section, key, value)),
    }
}

fn invalid(section: &str, key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    }
}
