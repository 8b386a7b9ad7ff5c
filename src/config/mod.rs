//! Configuration management
//!
//! Works out which configuration file to read, how task paths are anchored,
//! and parses the document into a [`CopyManifest`].

use crate::paths::{normalize, PathResolver};
use crate::types::{CopyError, CopyManifest};
use clap::Parser;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file used when neither `-c` nor a positional path is given
pub const DEFAULT_CONFIG_FILE: &str = "./copy-file.yml";

/// Environment variable overriding the ambient exit countdown (seconds)
pub const COUNTDOWN_ENV: &str = "COPY_FILE_COUNTDOWN";

/// Default exit countdown in ambient mode
pub const DEFAULT_COUNTDOWN_SECS: u64 = 5;

/// Command line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "copy-file",
    version,
    about = "Copy files and directories listed in a configuration file"
)]
pub struct Cli {
    /// The configuration file path. Default to [./copy-file.yml].
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Configuration file path used when -c is absent
    #[arg(value_name = "CONFIG")]
    pub args: Vec<String>,
}

/// How the program was launched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// `-c` given: scripted use, paths anchored to the caller's directory
    Console,

    /// Positional or default path: paths anchored to the config's directory
    /// and a countdown runs before exit
    Ambient,
}

/// Where the configuration lives and how it was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Raw path, before resolution
    pub raw: String,
    pub mode: InvocationMode,
}

impl ConfigLocation {
    /// Apply the precedence `-c` value, first positional, default file
    pub fn from_cli(cli: &Cli) -> Self {
        match cli.config.as_deref() {
            Some(path) if !path.is_empty() => Self {
                raw: path.to_string(),
                mode: InvocationMode::Console,
            },
            _ => Self {
                raw: cli
                    .args
                    .first()
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string()),
                mode: InvocationMode::Ambient,
            },
        }
    }
}

/// Everything the task runner needs for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the configuration file
    pub config_path: PathBuf,

    /// Directory relative task paths are resolved against
    pub base_dir: PathBuf,

    pub mode: InvocationMode,

    /// Parsed tasks, in document order
    pub manifest: CopyManifest,
}

impl Config {
    /// Locate, validate and parse the configuration
    ///
    /// `cwd` anchors the configuration path itself. In ambient mode the
    /// returned `base_dir` is the configuration file's parent directory.
    pub fn load(location: &ConfigLocation, cwd: &Path) -> Result<Self, CopyError> {
        let resolver = PathResolver::new(cwd)?;
        let config_path = resolver.resolve(&location.raw);

        match fs::metadata(&config_path) {
            Ok(meta) if meta.is_dir() => {
                return Err(CopyError::ConfigIsDirectory { path: config_path })
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CopyError::ConfigNotFound { path: config_path })
            }
            Err(source) => {
                return Err(CopyError::ConfigRead {
                    path: config_path,
                    source,
                })
            }
        }

        let base_dir = match location.mode {
            InvocationMode::Console => resolver.base().to_path_buf(),
            InvocationMode::Ambient => config_path
                .parent()
                .map(normalize)
                .unwrap_or_else(|| resolver.base().to_path_buf()),
        };

        let manifest = load_manifest(&config_path)?;

        Ok(Self {
            config_path,
            base_dir,
            mode: location.mode,
            manifest,
        })
    }

    /// Resolve from parsed CLI arguments and the process working directory
    pub fn from_cli(cli: &Cli) -> Result<Self, CopyError> {
        let cwd = PathResolver::from_current_dir()?;
        Self::load(&ConfigLocation::from_cli(cli), cwd.base())
    }

    /// Exit countdown for this invocation (`None` when no delay applies)
    pub fn countdown(&self) -> Option<Duration> {
        if self.mode != InvocationMode::Ambient {
            return None;
        }
        let secs = countdown_secs(std::env::var(COUNTDOWN_ENV).ok().as_deref());
        (secs > 0).then(|| Duration::from_secs(secs))
    }
}

/// Parse a countdown override, falling back to the default on bad input
pub fn countdown_secs(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_COUNTDOWN_SECS)
}

/// Read and parse a configuration file
///
/// Files ending in `.toml` are parsed as TOML, anything else as YAML.
pub fn load_manifest(path: &Path) -> Result<CopyManifest, CopyError> {
    let contents = fs::read_to_string(path).map_err(|source| CopyError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        parse_toml(&contents)
    } else {
        parse_yaml(&contents)
    };

    parsed.map_err(|message| CopyError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a YAML manifest
pub fn parse_yaml(contents: &str) -> Result<CopyManifest, String> {
    serde_yaml::from_str(contents).map_err(|e| e.to_string())
}

/// Parse a TOML manifest (`[[copy-file]]` tables)
pub fn parse_toml(contents: &str) -> Result<CopyManifest, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}
