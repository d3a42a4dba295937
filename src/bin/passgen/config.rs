//! Form defaults, read from a YAML file.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use passgen::{ClassSelection, RawLength};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// The length the form starts out with. Validated when it is used, not when it is loaded.
    #[serde(default = "default_length")]
    pub(crate) length: RawLength,
    #[serde(default)]
    pub(crate) classes: ClassSelection,
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            length: default_length(),
            classes: ClassSelection::default(),
            source: None,
        }
    }
}

impl Config {
    /// The configured length, as the text a user would have typed.
    pub(crate) fn length_text(&self) -> String {
        match &self.length {
            RawLength::Integer(n) => n.to_string(),
            RawLength::Float(n) => n.to_string(),
            RawLength::Text(s) => s.clone(),
        }
    }

    pub(crate) fn describe_source(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from("<built-in defaults>"))
    }
}

fn default_length() -> RawLength {
    RawLength::Integer(12)
}

/// Load the configuration.
///
/// An explicitly given file must exist. The default file is optional: when it is missing, or
/// `HOME` is not set, the built-in defaults apply.
pub(crate) fn load(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    match config_path {
        Some(path) => load_from(&path),
        None => match default_config() {
            Some(path) => match load_from(&path) {
                Ok(config) => Ok(config),
                Err(err) if is_not_found(&err) => {
                    log::debug!("no config at {}; using defaults", path.display());
                    Ok(Config::default())
                }
                Err(err) => Err(err),
            },
            None => {
                log::debug!("HOME is not set; using default config");
                Ok(Config::default())
            }
        },
    }
}

fn load_from(path: &Path) -> anyhow::Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let mut config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config.source = Some(path.to_owned());
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .map(|err| err.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn default_config() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let default_path = {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("passgen");
        p.push("config.yaml");
        p
    };
    Some(default_path)
}
