use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::convert::BackendKind;
use crate::error::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./output";
pub const DEFAULT_SOFFICE_PROGRAM: &str = "soffice";

/// Top-level mapping of a configuration file, kept verbatim.
pub type Config = BTreeMap<String, Value>;

/// True when the document holds nothing but blank lines, comments and markers.
fn is_blank_document(contents: &str) -> bool {
    contents.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Reads and parses `path`, surfacing every failure.
pub fn try_load_config(path: &Path) -> Result<Config, Error> {
    let contents = std::fs::read_to_string(path)?;
    if is_blank_document(&contents) {
        return Ok(Config::new());
    }
    match serde_yaml::from_str::<Value>(&contents)? {
        Value::Null => Ok(Config::new()),
        other => Ok(serde_yaml::from_value(other)?),
    }
}

/// Loads the configuration at `path`, falling back to an empty mapping when
/// the file is missing, unreadable or malformed. The file is re-read on every call.
pub fn load_config(path: &Path) -> Config {
    if !path.is_file() {
        log::debug!("no configuration at {}, using defaults", path.display());
        return Config::new();
    }
    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring configuration {}: {e}", path.display());
            Config::new()
        }
    }
}

fn string_setting(config: &Config, key: &str) -> Option<String> {
    match config.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            log::warn!("configuration key {key:?} expects a string, found {other:?}");
            None
        }
    }
}

/// Configuration values with their built-in defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_directory: PathBuf,
    pub backend: BackendKind,
    pub soffice_program: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            backend: BackendKind::default(),
            soffice_program: PathBuf::from(DEFAULT_SOFFICE_PROGRAM),
        }
    }
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        let mut settings = Settings::default();

        if let Some(dir) = string_setting(config, "output_directory")
            .or_else(|| string_setting(config, "default_output_directory"))
        {
            settings.output_directory = PathBuf::from(dir);
        }

        if let Some(name) = string_setting(config, "converter") {
            match name.parse::<BackendKind>() {
                Ok(kind) => settings.backend = kind,
                Err(e) => log::warn!("{e}, using {}", settings.backend),
            }
        }

        if let Some(program) = string_setting(config, "soffice_path") {
            settings.soffice_program = PathBuf::from(program);
        }

        settings
    }

    pub fn load(path: &Path) -> Self {
        Settings::from_config(&load_config(path))
    }
}
