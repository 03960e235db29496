use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::renderer::{HtmlVersion, OutputFormat, DEFAULT_MAX_DEPTH};

/// Settings read from `config.json`; command-line flags take precedence
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    pub html_version: HtmlVersion,
    pub max_depth: usize,
    /// Relative path from the generated page to the documentation root
    pub root_path: String,
    /// Label overrides, keyed like `doclet.Class_Hierarchy`
    pub labels: HashMap<String, String>,
    /// Cache downloaded hierarchy models
    pub cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            html_version: HtmlVersion::Html5,
            max_depth: DEFAULT_MAX_DEPTH,
            root_path: String::new(),
            labels: HashMap::new(),
            cache: true,
        }
    }
}

impl Config {
    /// Loads `path` if given (it must exist), otherwise the per-user config
    /// file if present, otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hierdoc").join("config.json"))
    }
}
