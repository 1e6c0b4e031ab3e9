//! Configuration loaded from a YAML file.
//!
//! ```yaml
//! data-file: team.yaml
//! tab-width: 8
//! log-level: debug
//! export-dir: exports
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PraiseError;
use crate::transpose::DEFAULT_TAB_WIDTH;

const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// YAML file backing the store.
    pub data_file: PathBuf,
    /// Spaces per tab when laying out chord sheets.
    pub tab_width: usize,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Where exported setlists are written.
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("praise-data.yaml"),
            tab_width: DEFAULT_TAB_WIDTH,
            log_level: "info".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PraiseError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PraiseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, PraiseError> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| PraiseError::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PraiseError> {
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(PraiseError::Config(format!(
                "tab-width must be between 1 and {}, got {}",
                MAX_TAB_WIDTH, self.tab_width
            )));
        }
        Ok(())
    }
}
