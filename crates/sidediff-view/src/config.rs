use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Total output width in columns, both panes included.
    pub width: usize,
    pub color: bool,
    pub state_path: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 120,
            color: true,
            state_path: PathBuf::from(".sidediff.json"),
        }
    }
}

impl ViewConfig {
    pub fn from_toml_str(s: &str) -> ViewResult<Self> {
        toml::from_str(s).map_err(|e| ViewError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> ViewResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
