//! JSON state file holding the last-used [`Preferences`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ViewResult;
use crate::prefs::Preferences;

/// Reads and writes preferences at a fixed path.
#[derive(Clone, Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved preferences.
    ///
    /// Returns `Ok(None)` when no state has been saved yet or the saved state
    /// cannot be parsed.
    pub fn load(&self) -> ViewResult<Option<Preferences>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(prefs) => {
                debug!(path = ?self.path, "loaded saved state");
                Ok(Some(prefs))
            }
            Err(e) => {
                warn!("ignoring unreadable state file {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> ViewResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)?;
        debug!(path = ?self.path, "saved state");
        Ok(())
    }
}
