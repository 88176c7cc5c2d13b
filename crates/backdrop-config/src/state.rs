//! Durable rotation position.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, data_dir, write_atomic};

const STATE_FILE: &str = "state.toml";

/// Where round-robin rotation resumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationState {
    /// Catalog index of the animation shown last.
    pub last_index: usize,
}

/// Reads and writes [`RotationState`] in `state.toml`.
#[derive(Debug, Clone)]
pub struct RotationStore {
    path: PathBuf,
}

impl RotationStore {
    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::in_dir(&data_dir()?))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last saved state, or the default when nothing was saved yet.
    pub fn load(&self) -> Result<RotationState, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(RotationState::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, state: RotationState) -> Result<(), ConfigError> {
        let body = toml::to_string(&state)?;
        write_atomic(&self.path, &body)?;
        debug!(last_index = state.last_index, "rotation state saved");
        Ok(())
    }
}
