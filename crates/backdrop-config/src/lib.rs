//! Configuration management for backdrop.
//!
//! Settings live in `config.toml` under the platform config directory; the
//! round-robin position lives in `state.toml` under the data directory.
//! Missing files mean defaults.

mod error;
mod state;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use backdrop_core::{AnimationKind, AnimationSpeed, RotationMode, SceneConfig, Theme, TimingMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;
pub use state::{RotationState, RotationStore};

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation shown at startup.
    pub animation: AnimationKind,
    pub theme: Theme,
    pub speed: AnimationSpeed,
    pub timing: TimingMode,
    /// Target frames per second for the terminal loop.
    pub fps: u32,
    pub rotation: RotationMode,
    /// Auto-rotation period; 0 disables it.
    pub rotate_every_secs: u64,
    pub scene: SceneConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: AnimationKind::default(),
            theme: Theme::default(),
            speed: AnimationSpeed::default(),
            timing: TimingMode::default(),
            fps: 60,
            rotation: RotationMode::default(),
            rotate_every_secs: 5,
            scene: SceneConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let body = toml::to_string_pretty(self)?;
        write_atomic(path, &body)
    }

    /// Auto-rotation period, or `None` when disabled.
    pub fn rotation_interval(&self) -> Option<std::time::Duration> {
        (self.rotate_every_secs > 0).then(|| std::time::Duration::from_secs(self.rotate_every_secs))
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "backdrop").ok_or(ConfigError::NoHomeDirectory)
}

/// `<config_dir>/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Directory for persisted state and the log file.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Write through a sibling temp file so a crash never leaves half a file.
pub(crate) fn write_atomic(path: &Path, body: &str) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
