//! Command-line flags layered over the config file.

use std::path::PathBuf;

use backdrop_config::Config;
use backdrop_core::{AnimationKind, AnimationSpeed, RotationMode, Theme, TimingMode};
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "backdrop", version, about = "Animated canvas backgrounds in your terminal")]
pub struct Cli {
    /// Animation to start with (starfield, bubbles, gradient-wave,
    /// particle-network, galaxy-spiral).
    #[arg(long)]
    pub animation: Option<AnimationKind>,

    /// Colour theme (classic, cosmic, cyberpunk, ocean, sunset, forest).
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Playback speed (slow, medium, fast).
    #[arg(long)]
    pub speed: Option<AnimationSpeed>,

    /// Motion integration (per-tick, elapsed).
    #[arg(long)]
    pub timing: Option<TimingMode>,

    /// Target frames per second.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// How the next animation is chosen (random, round-robin).
    #[arg(long)]
    pub rotation: Option<RotationMode>,

    /// Seconds between automatic rotations.
    #[arg(long, value_name = "SECS")]
    pub rotate_every: Option<u64>,

    /// Disable automatic rotation.
    #[arg(long, default_value_t = false)]
    pub no_rotate: bool,

    /// Config file to read instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file to write instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration back to the config file.
    #[arg(long, default_value_t = false)]
    pub save_config: bool,
}

impl Cli {
    /// Override file values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(animation) = self.animation {
            config.animation = animation;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(timing) = self.timing {
            config.timing = timing;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(rotation) = self.rotation {
            config.rotation = rotation;
        }
        if let Some(secs) = self.rotate_every {
            config.rotate_every_secs = secs;
        }
        if self.no_rotate {
            config.rotate_every_secs = 0;
        }
    }
}
