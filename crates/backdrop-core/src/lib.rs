//! Core types for the backdrop animation engine.
//!
//! Everything here is plain data shared between the engine, the
//! configuration layer and the terminal front end: the animation catalog,
//! playback speed, timing and rotation modes, scene tuning and colour themes.

mod color;
mod scene;
mod theme;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use color::{Rgba, hsl_to_rgb};
pub use scene::SceneConfig;
pub use theme::{Palette, Theme};

/// Frame rate that per-tick velocity constants were tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Animation generators known to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    /// Drifting, twinkling stars with fading trails.
    Starfield,
    /// Translucent bubbles rising and wrapping around.
    Bubbles,
    /// Procedural gradient overlaid with sine strokes.
    GradientWave,
    /// Bouncing particles linked by proximity lines.
    #[default]
    ParticleNetwork,
    /// Differentially rotating spiral of points.
    GalaxySpiral,
}

impl AnimationKind {
    /// Every generator, in catalog order.
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Starfield,
        AnimationKind::Bubbles,
        AnimationKind::GradientWave,
        AnimationKind::ParticleNetwork,
        AnimationKind::GalaxySpiral,
    ];

    /// Stable identifier used in configuration files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            AnimationKind::Starfield => "starfield",
            AnimationKind::Bubbles => "bubbles",
            AnimationKind::GradientWave => "gradient-wave",
            AnimationKind::ParticleNetwork => "particle-network",
            AnimationKind::GalaxySpiral => "galaxy-spiral",
        }
    }

    /// Human readable name for the HUD.
    pub fn display_name(self) -> &'static str {
        match self {
            AnimationKind::Starfield => "Starfield",
            AnimationKind::Bubbles => "Bubbles",
            AnimationKind::GradientWave => "Gradient Wave",
            AnimationKind::ParticleNetwork => "Particle Network",
            AnimationKind::GalaxySpiral => "Galaxy Spiral",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AnimationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "starfield" | "stars" | "starrynight" => Ok(AnimationKind::Starfield),
            "bubbles" | "floatingbubbles" => Ok(AnimationKind::Bubbles),
            "gradientwave" | "wave" => Ok(AnimationKind::GradientWave),
            "particlenetwork" | "network" => Ok(AnimationKind::ParticleNetwork),
            "galaxyspiral" | "galaxy" => Ok(AnimationKind::GalaxySpiral),
            _ => Err(format!("unknown animation '{s}'")),
        }
    }
}

/// Playback speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed setting.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Factor applied to every per-tick increment.
    pub fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

impl FromStr for AnimationSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "slow" => Ok(AnimationSpeed::Slow),
            "medium" | "normal" => Ok(AnimationSpeed::Medium),
            "fast" => Ok(AnimationSpeed::Fast),
            _ => Err(format!("unknown speed '{s}'")),
        }
    }
}

/// How entity motion is integrated between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingMode {
    /// Fixed increment per frame; motion speed follows the host frame rate.
    #[default]
    PerTick,
    /// Increments scaled by elapsed wall time relative to [`REFERENCE_FPS`].
    Elapsed,
}

impl TimingMode {
    pub fn toggle(self) -> Self {
        match self {
            TimingMode::PerTick => TimingMode::Elapsed,
            TimingMode::Elapsed => TimingMode::PerTick,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimingMode::PerTick => "per-tick",
            TimingMode::Elapsed => "elapsed",
        }
    }
}

impl FromStr for TimingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pertick" | "tick" | "fixed" => Ok(TimingMode::PerTick),
            "elapsed" | "realtime" | "delta" => Ok(TimingMode::Elapsed),
            _ => Err(format!("unknown timing mode '{s}'")),
        }
    }
}

/// Strategy for choosing the next animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    /// Uniformly random, never repeating the current animation.
    #[default]
    Random,
    /// Catalog order, resuming from the persisted index.
    RoundRobin,
}

impl FromStr for RotationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "random" | "shuffle" => Ok(RotationMode::Random),
            "roundrobin" | "sequential" | "next" => Ok(RotationMode::RoundRobin),
            _ => Err(format!("unknown rotation mode '{s}'")),
        }
    }
}

/// Lowercase and strip separators so `gradient-wave`, `gradient_wave` and
/// `gradientWave` all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
