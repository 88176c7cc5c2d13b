//! Per-generator tuning knobs.

use serde::{Deserialize, Serialize};

/// Entity counts and visual switches for the generators.
///
/// Counts are signed so that a negative value coming from a hand-edited
/// config file can be detected and rejected instead of wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Starfield star count.
    pub stars: i64,
    /// Bubble count.
    pub bubbles: i64,
    /// Particle network node count.
    pub particles: i64,
    /// Link threshold for the particle network, in pixels.
    pub link_distance: f32,
    /// Galaxy spiral point count.
    pub galaxy_points: i64,
    /// Fade the previous frame instead of clearing it.
    pub trails: bool,
    /// Rotate gradient hues over time.
    pub hue_shift: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            stars: 100,
            bubbles: 50,
            particles: 100,
            link_distance: 100.0,
            galaxy_points: 2000,
            trails: true,
            hue_shift: false,
        }
    }
}
