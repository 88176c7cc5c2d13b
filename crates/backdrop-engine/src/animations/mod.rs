//! Animation generators.
//!
//! Each generator owns its entity set and advances it one frame per
//! [`Animation::step`]. [`instantiate`] is the factory the driver uses; every
//! call produces a fresh instance with its own random state.

pub mod bubbles;
pub mod galaxy;
pub mod gradient_wave;
pub mod particle_network;
pub mod starfield;

use std::fmt;
use std::time::Duration;

use backdrop_core::{
    AnimationKind, AnimationSpeed, Palette, REFERENCE_FPS, SceneConfig, TimingMode,
};
use fastrand::Rng;
use tracing::debug;

use crate::surface::Surface;

pub use bubbles::{Bubble, Bubbles};
pub use galaxy::{GalaxyPoint, GalaxySpiral};
pub use gradient_wave::GradientWave;
pub use particle_network::{Link, Particle, ParticleNetwork, proximity_links};
pub use starfield::{Star, Starfield};

/// Largest step an elapsed-time frame may take, in reference ticks, so a
/// long stall does not teleport entities.
const MAX_CATCH_UP_TICKS: f32 = 4.0;

/// Integration scale for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Multiplier applied to every per-tick constant.
    pub scale: f32,
    /// Wall time since the previous frame.
    pub elapsed: Duration,
}

impl Tick {
    /// One reference tick.
    pub const UNIT: Tick = Tick {
        scale: 1.0,
        elapsed: Duration::ZERO,
    };

    pub fn new(timing: TimingMode, speed: AnimationSpeed, elapsed: Duration) -> Self {
        let base = match timing {
            TimingMode::PerTick => 1.0,
            TimingMode::Elapsed => {
                (elapsed.as_secs_f32() * REFERENCE_FPS).min(MAX_CATCH_UP_TICKS)
            }
        };
        Self {
            scale: base * speed.multiplier(),
            elapsed,
        }
    }
}

/// A running animation instance.
pub trait Animation: fmt::Debug {
    fn kind(&self) -> AnimationKind;

    /// Advance the simulation by `tick` and paint one frame.
    fn step(&mut self, surface: &mut dyn Surface, tick: Tick);

    /// Number of simulated entities.
    fn entity_count(&self) -> usize;

    /// Swap colours without touching entity state.
    fn set_palette(&mut self, palette: Palette);
}

/// Build a new generator for a `width × height` canvas.
pub fn instantiate(
    kind: AnimationKind,
    width: f32,
    height: f32,
    scene: &SceneConfig,
    palette: Palette,
    rng: &mut Rng,
) -> Box<dyn Animation> {
    let animation: Box<dyn Animation> = match kind {
        AnimationKind::Starfield => Box::new(Starfield::new(width, height, scene, palette, rng)),
        AnimationKind::Bubbles => Box::new(Bubbles::new(width, height, scene, palette, rng)),
        AnimationKind::GradientWave => Box::new(GradientWave::new(scene, palette)),
        AnimationKind::ParticleNetwork => {
            Box::new(ParticleNetwork::new(width, height, scene, palette, rng))
        }
        AnimationKind::GalaxySpiral => {
            Box::new(GalaxySpiral::new(width, height, scene, palette, rng))
        }
    };
    debug!(
        animation = %kind,
        entities = animation.entity_count(),
        width,
        height,
        "instantiated animation"
    );
    animation
}

/// Fill used to start a frame: opaque, or translucent when trails are on.
fn background_alpha(trails: bool, trail_alpha: f32, tick: Tick) -> f32 {
    if trails {
        // Keep fade length constant in wall time when frames are stretched.
        1.0 - (1.0 - trail_alpha).powf(tick.scale.max(f32::EPSILON))
    } else {
        1.0
    }
}
