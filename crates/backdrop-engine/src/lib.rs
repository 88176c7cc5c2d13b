//! Animated canvas backgrounds for the terminal.
//!
//! Generators paint onto a [`Surface`]; a [`FrameDriver`] owns the surface,
//! the single frame registration and the active generator, and a
//! [`Rotator`] decides what runs next. [`PixelCanvas`] renders into the
//! terminal as a ratatui widget.

mod animations;
mod driver;
mod entity;
mod error;
mod geometry;
mod rotator;
mod scheduler;
mod stats;
mod surface;
mod widget;

pub use animations::{
    Animation, Bubble, Bubbles, GalaxyPoint, GalaxySpiral, GradientWave, Link, Particle,
    ParticleNetwork, Star, Starfield, Tick, instantiate, proximity_links,
};
pub use driver::{FrameDriver, Viewport};
pub use entity::entity_count;
pub use error::EngineError;
pub use geometry::Vec2;
pub use rotator::{DEFAULT_ROTATION_INTERVAL, RotationTimer, Rotator};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use stats::{DEFAULT_WARNING_FPS, FrameStats};
pub use surface::{
    DrawLog, DrawOp, LinearGradient, Paint, PixelCanvas, Rect, ResizableSurface, Surface,
};
