//! Frame driver: owns the canvas, the frame registration and the active
//! generator.
//!
//! At most one frame callback is registered at any time. Every transition
//! (`start`, `swap`, `stop`, `resize`) cancels the pending registration
//! before it touches the generator.

use std::time::{Duration, Instant};

use backdrop_core::{AnimationKind, AnimationSpeed, Palette, REFERENCE_FPS, SceneConfig, TimingMode};
use fastrand::Rng;
use tracing::{debug, info, warn};

use crate::animations::{Animation, Tick, instantiate};
use crate::error::EngineError;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::stats::FrameStats;
use crate::surface::ResizableSurface;

/// Draws a frame without advancing any entity.
const FROZEN: Tick = Tick {
    scale: 0.0,
    elapsed: Duration::ZERO,
};

/// Pixel size of the area the animation covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport for a block of terminal cells; each cell holds two
    /// vertically stacked pixels.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(u32::from(cols), u32::from(rows) * 2)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug)]
pub struct FrameDriver<S> {
    surface: S,
    scheduler: FrameScheduler,
    pending: Option<FrameHandle>,
    active: Option<Box<dyn Animation>>,
    scene: SceneConfig,
    palette: Palette,
    speed: AnimationSpeed,
    timing: TimingMode,
    paused: bool,
    last_frame: Option<Instant>,
    stats: FrameStats,
    rng: Rng,
}

impl<S: ResizableSurface> FrameDriver<S> {
    pub fn new(surface: S, scene: SceneConfig, palette: Palette) -> Self {
        Self::with_rng(surface, scene, palette, Rng::new())
    }

    /// Driver with deterministic entity generation.
    pub fn with_seed(surface: S, scene: SceneConfig, palette: Palette, seed: u64) -> Self {
        Self::with_rng(surface, scene, palette, Rng::with_seed(seed))
    }

    fn with_rng(surface: S, scene: SceneConfig, palette: Palette, rng: Rng) -> Self {
        Self {
            surface,
            scheduler: FrameScheduler::new(),
            pending: None,
            active: None,
            scene,
            palette,
            speed: AnimationSpeed::default(),
            timing: TimingMode::default(),
            paused: false,
            last_frame: None,
            stats: FrameStats::default(),
            rng,
        }
    }

    /// Size the surface to `viewport` and run `kind` on it.
    ///
    /// Any running animation is stopped first. On error nothing is
    /// registered and no generator is active.
    pub fn start(&mut self, kind: AnimationKind, viewport: Viewport) -> Result<(), EngineError> {
        self.teardown();
        self.surface.resize(viewport.width, viewport.height);
        self.launch(kind)?;
        info!(
            animation = %kind,
            width = viewport.width,
            height = viewport.height,
            "animation started"
        );
        Ok(())
    }

    /// Replace the running animation with a fresh `kind` instance on the
    /// current surface.
    pub fn swap(&mut self, kind: AnimationKind) -> Result<(), EngineError> {
        let previous = self.active_kind();
        self.teardown();
        self.launch(kind)?;
        info!(from = ?previous, to = %kind, "animation swapped");
        Ok(())
    }

    /// Cancel the frame registration and drop the generator. Safe to call
    /// any number of times.
    pub fn stop(&mut self) {
        if let Some(kind) = self.active_kind() {
            info!(animation = %kind, "animation stopped");
        }
        self.teardown();
    }

    /// Follow a viewport change. The active animation, if any, restarts at
    /// the new size since its entities were laid out for the old one.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        match self.active_kind() {
            Some(kind) => {
                debug!(width = viewport.width, height = viewport.height, "restarting for resize");
                self.start(kind, viewport)
            }
            None => {
                self.surface.resize(viewport.width, viewport.height);
                Ok(())
            }
        }
    }

    /// Host frame entry point. Fires the pending registration, runs one step
    /// and registers the next frame. Returns whether a step ran.
    ///
    /// While paused the registration is renewed without stepping, so the
    /// last frame stays on the surface.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };
        if !self.scheduler.take(handle) {
            return false;
        }

        if self.paused {
            self.pending = Some(self.scheduler.request());
            return false;
        }

        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_else(|| Duration::from_secs_f32(1.0 / REFERENCE_FPS));
        self.last_frame = Some(now);
        self.stats.record(now);

        let tick = Tick::new(self.timing, self.speed, elapsed);
        let stepped = match self.active.as_mut() {
            Some(animation) => {
                animation.step(&mut self.surface, tick);
                true
            }
            None => false,
        };
        self.pending = Some(self.scheduler.request());
        stepped
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame = None;
            self.stats.resume();
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn set_timing(&mut self, timing: TimingMode) {
        self.timing = timing;
        self.last_frame = None;
    }

    pub fn timing(&self) -> TimingMode {
        self.timing
    }

    /// Recolour the running animation and every later instance.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        if let Some(animation) = self.active.as_mut() {
            animation.set_palette(palette);
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active(&self) -> Option<&dyn Animation> {
        self.active.as_deref()
    }

    pub fn active_kind(&self) -> Option<AnimationKind> {
        self.active.as_ref().map(|animation| animation.kind())
    }

    /// Live frame registrations; never more than one.
    pub fn registered_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_running(&self) -> bool {
        self.pending
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.active = None;
        self.last_frame = None;
    }

    fn launch(&mut self, kind: AnimationKind) -> Result<(), EngineError> {
        let (width, height) = (self.surface.width(), self.surface.height());
        if width < 1.0 || height < 1.0 {
            warn!(animation = %kind, width, height, "surface unavailable");
            return Err(EngineError::SurfaceUnavailable {
                width: width as u32,
                height: height as u32,
            });
        }
        let mut animation =
            instantiate(kind, width, height, &self.scene, self.palette, &mut self.rng);
        if self.paused {
            // Paint the new animation once, unmoved, so a paused surface
            // never keeps showing the previous one.
            self.surface.clear();
            animation.step(&mut self.surface, FROZEN);
        }
        self.active = Some(animation);
        self.pending = Some(self.scheduler.request());
        Ok(())
    }
}
