//! Procedural gradient with layered sine strokes. Has no entities.

use backdrop_core::{AnimationKind, Palette, Rgba, SceneConfig};

use super::{Animation, Tick};
use crate::geometry::Vec2;
use crate::surface::{LinearGradient, Paint, Surface};

const TIME_STEP: f32 = 0.01;
const WAVE_COUNT: usize = 5;
const AMPLITUDE: f32 = 20.0;
const FREQUENCY: f32 = 0.01;
/// Degrees of hue rotation per unit of `time` when hue shifting is on.
const HUE_DEGREES_PER_TIME: f32 = 30.0;

#[derive(Debug)]
pub struct GradientWave {
    time: f32,
    hue_shift: bool,
    palette: Palette,
}

impl GradientWave {
    pub fn new(scene: &SceneConfig, palette: Palette) -> Self {
        Self {
            time: 0.0,
            hue_shift: scene.hue_shift,
            palette,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Vertical position of wave `row` at horizontal offset `x`.
    pub fn wave_y(&self, height: f32, row: usize, x: f32) -> f32 {
        let row_f = row as f32;
        height * 0.2 * row_f + (self.time + row_f + x * FREQUENCY).sin() * AMPLITUDE
    }

    /// Stroke opacity for wave `row`; fainter further down.
    pub fn wave_opacity(row: usize) -> f32 {
        (0.1 - row as f32 * 0.02).max(0.0)
    }

    fn gradient(&self, width: f32, height: f32) -> LinearGradient {
        let (start, end) = if self.hue_shift {
            let degrees = self.time * HUE_DEGREES_PER_TIME;
            (
                self.palette.gradient_start.rotate_hue(degrees),
                self.palette.gradient_end.rotate_hue(degrees),
            )
        } else {
            (self.palette.gradient_start, self.palette.gradient_end)
        };
        LinearGradient::new(Vec2::ZERO, Vec2::new(width, height))
            .with_stop(0.0, start)
            .with_stop(1.0, end)
    }
}

impl Animation for GradientWave {
    fn kind(&self) -> AnimationKind {
        AnimationKind::GradientWave
    }

    fn step(&mut self, surface: &mut dyn Surface, tick: Tick) {
        self.time += TIME_STEP * tick.scale;

        let width = surface.width();
        let height = surface.height();
        surface.fill(&Paint::Linear(self.gradient(width, height)));

        // Sample coarsely on wide canvases, finely on terminal-sized ones.
        let spacing = (width / 64.0).clamp(2.0, 10.0);
        let samples = (width / spacing).ceil() as usize;
        let mut points = Vec::with_capacity(samples + 1);
        for row in 0..WAVE_COUNT {
            points.clear();
            points.extend((0..=samples).map(|i| {
                let x = (i as f32 * spacing).min(width);
                Vec2::new(x, self.wave_y(height, row, x))
            }));
            surface.stroke_polyline(&points, Rgba::WHITE.with_alpha(Self::wave_opacity(row)));
        }
    }

    fn entity_count(&self) -> usize {
        0
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}
