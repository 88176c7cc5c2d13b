//! Drawing surfaces the animations paint on.
//!
//! [`Surface`] is the 2D drawing context a generator receives every frame.
//! It deliberately has no way to change its size: only the owner of a
//! [`ResizableSurface`] (the frame driver) can do that.

mod pixel;
mod record;

use backdrop_core::Rgba;

pub use pixel::PixelCanvas;
pub use record::{DrawLog, DrawOp};

use crate::geometry::Vec2;

/// Colour stop list between two points, like `createLinearGradient`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    stops: Vec<(f32, Rgba)>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Add a colour stop at `offset` in `0..=1`. Stops are kept sorted.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(at, (offset, color));
        self
    }

    pub fn stops(&self) -> &[(f32, Rgba)] {
        &self.stops
    }

    /// Colour at a point already expressed in the same space as
    /// `start`/`end`.
    pub fn color_at(&self, p: Vec2) -> Rgba {
        let axis = self.end - self.start;
        let len_sq = axis.dot(axis);
        let t = if len_sq > 0.0 {
            ((p - self.start).dot(axis) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.sample(t)
    }

    fn sample(&self, t: f32) -> Rgba {
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Rgba::BLACK.with_alpha(0.0);
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                let local = if span > 0.0 { (t - o0) / span } else { 1.0 };
                return c0.lerp(c1, local);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Fill style for rectangles.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

/// Axis-aligned rectangle in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// 2D drawing context handed to generators.
///
/// Coordinates are in pixels and pass through the current transform, which
/// `save`/`restore` push and pop.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Reset every pixel to black.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// One-pixel stroke through consecutive points.
    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, angle: f32);

    /// Paint the whole surface, e.g. a translucent overlay for trails.
    fn fill(&mut self, paint: &Paint) {
        let rect = Rect::new(0.0, 0.0, self.width(), self.height());
        self.fill_rect(rect, paint);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.stroke_polyline(&[from, to], color);
    }
}

/// A surface whose owner may change its pixel size.
pub trait ResizableSurface: Surface {
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints_and_midpoint() {
        let g = LinearGradient::new(Vec2::ZERO, Vec2::new(100.0, 0.0))
            .with_stop(1.0, Rgba::WHITE)
            .with_stop(0.0, Rgba::BLACK);
        assert_eq!(g.stops()[0].0, 0.0);
        assert_eq!(g.color_at(Vec2::new(-5.0, 0.0)), Rgba::BLACK);
        assert_eq!(g.color_at(Vec2::new(500.0, 9.0)), Rgba::WHITE);
        let mid = g.color_at(Vec2::new(50.0, 30.0));
        assert!((mid.r - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_gradient_without_stops_is_transparent() {
        let g = LinearGradient::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(g.color_at(Vec2::ZERO).a, 0.0);
    }
}
