//! Recording surface for headless runs and assertions.

use backdrop_core::Rgba;

use super::{Paint, Rect, ResizableSurface, Surface};
use crate::geometry::{Transform, Vec2};

/// One recorded drawing call. Geometry is stored in device space, with the
/// transform active at the time of the call already applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect { rect: Rect, paint: Paint },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba },
    StrokePolyline { points: Vec<Vec2>, color: Rgba },
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Rotate { angle: f32 },
}

/// Surface that paints nothing and remembers every call.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl DrawLog {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls, keeping size and transform state.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Straight segments drawn with `stroke_line` (two-point polylines).
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokePolyline { points, color } if points.len() == 2 => {
                Some((points[0], points[1], *color))
            }
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }
}

impl Surface for DrawLog {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let origin = self.transform.apply(Vec2::new(rect.x, rect.y));
        self.ops.push(DrawOp::FillRect {
            rect: Rect::new(origin.x, origin.y, rect.width, rect.height),
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::FillCircle {
            center: self.transform.apply(center),
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::StrokeCircle {
            center: self.transform.apply(center),
            radius,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba) {
        let points = points.iter().map(|p| self.transform.apply(*p)).collect();
        self.ops.push(DrawOp::StrokePolyline { points, color });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.translate(dx, dy);
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform.rotate(angle);
        self.ops.push(DrawOp::Rotate { angle });
    }
}

impl ResizableSurface for DrawLog {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.transform = Transform::IDENTITY;
        self.stack.clear();
    }
}
