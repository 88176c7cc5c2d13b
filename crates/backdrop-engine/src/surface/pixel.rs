//! Software rasteriser backing the terminal view.

use backdrop_core::Rgba;

use super::{Paint, Rect, ResizableSurface, Surface};
use crate::geometry::{Transform, Vec2};

/// Opaque RGB pixel buffer with source-over blending.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
            transform: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    pub fn pixel_height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.pixels[i] = color.over(self.pixels[i]);
    }

    /// Clip a device-space span to the pixel grid.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Express a paint in device space so it can be sampled per pixel.
    fn device_paint(&self, paint: &Paint) -> Paint {
        match paint {
            Paint::Solid(color) => Paint::Solid(*color),
            Paint::Linear(gradient) => {
                let mut projected = gradient.clone();
                projected.start = self.transform.apply(gradient.start);
                projected.end = self.transform.apply(gradient.end);
                Paint::Linear(projected)
            }
        }
    }
}

fn sample(paint: &Paint, device: Vec2) -> Rgba {
    match paint {
        Paint::Solid(color) => *color,
        Paint::Linear(gradient) => gradient.color_at(device),
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::BLACK);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let corners = [
            self.transform.apply(Vec2::new(rect.x, rect.y)),
            self.transform.apply(Vec2::new(rect.x + rect.width, rect.y)),
            self.transform.apply(Vec2::new(rect.x + rect.width, rect.y + rect.height)),
            self.transform.apply(Vec2::new(rect.x, rect.y + rect.height)),
        ];
        let min = corners
            .iter()
            .fold(Vec2::new(f32::MAX, f32::MAX), |m, c| {
                Vec2::new(m.x.min(c.x), m.y.min(c.y))
            });
        let max = corners
            .iter()
            .fold(Vec2::new(f32::MIN, f32::MIN), |m, c| {
                Vec2::new(m.x.max(c.x), m.y.max(c.y))
            });
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        let axis_aligned = self.transform.is_translation();
        let paint = self.device_paint(paint);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !axis_aligned && !inside_quad(&corners, center) {
                    continue;
                }
                let outside_box = center.x < min.x
                    || center.x > max.x
                    || center.y < min.y
                    || center.y > max.y;
                if axis_aligned && outside_box {
                    continue;
                }
                let color = sample(&paint, center);
                self.blend(x as i64, y as i64, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let c = self.transform.apply(center);
        let reach = radius + 1.0;
        let Some((x0, y0, x1, y1)) =
            self.clip(Vec2::new(c.x - reach, c.y - reach), Vec2::new(c.x + reach, c.y + reach))
        else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c);
                // Soft edge keeps sub-pixel stars visible.
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x as i64, y as i64, color.with_alpha(color.a * coverage));
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let c = self.transform.apply(center);
        let segments = ((std::f32::consts::TAU * radius).ceil() as usize).max(8);
        let mut last = None;
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let p = c + Vec2::from_polar(angle, radius);
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            if last != Some(cell) {
                self.blend(cell.0, cell.1, color);
                last = Some(cell);
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba) {
        let mut last = None;
        for pair in points.windows(2) {
            let a = self.transform.apply(pair[0]);
            let b = self.transform.apply(pair[1]);
            let delta = b - a;
            let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let p = a + delta * (i as f32 / steps as f32);
                let cell = (p.x.floor() as i64, p.y.floor() as i64);
                if last != Some(cell) {
                    self.blend(cell.0, cell.1, color);
                    last = Some(cell);
                }
            }
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform.rotate(angle);
    }
}

impl ResizableSurface for PixelCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::BLACK; width as usize * height as usize];
        self.transform = Transform::IDENTITY;
        self.stack.clear();
    }
}

/// Point-in-convex-quad test using the sign of the edge cross products.
fn inside_quad(corners: &[Vec2; 4], p: Vec2) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross != 0.0 {
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
    }
    true
}
