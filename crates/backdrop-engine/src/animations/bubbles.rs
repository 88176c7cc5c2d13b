//! Floating bubbles rising from the bottom edge.

use backdrop_core::{AnimationKind, Palette, Rgba, SceneConfig};
use fastrand::Rng;

use super::{Animation, Tick};
use crate::entity::{entity_count, random_position, random_range};
use crate::geometry::Vec2;
use crate::surface::{Paint, Surface};

/// Upper bound on bubbles a config may request.
pub const MAX_BUBBLES: usize = 1_000;
const FILL_ALPHA: f32 = 0.5;
const OUTLINE_ALPHA: f32 = 0.8;

/// A single bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub position: Vec2,
    pub radius: f32,
    /// Rise speed in pixels per tick.
    pub speed: f32,
    pub color: Rgba,
}

#[derive(Debug)]
pub struct Bubbles {
    bubbles: Vec<Bubble>,
    width: f32,
    height: f32,
    palette: Palette,
    /// Used to pick a fresh column when a bubble wraps.
    rng: Rng,
}

impl Bubbles {
    pub fn new(
        width: f32,
        height: f32,
        scene: &SceneConfig,
        palette: Palette,
        rng: &mut Rng,
    ) -> Self {
        let bubbles = (0..entity_count(scene.bubbles, MAX_BUBBLES))
            .map(|_| Bubble {
                position: random_position(rng, width, height),
                radius: random_range(rng, 5.0, 25.0),
                speed: random_range(rng, 0.1, 0.6),
                color: Rgba {
                    r: rng.f32(),
                    g: rng.f32(),
                    b: rng.f32(),
                    a: FILL_ALPHA,
                },
            })
            .collect();
        Self {
            bubbles,
            width,
            height,
            palette,
            rng: Rng::with_seed(rng.u64(..)),
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }
}

impl Animation for Bubbles {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Bubbles
    }

    fn step(&mut self, surface: &mut dyn Surface, tick: Tick) {
        surface.fill(&Paint::Solid(self.palette.backdrop));

        for bubble in &mut self.bubbles {
            bubble.position.y -= bubble.speed * tick.scale;
            if bubble.position.y + bubble.radius < 0.0 {
                bubble.position.y = self.height + bubble.radius;
                bubble.position.x = self.rng.f32() * self.width;
            }

            surface.fill_circle(bubble.position, bubble.radius, bubble.color);
            surface.stroke_circle(
                bubble.position,
                bubble.radius,
                bubble.color.with_alpha(OUTLINE_ALPHA),
            );
        }
    }

    fn entity_count(&self) -> usize {
        self.bubbles.len()
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawLog;
    use backdrop_core::Theme;

    fn bubbles(count: i64) -> Bubbles {
        let scene = SceneConfig {
            bubbles: count,
            ..SceneConfig::default()
        };
        Bubbles::new(200.0, 100.0, &scene, Theme::Classic.palette(), &mut Rng::with_seed(9))
    }

    #[test]
    fn test_construction_ranges() {
        let field = bubbles(75);
        assert_eq!(field.entity_count(), 75);
        for b in field.bubbles() {
            assert!((5.0..25.0).contains(&b.radius));
            assert!((0.1..0.6).contains(&b.speed));
            assert_eq!(b.color.a, FILL_ALPHA);
        }
    }

    #[test]
    fn test_huge_count_is_capped() {
        assert_eq!(bubbles(1 << 40).entity_count(), MAX_BUBBLES);
    }

    #[test]
    fn test_bubbles_rise() {
        let mut field = bubbles(20);
        let before: Vec<f32> = field.bubbles().iter().map(|b| b.position.y).collect();
        field.step(&mut DrawLog::new(200, 100), Tick::UNIT);
        for (b, y) in field.bubbles().iter().zip(before) {
            assert!(b.position.y < y);
        }
    }

    #[test]
    fn test_wraps_below_bottom_on_same_step() {
        let mut field = bubbles(1);
        field.bubbles[0].position.y = -field.bubbles[0].radius + 0.05;
        field.bubbles[0].speed = 0.1;

        field.step(&mut DrawLog::new(200, 100), Tick::UNIT);
        let b = &field.bubbles()[0];
        assert!(b.position.y >= 100.0);
        assert_eq!(b.position.y, 100.0 + b.radius);
        assert!((0.0..200.0).contains(&b.position.x));

        // Next step rises normally instead of wrapping again.
        field.step(&mut DrawLog::new(200, 100), Tick::UNIT);
        assert!(field.bubbles()[0].position.y < 100.0 + field.bubbles()[0].radius);
        assert!(field.bubbles()[0].position.y > 99.0);
    }

    #[test]
    fn test_draws_fill_and_outline() {
        let mut field = bubbles(5);
        let mut log = DrawLog::new(200, 100);
        field.step(&mut log, Tick::UNIT);
        assert_eq!(log.circles().count(), 5);
        assert_eq!(log.ops().len(), 1 + 5 * 2);
    }
}
