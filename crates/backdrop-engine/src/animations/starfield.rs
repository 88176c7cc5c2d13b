//! Starfield: drifting, twinkling stars bouncing off the canvas edges.

use backdrop_core::{AnimationKind, Palette, SceneConfig};
use fastrand::Rng;

use super::{Animation, Tick, background_alpha};
use crate::entity::{entity_count, random_position, random_range, reflect_in_bounds};
use crate::geometry::Vec2;
use crate::surface::{Paint, Surface};

/// Velocities are stored in pixels per second at the reference rate.
const VELOCITY_DIVISOR: f32 = 60.0;
/// Upper bound on stars a config may request.
pub const MAX_STARS: usize = 5_000;
const MAX_RADIUS: f32 = 1.5;
const MIN_RADIUS: f32 = 0.3;
const TRAIL_ALPHA: f32 = 0.3;

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Twinkle phase in radians.
    pub phase: f32,
    pub twinkle_speed: f32,
}

impl Star {
    /// Opacity derived from the twinkle phase, in `0..=1`.
    pub fn opacity(&self) -> f32 {
        0.5 + 0.5 * self.phase.sin()
    }
}

#[derive(Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    width: f32,
    height: f32,
    trails: bool,
    palette: Palette,
}

impl Starfield {
    pub fn new(
        width: f32,
        height: f32,
        scene: &SceneConfig,
        palette: Palette,
        rng: &mut Rng,
    ) -> Self {
        let stars = (0..entity_count(scene.stars, MAX_STARS))
            .map(|_| Star {
                position: random_position(rng, width, height),
                velocity: Vec2::new(
                    rng.i32(0..50) as f32 - 25.0,
                    rng.i32(0..50) as f32 - 25.0,
                ),
                radius: (rng.f32() * MAX_RADIUS).max(MIN_RADIUS),
                phase: rng.f32() * std::f32::consts::TAU,
                twinkle_speed: random_range(rng, 0.02, 0.07),
            })
            .collect();
        Self {
            stars,
            width,
            height,
            trails: scene.trails,
            palette,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

impl Animation for Starfield {
    fn kind(&self) -> AnimationKind {
        AnimationKind::Starfield
    }

    fn step(&mut self, surface: &mut dyn Surface, tick: Tick) {
        let alpha = background_alpha(self.trails, TRAIL_ALPHA, tick);
        surface.fill(&Paint::Solid(self.palette.background.with_alpha(alpha)));

        for star in &mut self.stars {
            star.position += star.velocity * (tick.scale / VELOCITY_DIVISOR);
            reflect_in_bounds(&mut star.position, &mut star.velocity, self.width, self.height);
            star.phase = (star.phase + star.twinkle_speed * tick.scale) % std::f32::consts::TAU;

            let color = self.palette.foreground.with_alpha(star.opacity());
            surface.fill_circle(star.position, star.radius, color);
        }
    }

    fn entity_count(&self) -> usize {
        self.stars.len()
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawLog, DrawOp};
    use backdrop_core::Theme;

    fn starfield(count: i64, seed: u64) -> Starfield {
        let scene = SceneConfig {
            stars: count,
            ..SceneConfig::default()
        };
        Starfield::new(160.0, 90.0, &scene, Theme::Classic.palette(), &mut Rng::with_seed(seed))
    }

    #[test]
    fn test_construction_ranges() {
        let field = starfield(150, 3);
        assert_eq!(field.entity_count(), 150);
        for star in field.stars() {
            assert!((0.0..160.0).contains(&star.position.x));
            assert!((0.0..90.0).contains(&star.position.y));
            assert!((-25.0..25.0).contains(&star.velocity.x));
            assert!((-25.0..25.0).contains(&star.velocity.y));
            assert!(star.radius > 0.0 && star.radius <= MAX_RADIUS);
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut field = starfield(120, 11);
        let mut log = DrawLog::new(160, 90);
        let fast = Tick {
            scale: 4.0,
            ..Tick::UNIT
        };
        for _ in 0..2_000 {
            field.step(&mut log, fast);
            for star in field.stars() {
                assert!((0.0..=160.0).contains(&star.position.x));
                assert!((0.0..=90.0).contains(&star.position.y));
            }
        }
    }

    #[test]
    fn test_radius_is_immutable() {
        let mut field = starfield(30, 5);
        let radii: Vec<f32> = field.stars().iter().map(|s| s.radius).collect();
        let mut log = DrawLog::new(160, 90);
        for _ in 0..50 {
            field.step(&mut log, Tick::UNIT);
        }
        let after: Vec<f32> = field.stars().iter().map(|s| s.radius).collect();
        assert_eq!(radii, after);
    }

    #[test]
    fn test_trail_fill_is_translucent() {
        let mut field = starfield(10, 2);
        let mut log = DrawLog::new(160, 90);
        field.step(&mut log, Tick::UNIT);
        match &log.ops()[0] {
            DrawOp::FillRect {
                paint: Paint::Solid(color),
                ..
            } => assert!(color.a < 1.0),
            other => panic!("expected background fill, got {other:?}"),
        }
        assert_eq!(log.circles().count(), 10);
    }

    #[test]
    fn test_zero_stars_renders_background_only() {
        let mut field = starfield(0, 1);
        let mut log = DrawLog::new(160, 90);
        field.step(&mut log, Tick::UNIT);
        assert_eq!(log.ops().len(), 1);
    }

    #[test]
    fn test_huge_count_is_capped() {
        let field = starfield(10_000_000_000, 1);
        assert_eq!(field.entity_count(), MAX_STARS);
    }
}
