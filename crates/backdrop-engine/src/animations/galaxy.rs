//! Galaxy spiral with differential rotation.
//!
//! Points live in polar coordinates around the canvas centre. Inner points
//! orbit faster than outer ones, and the whole field turns slowly on top.

use std::f32::consts::TAU;

use backdrop_core::{AnimationKind, Palette, Rgba, SceneConfig};
use fastrand::Rng;

use super::{Animation, Tick, background_alpha};
use crate::entity::{entity_count, random_range};
use crate::geometry::Vec2;
use crate::surface::{Paint, Surface};

/// Upper bound on spiral points a config may request.
pub const MAX_GALAXY_POINTS: usize = 20_000;
const ARMS: usize = 3;
/// Radians of arm twist from the core to the rim.
const TWIST: f32 = 4.0;
/// Fraction of the shorter canvas side used as the outer radius.
const EXTENT: f32 = 0.48;
/// Angular speed numerator: `speed = ORBIT_RATE / (distance + ORBIT_SOFTENING)`.
const ORBIT_RATE: f32 = 0.5;
const ORBIT_SOFTENING: f32 = 10.0;
const GLOBAL_SPIN: f32 = 0.002;
const TRAIL_ALPHA: f32 = 0.1;

/// A point of the spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyPoint {
    pub angle: f32,
    pub distance: f32,
    /// Radians per tick.
    pub angular_speed: f32,
    pub radius: f32,
    pub color: Rgba,
}

#[derive(Debug)]
pub struct GalaxySpiral {
    points: Vec<GalaxyPoint>,
    center: Vec2,
    max_distance: f32,
    rotation: f32,
    trails: bool,
    palette: Palette,
}

impl GalaxySpiral {
    pub fn new(
        width: f32,
        height: f32,
        scene: &SceneConfig,
        palette: Palette,
        rng: &mut Rng,
    ) -> Self {
        let max_distance = width.min(height) * EXTENT;
        let points = (0..entity_count(scene.galaxy_points, MAX_GALAXY_POINTS))
            .map(|i| {
                // Bias toward the core so the centre reads as dense.
                let t = rng.f32().powf(1.5);
                let distance = t * max_distance;
                let arm = (i % ARMS) as f32 * TAU / ARMS as f32;
                let jitter = (rng.f32() - 0.5) * 0.6;
                GalaxyPoint {
                    angle: arm + t * TWIST + jitter,
                    distance,
                    angular_speed: ORBIT_RATE / (distance + ORBIT_SOFTENING),
                    radius: random_range(rng, 0.4, 1.4),
                    color: palette
                        .accent
                        .lerp(palette.foreground, t)
                        .with_alpha(random_range(rng, 0.6, 1.0)),
                }
            })
            .collect();
        Self {
            points,
            center: Vec2::new(width / 2.0, height / 2.0),
            max_distance,
            rotation: 0.0,
            trails: scene.trails,
            palette,
        }
    }

    pub fn points(&self) -> &[GalaxyPoint] {
        &self.points
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Animation for GalaxySpiral {
    fn kind(&self) -> AnimationKind {
        AnimationKind::GalaxySpiral
    }

    fn step(&mut self, surface: &mut dyn Surface, tick: Tick) {
        let alpha = background_alpha(self.trails, TRAIL_ALPHA, tick);
        surface.fill(&Paint::Solid(self.palette.background.with_alpha(alpha)));

        self.rotation = (self.rotation + GLOBAL_SPIN * tick.scale) % TAU;

        surface.save();
        surface.translate(self.center.x, self.center.y);
        surface.rotate(self.rotation);
        for point in &mut self.points {
            point.angle = (point.angle + point.angular_speed * tick.scale) % TAU;
            let local = Vec2::from_polar(point.angle, point.distance);
            surface.fill_circle(local, point.radius, point.color);
        }
        surface.restore();
    }

    fn entity_count(&self) -> usize {
        self.points.len()
    }

    fn set_palette(&mut self, palette: Palette) {
        for point in &mut self.points {
            let t = if self.max_distance > 0.0 {
                point.distance / self.max_distance
            } else {
                0.0
            };
            point.color = palette.accent.lerp(palette.foreground, t).with_alpha(point.color.a);
        }
        self.palette = palette;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawLog, DrawOp};
    use backdrop_core::Theme;

    fn galaxy(count: i64) -> GalaxySpiral {
        let scene = SceneConfig {
            galaxy_points: count,
            ..SceneConfig::default()
        };
        GalaxySpiral::new(200.0, 100.0, &scene, Theme::Classic.palette(), &mut Rng::with_seed(21))
    }

    #[test]
    fn test_inner_points_orbit_faster() {
        let field = galaxy(2000);
        let mut points: Vec<&GalaxyPoint> = field.points().iter().collect();
        points.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        for pair in points.windows(2) {
            assert!(pair[0].angular_speed >= pair[1].angular_speed);
        }
    }

    #[test]
    fn test_projected_points_stay_on_canvas() {
        let mut field = galaxy(500);
        let mut log = DrawLog::new(200, 100);
        for _ in 0..200 {
            log.reset();
            field.step(&mut log, Tick::UNIT);
        }
        assert_eq!(log.circles().count(), 500);
        for (center, _, _) in log.circles() {
            assert!((0.0..=200.0).contains(&center.x));
            assert!((0.0..=100.0).contains(&center.y));
        }
    }

    #[test]
    fn test_step_wraps_drawing_in_save_restore() {
        let mut field = galaxy(10);
        let mut log = DrawLog::new(200, 100);
        field.step(&mut log, Tick::UNIT);
        let ops = log.ops();
        assert!(matches!(ops[1], DrawOp::Save));
        assert!(matches!(ops[2], DrawOp::Translate { .. }));
        assert!(matches!(ops[3], DrawOp::Rotate { .. }));
        assert!(matches!(ops[ops.len() - 1], DrawOp::Restore));
        assert!(field.rotation() > 0.0);
    }

    #[test]
    fn test_distances_fixed_across_steps() {
        let mut field = galaxy(100);
        let before: Vec<f32> = field.points().iter().map(|p| p.distance).collect();
        let mut log = DrawLog::new(200, 100);
        for _ in 0..20 {
            field.step(&mut log, Tick::UNIT);
        }
        let after: Vec<f32> = field.points().iter().map(|p| p.distance).collect();
        assert_eq!(before, after);
        assert!(after.iter().all(|d| *d <= field.max_distance()));
    }

    #[test]
    fn test_huge_count_is_capped() {
        assert_eq!(galaxy(i64::MAX).entity_count(), MAX_GALAXY_POINTS);
    }
}
