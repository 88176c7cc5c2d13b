//! Shared entity helpers: count validation, spawning and boundary rules.

use fastrand::Rng;
use tracing::warn;

use crate::geometry::Vec2;

/// Validate a requested entity count against a generator's ceiling.
///
/// Negative counts are rejected and render the background only; counts
/// above `cap` are clamped to it.
pub fn entity_count(requested: i64, cap: usize) -> usize {
    if requested < 0 {
        warn!(requested, "negative entity count rejected, rendering background only");
        return 0;
    }
    let count = usize::try_from(requested).unwrap_or(usize::MAX);
    if count > cap {
        warn!(requested, cap, "entity count capped");
        return cap;
    }
    count
}

/// Uniform position over `[0, width) × [0, height)`.
pub fn random_position(rng: &mut Rng, width: f32, height: f32) -> Vec2 {
    Vec2::new(rng.f32() * width, rng.f32() * height)
}

/// Uniform float in `[min, max)`.
pub fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

/// Keep one coordinate inside `[0, max]`, flipping the velocity component
/// when the boundary was crossed so the entity heads back inward.
pub fn reflect(position: &mut f32, velocity: &mut f32, max: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > max {
        *position = max;
        *velocity = -velocity.abs();
    }
}

/// Reflect both axes of a point inside a `width × height` box.
pub fn reflect_in_bounds(position: &mut Vec2, velocity: &mut Vec2, width: f32, height: f32) {
    reflect(&mut position.x, &mut velocity.x, width);
    reflect(&mut position.y, &mut velocity.y, height);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_count_rejects_negative() {
        assert_eq!(entity_count(-5, 100), 0);
        assert_eq!(entity_count(0, 100), 0);
        assert_eq!(entity_count(42, 100), 42);
    }

    #[test]
    fn test_entity_count_clamps_to_cap() {
        assert_eq!(entity_count(100, 100), 100);
        assert_eq!(entity_count(10_000_000_000, 5_000), 5_000);
        assert_eq!(entity_count(i64::MAX, 20_000), 20_000);
    }

    #[test]
    fn test_reflect_clamps_and_flips() {
        let mut x = -3.0;
        let mut vx = -2.0;
        reflect(&mut x, &mut vx, 100.0);
        assert_eq!((x, vx), (0.0, 2.0));

        let mut x = 104.0;
        let mut vx = 2.0;
        reflect(&mut x, &mut vx, 100.0);
        assert_eq!((x, vx), (100.0, -2.0));

        let mut x = 50.0;
        let mut vx = 2.0;
        reflect(&mut x, &mut vx, 100.0);
        assert_eq!((x, vx), (50.0, 2.0));
    }

    #[test]
    fn test_random_position_in_bounds() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let p = random_position(&mut rng, 80.0, 40.0);
            assert!((0.0..80.0).contains(&p.x));
            assert!((0.0..40.0).contains(&p.y));
        }
    }
}
