//! Choosing which animation runs next.

use std::time::{Duration, Instant};

use backdrop_core::AnimationKind;
use fastrand::Rng;

use crate::error::EngineError;

/// Auto-rotation period when none is configured.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Ordered, non-empty catalog of animations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotator {
    catalog: Vec<AnimationKind>,
}

impl Default for Rotator {
    fn default() -> Self {
        Self {
            catalog: AnimationKind::ALL.to_vec(),
        }
    }
}

impl Rotator {
    pub fn new(catalog: Vec<AnimationKind>) -> Result<Self, EngineError> {
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &[AnimationKind] {
        &self.catalog
    }

    /// Uniform pick among every entry other than `current`. A single-entry
    /// catalog has nothing else to offer and returns that entry.
    pub fn pick_random_excluding(&self, current: AnimationKind, rng: &mut Rng) -> AnimationKind {
        let others: Vec<AnimationKind> = self
            .catalog
            .iter()
            .copied()
            .filter(|kind| *kind != current)
            .collect();
        if others.is_empty() {
            return self.catalog[0];
        }
        others[rng.usize(..others.len())]
    }

    /// Index after `index`, wrapping at the end of the catalog.
    pub fn pick_next_round_robin(&self, index: usize) -> usize {
        (index + 1) % self.catalog.len()
    }

    /// Entry at `index`; out-of-range indices wrap, so a stale persisted
    /// index still resolves.
    pub fn kind_at(&self, index: usize) -> AnimationKind {
        self.catalog[index % self.catalog.len()]
    }

    pub fn index_of(&self, kind: AnimationKind) -> Option<usize> {
        self.catalog.iter().position(|k| *k == kind)
    }
}

/// Fires once per interval while the app keeps it alive.
#[derive(Debug, Clone, Copy)]
pub struct RotationTimer {
    interval: Duration,
    last: Instant,
}

impl RotationTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// Whether a rotation is due at `now`. Firing restarts the interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Restart the interval, e.g. after a manual pick.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_never_returns_current() {
        let rotator = Rotator::default();
        let mut rng = Rng::with_seed(42);
        let current = AnimationKind::ParticleNetwork;
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            let pick = rotator.pick_random_excluding(current, &mut rng);
            assert_ne!(pick, current);
            seen.insert(pick);
        }
        assert_eq!(seen.len(), AnimationKind::ALL.len() - 1);
    }

    #[test]
    fn test_round_robin_visits_all_and_wraps() {
        let rotator = Rotator::default();
        let mut index = 0;
        let mut visited = vec![rotator.kind_at(index)];
        for _ in 1..rotator.catalog().len() {
            index = rotator.pick_next_round_robin(index);
            visited.push(rotator.kind_at(index));
        }
        assert_eq!(visited, AnimationKind::ALL.to_vec());
        assert_eq!(rotator.pick_next_round_robin(index), 0);
    }

    #[test]
    fn test_single_entry_catalog() {
        let rotator = Rotator::new(vec![AnimationKind::Bubbles]).unwrap();
        let mut rng = Rng::with_seed(1);
        assert_eq!(
            rotator.pick_random_excluding(AnimationKind::Bubbles, &mut rng),
            AnimationKind::Bubbles
        );
        assert_eq!(rotator.pick_next_round_robin(0), 0);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(Rotator::new(Vec::new()), Err(EngineError::EmptyCatalog));
    }

    #[test]
    fn test_index_lookup() {
        let rotator = Rotator::default();
        assert_eq!(rotator.index_of(AnimationKind::GalaxySpiral), Some(4));
        assert_eq!(rotator.kind_at(7), AnimationKind::GradientWave);
    }

    #[test]
    fn test_timer_fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = RotationTimer::new(DEFAULT_ROTATION_INTERVAL, start);
        assert!(!timer.poll(start + Duration::from_secs(4)));
        assert!(timer.poll(start + Duration::from_secs(5)));
        assert!(!timer.poll(start + Duration::from_secs(6)));
        assert_eq!(timer.remaining(start + Duration::from_secs(6)), Duration::from_secs(4));
        assert!(timer.poll(start + Duration::from_secs(10)));
    }
}
