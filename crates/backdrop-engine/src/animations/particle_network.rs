//! Particle network: bouncing nodes joined by proximity links.
//!
//! Links come from a brute-force pass over every unordered pair, so the
//! node count is capped at [`MAX_PARTICLES`] to stay real-time.

use backdrop_core::{AnimationKind, Palette, SceneConfig};
use fastrand::Rng;

use super::{Animation, Tick};
use crate::entity::{entity_count, random_position, random_range, reflect_in_bounds};
use crate::geometry::Vec2;
use crate::surface::{Paint, Surface};

/// Upper bound on nodes; the link pass is O(n²).
pub const MAX_PARTICLES: usize = 150;
const PARTICLE_ALPHA: f32 = 0.5;

/// A single network node.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// A drawn connection between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// `1 - distance / max_distance`.
    pub opacity: f32,
}

/// Every unordered pair closer than `max_distance`, in `(a, b)` order.
pub fn proximity_links(particles: &[Particle], max_distance: f32) -> Vec<Link> {
    let mut links = Vec::new();
    if max_distance <= 0.0 {
        return links;
    }
    for (a, pa) in particles.iter().enumerate() {
        for (offset, pb) in particles[a + 1..].iter().enumerate() {
            let distance = pa.position.distance(pb.position);
            if distance < max_distance {
                links.push(Link {
                    a,
                    b: a + 1 + offset,
                    distance,
                    opacity: 1.0 - distance / max_distance,
                });
            }
        }
    }
    links
}

#[derive(Debug)]
pub struct ParticleNetwork {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    max_distance: f32,
    palette: Palette,
}

impl ParticleNetwork {
    pub fn new(
        width: f32,
        height: f32,
        scene: &SceneConfig,
        palette: Palette,
        rng: &mut Rng,
    ) -> Self {
        let particles = (0..entity_count(scene.particles, MAX_PARTICLES))
            .map(|_| Particle {
                position: random_position(rng, width, height),
                velocity: Vec2::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0)),
                radius: random_range(rng, 1.0, 3.0),
            })
            .collect();
        Self::with_particles(particles, width, height, scene.link_distance, palette)
    }

    /// Network over caller-supplied nodes.
    pub fn with_particles(
        particles: Vec<Particle>,
        width: f32,
        height: f32,
        max_distance: f32,
        palette: Palette,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            max_distance,
            palette,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }
}

impl Animation for ParticleNetwork {
    fn kind(&self) -> AnimationKind {
        AnimationKind::ParticleNetwork
    }

    fn step(&mut self, surface: &mut dyn Surface, tick: Tick) {
        surface.fill(&Paint::Solid(self.palette.background));

        let node_color = self.palette.foreground.with_alpha(PARTICLE_ALPHA);
        for particle in &mut self.particles {
            particle.position += particle.velocity * tick.scale;
            reflect_in_bounds(
                &mut particle.position,
                &mut particle.velocity,
                self.width,
                self.height,
            );
            surface.fill_circle(particle.position, particle.radius, node_color);
        }

        for link in proximity_links(&self.particles, self.max_distance) {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                self.palette.foreground.with_alpha(link.opacity),
            );
        }
    }

    fn entity_count(&self) -> usize {
        self.particles.len()
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

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 2.0,
        }
    }

    fn network_with(scene: &SceneConfig, width: f32, height: f32, seed: u64) -> ParticleNetwork {
        let mut rng = Rng::with_seed(seed);
        ParticleNetwork::new(width, height, scene, Theme::Classic.palette(), &mut rng)
    }

    #[test]
    fn test_four_fixed_particles_one_frame() {
        // (0,0)-(60,0) = 60, (0,0)-(0,80) = 80, (60,0)-(0,80) = 100 (not < 100),
        // (300,300) is far from everything.
        let particles = vec![
            still(0.0, 0.0),
            still(60.0, 0.0),
            still(0.0, 80.0),
            still(300.0, 300.0),
        ];
        let palette = Theme::Classic.palette();
        let mut network = ParticleNetwork::with_particles(particles, 400.0, 400.0, 100.0, palette);
        let mut log = DrawLog::new(400, 400);
        network.step(&mut log, Tick::UNIT);

        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Vec2::new(0.0, 0.0));
        assert_eq!(lines[0].1, Vec2::new(60.0, 0.0));
        assert!((lines[0].2.a - 0.4).abs() < 1e-6);
        assert_eq!(lines[1].1, Vec2::new(0.0, 80.0));
        assert!((lines[1].2.a - 0.2).abs() < 1e-6);

        let pairs: Vec<(usize, usize)> = proximity_links(network.particles(), 100.0)
            .iter()
            .map(|l| (l.a, l.b))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_link_count_matches_brute_force() {
        let scene = SceneConfig {
            particles: 120,
            link_distance: 60.0,
            ..SceneConfig::default()
        };
        let mut network = network_with(&scene, 300.0, 200.0, 4);
        let mut log = DrawLog::new(300, 200);
        network.step(&mut log, Tick::UNIT);

        let nodes = network.particles();
        let mut expected = Vec::new();
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                let d = nodes[i].position.distance(nodes[j].position);
                if d < 60.0 {
                    expected.push(1.0 - d / 60.0);
                }
            }
        }
        let drawn: Vec<f32> = log.lines().map(|(_, _, color)| color.a).collect();
        assert_eq!(drawn.len(), expected.len());
        for (got, want) in drawn.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let scene = SceneConfig {
            particles: 150,
            ..SceneConfig::default()
        };
        let mut network = network_with(&scene, 120.0, 60.0, 8);
        let mut log = DrawLog::new(120, 60);
        for _ in 0..1_000 {
            network.step(&mut log, Tick::UNIT);
            log.reset();
            for p in network.particles() {
                assert!((0.0..=120.0).contains(&p.position.x));
                assert!((0.0..=60.0).contains(&p.position.y));
            }
        }
    }

    #[test]
    fn test_count_is_capped() {
        let scene = SceneConfig {
            particles: 10_000,
            ..SceneConfig::default()
        };
        let network = network_with(&scene, 100.0, 100.0, 1);
        assert_eq!(network.entity_count(), MAX_PARTICLES);
    }

    #[test]
    fn test_negative_count_renders_background_only() {
        let scene = SceneConfig {
            particles: -3,
            ..SceneConfig::default()
        };
        let mut network = network_with(&scene, 100.0, 100.0, 1);
        let mut log = DrawLog::new(100, 100);
        network.step(&mut log, Tick::UNIT);
        assert_eq!(network.entity_count(), 0);
        assert_eq!(log.ops().len(), 1);
    }
}
