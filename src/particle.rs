//! The particle entity and its randomized spawning.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::FieldConfig;

/// A single star particle.
///
/// Radius, color and shape are fixed at creation; position, velocity and
/// the trail evolve every frame. The trail holds recent positions,
/// most-recent-first.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// `hsl(h, s%, l%)` string, decomposed at render time.
    pub color: String,
    /// Number of star points (outer vertices).
    pub points: u32,
    /// Inner-vertex radius as a fraction of `radius`.
    pub inner_ratio: f32,
    /// +1.0 for counter-clockwise orbits, -1.0 for clockwise.
    pub orbit_dir: f32,
    pub trail: VecDeque<Vec2>,
}

impl Particle {
    /// Spawn a particle at a uniformly random position on a `width` x
    /// `height` surface, with random speed, heading, radius, hue and star
    /// shape drawn from `config`'s ranges.
    pub fn spawn(rng: &mut SmallRng, width: f32, height: f32, config: &FieldConfig) -> Self {
        let radius = rng.gen_range(config.min_radius..config.max_radius);
        let speed = rng.gen_range(config.min_speed..config.max_speed);
        let angle = rng.gen_range(0.0..TAU);
        let hue = rng.gen_range(0.0..360.0f32);

        Self {
            pos: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius,
            color: format!("hsl({hue:.1}, 80%, 70%)"),
            points: rng.gen_range(5..9),
            inner_ratio: rng.gen_range(0.4..0.6),
            orbit_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            trail: VecDeque::new(),
        }
    }

    /// Current speed in pixels per frame.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
