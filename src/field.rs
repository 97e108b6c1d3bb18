//! The particle field: owns the particle set and advances it each frame.
//!
//! The per-frame step is a small force stack applied CPU-side, in order:
//! inverse-square pull toward the pointer, a tangential orbit force,
//! drag, a speed limit, Euler integration, screen wrapping, and trail
//! bookkeeping. One frame is one unit of simulation time; the field never
//! reads wall-clock time.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::particle::Particle;

/// Speed-dependent trail capacity.
///
/// Blends between the configured min and max trail lengths by the ratio
/// of current speed to the speed limit, then scales by 5. The scale
/// factor means real capacity runs well past `max_trail_length`; that is
/// the observed behavior of the effect and is kept intact.
pub fn trail_capacity(speed: f32, config: &FieldConfig) -> usize {
    let ratio = (speed / config.max_velocity).min(1.0);
    let span = (config.max_trail_length - config.min_trail_length) as f32;
    (config.min_trail_length as f32 + span * ratio).floor() as usize * 5
}

/// A field of star particles on a toroidal surface.
///
/// External input is limited to the pointer position and resize events;
/// output is the particle state read by the tessellator each frame.
#[derive(Debug)]
pub struct ParticleField {
    width: f32,
    height: f32,
    config: FieldConfig,
    pointer: Option<Vec2>,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    /// Create a field with a fresh particle set. Always succeeds.
    pub fn new(width: f32, height: f32, config: FieldConfig) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(width, height, config, seed)
    }

    /// Create a field with a deterministic spawn, for tests and benches.
    pub fn seeded(width: f32, height: f32, config: FieldConfig, seed: u64) -> Self {
        let mut field = Self {
            width,
            height,
            config,
            pointer: None,
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        field.respawn();
        field
    }

    /// Update surface dimensions and respawn every particle. The old set
    /// (trails included) is discarded.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.respawn();
    }

    /// Overwrite the pointer position. No validation.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Mark the pointer absent.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    fn respawn(&mut self) {
        self.particles = (0..self.config.particle_count)
            .map(|_| Particle::spawn(&mut self.rng, self.width, self.height, &self.config))
            .collect();
    }

    /// Advance the field by one frame.
    pub fn advance(&mut self) {
        let config = self.config;
        let pointer = self.pointer;
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            if let Some(pointer) = pointer {
                let d = pointer - p.pos;
                let mut dist = d.length();
                if dist == 0.0 {
                    dist = 1.0;
                }

                // Inverse-square pull, distance clamped below to keep the
                // force finite right under the pointer.
                let min_sq = config.min_gravity_distance * config.min_gravity_distance;
                let pull = config.gravity_strength / d.length_squared().max(min_sq);

                // Tangential push, 90 degrees off the pull vector.
                let orbit = config.orbit_strength * p.orbit_dir;

                p.vel += (d / dist) * pull + (Vec2::new(-d.y, d.x) / dist) * orbit;
            }

            p.vel *= config.friction;

            let speed = p.vel.length();
            if speed > config.max_velocity {
                p.vel *= config.max_velocity / speed;
            }

            p.pos += p.vel;

            // Wrap to the opposite edge once fully off-surface. The trail
            // is dropped so no streak is drawn across the screen.
            let mut wrapped = false;
            if p.pos.x < -p.radius {
                p.pos.x = width + p.radius;
                wrapped = true;
            }
            if p.pos.x > width + p.radius {
                p.pos.x = -p.radius;
                wrapped = true;
            }
            if p.pos.y < -p.radius {
                p.pos.y = height + p.radius;
                wrapped = true;
            }
            if p.pos.y > height + p.radius {
                p.pos.y = -p.radius;
                wrapped = true;
            }
            if wrapped {
                p.trail.clear();
            }

            let capacity = trail_capacity(p.speed(), &config);
            p.trail.push_front(p.pos);
            p.trail.truncate(capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u64) -> ParticleField {
        ParticleField::seeded(800.0, 600.0, FieldConfig::default(), seed)
    }

    #[test]
    fn test_initialize_spawns_full_set() {
        let field = field(1);

        assert_eq!(field.particles().len(), 150);
        for p in field.particles() {
            assert!(p.radius >= 2.0 && p.radius <= 5.0);
            assert!(p.speed() >= 0.1 - 1e-6 && p.speed() <= 0.5 + 1e-6);
            assert!(p.pos.x >= 0.0 && p.pos.x <= field.width());
            assert!(p.pos.y >= 0.0 && p.pos.y <= field.height());
        }
    }

    #[test]
    fn test_resize_respawns_within_new_bounds() {
        let mut field = field(2);
        field.advance();
        field.resize(1024.0, 768.0);

        assert_eq!(field.particles().len(), field.config().particle_count);
        for p in field.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 1024.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 768.0);
            assert!(p.trail.is_empty());
        }
    }

    #[test]
    fn test_velocity_never_exceeds_cap() {
        let mut field = field(3);
        field.set_pointer(400.0, 300.0);

        for _ in 0..120 {
            field.advance();
            for p in field.particles() {
                assert!(p.speed() <= field.config().max_velocity + 1e-5);
            }
        }
    }

    #[test]
    fn test_speed_limit_preserves_direction() {
        let mut field = field(4);
        let before = Vec2::new(30.0, 40.0);
        field.particles[0].vel = before;
        field.particles[0].pos = Vec2::new(400.0, 300.0);

        field.advance();

        let after = field.particles[0].vel;
        assert!((after.length() - field.config().max_velocity).abs() < 1e-4);
        assert!(after.normalize().dot(before.normalize()) > 0.9999);
    }

    #[test]
    fn test_no_pointer_means_no_acceleration() {
        let mut field = field(5);
        field.clear_pointer();

        let before: Vec<_> = field.particles().iter().map(|p| (p.pos, p.vel)).collect();

        field.advance();

        let friction = field.config().friction;
        for (p, (pos0, vel0)) in field.particles().iter().zip(before) {
            let expected_vel = vel0 * friction;
            assert!((p.vel - expected_vel).length() < 1e-5);
            assert!((p.pos - (pos0 + expected_vel)).length() < 1e-4);
        }
    }

    #[test]
    fn test_pull_is_inverse_square_beyond_min_distance() {
        // Isolate the pull: no orbit force, no friction.
        let config = FieldConfig {
            orbit_strength: 0.0,
            friction: 1.0,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::seeded(2000.0, 2000.0, config, 6);
        field.set_pointer(0.0, 500.0);

        let d1 = 200.0;
        let d2 = 400.0;
        field.particles[0].pos = Vec2::new(d1, 500.0);
        field.particles[0].vel = Vec2::ZERO;
        field.particles[1].pos = Vec2::new(d2, 500.0);
        field.particles[1].vel = Vec2::ZERO;

        field.advance();

        let v1 = field.particles[0].vel.length();
        let v2 = field.particles[1].vel.length();

        // Doubling the distance quarters the pull.
        assert!((v1 / v2 - 4.0).abs() < 0.01, "v1/v2 = {}", v1 / v2);
        assert!((v1 - config.gravity_strength / (d1 * d1)).abs() < 1e-6);
        // The pull points at the pointer.
        assert!(field.particles[0].vel.x < 0.0);
    }

    #[test]
    fn test_screen_wrap_teleports_and_clears_trail() {
        let mut field = field(7);
        let p = &mut field.particles[0];
        p.pos = Vec2::new(799.0, 300.0);
        p.vel = Vec2::new(20.0, 0.0); // pre-clamp; advance caps it
        p.radius = 3.0;
        p.trail = vec![Vec2::new(798.0, 300.0), Vec2::new(797.0, 300.0)].into();

        // Walk it off the right edge and inspect the frame it wraps.
        let mut wrapped = false;
        for _ in 0..10 {
            field.advance();
            let p = &field.particles[0];
            if p.pos.x < 0.0 {
                // Teleported to the opposite bound, trail restarted from
                // the new position alone.
                assert_eq!(p.pos.x, -p.radius);
                assert_eq!(p.trail.len(), 1);
                assert_eq!(p.trail[0], p.pos);
                wrapped = true;
                break;
            }
        }
        assert!(wrapped, "particle never wrapped");
    }

    #[test]
    fn test_trail_bounded_by_dynamic_capacity() {
        let mut field = field(8);
        field.set_pointer(400.0, 300.0);

        for _ in 0..600 {
            field.advance();
            for p in field.particles() {
                assert!(p.trail.len() <= trail_capacity(p.speed(), field.config()));
            }
        }
    }

    #[test]
    fn test_trail_capacity_monotonic_in_speed() {
        let config = FieldConfig::default();
        let mut last = 0;
        for i in 0..=40 {
            let speed = config.max_velocity * i as f32 / 20.0; // runs past the cap
            let cap = trail_capacity(speed, &config);
            assert!(cap >= last, "capacity decreased at speed {speed}");
            last = cap;
        }

        assert_eq!(trail_capacity(0.0, &config), config.min_trail_length * 5);
        // The x5 scale is intentional: capacity tops out well above the
        // nominal max_trail_length.
        assert_eq!(
            trail_capacity(config.max_velocity, &config),
            config.max_trail_length * 5
        );
    }

    #[test]
    fn test_pointer_state_is_overwritten() {
        let mut field = field(9);
        assert_eq!(field.pointer(), None);

        field.set_pointer(10.0, 20.0);
        assert_eq!(field.pointer(), Some(Vec2::new(10.0, 20.0)));

        field.set_pointer(-5.0, 9000.0); // no validation
        assert_eq!(field.pointer(), Some(Vec2::new(-5.0, 9000.0)));

        field.clear_pointer();
        assert_eq!(field.pointer(), None);
    }
}
