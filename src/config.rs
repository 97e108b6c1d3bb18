//! Field configuration.
//!
//! Every tunable of the effect lives in [`FieldConfig`]. The defaults are
//! the canonical look; the setters exist so callers can push the effect
//! around without editing constants.
//!
//! # Example
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(300)
//!     .with_gravity_strength(120.0);
//! ```

/// Tunables for a [`ParticleField`](crate::field::ParticleField).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Initial speed range in pixels per frame.
    pub min_speed: f32,
    pub max_speed: f32,
    /// Star outer-radius range in pixels.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Nominal trail length bounds. Actual capacity is speed-dependent,
    /// see [`trail_capacity`](crate::field::ParticleField).
    pub min_trail_length: usize,
    pub max_trail_length: usize,
    /// Numerator of the inverse-square pull toward the pointer.
    pub gravity_strength: f32,
    /// Scale of the tangential force that encourages orbits.
    pub orbit_strength: f32,
    /// Per-frame velocity multiplier. 1.0 is frictionless.
    pub friction: f32,
    /// Speed limit in pixels per frame.
    pub max_velocity: f32,
    /// Lower clamp on the pull distance, preventing extreme force at
    /// close range.
    pub min_gravity_distance: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            min_speed: 0.1,
            max_speed: 0.5,
            min_radius: 2.0,
            max_radius: 5.0,
            min_trail_length: 5,
            max_trail_length: 40,
            gravity_strength: 50.0,
            orbit_strength: 0.1,
            friction: 0.798,
            max_velocity: 2.0,
            min_gravity_distance: 100.0,
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the strength of the pull toward the pointer.
    pub fn with_gravity_strength(mut self, strength: f32) -> Self {
        self.gravity_strength = strength;
        self
    }

    /// Set the tangential orbit force scale.
    pub fn with_orbit_strength(mut self, strength: f32) -> Self {
        self.orbit_strength = strength;
        self
    }

    /// Set the per-frame friction multiplier.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the particle speed limit.
    pub fn with_max_velocity(mut self, max: f32) -> Self {
        self.max_velocity = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = FieldConfig::default()
            .with_particle_count(42)
            .with_friction(0.9)
            .with_max_velocity(3.0);

        assert_eq!(config.particle_count, 42);
        assert_eq!(config.friction, 0.9);
        assert_eq!(config.max_velocity, 3.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.gravity_strength, 50.0);
    }
}
