//! # stardrift
//!
//! An interactive starfield: star-shaped particles drift across a
//! toroidal surface, get pulled into orbit around the mouse pointer by an
//! inverse-square attractor plus a tangential vortex force, and leave
//! fading, hue-shifted motion trails.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stardrift::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Starfield::new()
//!         .with_particle_count(150)
//!         .with_title("stardrift")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns the particle set and advances it once per
//! display frame: pointer pull, orbit force, drag, speed limit, Euler
//! integration, screen wrap, trail bookkeeping. One frame is one unit of
//! simulation time. The field is plain CPU state and can be driven
//! headless, which is how the tests and benches use it.
//!
//! ### Rendering
//!
//! Each frame the field is tessellated ([`mesh::build_frame`]) into a
//! single colored-triangle batch - trail glow and core strokes, then a
//! filled star per particle - and drawn in one alpha-blended pass.
//!
//! ### Tuning
//!
//! Every constant of the effect lives in [`FieldConfig`]; the defaults
//! are the canonical look.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod mesh;
pub mod particle;
pub mod shader;
mod simulation;
pub mod time;
mod window;

pub use color::Hsl;
pub use config::FieldConfig;
pub use error::{GpuError, RunError};
pub use field::{trail_capacity, ParticleField};
pub use glam::Vec2;
pub use particle::Particle;
pub use simulation::Starfield;
pub use time::Time;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::color::Hsl;
    pub use crate::config::FieldConfig;
    pub use crate::error::{GpuError, RunError};
    pub use crate::field::{trail_capacity, ParticleField};
    pub use crate::particle::Particle;
    pub use crate::simulation::Starfield;
    pub use crate::time::Time;
    pub use crate::Vec2;
}
