//! CPU tessellation of the frame into a colored-vertex batch.
//!
//! Each particle contributes its trail first (a wider translucent glow
//! stroke under a sharper core stroke, per segment), then its star, so
//! later geometry alpha-blends over earlier geometry in a single draw.

use glam::Vec2;

use crate::color::Hsl;
use crate::particle::Particle;
use crate::shader::Vertex;

/// Glow stroke width relative to the core stroke.
const GLOW_WIDTH_SCALE: f32 = 2.5;
/// Glow stroke opacity relative to the core stroke.
const GLOW_OPACITY_SCALE: f32 = 0.5;
/// Peak trail opacity, at the segment nearest the particle.
const TRAIL_OPACITY: f32 = 0.4;
/// Power-law exponent for the fade along the trail.
const TRAIL_FADE_EXPONENT: f32 = 1.5;
/// Trail width at the particle, as a fraction of its radius.
const TRAIL_WIDTH_SCALE: f32 = 0.6;
/// Strokes narrower than this are dropped.
const MIN_STROKE_WIDTH: f32 = 0.1;
/// Total hue swing along the trail, in degrees.
const TRAIL_HUE_SWING: f32 = -25.0;
/// Stars start from their topmost point.
const STAR_START_ANGLE: f32 = 3.0 * std::f32::consts::FRAC_PI_2;
/// Star fill when the particle's color string fails to parse.
const FALLBACK_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Tessellate all particles into `out`, clearing it first.
///
/// A particle whose color string does not decompose into HSL loses its
/// trail for this frame but still gets its star, in the fallback color.
pub fn build_frame(particles: &[Particle], out: &mut Vec<Vertex>) {
    out.clear();

    for p in particles {
        match Hsl::parse(&p.color) {
            Some(hsl) => {
                push_trail(out, p, hsl);
                push_star(out, p.pos, p.radius, p.inner_ratio, p.points, hsl.to_rgba(1.0));
            }
            None => {
                push_star(out, p.pos, p.radius, p.inner_ratio, p.points, FALLBACK_COLOR);
            }
        }
    }
}

fn push_trail(out: &mut Vec<Vertex>, p: &Particle, base: Hsl) {
    let len = p.trail.len();

    for i in 0..len.saturating_sub(1) {
        let start = p.trail[i];
        let end = p.trail[i + 1];
        let progress = i as f32 / len as f32;

        let opacity = (1.0 - progress).powf(TRAIL_FADE_EXPONENT) * TRAIL_OPACITY;
        let width = (1.0 - progress) * p.radius * TRAIL_WIDTH_SCALE;
        if width < MIN_STROKE_WIDTH {
            continue;
        }

        // Shifts from half the swing one way to half the other across the
        // trail, giving the tail a chromatic drift.
        let color = base.shift_hue((progress - 0.5) * TRAIL_HUE_SWING);

        stroke_segment(
            out,
            start,
            end,
            width * GLOW_WIDTH_SCALE,
            color.to_rgba(opacity * GLOW_OPACITY_SCALE),
        );
        stroke_segment(out, start, end, width, color.to_rgba(opacity));
    }
}

/// A line segment as a quad of two triangles. Zero-length segments are
/// dropped rather than emitting NaN normals.
fn stroke_segment(out: &mut Vec<Vertex>, start: Vec2, end: Vec2, width: f32, color: [f32; 4]) {
    let dir = end - start;
    let len = dir.length();
    if len <= f32::EPSILON {
        return;
    }

    let half = Vec2::new(-dir.y, dir.x) / len * (width * 0.5);
    let (a, b, c, d) = (start + half, start - half, end - half, end + half);

    out.extend_from_slice(&[
        vertex(a, color),
        vertex(b, color),
        vertex(c, color),
        vertex(a, color),
        vertex(c, color),
        vertex(d, color),
    ]);
}

/// A filled star polygon as a fan around its center: `points` outer
/// vertices at `radius` alternating with inner vertices at
/// `radius * inner_ratio`, starting from the top.
fn push_star(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner_ratio: f32,
    points: u32,
    color: [f32; 4],
) {
    let step = std::f32::consts::PI / points as f32;
    let inner = radius * inner_ratio;
    let ring = 2 * points as usize;

    let ring_point = |k: usize| -> Vec2 {
        let angle = STAR_START_ANGLE + k as f32 * step;
        let r = if k % 2 == 0 { radius } else { inner };
        center + Vec2::new(angle.cos(), angle.sin()) * r
    };

    for k in 0..ring {
        out.extend_from_slice(&[
            vertex(center, color),
            vertex(ring_point(k), color),
            vertex(ring_point((k + 1) % ring), color),
        ]);
    }
}

#[inline]
fn vertex(pos: Vec2, color: [f32; 4]) -> Vertex {
    Vertex {
        position: pos.to_array(),
        color,
    }
}
