//! HSL color handling for particle tinting.
//!
//! Particle colors are carried as `hsl(h, s%, l%)` strings and decomposed
//! at render time so the trail can shift hue along its length. A string
//! that does not match the expected pattern is treated as unparseable and
//! the caller degrades gracefully (the trail is skipped, the star is not).

use std::fmt;

/// A color in HSL space.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Parse an `hsl(h, s%, l%)` string.
    ///
    /// Accepts a decimal hue and integer percentages, the exact shape
    /// [`Hsl`]'s `Display` produces. Anything else returns `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.strip_prefix("hsl(")?.strip_suffix(')')?;
        let mut parts = inner.splitn(3, ',');

        let hue: f32 = parts.next()?.trim().parse().ok()?;
        let saturation: f32 = parts.next()?.trim().strip_suffix('%')?.parse().ok()?;
        let lightness: f32 = parts.next()?.trim().strip_suffix('%')?.parse().ok()?;

        if !(hue.is_finite() && hue >= 0.0) {
            return None;
        }

        Some(Self {
            hue,
            saturation,
            lightness,
        })
    }

    /// Return a copy with the hue shifted by `degrees`, wrapped into `[0, 360)`.
    pub fn shift_hue(&self, degrees: f32) -> Self {
        Self {
            hue: (self.hue + degrees).rem_euclid(360.0),
            ..*self
        }
    }

    /// Convert to straight-alpha RGBA components in `[0, 1]`.
    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        let h = self.hue.rem_euclid(360.0);
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, alpha]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.1}, {:.0}%, {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let color = Hsl::new(203.4, 80.0, 70.0);
        let parsed = Hsl::parse(&color.to_string()).unwrap();
        assert!((parsed.hue - 203.4).abs() < 0.01);
        assert_eq!(parsed.saturation, 80.0);
        assert_eq!(parsed.lightness, 70.0);
    }

    #[test]
    fn test_parse_integer_hue() {
        let parsed = Hsl::parse("hsl(120, 80%, 70%)").unwrap();
        assert_eq!(parsed.hue, 120.0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Hsl::parse("").is_none());
        assert!(Hsl::parse("not a color").is_none());
        assert!(Hsl::parse("hsl(120, 80, 70)").is_none()); // missing %
        assert!(Hsl::parse("hsl(120, 80%)").is_none()); // missing component
        assert!(Hsl::parse("rgb(1, 2, 3)").is_none());
        assert!(Hsl::parse("hsl(-10, 80%, 70%)").is_none());
    }

    #[test]
    fn test_shift_hue_wraps() {
        let color = Hsl::new(350.0, 80.0, 70.0);
        assert!((color.shift_hue(20.0).hue - 10.0).abs() < 0.001);
        assert!((color.shift_hue(-360.0).hue - 350.0).abs() < 0.001);

        let near_zero = Hsl::new(5.0, 80.0, 70.0);
        assert!((near_zero.shift_hue(-12.5).hue - 352.5).abs() < 0.001);
    }

    #[test]
    fn test_to_rgba_primaries() {
        let red = Hsl::new(0.0, 100.0, 50.0).to_rgba(1.0);
        assert!((red[0] - 1.0).abs() < 0.001);
        assert!(red[1].abs() < 0.001);
        assert!(red[2].abs() < 0.001);

        let green = Hsl::new(120.0, 100.0, 50.0).to_rgba(0.5);
        assert!((green[1] - 1.0).abs() < 0.001);
        assert_eq!(green[3], 0.5);

        // Zero saturation is a pure gray regardless of hue.
        let gray = Hsl::new(200.0, 0.0, 70.0).to_rgba(1.0);
        assert!((gray[0] - 0.7).abs() < 0.001);
        assert!((gray[0] - gray[1]).abs() < 0.001);
        assert!((gray[1] - gray[2]).abs() < 0.001);
    }
}
