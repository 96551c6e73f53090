//! RGBA colors with CSS output

use serde::{Deserialize, Serialize};

/// RGBA color with channels in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Tailwind indigo-500
    pub const INDIGO: Color = Color::rgb(99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0);
    /// Tailwind purple-500
    pub const PURPLE: Color = Color::rgb(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0);
    /// Tailwind blue-500
    pub const BLUE: Color = Color::rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0);
    /// Tailwind pink-500
    pub const PINK: Color = Color::rgb(236.0 / 255.0, 72.0 / 255.0, 153.0 / 255.0);
    /// Tailwind violet-400
    pub const VIOLET: Color = Color::rgb(167.0 / 255.0, 139.0 / 255.0, 250.0 / 255.0);
    /// Page base (#0a0a0a)
    pub const NEUTRAL_950: Color = Color::rgb(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// Format as a CSS `rgba()` value
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            trim_float(self.a.clamp(0.0, 1.0))
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Format a float with at most three decimals and no trailing zeros
pub fn trim_float(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        assert_eq!(Color::WHITE.with_alpha(0.12).to_css(), "rgba(255, 255, 255, 0.12)");
        assert_eq!(Color::BLACK.to_css(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_lerp_clamps() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);

        let past = Color::lerp(&Color::BLACK, &Color::WHITE, 2.0);
        assert_eq!(past, Color::WHITE);
    }

    #[test]
    fn test_trim_float() {
        assert_eq!(trim_float(1.0), "1");
        assert_eq!(trim_float(0.125), "0.125");
        assert_eq!(trim_float(-0.0001), "0");
        assert_eq!(trim_float(12.5), "12.5");
    }
}
