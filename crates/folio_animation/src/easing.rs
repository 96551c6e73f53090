//! Easing curves
//!
//! Curve names follow the conventions web animation code uses
//! (`power3.out`, `back.out(1.7)`, `elastic.out(1, 0.5)`), so a manifest
//! can be replayed by a browser runtime without translation.
//!
//! The `powerN` family maps to polynomial degree `N + 1`:
//! `power1` is quadratic, `power2` cubic, `power3` quartic, `power4` quintic.

use std::f32::consts::{PI, TAU};

use serde::Serialize;

use crate::spring::SpringConfig;

/// Easing function applied to normalized progress `0.0..=1.0`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub enum Easing {
    /// No easing (`none` / `linear`)
    #[default]
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4In,
    Power4Out,
    /// Overshoot then settle; the value is the overshoot amount (1.70158 by default)
    BackOut(f32),
    /// Damped oscillation past the end value
    ElasticOut { amplitude: f32, period: f32 },
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
    /// Physical spring response normalized to the tween duration
    Spring(SpringConfig),
}

impl Easing {
    /// `1 - (1 - t)^3`, the cubic ease-out used for scroll smoothing
    pub const CUBIC_OUT: Easing = Easing::Power2Out;

    /// Framer-style `easeOut`
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);

    /// Framer-style `easeInOut`
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    pub fn back_out() -> Self {
        Easing::BackOut(1.70158)
    }

    pub fn elastic_out(amplitude: f32, period: f32) -> Self {
        Easing::ElasticOut { amplitude, period }
    }

    /// Apply the curve to `t`, clamped to `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::SineIn => 1.0 - (t * PI * 0.5).cos(),
            Easing::SineOut => (t * PI * 0.5).sin(),
            Easing::SineInOut => -0.5 * ((PI * t).cos() - 1.0),
            Easing::Power1In => power_in(t, 2),
            Easing::Power1Out => power_out(t, 2),
            Easing::Power1InOut => power_in_out(t, 2),
            Easing::Power2In => power_in(t, 3),
            Easing::Power2Out => power_out(t, 3),
            Easing::Power2InOut => power_in_out(t, 3),
            Easing::Power3In => power_in(t, 4),
            Easing::Power3Out => power_out(t, 4),
            Easing::Power3InOut => power_in_out(t, 4),
            Easing::Power4In => power_in(t, 5),
            Easing::Power4Out => power_out(t, 5),
            Easing::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
            Easing::Spring(config) => config.normalized_response(t),
        }
    }

    /// Name in web animation notation, used by the manifest
    pub fn name(&self) -> String {
        match *self {
            Easing::Linear => "none".to_string(),
            Easing::SineIn => "sine.in".to_string(),
            Easing::SineOut => "sine.out".to_string(),
            Easing::SineInOut => "sine.inOut".to_string(),
            Easing::Power1In => "power1.in".to_string(),
            Easing::Power1Out => "power1.out".to_string(),
            Easing::Power1InOut => "power1.inOut".to_string(),
            Easing::Power2In => "power2.in".to_string(),
            Easing::Power2Out => "power2.out".to_string(),
            Easing::Power2InOut => "power2.inOut".to_string(),
            Easing::Power3In => "power3.in".to_string(),
            Easing::Power3Out => "power3.out".to_string(),
            Easing::Power3InOut => "power3.inOut".to_string(),
            Easing::Power4In => "power4.in".to_string(),
            Easing::Power4Out => "power4.out".to_string(),
            Easing::BackOut(o) => format!("back.out({o})"),
            Easing::ElasticOut { amplitude, period } => {
                format!("elastic.out({amplitude}, {period})")
            }
            Easing::CubicBezier(a, b, c, d) => format!("cubic-bezier({a}, {b}, {c}, {d})"),
            Easing::Spring(cfg) => format!(
                "spring({}, {}, {})",
                cfg.stiffness, cfg.damping, cfg.mass
            ),
        }
    }
}

fn power_in(t: f32, degree: i32) -> f32 {
    t.powi(degree)
}

fn power_out(t: f32, degree: i32) -> f32 {
    1.0 - (1.0 - t).powi(degree)
}

fn power_in_out(t: f32, degree: i32) -> f32 {
    if t < 0.5 {
        power_in(t * 2.0, degree) * 0.5
    } else {
        1.0 - power_in((1.0 - t) * 2.0, degree) * 0.5
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let amp = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let phase = period / TAU * (1.0 / amp).asin();
    amp * 2f32.powf(-10.0 * t) * ((t - phase) * TAU / period).sin() + 1.0
}

/// Solve a CSS cubic-bezier for `y` at input `x` (Newton with bisection fallback)
fn cubic_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let bezier = |t: f32, p1: f32, p2: f32| {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
    };
    let derivative = |t: f32, p1: f32, p2: f32| {
        let mt = 1.0 - t;
        3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    };

    let mut t = x;
    for _ in 0..8 {
        let err = bezier(t, x1, x2) - x;
        if err.abs() < 1e-5 {
            return bezier(t, y1, y2);
        }
        let d = derivative(t, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        let value = bezier(t, x1, x2);
        if (value - x).abs() < 1e-5 {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier(t, y1, y2)
}
