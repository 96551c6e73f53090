//! Seeded decorative particles
//!
//! Particle fields are generated up front from an explicit seed, so the same
//! seed always renders the same page. Each field has its own salt so that
//! sections sharing a seed still look different.

use folio_core::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Salts for the independent generators of one page
pub mod salt {
    pub const BACKGROUND: u64 = 1;
    pub const TRANSITION: u64 = 2;
    pub const ABOUT_BADGES: u64 = 3;
    pub const CONTACT: u64 = 4;
    pub const FOOTER: u64 = 5;
}

/// Deterministic generator for one component and mount generation
pub fn seeded_rng(seed: u64, salt: u64, generation: u64) -> StdRng {
    let mixed = seed
        ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ generation.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    StdRng::seed_from_u64(mixed)
}

/// Background particle palette: indigo, purple, blue, pink
pub const BACKGROUND_PALETTE: [Color; 4] = [
    Color::rgba(99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0, 0.25),
    Color::rgba(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0, 0.2),
    Color::rgba(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 0.15),
    Color::rgba(236.0 / 255.0, 72.0 / 255.0, 153.0 / 255.0, 0.2),
];

/// One drifting dot
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Diameter in px
    pub size: f32,
    pub left_pct: f32,
    pub top_pct: f32,
    /// Length of one drift leg
    pub duration_ms: f32,
    /// Phase offset; negative values start mid-drift
    pub delay_ms: f32,
    pub color: Color,
    /// Drift targets `(x, y)` in px, visited in order then retraced
    pub waypoints: Vec<(f32, f32)>,
    /// Opacity reached on the first leg
    pub opacity: f32,
}

/// Ranges for one kind of particle field
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub size: (f32, f32),
    pub position: (f32, f32),
    pub duration_ms: (f32, f32),
    pub delay_ms: (f32, f32),
    /// Symmetric drift range in px
    pub drift: f32,
    pub opacity: (f32, f32),
    pub waypoints: usize,
}

impl ParticleSpec {
    /// Full-page background dots
    pub fn background() -> Self {
        Self {
            size: (5.0, 20.0),
            position: (0.0, 100.0),
            duration_ms: (20_000.0, 50_000.0),
            delay_ms: (-20_000.0, 0.0),
            drift: 200.0,
            opacity: (0.2, 1.0),
            waypoints: 3,
        }
    }

    /// Small blurred dots behind the contact card
    pub fn contact() -> Self {
        Self {
            size: (4.0, 16.0),
            position: (0.0, 100.0),
            duration_ms: (10_000.0, 25_000.0),
            delay_ms: (0.0, 5_000.0),
            drift: 30.0,
            opacity: (0.7, 0.7),
            waypoints: 1,
        }
    }

    /// CSS-floated dots in the footer
    pub fn footer() -> Self {
        Self {
            size: (4.0, 10.0),
            position: (10.0, 90.0),
            duration_ms: (4_000.0, 10_000.0),
            delay_ms: (0.0, 2_000.0),
            drift: 0.0,
            opacity: (1.0, 1.0),
            waypoints: 0,
        }
    }
}

fn sample(rng: &mut StdRng, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Generate `count` particles from `spec`, colored from `palette`
pub fn generate(rng: &mut StdRng, count: usize, spec: &ParticleSpec, palette: &[Color]) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let color = if palette.is_empty() {
                Color::WHITE
            } else {
                palette[rng.gen_range(0..palette.len())]
            };
            let size = sample(rng, spec.size);
            let left_pct = sample(rng, spec.position);
            let top_pct = sample(rng, spec.position);
            let duration_ms = sample(rng, spec.duration_ms);
            let delay_ms = sample(rng, spec.delay_ms);
            let drift = (-spec.drift, spec.drift);
            let waypoints = (0..spec.waypoints)
                .map(|_| (sample(rng, drift), sample(rng, drift)))
                .collect();
            let opacity = sample(rng, spec.opacity);
            Particle {
                size,
                left_pct,
                top_pct,
                duration_ms,
                delay_ms,
                color,
                waypoints,
                opacity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_field() {
        let spec = ParticleSpec::background();
        let a = generate(&mut seeded_rng(42, salt::BACKGROUND, 0), 40, &spec, &BACKGROUND_PALETTE);
        let b = generate(&mut seeded_rng(42, salt::BACKGROUND, 0), 40, &spec, &BACKGROUND_PALETTE);
        let c = generate(&mut seeded_rng(43, salt::BACKGROUND, 0), 40, &spec, &BACKGROUND_PALETTE);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_background_ranges() {
        let spec = ParticleSpec::background();
        let field = generate(&mut seeded_rng(7, salt::BACKGROUND, 0), 40, &spec, &BACKGROUND_PALETTE);
        assert_eq!(field.len(), 40);
        for p in &field {
            assert!((5.0..20.0).contains(&p.size));
            assert!((0.0..100.0).contains(&p.left_pct));
            assert!((20_000.0..50_000.0).contains(&p.duration_ms));
            assert!((-20_000.0..=0.0).contains(&p.delay_ms));
            assert!((0.2..1.0).contains(&p.opacity));
            assert_eq!(p.waypoints.len(), 3);
            assert!(p
                .waypoints
                .iter()
                .all(|(x, y)| x.abs() <= 200.0 && y.abs() <= 200.0));
            assert!(BACKGROUND_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_generations_differ() {
        let spec = ParticleSpec::footer();
        let a = generate(&mut seeded_rng(1, salt::FOOTER, 0), 12, &spec, &[]);
        let b = generate(&mut seeded_rng(1, salt::FOOTER, 1), 12, &spec, &[]);
        assert_ne!(a, b);
        assert!(a.iter().all(|p| p.waypoints.is_empty()));
    }
}
