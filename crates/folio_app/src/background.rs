//! Decorative backdrop: 3D scene embed, particle field and gradient overlay
//!
//! Scrolling through the page scrubs a blur/brightness/opacity change on the
//! backdrop, pushes the particle layer down and deepens the gradient. The
//! scrub follows scroll progress through a cubic ease-out with two seconds
//! of smoothing.

use folio_animation::{
    AnimationScope, Easing, Position, Property, PropertyValues, Repeat, ScrollTrigger, Timeline,
    Tween,
};
use folio_core::Target;
use folio_layout::prelude::*;
use serde::{Deserialize, Serialize};

use crate::component::{scope_size, trigger_point, Component, MountContext};
use crate::particles::{self, salt, seeded_rng, Particle, ParticleSpec, BACKGROUND_PALETTE};

/// Element whose scroll range drives the scrub when it is rendered
pub const SCRUB_TRIGGER: &str = "page-content";
const SCRUB_SMOOTHING_MS: f32 = 2000.0;
const WAVE_MS: f32 = 25_000.0;

/// Backdrop options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Scene reference handed to the 3D embed; empty renders no embed
    pub scene_url: String,
    pub show_particles: bool,
    pub particle_count: usize,
    /// Resting opacity of the gradient overlay
    pub gradient_opacity: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            scene_url: "https://prod.spline.design/Oy5edkRrMfCmZo17/scene.splinecode".to_string(),
            show_particles: true,
            particle_count: 40,
            gradient_opacity: 0.7,
        }
    }
}

pub struct Background {
    config: BackgroundConfig,
    particles: Vec<Particle>,
    scope: Option<AnimationScope>,
}

impl Background {
    pub fn new(config: BackgroundConfig, seed: u64) -> Self {
        let particles = if config.show_particles {
            particles::generate(
                &mut seeded_rng(seed, salt::BACKGROUND, 0),
                config.particle_count,
                &ParticleSpec::background(),
                &BACKGROUND_PALETTE,
            )
        } else {
            Vec::new()
        };
        Self {
            config,
            particles,
            scope: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drift through every waypoint, then retrace, forever
    fn drift(target: Target, particle: &Particle) -> Option<Timeline> {
        let (&(x0, y0), rest) = particle.waypoints.split_first()?;
        let mut tl = Timeline::new()
            .defaults(particle.duration_ms, Easing::SineInOut)
            .delay(particle.delay_ms)
            .repeat(Repeat::Infinite)
            .yoyo(true);
        tl.add(
            Tween::from_to(
                target.clone(),
                PropertyValues::new()
                    .with(Property::X, 0.0)
                    .with(Property::Y, 0.0)
                    .with(Property::Opacity, 0.0),
                PropertyValues::new()
                    .with(Property::X, x0)
                    .with(Property::Y, y0)
                    .with(Property::Opacity, particle.opacity),
            ),
            Position::End,
        );
        for &(x, y) in rest {
            tl.add(
                Tween::to(
                    target.clone(),
                    PropertyValues::new().with(Property::X, x).with(Property::Y, y),
                ),
                Position::End,
            );
        }
        Some(tl)
    }

    fn wave() -> Timeline {
        Timeline::new().with(
            Tween::from_to(
                "background-gradient",
                PropertyValues::new()
                    .with(Property::BackgroundPositionX, 0.0)
                    .with(Property::BackgroundPositionY, 0.0),
                PropertyValues::new()
                    .with(Property::BackgroundPositionX, 50.0)
                    .with(Property::BackgroundPositionY, 60.0),
            )
            .duration(WAVE_MS)
            .ease(Easing::SineInOut)
            .repeat(Repeat::Infinite)
            .yoyo(true),
            Position::At(0.0),
        )
    }

    /// One normalized cycle; scroll progress seeks it
    fn scrub(&self) -> Timeline {
        let g = self.config.gradient_opacity;
        Timeline::new()
            .paused()
            .defaults(1000.0, Easing::Linear)
            .with(
                Tween::to(
                    "background",
                    PropertyValues::new()
                        .with(Property::Blur, 15.0)
                        .with(Property::Brightness, 0.8)
                        .with(Property::Opacity, 0.8),
                ),
                Position::At(0.0),
            )
            .with(
                Tween::to(
                    "background-particles",
                    PropertyValues::new()
                        .with(Property::Y, 200.0)
                        .with(Property::Scale, 1.4),
                ),
                Position::At(0.0),
            )
            .with(
                Tween::from_to(
                    "background-gradient",
                    PropertyValues::new().with(Property::Opacity, g),
                    PropertyValues::new().with(Property::Opacity, g + 0.3),
                ),
                Position::At(0.0),
            )
    }
}

impl Component for Background {
    fn name(&self) -> &'static str {
        "background"
    }

    fn render(&self) -> Element {
        let particles = self.particles.iter().enumerate().map(|(i, particle)| {
            div()
                .id(Target::indexed("background-particle", i))
                .class("particle")
                .overlay()
                .style(
                    style()
                        .at_pct(particle.left_pct, particle.top_pct)
                        .size(particle.size, particle.size)
                        .bg(particle.color)
                        .rounded(particle.size / 2.0)
                        .blur(1.5),
                )
        });
        let scene = (!self.config.scene_url.is_empty()).then(|| {
            div()
                .id("background-scene")
                .class("scene")
                .attr("data-scene", self.config.scene_url.as_str())
                .overlay()
                .style(style().z(-10))
        });

        div()
            .id("background")
            .class("background")
            .overlay()
            .h_screen()
            .child_opt(scene)
            .child_opt(self.config.show_particles.then(|| {
                div()
                    .id("background-particles")
                    .class("particles")
                    .overlay()
                    .style(style().z(-5))
                    .children(particles)
            }))
            .child(
                div()
                    .id("background-gradient")
                    .class("gradient")
                    .overlay()
                    .style(
                        style()
                            .opacity(self.config.gradient_opacity)
                            .background_image(
                                "linear-gradient(to bottom, rgba(0, 0, 0, 0.95), rgba(0, 0, 0, 0.7), transparent)",
                            )
                            .background_position(0.0, 0.0),
                    ),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());

        for (i, particle) in self.particles.iter().enumerate() {
            if let Some(tl) = Self::drift(Target::indexed("background-particle", i), particle) {
                ctx.timeline(&mut scope, tl);
            }
        }
        ctx.timeline(&mut scope, Self::wave());

        let page = Target::id(SCRUB_TRIGGER);
        let trigger = if ctx.contains(&page) {
            page
        } else {
            Target::id("background")
        };
        if let (Some(start), Some(end)) = (trigger_point("top top"), trigger_point("bottom top")) {
            if let Some(id) = ctx.timeline(&mut scope, self.scrub()) {
                scope.trigger(
                    ScrollTrigger::scrub(trigger, start, end, SCRUB_SMOOTHING_MS, Easing::CUBIC_OUT)
                        .timeline(id),
                );
            }
        }

        self.scope = Some(scope);
    }

    fn unmount(&mut self) {
        if let Some(mut scope) = self.scope.take() {
            scope.kill_all();
        }
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::mount;
    use folio_animation::AnimationScheduler;

    #[test]
    fn test_forty_particles_by_default() {
        let background = Background::new(BackgroundConfig::default(), 9);
        let tree = RenderTree::new(background.render(), Default::default());
        assert_eq!(tree.indexed_targets("background-particle").len(), 40);
        assert_eq!(
            tree.attr(&Target::id("background-scene"), "data-scene"),
            Some(BackgroundConfig::default().scene_url.as_str())
        );
    }

    #[test]
    fn test_particles_can_be_disabled() {
        let config = BackgroundConfig {
            show_particles: false,
            ..BackgroundConfig::default()
        };
        let scheduler = AnimationScheduler::new();
        let mut background = Background::new(config, 9);
        assert!(background.particles().is_empty());
        let tree = mount(&mut background, &scheduler);
        assert!(!tree.contains(&Target::id("background-particles")));
        // Wave and scrub remain
        assert_eq!(scheduler.timeline_count(), 2);
        assert_eq!(scheduler.trigger_count(), 1);
    }

    #[test]
    fn test_scrub_follows_scroll() {
        let scheduler = AnimationScheduler::new();
        let mut background = Background::new(BackgroundConfig::default(), 9);
        let tree = mount(&mut background, &scheduler);
        let gradient = Target::id("background-gradient");
        assert!((scheduler.value(&gradient, Property::Opacity) - 0.7).abs() < 1e-4);

        // Scrolled past the end of the range
        scheduler.update_scroll(10_000.0, tree.viewport(), &tree);
        scheduler.advance(100.0);
        let early = scheduler.value(&Target::id("background"), Property::Blur);
        assert!(early > 0.0 && early < 15.0, "smoothing lags behind: {early}");

        for _ in 0..100 {
            scheduler.advance(100.0);
        }
        assert!((scheduler.value(&Target::id("background"), Property::Blur) - 15.0).abs() < 0.1);
        assert!((scheduler.value(&gradient, Property::Opacity) - 1.0).abs() < 0.01);
        assert!(
            (scheduler.value(&Target::id("background-particles"), Property::Scale) - 1.4).abs()
                < 0.01
        );
    }

    #[test]
    fn test_particles_loop_until_unmount() {
        let scheduler = AnimationScheduler::new();
        let mut background = Background::new(BackgroundConfig::default(), 9);
        mount(&mut background, &scheduler);
        for _ in 0..20 {
            scheduler.advance(10_000.0);
        }
        assert!(scheduler.has_active_animations());

        background.unmount();
        assert!(scheduler.is_empty());
        assert!(!scheduler.has_active_animations());
    }
}
