//! Contact card with social links and a floating particle field

use folio_animation::{
    AnimationScope, Easing, Position, Property, PropertyValues, Repeat, StaggerConfig, Timeline,
    Tween,
};
use folio_core::{Color, Event, Target};
use folio_layout::prelude::*;

use super::fade_up;
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::ContactContent;
use crate::hover::{HoverAnimator, HoverEffect};
use crate::particles::{self, salt, seeded_rng, Particle, ParticleSpec};

const PARTICLE_COUNT: usize = 12;

pub struct ContactSection {
    content: ContactContent,
    particles: Vec<Particle>,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
}

impl ContactSection {
    pub fn new(content: ContactContent, seed: u64) -> Self {
        let palette = [Color::INDIGO.with_alpha(0.4), Color::PURPLE.with_alpha(0.4)];
        let particles = particles::generate(
            &mut seeded_rng(seed, salt::CONTACT, 0),
            PARTICLE_COUNT,
            &ParticleSpec::contact(),
            &palette,
        );
        Self {
            content,
            particles,
            scope: None,
            hover: HoverAnimator::new(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn social_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new()
                .with(Property::Y, -8.0)
                .with(Property::Scale, 1.1),
            300.0,
            Easing::Power2Out,
        )
    }

    fn entrance(socials: &[Target]) -> Timeline {
        let mut tl = Timeline::new().defaults(800.0, Easing::Power3Out);
        tl.add(Tween::from("contact-heading", fade_up(30.0)), Position::At(0.0));
        tl.add(Tween::from("contact-intro", fade_up(20.0)), Position::At(200.0));
        tl.add(
            Tween::from("contact-card", fade_up(40.0).with(Property::Scale, 0.95)),
            Position::At(400.0),
        );
        tl.add_staggered(
            Tween::from("contact-social", fade_up(20.0))
                .duration(600.0)
                .ease(Easing::Power2Out),
            socials,
            StaggerConfig::new(100.0),
            Position::At(600.0),
        );
        tl
    }

    fn drift(target: Target, particle: &Particle) -> Option<Timeline> {
        let &(x, y) = particle.waypoints.first()?;
        Some(
            Timeline::new().with(
                Tween::to(
                    target,
                    PropertyValues::new().with(Property::X, x).with(Property::Y, y),
                )
                .duration(particle.duration_ms)
                .delay(particle.delay_ms)
                .ease(Easing::SineInOut)
                .repeat(Repeat::Infinite)
                .yoyo(true),
                Position::At(0.0),
            ),
        )
    }
}

impl Component for ContactSection {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn render(&self) -> Element {
        let particles = self.particles.iter().enumerate().map(|(i, particle)| {
            div()
                .id(Target::indexed("contact-particle", i))
                .class("contact-particle")
                .overlay()
                .style(
                    style()
                        .at_pct(particle.left_pct, particle.top_pct)
                        .size(particle.size, particle.size)
                        .bg(particle.color)
                        .rounded(particle.size / 2.0)
                        .opacity(particle.opacity)
                        .blur(1.0),
                )
        });
        let socials = self.content.socials.iter().enumerate().map(|(i, link)| {
            external_link(link.href.as_str())
                .id(Target::indexed("contact-social", i))
                .class("social-link")
                .aria_label(&link.label)
                .text(link.label.as_str())
        });

        section("contact")
            .class("contact")
            .child(div().id("contact-particles").class("particles").overlay().children(particles))
            .child(h2(self.content.heading.as_str()).id("contact-heading"))
            .child(p(self.content.intro.as_str()).id("contact-intro"))
            .child(
                div()
                    .id("contact-card")
                    .class("contact-card glass")
                    .child(
                        a(format!("mailto:{}", self.content.email))
                            .id("contact-email")
                            .text(self.content.email.as_str()),
                    )
                    .child(
                        a(self.content.phone_href.as_str())
                            .id("contact-phone")
                            .text(self.content.phone.as_str()),
                    )
                    .child(div().class("socials").children(socials)),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let socials = ctx.family("contact-social");
        ctx.play_on_scroll(
            &mut scope,
            Self::entrance(&socials),
            &Target::id("contact"),
            "top 85%",
        );
        for (i, particle) in self.particles.iter().enumerate() {
            if let Some(tl) = Self::drift(Target::indexed("contact-particle", i), particle) {
                ctx.timeline(&mut scope, tl);
            }
        }
        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        let Some(scope) = self.scope.as_mut() else {
            return Vec::new();
        };
        match event {
            Event::PointerEnter { target } if target.index_in("contact-social").is_some() => {
                self.hover.enter(scope, target, &Self::social_hover());
            }
            Event::PointerLeave { target } if target.index_in("contact-social").is_some() => {
                self.hover.leave(scope, target, &Self::social_hover());
            }
            _ => {}
        }
        Vec::new()
    }

    fn unmount(&mut self) {
        if let Some(mut scope) = self.scope.take() {
            scope.kill_all();
        }
        self.hover.reset();
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::{mount, opacity, reveal};
    use folio_animation::AnimationScheduler;

    #[test]
    fn test_static_content() {
        let section = ContactSection::new(ContactContent::default(), 7);
        let tree = RenderTree::new(section.render(), Default::default());
        assert_eq!(tree.indexed_targets("contact-social").len(), 3);
        assert_eq!(tree.indexed_targets("contact-particle").len(), 12);
        assert_eq!(
            tree.attr(&Target::id("contact-email"), "href"),
            Some("mailto:shaansolanki17@gmail.com")
        );
        assert_eq!(
            tree.attr(&Target::id("contact-phone"), "href"),
            Some("tel:+919021606508")
        );
    }

    #[test]
    fn test_particles_are_seeded() {
        let a = ContactSection::new(ContactContent::default(), 7);
        let b = ContactSection::new(ContactContent::default(), 7);
        let c = ContactSection::new(ContactContent::default(), 8);
        assert_eq!(a.particles(), b.particles());
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_reveal_and_social_hover() {
        let scheduler = AnimationScheduler::new();
        let mut section = ContactSection::new(ContactContent::default(), 7);
        let tree = mount(&mut section, &scheduler);
        // One entrance, one drift per particle
        assert_eq!(scheduler.timeline_count(), 13);
        assert_eq!(opacity(&scheduler, "contact-social-2"), 0.0);

        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "contact-social-2"), 1.0);

        let social = Target::indexed("contact-social", 1);
        section.handle_event(&Event::PointerEnter { target: social.clone() });
        scheduler.advance(300.0);
        assert!((scheduler.value(&social, Property::Y) + 8.0).abs() < 1e-4);
        section.handle_event(&Event::PointerLeave { target: social.clone() });
        scheduler.advance(300.0);
        assert!(scheduler.value(&social, Property::Y).abs() < 1e-4);

        section.unmount();
        assert!(scheduler.is_empty());
    }
}
