//! Site footer

use folio_animation::{AnimationScope, Easing, Position, Timeline, Tween};
use folio_core::{Color, Event, Target};
use folio_layout::prelude::*;

use super::fade_up;
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::FooterContent;
use crate::particles::{self, salt, seeded_rng, Particle, ParticleSpec};

const PARTICLE_COUNT: usize = 12;

pub struct FooterSection {
    content: FooterContent,
    particles: Vec<Particle>,
    scope: Option<AnimationScope>,
}

impl FooterSection {
    pub fn new(content: FooterContent, seed: u64) -> Self {
        let palette = [Color::VIOLET.with_alpha(0.3), Color::INDIGO.with_alpha(0.3)];
        let particles = particles::generate(
            &mut seeded_rng(seed, salt::FOOTER, 0),
            PARTICLE_COUNT,
            &ParticleSpec::footer(),
            &palette,
        );
        Self {
            content,
            particles,
            scope: None,
        }
    }

    pub fn copyright(&self) -> String {
        format!(
            "\u{a9} {} {}. All rights reserved.",
            self.content.copyright_year, self.content.owner
        )
    }

    /// `Projects` → `#projects`
    fn anchor_href(label: &str) -> String {
        format!("#{}", label.to_lowercase().replace(' ', "-"))
    }
}

impl Component for FooterSection {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn render(&self) -> Element {
        // Floated by CSS keyframes; only the timing is per particle
        let particles = self.particles.iter().enumerate().map(|(i, particle)| {
            div()
                .id(Target::indexed("footer-particle", i))
                .class("footer-particle float-up")
                .overlay()
                .style(
                    style()
                        .at_pct(particle.left_pct, particle.top_pct)
                        .size(particle.size, particle.size)
                        .bg(particle.color)
                        .rounded(particle.size / 2.0)
                        .animation_timing(particle.duration_ms, particle.delay_ms),
                )
        });
        let anchors = self.content.anchors.iter().enumerate().map(|(i, label)| {
            li().child(
                a(Self::anchor_href(label))
                    .id(Target::indexed("footer-anchor", i))
                    .text(label.as_str()),
            )
        });
        let connect = self.content.connect.iter().enumerate().map(|(i, link)| {
            li().child(
                external_link(link.href.as_str())
                    .id(Target::indexed("footer-connect", i))
                    .text(link.label.as_str()),
            )
        });
        let legal = self.content.legal.iter().enumerate().map(|(i, link)| {
            a(link.href.as_str())
                .id(Target::indexed("footer-legal", i))
                .text(link.label.as_str())
        });

        footer()
            .id("footer")
            .class("footer")
            .child(div().class("footer-particles").overlay().children(particles))
            .child(
                div()
                    .id("footer-main")
                    .class("footer-main")
                    .child(
                        div()
                            .class("footer-brand")
                            .child(h3(self.content.brand.as_str()))
                            .child(p(self.content.tagline.as_str())),
                    )
                    .child(div().class("footer-nav").child(h3("Navigation")).child(ul().children(anchors)))
                    .child(div().class("footer-connect").child(h3("Connect")).child(ul().children(connect))),
            )
            .child(
                div()
                    .id("footer-bottom")
                    .class("footer-bottom")
                    .child(p(self.copyright()).id("footer-copyright"))
                    .child(div().class("footer-legal").children(legal)),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let mut tl = Timeline::new().defaults(800.0, Easing::Power2Out);
        tl.add(Tween::from("footer-main", fade_up(20.0)), Position::At(0.0));
        tl.add(Tween::from("footer-bottom", fade_up(20.0)), Position::At(200.0));
        ctx.play_on_scroll(&mut scope, tl, &Target::id("footer"), "top bottom");
        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        if let Event::Click { target: Some(target) } = event {
            if let Some(label) = target
                .index_in("footer-anchor")
                .and_then(|i| self.content.anchors.get(i))
            {
                return vec![Command::Navigate(Self::anchor_href(label))];
            }
        }
        Vec::new()
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
    use crate::sections::test_support::{mount, opacity, reveal};
    use folio_animation::AnimationScheduler;

    fn footer_section() -> FooterSection {
        FooterSection::new(FooterContent::default(), 3)
    }

    #[test]
    fn test_static_content() {
        let tree = RenderTree::new(footer_section().render(), Default::default());
        assert_eq!(tree.indexed_targets("footer-anchor").len(), 4);
        assert_eq!(tree.indexed_targets("footer-connect").len(), 4);
        assert_eq!(tree.indexed_targets("footer-legal").len(), 2);
        assert_eq!(tree.indexed_targets("footer-particle").len(), 12);
        assert_eq!(
            tree.text_content(&Target::id("footer-copyright")).as_deref(),
            Some("\u{a9} 2025 Shaan Solanki. All rights reserved.")
        );
        assert_eq!(tree.attr(&Target::indexed("footer-anchor", 1), "href"), Some("#projects"));
    }

    #[test]
    fn test_copyright_year_is_content() {
        let content = FooterContent {
            copyright_year: 2031,
            ..FooterContent::default()
        };
        assert!(FooterSection::new(content, 0).copyright().contains("2031"));
    }

    #[test]
    fn test_blocks_reveal_in_order() {
        let scheduler = AnimationScheduler::new();
        let mut section = footer_section();
        let tree = mount(&mut section, &scheduler);
        assert_eq!(opacity(&scheduler, "footer-main"), 0.0);
        assert_eq!(opacity(&scheduler, "footer-bottom"), 0.0);

        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "footer-main"), 1.0);
        assert_eq!(opacity(&scheduler, "footer-bottom"), 1.0);

        section.unmount();
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_anchor_click_navigates() {
        let mut section = footer_section();
        assert_eq!(
            section.handle_event(&Event::click(Target::indexed("footer-anchor", 3))),
            vec![Command::Navigate("#contact".to_string())]
        );
    }
}
