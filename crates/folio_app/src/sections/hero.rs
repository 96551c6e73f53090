//! Hero: name, role, skill tags and the scroll indicator

use folio_animation::{
    AnimationEvent, AnimationScope, Easing, Position, Property, PropertyValues, Repeat,
    StaggerConfig, Timeline, Tween,
};
use folio_core::{Event, Target};
use folio_layout::prelude::*;

use super::fade_up;
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::HeroContent;
use crate::hover::{HoverAnimator, HoverEffect};

const TAG_STAGGER_MS: f32 = 80.0;
const TAG_START_MS: f32 = 1200.0;
const TAG_DURATION_MS: f32 = 600.0;
const TAGS_REVEALED: &str = "hero-tags-revealed";

pub struct HeroSection {
    content: HeroContent,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
    /// Tag hover is enabled once the tag reveal has finished
    tags_interactive: bool,
}

impl HeroSection {
    pub fn new(content: HeroContent) -> Self {
        Self {
            content,
            scope: None,
            hover: HoverAnimator::new(),
            tags_interactive: false,
        }
    }

    pub fn tags_interactive(&self) -> bool {
        self.tags_interactive
    }

    fn tag_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new().with(Property::Scale, 1.05),
            300.0,
            Easing::Power1Out,
        )
    }

    fn entrance(&self, tags: &[Target]) -> Timeline {
        let mut tl = Timeline::new().defaults(1200.0, Easing::Power3Out);
        tl.add(Tween::from("hero-title", fade_up(40.0)), Position::At(300.0));
        tl.add(
            Tween::to("hero-title", PropertyValues::new().with(Property::GlowOpacity, 0.3))
                .duration(2000.0)
                .ease(Easing::SineInOut)
                .repeat(Repeat::Infinite)
                .yoyo(true),
            Position::At(500.0),
        );
        tl.add(
            Tween::from("hero-role", fade_up(20.0)).duration(800.0),
            Position::At(800.0),
        );
        tl.add(
            Tween::to("hero-role", PropertyValues::new().with(Property::GlowScale, 1.03))
                .duration(3000.0)
                .ease(Easing::SineInOut)
                .repeat(Repeat::Infinite)
                .yoyo(true),
            Position::At(0.0),
        );
        if !tags.is_empty() {
            tl.add_staggered(
                Tween::from("hero-tag", fade_up(10.0))
                    .duration(TAG_DURATION_MS)
                    .ease(Easing::Power2Out),
                tags,
                StaggerConfig::new(TAG_STAGGER_MS),
                Position::At(TAG_START_MS),
            );
            let revealed = TAG_START_MS + TAG_STAGGER_MS * (tags.len() - 1) as f32 + TAG_DURATION_MS;
            tl.add(Tween::marker("hero-tags", TAGS_REVEALED), Position::At(revealed));
        }
        tl.add(
            Tween::to("hero-scroll-line", PropertyValues::new().with(Property::Y, -10.0))
                .duration(1500.0)
                .ease(Easing::Power1InOut)
                .repeat(Repeat::Infinite)
                .yoyo(true),
            Position::At(2000.0),
        );
        tl
    }
}

impl Component for HeroSection {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn render(&self) -> Element {
        let count = self.content.tags.len();
        let tags = self.content.tags.iter().enumerate().map(|(i, tag)| {
            div()
                .id(Target::indexed("hero-tag", i))
                .class("skill-tag")
                .child(span(tag.as_str()).class("font-mono"))
                .child_opt((i + 1 < count).then(|| span("\u{b7}").class("separator")))
        });

        section("hero")
            .class("hero min-h-screen")
            .h_screen()
            .child(div().class("hero-gradient").overlay())
            .child(
                div()
                    .class("hero-content")
                    .child(h1(self.content.name.as_str()).id("hero-title").style(
                        style_glow(),
                    ))
                    .child(div().id("hero-role").text(self.content.role.as_str()))
                    .child(div().id("hero-tags").class("skill-tags").children(tags)),
            )
            .child(
                div()
                    .id("hero-scroll")
                    .class("scroll-indicator")
                    .overlay()
                    .child(div().class("scroll-label").text(self.content.scroll_label.as_str()))
                    .child(div().id("hero-scroll-line").class("scroll-line")),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let tags = ctx.family("hero-tag");
        ctx.timeline(&mut scope, self.entrance(&tags));
        if tags.is_empty() {
            self.tags_interactive = true;
        }
        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        let Some(scope) = self.scope.as_mut() else {
            return Vec::new();
        };
        if !self.tags_interactive {
            return Vec::new();
        }
        match event {
            Event::PointerEnter { target } if target.index_in("hero-tag").is_some() => {
                self.hover.enter(scope, target, &Self::tag_hover());
            }
            Event::PointerLeave { target } if target.index_in("hero-tag").is_some() => {
                self.hover.leave(scope, target, &Self::tag_hover());
            }
            _ => {}
        }
        Vec::new()
    }

    fn on_animation_event(&mut self, event: &AnimationEvent) {
        if event.label == TAGS_REVEALED {
            tracing::debug!("hero tags interactive");
            self.tags_interactive = true;
        }
    }

    fn unmount(&mut self) {
        if let Some(mut scope) = self.scope.take() {
            scope.kill_all();
        }
        self.hover.reset();
        self.tags_interactive = false;
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}

/// Glow channels start dark and unscaled
fn style_glow() -> ElementStyle {
    let mut style = style();
    style.glow_opacity = Some(0.0);
    style.glow_scale = Some(1.0);
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::{mount, opacity};
    use folio_animation::AnimationScheduler;

    #[test]
    fn test_static_content() {
        let hero = HeroSection::new(HeroContent::default());
        let tree = RenderTree::new(hero.render(), Default::default());
        assert_eq!(
            tree.text_content(&Target::id("hero-role")).as_deref(),
            Some("Full Stack Developer")
        );
        assert_eq!(tree.indexed_targets("hero-tag").len(), 8);
        // Dots separate tags, so one fewer than tags
        assert_eq!(tree.count_class("separator"), 7);
    }

    #[test]
    fn test_tag_hover_waits_for_reveal() {
        let scheduler = AnimationScheduler::new();
        let mut hero = HeroSection::new(HeroContent::default());
        mount(&mut hero, &scheduler);
        assert_eq!(opacity(&scheduler, "hero-title"), 0.0);

        let tag = Target::indexed("hero-tag", 0);
        hero.handle_event(&Event::PointerEnter { target: tag.clone() });
        scheduler.advance(300.0);
        assert_eq!(scheduler.value(&tag, Property::Scale), 1.0);

        for _ in 0..30 {
            scheduler.advance(100.0);
        }
        for event in scheduler.drain_events() {
            hero.on_animation_event(&event);
        }
        assert!(hero.tags_interactive());
        assert_eq!(opacity(&scheduler, "hero-title"), 1.0);

        hero.handle_event(&Event::PointerEnter { target: tag.clone() });
        scheduler.advance(300.0);
        assert!((scheduler.value(&tag, Property::Scale) - 1.05).abs() < 1e-4);
    }

    #[test]
    fn test_unmount_empties_registry() {
        let scheduler = AnimationScheduler::new();
        let mut hero = HeroSection::new(HeroContent::default());
        mount(&mut hero, &scheduler);
        assert!(hero.registrations() > 0);
        hero.unmount();
        assert_eq!(hero.registrations(), 0);
        assert!(scheduler.is_empty());
    }
}
