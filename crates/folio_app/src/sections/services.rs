//! Services provided

use folio_animation::{AnimationScope, Easing, Position, Property, StaggerConfig, Timeline, Tween};
use folio_core::{Event, Target};
use folio_layout::prelude::*;

use super::{card_glow, fade_up};
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::ServicesContent;
use crate::hover::{HoverAnimator, HoverEffect};

pub struct ServicesSection {
    content: ServicesContent,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
}

impl ServicesSection {
    pub fn new(content: ServicesContent) -> Self {
        Self {
            content,
            scope: None,
            hover: HoverAnimator::new(),
        }
    }

    fn card_hover() -> HoverEffect {
        HoverEffect::new(card_glow(1.03, 0.3), 300.0, Easing::Power1Out)
    }

    fn entrance(cards: &[Target]) -> Timeline {
        let mut tl = Timeline::new().defaults(1000.0, Easing::Power3Out);
        tl.add(
            Tween::from("services-heading", fade_up(60.0).with(Property::SkewY, 5.0))
                .duration(1200.0)
                .ease(Easing::BackOut(1.7)),
            Position::End,
        );
        tl.add_staggered(
            Tween::from("services-card", fade_up(50.0))
                .duration(900.0)
                .ease(Easing::Power2Out),
            cards,
            StaggerConfig::new(150.0),
            Position::FromEnd(-800.0),
        );
        tl
    }
}

impl Component for ServicesSection {
    fn name(&self) -> &'static str {
        "services"
    }

    fn render(&self) -> Element {
        let cards = self.content.items.iter().enumerate().map(|(i, service)| {
            div()
                .id(Target::indexed("services-card", i))
                .class("service-card")
                .child(h3(service.title.as_str()))
                .child(p(service.description.as_str()))
                .child(span(service.label.as_str()).class("font-mono"))
        });

        section("services")
            .class("services")
            .child(h2(self.content.heading.as_str()).id("services-heading"))
            .child(div().class("services-grid").children(cards))
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let cards = ctx.family("services-card");
        ctx.play_on_scroll(
            &mut scope,
            Self::entrance(&cards),
            &Target::id("services"),
            "top 70%",
        );
        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        let Some(scope) = self.scope.as_mut() else {
            return Vec::new();
        };
        match event {
            Event::PointerEnter { target } if target.index_in("services-card").is_some() => {
                self.hover.enter(scope, target, &Self::card_hover());
            }
            Event::PointerLeave { target } if target.index_in("services-card").is_some() => {
                self.hover.leave(scope, target, &Self::card_hover());
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
        let section = ServicesSection::new(ServicesContent::default());
        let tree = RenderTree::new(section.render(), Default::default());
        assert_eq!(tree.indexed_targets("services-card").len(), 4);
        assert_eq!(
            tree.text_content(&Target::id("services-heading")).as_deref(),
            Some("services provided")
        );
    }

    #[test]
    fn test_card_starts_overlap_heading() {
        let cards: Vec<Target> = (0..4).map(|i| Target::indexed("services-card", i)).collect();
        let tl = ServicesSection::entrance(&cards);
        let starts: Vec<f32> = tl.entries()[1..].iter().map(|e| e.start_ms()).collect();
        assert_eq!(starts, vec![400.0, 550.0, 700.0, 850.0]);
    }

    #[test]
    fn test_reveal_and_teardown() {
        let scheduler = AnimationScheduler::new();
        let mut section = ServicesSection::new(ServicesContent::default());
        let tree = mount(&mut section, &scheduler);
        assert_eq!(opacity(&scheduler, "services-card-3"), 0.0);
        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "services-card-3"), 1.0);

        section.unmount();
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_simultaneous_card_hovers() {
        let scheduler = AnimationScheduler::new();
        let mut section = ServicesSection::new(ServicesContent::default());
        mount(&mut section, &scheduler);
        let a = Target::indexed("services-card", 0);
        let b = Target::indexed("services-card", 1);

        section.handle_event(&Event::PointerEnter { target: a.clone() });
        section.handle_event(&Event::PointerEnter { target: b.clone() });
        scheduler.advance(300.0);
        section.handle_event(&Event::PointerLeave { target: a.clone() });
        scheduler.advance(300.0);

        assert!((scheduler.value(&a, Property::Scale) - 1.0).abs() < 1e-4);
        assert!((scheduler.value(&b, Property::Scale) - 1.03).abs() < 1e-4);
    }
}
