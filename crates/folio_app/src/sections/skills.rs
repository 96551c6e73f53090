//! Tech stack grid

use folio_animation::{AnimationScope, Easing, Position, StaggerConfig, Timeline, Tween};
use folio_core::{Event, Target};
use folio_layout::prelude::*;

use super::{card_glow, fade_up};
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::TechCategory;
use crate::hover::{HoverAnimator, HoverEffect};

pub struct SkillsSection {
    categories: Vec<TechCategory>,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
}

impl SkillsSection {
    pub fn new(categories: Vec<TechCategory>) -> Self {
        Self {
            categories,
            scope: None,
            hover: HoverAnimator::new(),
        }
    }

    fn card_hover() -> HoverEffect {
        HoverEffect::new(card_glow(1.03, 0.3), 300.0, Easing::Power1Out)
    }
}

impl Component for SkillsSection {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn render(&self) -> Element {
        // Cards are numbered across categories so one stagger covers the grid
        let mut index = 0;
        let categories = self.categories.iter().enumerate().map(|(c, category)| {
            let cards: Vec<Element> = category
                .items
                .iter()
                .map(|item| {
                    let card = div()
                        .id(Target::indexed("skills-card", index))
                        .class("tech-card")
                        .child(h3(item.name.as_str()).class("tech-name"))
                        .child(span(item.label.as_str()).class("tech-label font-mono"));
                    index += 1;
                    card
                })
                .collect();
            div()
                .id(Target::indexed("skills-category", c))
                .class("tech-category")
                .child(h3(category.title.as_str()).class("category-title"))
                .child(div().class("tech-cards").children(cards))
        });

        section("skills")
            .class("skills")
            .child(h2("$ ./tech_stack").id("skills-title").class("font-mono"))
            .child(div().id("skills-grid").class("skills-grid").children(categories))
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());

        let title = Timeline::new().with(
            Tween::from("skills-title", fade_up(20.0))
                .duration(800.0)
                .ease(Easing::Power3Out),
            Position::At(0.0),
        );
        ctx.play_on_scroll(&mut scope, title, &Target::id("skills"), "top 80%");

        let cards = ctx.family("skills-card");
        if !cards.is_empty() {
            let mut grid = Timeline::new();
            grid.add_staggered(
                Tween::from("skills-card", fade_up(30.0))
                    .duration(600.0)
                    .ease(Easing::Power2Out),
                &cards,
                StaggerConfig::new(100.0),
                Position::At(0.0),
            );
            ctx.play_on_scroll(&mut scope, grid, &Target::id("skills-grid"), "top 85%");
        }

        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        let Some(scope) = self.scope.as_mut() else {
            return Vec::new();
        };
        match event {
            Event::PointerEnter { target } if target.index_in("skills-card").is_some() => {
                self.hover.enter(scope, target, &Self::card_hover());
            }
            Event::PointerLeave { target } if target.index_in("skills-card").is_some() => {
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
    use crate::content::SiteContent;
    use crate::sections::test_support::{mount, opacity, reveal};
    use folio_animation::{AnimationScheduler, Property};

    fn skills() -> SkillsSection {
        SkillsSection::new(SiteContent::default().skills)
    }

    #[test]
    fn test_static_content() {
        let tree = RenderTree::new(skills().render(), Default::default());
        assert_eq!(tree.indexed_targets("skills-category").len(), 3);
        assert_eq!(tree.indexed_targets("skills-card").len(), 17);
        assert_eq!(
            tree.text_content(&Target::indexed("skills-card", 3)).as_deref(),
            Some("React $ react --ui")
        );
        assert_eq!(
            tree.text_content(&Target::id("skills-title")).as_deref(),
            Some("$ ./tech_stack")
        );
    }

    #[test]
    fn test_cards_reveal_once() {
        let scheduler = AnimationScheduler::new();
        let mut section = skills();
        let tree = mount(&mut section, &scheduler);
        assert_eq!(scheduler.trigger_count(), 2);
        assert_eq!(opacity(&scheduler, "skills-card-16"), 0.0);

        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "skills-card-0"), 1.0);
        assert_eq!(opacity(&scheduler, "skills-card-16"), 1.0);
        assert_eq!(opacity(&scheduler, "skills-title"), 1.0);

        // Scrolling back up and down again does not replay
        scheduler.update_scroll(0.0, tree.viewport(), &tree);
        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "skills-card-16"), 1.0);
    }

    #[test]
    fn test_card_hover() {
        let scheduler = AnimationScheduler::new();
        let mut section = skills();
        mount(&mut section, &scheduler);
        let card = Target::indexed("skills-card", 5);

        section.handle_event(&Event::PointerEnter { target: card.clone() });
        scheduler.advance(300.0);
        assert!((scheduler.value(&card, Property::GlowOpacity) - 0.3).abs() < 1e-4);

        section.handle_event(&Event::PointerLeave { target: card.clone() });
        scheduler.advance(300.0);
        assert!(scheduler.value(&card, Property::GlowOpacity).abs() < 1e-4);
        assert!((scheduler.value(&card, Property::Scale) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_unmount_empties_registry() {
        let scheduler = AnimationScheduler::new();
        let mut section = skills();
        mount(&mut section, &scheduler);
        section.handle_event(&Event::PointerEnter {
            target: Target::indexed("skills-card", 0),
        });
        section.unmount();
        assert!(scheduler.is_empty());
    }
}
