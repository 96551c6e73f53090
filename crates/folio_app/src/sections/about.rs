//! About: bio tabs, skill bars, call-to-action buttons and the avatar card

use folio_animation::{
    AnimationScope, Easing, Position, Property, PropertyValues, Repeat, StaggerConfig, Timeline,
    TimelineId, Tween,
};
use folio_core::{Event, Target};
use folio_layout::prelude::*;
use rand::Rng;

use super::fade_up;
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::{AboutContent, SiteMeta};
use crate::hover::{HoverAnimator, HoverEffect, HoverTiming};
use crate::particles::{salt, seeded_rng};

/// Magnetic buttons follow the pointer by this fraction of its offset
const MAGNET_STRENGTH: f32 = 0.2;
const GLOW_CHANNEL: &str = "glow";
const OFFSET_CHANNEL: &str = "offset";

/// Selected tab of the bio card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AboutTab {
    #[default]
    About,
    Skills,
}

impl AboutTab {
    fn target(self) -> Target {
        match self {
            AboutTab::About => Target::id("about-tab-about"),
            AboutTab::Skills => Target::id("about-tab-skills"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            AboutTab::About => "About",
            AboutTab::Skills => "Skills",
        }
    }
}

/// Placement of one floating tech badge around the avatar
#[derive(Clone, Debug, PartialEq)]
struct Badge {
    label: String,
    left_pct: f32,
    top_pct: f32,
    float_ms: f32,
    delay_ms: f32,
}

pub struct AboutSection {
    content: AboutContent,
    resume_href: String,
    resume_filename: String,
    badges: Vec<Badge>,
    tab: AboutTab,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
    bars: Option<TimelineId>,
}

impl AboutSection {
    pub fn new(content: AboutContent, site: &SiteMeta, seed: u64) -> Self {
        let mut rng = seeded_rng(seed, salt::ABOUT_BADGES, 0);
        let count = content.badges.len().max(1) as f32;
        let badges = content
            .badges
            .iter()
            .enumerate()
            .map(|(i, label)| {
                // Evenly spread on a ring, jittered
                let angle = std::f32::consts::TAU * i as f32 / count + rng.gen_range(-0.2..0.2);
                let radius = rng.gen_range(40.0..48.0);
                Badge {
                    label: label.clone(),
                    left_pct: 50.0 + radius * angle.cos(),
                    top_pct: 50.0 + radius * angle.sin(),
                    float_ms: rng.gen_range(3000.0..6000.0),
                    delay_ms: rng.gen_range(0.0..2000.0),
                }
            })
            .collect();

        Self {
            content,
            resume_href: site.resume_href.clone(),
            resume_filename: site.resume_filename.clone(),
            badges,
            tab: AboutTab::default(),
            scope: None,
            hover: HoverAnimator::new(),
            bars: None,
        }
    }

    pub fn tab(&self) -> AboutTab {
        self.tab
    }

    fn button_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new().with(Property::Scale, 1.1),
            500.0,
            Easing::BackOut(2.5),
        )
        .leave_with(800.0, Easing::elastic_out(1.0, 0.3))
    }

    fn bar_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new().with(Property::ScaleY, 1.5),
            300.0,
            Easing::Power2Out,
        )
    }

    fn entrance(&self, texts: &[Target], ctas: &[Target]) -> Timeline {
        let mut tl = Timeline::new().defaults(1000.0, Easing::Power3Out);
        tl.add(
            Tween::from("about-heading", fade_up(60.0).with(Property::SkewY, 5.0))
                .duration(1200.0)
                .ease(Easing::BackOut(1.7)),
            Position::End,
        );
        tl.add_staggered(
            Tween::from("about-text", fade_up(40.0))
                .duration(900.0)
                .ease(Easing::Power2Out),
            texts,
            StaggerConfig::new(150.0),
            Position::FromEnd(-800.0),
        );
        tl.add(
            Tween::from(
                "about-image",
                PropertyValues::new()
                    .with(Property::X, 80.0)
                    .with(Property::Opacity, 0.0)
                    .with(Property::Scale, 0.8),
            )
            .duration(1200.0)
            .ease(Easing::elastic_out(1.0, 0.5)),
            Position::FromEnd(-600.0),
        );
        tl.add_staggered(
            Tween::from("about-cta", fade_up(30.0))
                .duration(800.0)
                .ease(Easing::BackOut(2.0)),
            ctas,
            StaggerConfig::new(200.0),
            Position::FromEnd(-400.0),
        );
        tl
    }

    /// Fill every skill bar from empty to its level
    fn animate_bars(&mut self) {
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let mut tl = Timeline::new().defaults(1500.0, Easing::Power2Out);
        for (i, skill) in self.content.skills.iter().enumerate() {
            tl.add(
                Tween::from_to(
                    Target::indexed("about-skill", i).child("bar"),
                    PropertyValues::new().with(Property::Width, 0.0),
                    PropertyValues::new().with(Property::Width, f32::from(skill.level)),
                )
                .delay(i as f32 * 100.0),
                Position::At(0.0),
            );
        }
        if tl.is_empty() {
            return;
        }
        self.bars = scope.timeline(tl);
    }

    fn select(&mut self, tab: AboutTab) {
        if self.tab == tab {
            return;
        }
        tracing::debug!(tab = tab.label(), "about tab selected");
        self.tab = tab;
        if let (Some(id), Some(scope)) = (self.bars.take(), self.scope.as_mut()) {
            scope.kill(id);
        }
        if tab == AboutTab::Skills {
            self.animate_bars();
        }
    }

    fn render_tabs(&self) -> Element {
        let tab = |which: AboutTab| {
            button()
                .id(which.target())
                .class("about-tab")
                .text(which.label())
                .when(self.tab == which, |b| b.class("active"))
        };
        div()
            .class("about-tabs")
            .child(tab(AboutTab::About))
            .child(tab(AboutTab::Skills))
    }

    fn render_panel(&self) -> Element {
        match self.tab {
            AboutTab::About => div().id("about-bio").class("about-bio").children(
                self.content
                    .paragraphs
                    .iter()
                    .enumerate()
                    .map(|(i, text)| p(text.as_str()).id(Target::indexed("about-text", i))),
            ),
            AboutTab::Skills => div().id("about-skills").class("about-skills").children(
                self.content.skills.iter().enumerate().map(|(i, skill)| {
                    let id = Target::indexed("about-skill", i);
                    div()
                        .id(id.clone())
                        .class("skill-row")
                        .child(span(skill.name.as_str()).class("skill-name"))
                        .child(span(format!("{}%", skill.level)).class("skill-level"))
                        .child(
                            div().class("skill-track").child(
                                div()
                                    .id(id.child("bar"))
                                    .class("skill-bar")
                                    .style(style().width_pct(f32::from(skill.level))),
                            ),
                        )
                }),
            ),
        }
    }

    fn render_ctas(&self) -> Element {
        let cta = |i: usize, label: &str| {
            let id = Target::indexed("about-cta", i);
            button()
                .id(id.clone())
                .class("magnetic-button")
                .text(label)
                .child(div().id(id.child("glow")).class("button-glow").style(style().opacity(0.0)))
        };
        div()
            .class("about-ctas")
            .child(cta(0, &self.content.download_label))
            .child(cta(1, &self.content.connect_label))
    }

    fn render_image(&self) -> Element {
        let badges = self.badges.iter().enumerate().map(|(i, badge)| {
            div()
                .id(Target::indexed("about-badge", i))
                .class("tech-badge float")
                .text(badge.label.as_str())
                .overlay()
                .style(
                    style()
                        .at_pct(badge.left_pct, badge.top_pct)
                        .animation_timing(badge.float_ms, badge.delay_ms),
                )
        });
        div()
            .id("about-image")
            .class("about-image")
            .h_px(400.0)
            .child(div().class("avatar-card").child(span("</>").class("avatar-glyph")))
            .children(badges)
    }

    fn on_cta_enter(&mut self, target: &Target) {
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        if self.hover.enter(scope, target, &Self::button_hover()) {
            self.hover.animate(
                scope,
                &target.child("glow"),
                GLOW_CHANNEL,
                PropertyValues::new().with(Property::Opacity, 0.9),
                HoverTiming::new(300.0, Easing::Power2Out),
            );
        }
    }

    fn on_cta_leave(&mut self, target: &Target) {
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        if self.hover.leave(scope, target, &Self::button_hover()) {
            self.hover.animate(
                scope,
                target,
                OFFSET_CHANNEL,
                PropertyValues::new().with(Property::X, 0.0).with(Property::Y, 0.0),
                HoverTiming::new(800.0, Easing::elastic_out(1.0, 0.3)),
            );
            self.hover.animate(
                scope,
                &target.child("glow"),
                GLOW_CHANNEL,
                PropertyValues::new().with(Property::Opacity, 0.0),
                HoverTiming::new(300.0, Easing::Power2Out),
            );
        }
    }

    fn on_cta_move(&mut self, target: &Target, x: f32, y: f32, width: f32, height: f32) {
        if !self.hover.is_hovered(target) {
            return;
        }
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let dx = (x - width / 2.0) * MAGNET_STRENGTH;
        let dy = (y - height / 2.0) * MAGNET_STRENGTH;
        self.hover.animate(
            scope,
            target,
            OFFSET_CHANNEL,
            PropertyValues::new().with(Property::X, dx).with(Property::Y, dy),
            HoverTiming::new(800.0, Easing::Power2Out),
        );
    }

    fn on_click(&mut self, target: &Target) -> Vec<Command> {
        if *target == AboutTab::About.target() {
            self.select(AboutTab::About);
        } else if *target == AboutTab::Skills.target() {
            self.select(AboutTab::Skills);
        } else if *target == Target::indexed("about-cta", 0) {
            return vec![Command::Download {
                href: self.resume_href.clone(),
                filename: self.resume_filename.clone(),
            }];
        } else if *target == Target::indexed("about-cta", 1) {
            return vec![Command::Navigate("#contact".to_string())];
        }
        Vec::new()
    }

    fn is_skill_bar(target: &Target) -> bool {
        target.is_within("about-skill") && target.as_str().ends_with("-bar")
    }
}

impl Component for AboutSection {
    fn name(&self) -> &'static str {
        "about"
    }

    fn render(&self) -> Element {
        section("about")
            .class("about")
            .child(h2(self.content.heading.as_str()).id("about-heading"))
            .child(
                div()
                    .class("about-grid")
                    .child(
                        div()
                            .class("about-card")
                            .child(self.render_tabs())
                            .child(self.render_panel())
                            .child(self.render_ctas()),
                    )
                    .child(self.render_image()),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let texts = ctx.family("about-text");
        let ctas = ctx.family("about-cta");
        ctx.play_on_scroll(
            &mut scope,
            self.entrance(&texts, &ctas),
            &Target::id("about"),
            "top 70%",
        );
        ctx.timeline(
            &mut scope,
            Timeline::new().with(
                Tween::to("about-image", PropertyValues::new().with(Property::Y, 20.0))
                    .duration(3000.0)
                    .ease(Easing::SineInOut)
                    .repeat(Repeat::Infinite)
                    .yoyo(true),
                Position::At(0.0),
            ),
        );
        self.scope = Some(scope);
        if self.tab == AboutTab::Skills {
            self.animate_bars();
        }
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        if self.scope.is_none() {
            return Vec::new();
        }
        match event {
            Event::Click { target: Some(target) } => return self.on_click(target),
            Event::PointerEnter { target } if target.index_in("about-cta").is_some() => {
                self.on_cta_enter(target)
            }
            Event::PointerLeave { target } if target.index_in("about-cta").is_some() => {
                self.on_cta_leave(target)
            }
            Event::PointerMove {
                target,
                x,
                y,
                width,
                height,
            } if target.index_in("about-cta").is_some() => {
                self.on_cta_move(target, *x, *y, *width, *height)
            }
            Event::PointerEnter { target } if Self::is_skill_bar(target) => {
                if let Some(scope) = self.scope.as_mut() {
                    self.hover.enter(scope, target, &Self::bar_hover());
                }
            }
            Event::PointerLeave { target } if Self::is_skill_bar(target) => {
                if let Some(scope) = self.scope.as_mut() {
                    self.hover.leave(scope, target, &Self::bar_hover());
                }
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
        self.bars = None;
        self.tab = AboutTab::default();
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

    fn about() -> AboutSection {
        AboutSection::new(AboutContent::default(), &SiteMeta::default(), 42)
    }

    #[test]
    fn test_static_content() {
        let tree = RenderTree::new(about().render(), Default::default());
        assert_eq!(tree.indexed_targets("about-text").len(), 4);
        assert_eq!(tree.indexed_targets("about-cta").len(), 2);
        assert_eq!(tree.indexed_targets("about-badge").len(), 6);
        assert!(tree.has_class(&Target::id("about-tab-about"), "active"));
        assert_eq!(
            tree.text_content(&Target::indexed("about-cta", 0)).as_deref(),
            Some("Download CV")
        );
    }

    #[test]
    fn test_entrance_plays_on_scroll() {
        let scheduler = AnimationScheduler::new();
        let mut section = about();
        let tree = mount(&mut section, &scheduler);
        assert_eq!(opacity(&scheduler, "about-heading"), 0.0);
        assert_eq!(opacity(&scheduler, "about-text-3"), 0.0);

        reveal(&scheduler, &tree);
        assert_eq!(opacity(&scheduler, "about-heading"), 1.0);
        assert_eq!(opacity(&scheduler, "about-text-3"), 1.0);
        assert_eq!(opacity(&scheduler, "about-cta-1"), 1.0);
        assert_eq!(
            scheduler.value(&Target::id("about-heading"), Property::SkewY),
            0.0
        );
    }

    #[test]
    fn test_skills_tab_fills_bars() {
        let scheduler = AnimationScheduler::new();
        let mut section = about();
        mount(&mut section, &scheduler);

        section.handle_event(&Event::click(Target::id("about-tab-skills")));
        assert_eq!(section.tab(), AboutTab::Skills);

        let tree = RenderTree::new(section.render(), Default::default());
        assert_eq!(tree.indexed_targets("about-skill").len(), 6);
        assert!(tree.indexed_targets("about-text").is_empty());

        let bar = Target::indexed("about-skill", 0).child("bar");
        scheduler.advance(1.0);
        assert!(scheduler.value(&bar, Property::Width) < 5.0);
        for _ in 0..30 {
            scheduler.advance(100.0);
        }
        assert_eq!(scheduler.value(&bar, Property::Width), 95.0);
    }

    #[test]
    fn test_buttons() {
        let scheduler = AnimationScheduler::new();
        let mut section = about();
        mount(&mut section, &scheduler);

        assert_eq!(
            section.handle_event(&Event::click(Target::indexed("about-cta", 0))),
            vec![Command::Download {
                href: "/resume.pdf".to_string(),
                filename: "resume.pdf".to_string(),
            }]
        );
        assert_eq!(
            section.handle_event(&Event::click(Target::indexed("about-cta", 1))),
            vec![Command::Navigate("#contact".to_string())]
        );
    }

    #[test]
    fn test_magnetic_button_follows_and_returns() {
        let scheduler = AnimationScheduler::new();
        let mut section = about();
        mount(&mut section, &scheduler);
        let cta = Target::indexed("about-cta", 0);

        // Ignored until hovered
        section.handle_event(&Event::pointer_move(cta.clone(), 100.0, 20.0, 100.0, 40.0));
        scheduler.advance(1000.0);
        assert_eq!(scheduler.value(&cta, Property::X), 0.0);

        section.handle_event(&Event::PointerEnter { target: cta.clone() });
        section.handle_event(&Event::pointer_move(cta.clone(), 100.0, 20.0, 100.0, 40.0));
        scheduler.advance(1000.0);
        assert!((scheduler.value(&cta, Property::X) - 10.0).abs() < 1e-3);
        assert!((scheduler.value(&cta, Property::Scale) - 1.1).abs() < 1e-3);
        assert!((scheduler.value(&cta.child("glow"), Property::Opacity) - 0.9).abs() < 1e-3);

        section.handle_event(&Event::PointerLeave { target: cta.clone() });
        scheduler.advance(1000.0);
        assert!(scheduler.value(&cta, Property::X).abs() < 1e-3);
        assert!((scheduler.value(&cta, Property::Scale) - 1.0).abs() < 1e-3);
        assert!(scheduler.value(&cta.child("glow"), Property::Opacity).abs() < 1e-3);
    }

    #[test]
    fn test_badges_are_seeded() {
        let a = AboutSection::new(AboutContent::default(), &SiteMeta::default(), 1);
        let b = AboutSection::new(AboutContent::default(), &SiteMeta::default(), 1);
        let c = AboutSection::new(AboutContent::default(), &SiteMeta::default(), 2);
        assert_eq!(a.badges, b.badges);
        assert_ne!(a.badges, c.badges);
    }

    #[test]
    fn test_unmount_resets() {
        let scheduler = AnimationScheduler::new();
        let mut section = about();
        mount(&mut section, &scheduler);
        section.handle_event(&Event::click(Target::id("about-tab-skills")));
        section.unmount();
        assert_eq!(section.registrations(), 0);
        assert_eq!(section.tab(), AboutTab::About);
        assert!(scheduler.is_empty());
    }
}
