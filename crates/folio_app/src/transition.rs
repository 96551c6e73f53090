//! Route transition: a wave of panels lifting off the page
//!
//! Every mount starts with the page content hidden behind [`PANEL_COUNT`]
//! full-height panels. The content springs in while the panels rise and fade
//! in a staggered wave, a light trail sweeps up the viewport and a dim layer
//! pulses. The trail and dim helpers exist only while the transition runs.
//!
//! Panel variation is drawn from a seeded generator; each remount uses the
//! next generation, so successive transitions differ but are reproducible.

use folio_animation::{
    AnimationEvent, AnimationScope, Easing, Position, Property, PropertyValues, Timeline, Tween,
};
use folio_core::{Color, Target};
use folio_layout::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::component::{scope_size, Component, MountContext};
use crate::particles::{salt, seeded_rng};

pub const PANEL_COUNT: usize = 8;
/// Wrapper of everything the transition reveals
pub const PAGE_CONTENT: &str = "page-content";

const TRAIL: &str = "page-transition-trail";
const TRAIL_LINE: &str = "page-transition-trail-line";
const DIM: &str = "page-transition-dim";
const TRAIL_REMOVED: &str = "trail-removed";
const DIM_REMOVED: &str = "dim-removed";

/// Randomised look and timing of one panel
#[derive(Clone, Debug, PartialEq)]
pub struct PanelParams {
    /// Alpha of the panel's white tint
    pub tint: f32,
    /// Negative right margin so neighbours overlap; zero for the last panel
    pub margin_right: f32,
    /// Initial vertical offset in px
    pub y_offset: f32,
    pub delay_ms: f32,
    pub duration_ms: f32,
    /// Final vertical offset in percent of the panel height
    pub y_percent: f32,
}

impl PanelParams {
    fn generate(rng: &mut StdRng, index: usize) -> Self {
        let tint = 0.12 + rng.gen::<f32>() * 0.03;
        let margin_right = if index + 1 < PANEL_COUNT {
            -(0.5 + rng.gen::<f32>())
        } else {
            0.0
        };
        let y_offset = rng.gen::<f32>() * 4.0 - 2.0;
        let delay_ms = index as f32 * 40.0 + rng.gen::<f32>() * 20.0;
        let duration_ms = 900.0 + rng.gen::<f32>() * 200.0;
        let y_percent = -100.0 + rng.gen::<f32>() * 10.0;
        Self {
            tint,
            margin_right,
            y_offset,
            delay_ms,
            duration_ms,
            y_percent,
        }
    }

    fn easing(index: usize) -> Easing {
        if index % 2 == 0 {
            Easing::SineIn
        } else {
            Easing::Power1In
        }
    }
}

/// Look of the light trail
#[derive(Clone, Copy, Debug, PartialEq)]
struct TrailParams {
    alpha: f32,
    blur: f32,
}

pub struct PageTransition {
    seed: u64,
    generation: u64,
    panels: Vec<PanelParams>,
    trail: TrailParams,
    trail_visible: bool,
    dim_visible: bool,
    scope: Option<AnimationScope>,
}

impl PageTransition {
    pub fn new(seed: u64) -> Self {
        let mut transition = Self {
            seed,
            generation: 0,
            panels: Vec::new(),
            trail: TrailParams {
                alpha: 0.0,
                blur: 0.0,
            },
            trail_visible: true,
            dim_visible: true,
            scope: None,
        };
        transition.regenerate();
        transition
    }

    fn regenerate(&mut self) {
        let mut rng = seeded_rng(self.seed, salt::TRANSITION, self.generation);
        self.panels = (0..PANEL_COUNT)
            .map(|i| PanelParams::generate(&mut rng, i))
            .collect();
        self.trail = TrailParams {
            alpha: 0.2 + rng.gen::<f32>() * 0.1,
            blur: 0.2 + rng.gen::<f32>() * 0.2,
        };
    }

    pub fn panels(&self) -> &[PanelParams] {
        &self.panels
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any injected helper is still present
    pub fn has_helpers(&self) -> bool {
        self.trail_visible || self.dim_visible
    }

    pub fn panel(index: usize) -> Target {
        Target::indexed("transition-panel", index)
    }

    /// Put the content and every present panel in the covered state
    fn cover(&self, ctx: &MountContext<'_>) {
        let handle = ctx.handle();
        let content = Target::id(PAGE_CONTENT);
        if ctx.contains(&content) {
            handle.set_values(
                &content,
                &PropertyValues::new()
                    .with(Property::Visibility, 0.0)
                    .with(Property::Opacity, 0.0)
                    .with(Property::Scale, 0.98),
            );
        }
        for (i, params) in self.panels.iter().enumerate() {
            let panel = Self::panel(i);
            if !ctx.contains(&panel) {
                tracing::debug!(element = %panel, "transition panel absent, skipping");
                continue;
            }
            handle.set_values(
                &panel,
                &PropertyValues::new()
                    .with(Property::Visibility, 1.0)
                    .with(Property::YPercent, 0.0)
                    .with(Property::Y, params.y_offset)
                    .with(Property::Opacity, 0.9),
            );
        }
        if ctx.contains(&Target::id(TRAIL)) {
            handle.set_values(&Target::id(TRAIL), &PropertyValues::new().with(Property::Opacity, 0.0));
        }
    }

    fn timeline(&self) -> Timeline {
        let mut tl = Timeline::new().defaults(1400.0, Easing::SineInOut);

        tl.add(
            Tween::to(
                PAGE_CONTENT,
                PropertyValues::new()
                    .with(Property::Visibility, 1.0)
                    .with(Property::Opacity, 1.0)
                    .with(Property::Scale, 1.0),
            )
            .duration(1800.0)
            .ease(Easing::elastic_out(1.0, 0.5)),
            Position::At(300.0),
        );

        for (i, params) in self.panels.iter().enumerate() {
            tl.add(
                Tween::to(
                    Self::panel(i),
                    PropertyValues::new()
                        .with(Property::YPercent, params.y_percent)
                        .with(Property::Opacity, 0.0),
                )
                .duration(params.duration_ms)
                .delay(params.delay_ms)
                .ease(PanelParams::easing(i)),
                Position::At(0.0),
            );
            tl.add(
                Tween::set(Self::panel(i), PropertyValues::new().with(Property::Visibility, 0.0)),
                Position::At(params.delay_ms + params.duration_ms),
            );
        }

        tl.add(
            Tween::to(TRAIL, PropertyValues::new().with(Property::Opacity, 0.5)).duration(600.0),
            Position::At(200.0),
        );
        tl.add(
            Tween::from_to(
                TRAIL_LINE,
                PropertyValues::new()
                    .with(Property::Height, 0.0)
                    .with(Property::Opacity, 0.6),
                PropertyValues::new()
                    .with(Property::Height, 100.0)
                    .with(Property::Opacity, 0.0),
            )
            .duration(1200.0)
            .ease(Easing::Power2In),
            Position::At(200.0),
        );
        tl.add(
            Tween::to(TRAIL, PropertyValues::new().with(Property::Opacity, 0.0))
                .duration(600.0)
                .ease(Easing::SineOut)
                .label(TRAIL_REMOVED),
            Position::FromEnd(-600.0),
        );

        tl.add(
            Tween::from_to(
                DIM,
                PropertyValues::new().with(Property::Opacity, 0.0),
                PropertyValues::new().with(Property::Opacity, 1.0),
            )
            .duration(800.0),
            Position::At(0.0),
        );
        tl.add(
            Tween::to(DIM, PropertyValues::new().with(Property::Opacity, 0.0))
                .duration(600.0)
                .label(DIM_REMOVED),
            Position::FromEnd(-800.0),
        );
        tl
    }

    fn render_panels(&self) -> impl Iterator<Item = Element> + '_ {
        let width = 100.0 / PANEL_COUNT as f32;
        self.panels.iter().enumerate().map(move |(i, params)| {
            div()
                .id(Self::panel(i))
                .class("transition-panel")
                .overlay()
                .h_screen()
                .style(
                    style()
                        .at_pct(i as f32 * width, 0.0)
                        .width_pct(width)
                        .margin_right(params.margin_right)
                        .bg(Color::WHITE.with_alpha(params.tint))
                        .blur(3.0)
                        .z(50),
                )
        })
    }

    fn render_trail(&self) -> Element {
        div()
            .id(TRAIL)
            .class("transition-trail")
            .overlay()
            .h_screen()
            .style(style().opacity(0.0).z(40))
            .child(
                div()
                    .id(TRAIL_LINE)
                    .class("trail-line")
                    .style(
                        style()
                            .bg(Color::WHITE.with_alpha(self.trail.alpha))
                            .blur(self.trail.blur),
                    ),
            )
    }

    fn render_dim(&self) -> Element {
        div()
            .id(DIM)
            .class("transition-dim")
            .overlay()
            .h_screen()
            .style(
                style()
                    .bg(Color::BLACK.with_alpha(0.08))
                    .opacity(0.0)
                    .z(30),
            )
    }
}

impl Component for PageTransition {
    fn name(&self) -> &'static str {
        "page-transition"
    }

    fn render(&self) -> Element {
        div()
            .id("page-transition")
            .class("page-transition")
            .overlay()
            .children(self.render_panels())
            .child_opt(self.trail_visible.then(|| self.render_trail()))
            .child_opt(self.dim_visible.then(|| self.render_dim()))
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        self.cover(ctx);
        ctx.timeline(&mut scope, self.timeline());
        tracing::debug!(generation = self.generation, "page transition started");
        self.scope = Some(scope);
    }

    fn on_animation_event(&mut self, event: &AnimationEvent) {
        match event.label.as_str() {
            TRAIL_REMOVED => self.trail_visible = false,
            DIM_REMOVED => self.dim_visible = false,
            _ => {}
        }
    }

    fn unmount(&mut self) {
        if let Some(mut scope) = self.scope.take() {
            scope.kill_all();
        }
        self.generation += 1;
        self.regenerate();
        self.trail_visible = true;
        self.dim_visible = true;
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::AnimationScheduler;
    use folio_core::Viewport;

    /// The transition over a stand-in page
    fn page(transition: &PageTransition) -> RenderTree {
        RenderTree::new(
            div()
                .child(transition.render())
                .child(div().id(PAGE_CONTENT).child(h1("Hello"))),
            Viewport::default(),
        )
    }

    fn run(transition: &mut PageTransition, scheduler: &AnimationScheduler) {
        for _ in 0..40 {
            scheduler.advance(100.0);
            for event in scheduler.drain_events() {
                transition.on_animation_event(&event);
            }
        }
    }

    fn visibility(scheduler: &AnimationScheduler, target: &Target) -> f32 {
        scheduler.value(target, Property::Visibility)
    }

    #[test]
    fn test_panel_params_are_seeded() {
        let a = PageTransition::new(5);
        let b = PageTransition::new(5);
        let c = PageTransition::new(6);
        assert_eq!(a.panels(), b.panels());
        assert_ne!(a.panels(), c.panels());
        assert_eq!(a.panels().len(), PANEL_COUNT);
        for (i, p) in a.panels().iter().enumerate() {
            assert!((0.12..0.15).contains(&p.tint));
            assert!((-100.0..-90.0).contains(&p.y_percent));
            assert!(p.delay_ms >= i as f32 * 40.0 && p.delay_ms < i as f32 * 40.0 + 20.0);
        }
        assert_eq!(a.panels()[PANEL_COUNT - 1].margin_right, 0.0);
    }

    #[test]
    fn test_starts_covered_and_ends_revealed() {
        let scheduler = AnimationScheduler::new();
        let mut transition = PageTransition::new(1);
        let tree = page(&transition);
        transition.mount(&MountContext::new(scheduler.handle(), &tree));

        let content = Target::id(PAGE_CONTENT);
        assert_eq!(visibility(&scheduler, &content), 0.0);
        assert_eq!(scheduler.value(&content, Property::Scale), 0.98);
        for i in 0..PANEL_COUNT {
            assert_eq!(visibility(&scheduler, &PageTransition::panel(i)), 1.0);
        }

        run(&mut transition, &scheduler);

        assert_eq!(visibility(&scheduler, &content), 1.0);
        assert_eq!(scheduler.value(&content, Property::Opacity), 1.0);
        for i in 0..PANEL_COUNT {
            assert_eq!(visibility(&scheduler, &PageTransition::panel(i)), 0.0);
        }
        assert!(!transition.has_helpers());
        let tree = page(&transition);
        assert!(!tree.contains(&Target::id(TRAIL)));
        assert!(!tree.contains(&Target::id(DIM)));
    }

    #[test]
    fn test_remount_is_covered_again() {
        let scheduler = AnimationScheduler::new();
        let mut transition = PageTransition::new(1);
        let tree = page(&transition);
        transition.mount(&MountContext::new(scheduler.handle(), &tree));
        run(&mut transition, &scheduler);
        let first = transition.panels().to_vec();

        transition.unmount();
        assert!(scheduler.is_empty());
        assert_eq!(transition.generation(), 1);
        assert_ne!(transition.panels(), first.as_slice());

        let tree = page(&transition);
        assert!(tree.contains(&Target::id(TRAIL)));
        transition.mount(&MountContext::new(scheduler.handle(), &tree));
        assert_eq!(visibility(&scheduler, &Target::id(PAGE_CONTENT)), 0.0);
        for i in 0..PANEL_COUNT {
            assert_eq!(visibility(&scheduler, &PageTransition::panel(i)), 1.0);
        }

        run(&mut transition, &scheduler);
        assert!(!transition.has_helpers());
        assert_eq!(visibility(&scheduler, &PageTransition::panel(7)), 0.0);
    }

    #[test]
    fn test_missing_panel_is_skipped() {
        let scheduler = AnimationScheduler::new();
        let mut transition = PageTransition::new(1);
        let tree = RenderTree::new(
            div()
                .child(div().id(PageTransition::panel(0)))
                .child(div().id(PAGE_CONTENT)),
            Viewport::default(),
        );
        transition.mount(&MountContext::new(scheduler.handle(), &tree));
        for _ in 0..40 {
            scheduler.advance(100.0);
        }
        assert_eq!(visibility(&scheduler, &PageTransition::panel(0)), 0.0);
        assert_eq!(visibility(&scheduler, &Target::id(PAGE_CONTENT)), 1.0);
        // Never touched
        assert!(scheduler.values_of(&PageTransition::panel(3)).is_none());
    }
}
