//! Component lifecycle
//!
//! Every page section implements [`Component`]. A component renders its
//! subtree from its own state, registers animations when mounted, reacts to
//! events routed by the page and tears everything down on unmount.
//!
//! Animations are always registered through a [`MountContext`], which knows
//! which elements were actually rendered: entries aimed at absent elements
//! are dropped and triggers on absent elements are never registered.

use folio_animation::{
    AnimationEvent, AnimationScope, SchedulerHandle, Timeline, TimelineId, TriggerPoint,
};
use folio_core::{Event, Target, Viewport};
use folio_layout::{Element, RenderTree};

/// A side effect a component asks the host page to perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open a URL, optionally in a new tab
    OpenUrl { url: String, new_tab: bool },
    /// Download a static asset
    Download { href: String, filename: String },
    /// Lock or unlock document scrolling
    LockBodyScroll(bool),
    /// Follow an internal link: a route (`/projects`) or an anchor (`#contact`)
    Navigate(String),
}

impl Command {
    pub fn open_in_new_tab(url: impl Into<String>) -> Self {
        Command::OpenUrl {
            url: url.into(),
            new_tab: true,
        }
    }
}

/// Everything a component needs while mounting
pub struct MountContext<'a> {
    handle: SchedulerHandle,
    tree: &'a RenderTree,
}

impl<'a> MountContext<'a> {
    pub fn new(handle: SchedulerHandle, tree: &'a RenderTree) -> Self {
        Self { handle, tree }
    }

    pub fn handle(&self) -> &SchedulerHandle {
        &self.handle
    }

    pub fn tree(&self) -> &RenderTree {
        self.tree
    }

    pub fn viewport(&self) -> Viewport {
        self.tree.viewport()
    }

    /// A fresh registration scope for one component
    pub fn scope(&self, name: &'static str) -> AnimationScope {
        AnimationScope::new(self.handle.clone(), name)
    }

    pub fn contains(&self, target: &Target) -> bool {
        self.tree.contains(target)
    }

    /// The rendered members of an indexed family, in document order
    pub fn family(&self, prefix: &str) -> Vec<Target> {
        self.tree.indexed_targets(prefix)
    }

    /// Register a timeline after dropping entries for absent elements
    ///
    /// Returns None when nothing is left to animate.
    pub fn timeline(&self, scope: &mut AnimationScope, mut timeline: Timeline) -> Option<TimelineId> {
        let tree = self.tree;
        let dropped = timeline.retain_targets(|t| tree.contains(t));
        if timeline.is_empty() {
            tracing::debug!(scope = scope.name(), dropped, "no animated elements rendered");
            return None;
        }
        scope.timeline(timeline)
    }

    /// Register a timeline played the first time `trigger` crosses `start`
    pub fn play_on_scroll(
        &self,
        scope: &mut AnimationScope,
        timeline: Timeline,
        trigger: &Target,
        start: &str,
    ) -> Option<TimelineId> {
        if !self.contains(trigger) {
            tracing::debug!(scope = scope.name(), element = %trigger, "trigger element absent, skipping");
            return None;
        }
        let start = trigger_point(start)?;
        let tree = self.tree;
        let mut timeline = timeline;
        timeline.retain_targets(|t| tree.contains(t));
        if timeline.is_empty() {
            return None;
        }
        scope.play_on_scroll(timeline, trigger.clone(), start)
    }
}

/// Parse a trigger point, logging instead of failing
pub fn trigger_point(spec: &str) -> Option<TriggerPoint> {
    match spec.parse() {
        Ok(point) => Some(point),
        Err(err) => {
            tracing::warn!(%err, "ignoring scroll trigger");
            None
        }
    }
}

/// A page section with its own state and animations
pub trait Component {
    /// Name used for the animation scope and in logs
    fn name(&self) -> &'static str;

    /// Build the component's subtree from its current state
    fn render(&self) -> Element;

    /// Register entrance, loop and scroll animations
    fn mount(&mut self, ctx: &MountContext<'_>);

    /// React to an input event; unrelated events are ignored
    fn handle_event(&mut self, _event: &Event) -> Vec<Command> {
        Vec::new()
    }

    /// A labelled tween completed
    fn on_animation_event(&mut self, _event: &AnimationEvent) {}

    /// Kill every animation and trigger and reset transient state
    fn unmount(&mut self);

    /// Number of live registrations this component owns
    fn registrations(&self) -> usize;
}

/// Registration count of an optional scope
pub(crate) fn scope_size(scope: &Option<AnimationScope>) -> usize {
    scope
        .as_ref()
        .map_or(0, |s| s.timeline_ids().len() + s.trigger_ids().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{AnimationScheduler, Position, Property, PropertyValues, Tween};
    use folio_layout::prelude::*;

    fn tree() -> RenderTree {
        RenderTree::new(
            section("about").child(h2("About").id("about-heading")),
            Viewport::default(),
        )
    }

    #[test]
    fn test_absent_targets_are_dropped() {
        let scheduler = AnimationScheduler::new();
        let tree = tree();
        let ctx = MountContext::new(scheduler.handle(), &tree);
        let mut scope = ctx.scope("about");

        let fade = PropertyValues::new().with(Property::Opacity, 0.0);
        let timeline = Timeline::new()
            .with(Tween::from("about-heading", fade.clone()), Position::End)
            .with(Tween::from("about-image", fade), Position::End);
        let id = ctx.timeline(&mut scope, timeline).unwrap();

        let kept = scope.handle().with_timeline(id, |t| t.len());
        assert_eq!(kept, Some(1));
    }

    #[test]
    fn test_absent_trigger_registers_nothing() {
        let scheduler = AnimationScheduler::new();
        let tree = tree();
        let ctx = MountContext::new(scheduler.handle(), &tree);
        let mut scope = ctx.scope("skills");

        let fade = PropertyValues::new().with(Property::Opacity, 0.0);
        let timeline = Timeline::new().with(Tween::from("about-heading", fade), Position::End);
        assert!(ctx
            .play_on_scroll(&mut scope, timeline, &Target::id("skills"), "top 80%")
            .is_none());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_invalid_trigger_point_is_skipped() {
        assert!(trigger_point("top").is_none());
        assert!(trigger_point("top 70%").is_some());
    }
}
