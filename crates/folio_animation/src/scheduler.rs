//! Animation scheduler
//!
//! Owns every registered timeline and scroll trigger plus the property store
//! they write into. Components never hold the scheduler itself: they receive
//! a weak [`SchedulerHandle`] and register through an [`AnimationScope`], which
//! kills everything it registered when the component unmounts.
//!
//! The scheduler is advanced explicitly, either with a fixed step
//! ([`AnimationScheduler::advance`]) or from wall-clock time
//! ([`AnimationScheduler::tick`]).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use folio_core::{BoundsLookup, Target, Viewport};
use slotmap::{new_key_type, Key, SlotMap};

use crate::error::{AnimationError, Result};
use crate::manifest::AnimationManifest;
use crate::property::{Property, PropertyStore, PropertyValues};
use crate::scroll_trigger::{ScrollTrigger, TriggerAction};
use crate::timeline::{Completion, Timeline};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
    /// Handle to a registered scroll trigger
    pub struct TriggerId;
}

impl TimelineId {
    /// Stable numeric form used by the manifest
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

impl TriggerId {
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// A labelled timeline entry completed
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationEvent {
    pub timeline: TimelineId,
    /// Index of the entry within its timeline
    pub entry: usize,
    pub target: Target,
    pub label: String,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, Timeline>,
    triggers: SlotMap<TriggerId, ScrollTrigger>,
    store: PropertyStore,
    events: Vec<AnimationEvent>,
    last_frame: Instant,
    scroll_y: f32,
    viewport: Viewport,
}

impl SchedulerInner {
    fn advance(&mut self, dt_ms: f32) -> bool {
        let SchedulerInner {
            timelines,
            triggers,
            store,
            events,
            ..
        } = self;

        let mut completed = Vec::new();

        for (_, trigger) in triggers.iter_mut() {
            let Some(progress) = trigger.smooth(dt_ms) else {
                continue;
            };
            let Some(id) = trigger.timeline else {
                continue;
            };
            if let Some(timeline) = timelines.get_mut(id) {
                timeline.seek_progress(progress, store, &mut completed);
                collect(id, &mut completed, events);
            }
        }

        for (id, timeline) in timelines.iter_mut() {
            timeline.advance(dt_ms, store, &mut completed);
            collect(id, &mut completed, events);
        }

        timelines.iter().any(|(_, t)| t.is_playing())
    }

    fn update_scroll(&mut self, scroll_y: f32, viewport: Viewport, bounds: &dyn BoundsLookup) {
        self.scroll_y = scroll_y;
        self.viewport = viewport;

        let SchedulerInner {
            timelines,
            triggers,
            store,
            events,
            ..
        } = self;
        let mut completed = Vec::new();

        for (_, trigger) in triggers.iter_mut() {
            let Some(element) = bounds.bounds_of(&trigger.target) else {
                tracing::debug!(element = %trigger.target, "scroll trigger element absent, skipping");
                continue;
            };
            let fired = trigger.observe(scroll_y, element, viewport.height);
            let Some(id) = trigger.timeline else {
                continue;
            };
            let Some(timeline) = timelines.get_mut(id) else {
                continue;
            };
            if fired {
                tracing::debug!(element = %trigger.target, scroll_y, "scroll trigger fired");
                timeline.play();
            }
            if let TriggerAction::Scrub { smoothing_ms, .. } = trigger.action {
                if smoothing_ms <= 0.0 {
                    timeline.seek_progress(trigger.progress(), store, &mut completed);
                    collect(id, &mut completed, events);
                }
            }
        }
    }
}

fn collect(id: TimelineId, completed: &mut Vec<Completion>, events: &mut Vec<AnimationEvent>) {
    events.extend(completed.drain(..).map(|c| AnimationEvent {
        timeline: id,
        entry: c.entry,
        target: c.target,
        label: c.label,
    }));
}

/// Lock that survives a panic in another holder
fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The animation scheduler that ticks all registered timelines and triggers
///
/// Typically owned by the application and shared with components through
/// [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timelines: SlotMap::with_key(),
                triggers: SlotMap::with_key(),
                store: PropertyStore::new(),
                events: Vec::new(),
                last_frame: Instant::now(),
                scroll_y: 0.0,
                viewport: Viewport::default(),
            })),
        }
    }

    /// Get a weak handle for registering animations
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance everything by a fixed step
    ///
    /// Returns true if any timeline is still playing.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        inner.advance(dt_ms)
    }

    /// Advance by the wall-clock time since the previous frame
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        inner.advance(dt_ms)
    }

    /// Feed a new scroll position to every trigger
    pub fn update_scroll(&self, scroll_y: f32, viewport: Viewport, bounds: &dyn BoundsLookup) {
        lock(&self.inner).update_scroll(scroll_y, viewport, bounds);
    }

    pub fn scroll_y(&self) -> f32 {
        lock(&self.inner).scroll_y
    }

    pub fn value(&self, target: &Target, property: Property) -> f32 {
        lock(&self.inner).store.get(target, property)
    }

    pub fn values_of(&self, target: &Target) -> Option<PropertyValues> {
        lock(&self.inner).store.values_of(target).cloned()
    }

    /// Every animated target and its values, ordered by target
    pub fn snapshot(&self) -> Vec<(Target, PropertyValues)> {
        let inner = lock(&self.inner);
        let mut values: Vec<(Target, PropertyValues)> = inner
            .store
            .targets()
            .filter_map(|t| inner.store.values_of(t).map(|v| (t.clone(), v.clone())))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }

    /// Take the completion events raised since the last drain
    pub fn drain_events(&self) -> Vec<AnimationEvent> {
        std::mem::take(&mut lock(&self.inner).events)
    }

    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).timelines.iter().any(|(_, t)| t.is_playing())
    }

    pub fn timeline_count(&self) -> usize {
        lock(&self.inner).timelines.len()
    }

    pub fn trigger_count(&self) -> usize {
        lock(&self.inner).triggers.len()
    }

    /// No timeline or trigger registered
    pub fn is_empty(&self) -> bool {
        let inner = lock(&self.inner);
        inner.timelines.is_empty() && inner.triggers.is_empty()
    }

    /// Describe every registered timeline and trigger
    pub fn manifest(&self) -> AnimationManifest {
        let inner = lock(&self.inner);
        AnimationManifest::build(
            inner.timelines.iter(),
            inner.triggers.iter(),
        )
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// It won't keep the scheduler alive; every operation on a dropped scheduler
/// is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a timeline, priming its `from` values
    pub fn register_timeline(&self, mut timeline: Timeline) -> Option<TimelineId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            timeline.prime(&mut guard.store);
            guard.timelines.insert(timeline)
        })
    }

    /// Register a scroll trigger
    ///
    /// A trigger that drives a timeline pauses it: play-once triggers start
    /// it when crossed, scrubbed triggers seek it.
    pub fn register_trigger(&self, trigger: ScrollTrigger) -> Result<TriggerId> {
        let inner = self.inner.upgrade().ok_or(AnimationError::SchedulerDropped)?;
        let mut guard = lock(&inner);
        if let Some(id) = trigger.timeline {
            let timeline = guard
                .timelines
                .get_mut(id)
                .ok_or(AnimationError::UnknownTimeline(id))?;
            timeline.pause();
        }
        Ok(guard.triggers.insert(trigger))
    }

    pub fn play(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::play);
    }

    pub fn pause(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::pause);
    }

    /// Rewind to the start values and play again
    pub fn restart(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = lock(&inner);
            let SchedulerInner {
                timelines, store, ..
            } = &mut *guard;
            if let Some(timeline) = timelines.get_mut(id) {
                timeline.restart(store);
            }
        }
    }

    /// Remove a timeline; values it wrote stay in place
    pub fn kill_timeline(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timelines.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn kill_trigger(&self, id: TriggerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).triggers.remove(id).is_some())
            .unwrap_or(false)
    }

    pub fn has_timeline(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timelines.contains_key(id))
            .unwrap_or(false)
    }

    pub fn has_trigger(&self, id: TriggerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).triggers.contains_key(id))
            .unwrap_or(false)
    }

    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |t| t.is_playing()).unwrap_or(false)
    }

    pub fn is_timeline_complete(&self, id: TimelineId) -> bool {
        self.with_timeline(id, |t| t.is_complete()).unwrap_or(false)
    }

    /// Access a timeline mutably
    ///
    /// Returns None if the scheduler is dropped or the timeline doesn't exist.
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).timelines.get_mut(id).map(f))
    }

    /// Write values immediately, outside any timeline
    pub fn set_values(&self, target: &Target, values: &PropertyValues) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).store.apply(target, values);
        }
    }

    pub fn value(&self, target: &Target, property: Property) -> Option<f32> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).store.get(target, property))
    }

    /// Last scroll position fed to the scheduler
    pub fn scroll_y(&self) -> Option<f32> {
        self.inner.upgrade().map(|inner| lock(&inner).scroll_y)
    }

    /// Viewport reported with the last scroll update
    pub fn viewport(&self) -> Option<Viewport> {
        self.inner.upgrade().map(|inner| lock(&inner).viewport)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// Tracks everything one component registered
///
/// Killing the scope removes exactly those timelines and triggers, leaving
/// other components' animations untouched. Dropping the scope kills it.
pub struct AnimationScope {
    handle: SchedulerHandle,
    name: &'static str,
    timelines: Vec<TimelineId>,
    triggers: Vec<TriggerId>,
}

impl AnimationScope {
    pub fn new(handle: SchedulerHandle, name: &'static str) -> Self {
        Self {
            handle,
            name,
            timelines: Vec::new(),
            triggers: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handle(&self) -> &SchedulerHandle {
        &self.handle
    }

    /// Register and track a timeline
    pub fn timeline(&mut self, timeline: Timeline) -> Option<TimelineId> {
        let id = self.handle.register_timeline(timeline)?;
        self.timelines.push(id);
        Some(id)
    }

    /// Register and track a scroll trigger
    ///
    /// Registration failures are logged and swallowed; the section simply
    /// renders without the effect.
    pub fn trigger(&mut self, trigger: ScrollTrigger) -> Option<TriggerId> {
        match self.handle.register_trigger(trigger) {
            Ok(id) => {
                self.triggers.push(id);
                Some(id)
            }
            Err(err) => {
                tracing::debug!(scope = self.name, %err, "scroll trigger not registered");
                None
            }
        }
    }

    /// Register a paused timeline played once by a trigger on `target`
    pub fn play_on_scroll(
        &mut self,
        timeline: Timeline,
        target: Target,
        start: crate::TriggerPoint,
    ) -> Option<TimelineId> {
        let id = self.timeline(timeline.paused())?;
        self.trigger(ScrollTrigger::play_once(target, start).timeline(id));
        Some(id)
    }

    /// Kill one timeline owned by this scope
    pub fn kill(&mut self, id: TimelineId) {
        if let Some(pos) = self.timelines.iter().position(|t| *t == id) {
            self.timelines.swap_remove(pos);
            self.handle.kill_timeline(id);
        }
    }

    /// Kill everything this scope registered
    pub fn kill_all(&mut self) {
        if self.timelines.is_empty() && self.triggers.is_empty() {
            return;
        }
        tracing::debug!(
            scope = self.name,
            timelines = self.timelines.len(),
            triggers = self.triggers.len(),
            "killing scoped animations"
        );
        for id in self.triggers.drain(..) {
            self.handle.kill_trigger(id);
        }
        for id in self.timelines.drain(..) {
            self.handle.kill_timeline(id);
        }
    }

    pub fn contains(&self, id: TimelineId) -> bool {
        self.timelines.contains(&id)
    }

    pub fn timeline_ids(&self) -> &[TimelineId] {
        &self.timelines
    }

    pub fn trigger_ids(&self) -> &[TriggerId] {
        &self.triggers
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty() && self.triggers.is_empty()
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        self.kill_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Easing, Position, Tween};
    use folio_core::Bounds;

    struct Layout(Vec<(Target, Bounds)>);

    impl BoundsLookup for Layout {
        fn bounds_of(&self, target: &Target) -> Option<Bounds> {
            self.0.iter().find(|(t, _)| t == target).map(|(_, b)| *b)
        }
    }

    fn fade_in(target: &str) -> Timeline {
        Timeline::new().defaults(1000.0, Easing::Linear).with(
            Tween::from(target, PropertyValues::new().with(Property::Opacity, 0.0)),
            Position::End,
        )
    }

    #[test]
    fn test_scheduler_advance() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.register_timeline(fade_in("a"));
        assert!(id.is_some());

        let target = Target::id("a");
        assert_eq!(scheduler.value(&target, Property::Opacity), 0.0);
        assert!(scheduler.advance(500.0));
        assert!((scheduler.value(&target, Property::Opacity) - 0.5).abs() < 1e-4);
        assert!(!scheduler.advance(600.0));
        assert_eq!(scheduler.value(&target, Property::Opacity), 1.0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };
        assert!(!handle.is_alive());
        assert!(handle.register_timeline(fade_in("a")).is_none());
        assert!(matches!(
            handle.register_trigger(ScrollTrigger::play_once(
                Target::id("a"),
                "top 80%".parse().unwrap()
            )),
            Err(AnimationError::SchedulerDropped)
        ));
        assert!(!handle.kill_timeline(TimelineId::default()));
    }

    #[test]
    fn test_trigger_plays_timeline_once() {
        let scheduler = AnimationScheduler::new();
        let mut scope = AnimationScope::new(scheduler.handle(), "skills");
        let id = scope
            .play_on_scroll(fade_in("skills-card-0"), Target::id("skills"), "top 80%".parse().unwrap())
            .unwrap();
        let layout = Layout(vec![(Target::id("skills"), Bounds::new(2000.0, 800.0))]);
        let viewport = Viewport::new(1440.0, 1000.0);
        let card = Target::id("skills-card-0");

        // Primed but not playing
        scheduler.advance(500.0);
        assert_eq!(scheduler.value(&card, Property::Opacity), 0.0);

        // start = 2000 - 800 = 1200
        scheduler.update_scroll(1199.0, viewport, &layout);
        assert!(!scope.handle().is_timeline_playing(id));
        scheduler.update_scroll(1250.0, viewport, &layout);
        assert!(scope.handle().is_timeline_playing(id));

        scheduler.advance(2000.0);
        assert_eq!(scheduler.value(&card, Property::Opacity), 1.0);
        assert!(scope.handle().is_timeline_complete(id));

        // Scrolling away and back does not replay
        scheduler.update_scroll(0.0, viewport, &layout);
        scheduler.update_scroll(1300.0, viewport, &layout);
        assert!(scope.handle().is_timeline_complete(id));
    }

    #[test]
    fn test_missing_trigger_element_is_skipped() {
        let scheduler = AnimationScheduler::new();
        let mut scope = AnimationScope::new(scheduler.handle(), "about");
        let id = scope
            .play_on_scroll(fade_in("about-text"), Target::id("about"), "top 70%".parse().unwrap())
            .unwrap();
        scheduler.update_scroll(10_000.0, Viewport::default(), &Layout(Vec::new()));
        assert!(!scope.handle().is_timeline_playing(id));
    }

    #[test]
    fn test_scrub_with_smoothing() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let bg = Target::id("bg");
        let id = handle
            .register_timeline(Timeline::new().defaults(1000.0, Easing::Linear).with(
                Tween::to("bg", PropertyValues::new().with(Property::Blur, 16.0)),
                Position::At(0.0),
            ))
            .unwrap();
        handle
            .register_trigger(
                ScrollTrigger::scrub(
                    bg.clone(),
                    "top top".parse().unwrap(),
                    "bottom top".parse().unwrap(),
                    2000.0,
                    Easing::Linear,
                )
                .timeline(id),
            )
            .unwrap();
        assert!(!handle.is_timeline_playing(id));

        let layout = Layout(vec![(bg.clone(), Bounds::new(0.0, 1000.0))]);
        scheduler.update_scroll(1000.0, Viewport::default(), &layout);
        scheduler.advance(1000.0);
        assert!((scheduler.value(&bg, Property::Blur) - 8.0).abs() < 1e-3);
        scheduler.advance(2000.0);
        assert!((scheduler.value(&bg, Property::Blur) - 16.0).abs() < 1e-3);

        scheduler.update_scroll(0.0, Viewport::default(), &layout);
        scheduler.advance(2000.0);
        assert!(scheduler.value(&bg, Property::Blur).abs() < 1e-3);
    }

    #[test]
    fn test_register_trigger_with_unknown_timeline() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.register_timeline(fade_in("a")).unwrap();
        handle.kill_timeline(id);
        let result = handle.register_trigger(
            ScrollTrigger::play_once(Target::id("a"), "top 80%".parse().unwrap()).timeline(id),
        );
        assert!(matches!(result, Err(AnimationError::UnknownTimeline(_))));
    }

    #[test]
    fn test_scope_kill_all_leaves_other_scopes() {
        let scheduler = AnimationScheduler::new();
        let mut hero = AnimationScope::new(scheduler.handle(), "hero");
        let mut about = AnimationScope::new(scheduler.handle(), "about");

        hero.timeline(fade_in("hero-title"));
        about.play_on_scroll(fade_in("about-text"), Target::id("about"), "top 70%".parse().unwrap());
        assert_eq!(scheduler.timeline_count(), 2);
        assert_eq!(scheduler.trigger_count(), 1);

        about.kill_all();
        assert!(about.is_empty());
        assert_eq!(scheduler.timeline_count(), 1);
        assert_eq!(scheduler.trigger_count(), 0);

        drop(hero);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_labelled_completion_events() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle
            .register_timeline(
                Timeline::new()
                    .defaults(100.0, Easing::Linear)
                    .with(Tween::marker("page-transition-trail", "trail-done"), Position::At(50.0)),
            )
            .unwrap();

        scheduler.advance(60.0);
        let events = scheduler.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timeline, id);
        assert_eq!(events[0].label, "trail-done");
        assert!(scheduler.drain_events().is_empty());
    }
}
