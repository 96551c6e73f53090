//! Pointer-driven micro animations
//!
//! [`HoverAnimator`] keeps one hover state machine per element and at most
//! one running tween per element channel. Starting a tween on a channel kills
//! the previous one, so rapid enter/leave never stacks animations, and two
//! elements never share a channel, so simultaneous hovers stay independent.

use folio_animation::{AnimationScope, Easing, Position, PropertyValues, Timeline, TimelineId, Tween};
use folio_core::event_types::{POINTER_ENTER, POINTER_LEAVE};
use folio_core::{HoverState, StateMachine, Target};
use rustc_hash::FxHashMap;

/// Timing of one hover transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTiming {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl HoverTiming {
    pub const fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

/// Enter and leave values for a hoverable element
#[derive(Clone, Debug, PartialEq)]
pub struct HoverEffect {
    pub enter: PropertyValues,
    pub enter_timing: HoverTiming,
    pub leave_timing: HoverTiming,
}

impl HoverEffect {
    /// Same timing in both directions
    pub fn new(enter: PropertyValues, duration_ms: f32, easing: Easing) -> Self {
        let timing = HoverTiming::new(duration_ms, easing);
        Self {
            enter,
            enter_timing: timing,
            leave_timing: timing,
        }
    }

    pub fn leave_with(mut self, duration_ms: f32, easing: Easing) -> Self {
        self.leave_timing = HoverTiming::new(duration_ms, easing);
        self
    }

    /// Every entered property back at its identity
    pub fn leave_values(&self) -> PropertyValues {
        self.enter
            .properties()
            .map(|p| (p, p.identity()))
            .collect()
    }
}

/// Default channel for [`HoverEffect`]s
pub const HOVER_CHANNEL: &str = "hover";

/// Per-element hover state and channel bookkeeping
#[derive(Debug, Default)]
pub struct HoverAnimator {
    states: FxHashMap<Target, StateMachine<HoverState>>,
    running: FxHashMap<(Target, &'static str), TimelineId>,
}

impl HoverAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self, target: &Target) -> bool {
        self.states
            .get(target)
            .is_some_and(|fsm| fsm.state().is_active())
    }

    /// Feed a pointer-enter; animates only on an actual transition
    pub fn enter(&mut self, scope: &mut AnimationScope, target: &Target, effect: &HoverEffect) -> bool {
        if !self.transition(target, POINTER_ENTER) {
            return false;
        }
        let timing = effect.enter_timing;
        self.animate(scope, target, HOVER_CHANNEL, effect.enter.clone(), timing);
        true
    }

    /// Feed a pointer-leave and revert the effect
    pub fn leave(&mut self, scope: &mut AnimationScope, target: &Target, effect: &HoverEffect) -> bool {
        if !self.transition(target, POINTER_LEAVE) {
            return false;
        }
        let timing = effect.leave_timing;
        self.animate(scope, target, HOVER_CHANNEL, effect.leave_values(), timing);
        true
    }

    fn transition(&mut self, target: &Target, event: u32) -> bool {
        self.states
            .entry(target.clone())
            .or_insert_with(|| StateMachine::new(HoverState::Idle))
            .dispatch(event)
    }

    /// Tween `target` towards `values` on `channel`, replacing what runs there
    pub fn animate(
        &mut self,
        scope: &mut AnimationScope,
        target: &Target,
        channel: &'static str,
        values: PropertyValues,
        timing: HoverTiming,
    ) -> Option<TimelineId> {
        let timeline = Timeline::new().with(
            Tween::to(target.clone(), values)
                .duration(timing.duration_ms)
                .ease(timing.easing),
            Position::At(0.0),
        );
        self.play(scope, target, channel, timeline)
    }

    /// Run a whole timeline on `channel`, replacing what runs there
    pub fn play(
        &mut self,
        scope: &mut AnimationScope,
        target: &Target,
        channel: &'static str,
        timeline: Timeline,
    ) -> Option<TimelineId> {
        let key = (target.clone(), channel);
        if let Some(previous) = self.running.remove(&key) {
            scope.kill(previous);
        }
        let id = scope.timeline(timeline)?;
        self.running.insert(key, id);
        Some(id)
    }

    /// Forget all state; the owning scope kills the timelines
    pub fn reset(&mut self) {
        self.states.clear();
        self.running.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{AnimationScheduler, Property};

    fn card_effect() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new()
                .with(Property::Scale, 1.03)
                .with(Property::GlowOpacity, 0.3),
            300.0,
            Easing::Power1Out,
        )
    }

    #[test]
    fn test_enter_then_leave_reverts() {
        let scheduler = AnimationScheduler::new();
        let mut scope = AnimationScope::new(scheduler.handle(), "skills");
        let mut hover = HoverAnimator::new();
        let card = Target::indexed("skills-card", 0);
        let effect = card_effect();

        assert!(hover.enter(&mut scope, &card, &effect));
        assert!(!hover.enter(&mut scope, &card, &effect));
        scheduler.advance(300.0);
        assert!((scheduler.value(&card, Property::Scale) - 1.03).abs() < 1e-4);
        assert!(hover.is_hovered(&card));

        assert!(hover.leave(&mut scope, &card, &effect));
        scheduler.advance(300.0);
        assert!((scheduler.value(&card, Property::Scale) - 1.0).abs() < 1e-4);
        assert_eq!(scheduler.value(&card, Property::GlowOpacity), 0.0);
        // Only the latest tween of the channel is kept
        assert_eq!(scope.timeline_ids().len(), 1);
    }

    #[test]
    fn test_simultaneous_hovers_are_independent() {
        let scheduler = AnimationScheduler::new();
        let mut scope = AnimationScope::new(scheduler.handle(), "services");
        let mut hover = HoverAnimator::new();
        let a = Target::indexed("services-card", 0);
        let b = Target::indexed("services-card", 1);
        let effect = card_effect();

        hover.enter(&mut scope, &a, &effect);
        scheduler.advance(150.0);
        hover.enter(&mut scope, &b, &effect);
        hover.leave(&mut scope, &a, &effect);
        scheduler.advance(300.0);

        assert!((scheduler.value(&a, Property::Scale) - 1.0).abs() < 1e-4);
        assert!((scheduler.value(&b, Property::Scale) - 1.03).abs() < 1e-4);
    }
}
