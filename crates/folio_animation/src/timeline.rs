//! Timeline orchestration
//!
//! A timeline is an ordered list of tweens placed at explicit or relative
//! positions. Advancing it renders every entry whose start has passed into a
//! [`PropertyStore`].
//!
//! ```rust
//! use folio_animation::{Easing, Position, Property, PropertyStore, PropertyValues, Timeline, Tween};
//!
//! let mut timeline = Timeline::new().defaults(1000.0, Easing::Power3Out);
//! timeline.add(
//!     Tween::from("about-heading", PropertyValues::new().with(Property::Y, 60.0)),
//!     Position::End,
//! );
//! // Starts 800 ms before the heading ends
//! timeline.add(
//!     Tween::from("about-text", PropertyValues::new().with(Property::Opacity, 0.0)),
//!     Position::FromEnd(-800.0),
//! );
//! assert_eq!(timeline.entry(1).map(|e| e.start_ms()), Some(200.0));
//!
//! let mut store = PropertyStore::new();
//! let mut done = Vec::new();
//! timeline.advance(5000.0, &mut store, &mut done);
//! assert!(timeline.is_complete());
//! ```

use folio_core::Target;
use serde::Serialize;

use crate::easing::Easing;
use crate::property::{PropertyStore, PropertyValues};
use crate::stagger::StaggerConfig;
use crate::tween::{cycle_progress, Repeat, Tween, TweenKind};

/// Where a new entry is placed on the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub enum Position {
    /// Absolute offset from the timeline start (ms)
    At(f32),
    /// After everything added so far
    #[default]
    End,
    /// Relative to the current end; negative values overlap earlier entries
    FromEnd(f32),
    /// Same start as the most recently added entry
    WithPrevious,
}

/// Fallback timing for entries that do not specify their own
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimelineDefaults {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TimelineDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            easing: Easing::Power1Out,
        }
    }
}

/// Playback state of a timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PlayState {
    /// Waiting for an explicit play (e.g. from a scroll trigger)
    #[default]
    Paused,
    Playing,
    /// Reached the end of its final cycle
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryPhase {
    Pending,
    Active,
    Done,
}

/// A tween placed on a timeline
#[derive(Clone, Debug)]
pub struct TimelineEntry {
    tween: Tween,
    start_ms: f32,
    /// Resolved start and end values, fixed on first activation
    span: Option<(PropertyValues, PropertyValues)>,
    phase: EntryPhase,
}

impl TimelineEntry {
    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn target(&self) -> &Target {
        &self.tween.target
    }

    pub fn start_ms(&self) -> f32 {
        self.start_ms
    }

    pub fn is_done(&self) -> bool {
        self.phase == EntryPhase::Done
    }

    fn resolve(tween: &Tween, store: &PropertyStore) -> (PropertyValues, PropertyValues) {
        match &tween.kind {
            TweenKind::To(to) => (store.read(&tween.target, to.properties()), to.clone()),
            TweenKind::From(from) => (from.clone(), store.read(&tween.target, from.properties())),
            TweenKind::FromTo(from, to) => (from.clone(), to.clone()),
        }
    }
}

/// A labelled entry finished during an advance
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub entry: usize,
    pub target: Target,
    pub label: String,
}

/// An ordered sequence of tweens with shared playback
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    /// Entry indices sorted by start time, stable for equal starts
    order: Vec<usize>,
    defaults: TimelineDefaults,
    delay_ms: f32,
    repeat: Repeat,
    repeat_delay_ms: f32,
    yoyo: bool,
    last_start: f32,
    elapsed_ms: f32,
    cycle: u32,
    state: PlayState,
    primed: bool,
}

impl Timeline {
    /// A timeline that plays as soon as it is registered
    pub fn new() -> Self {
        Self {
            state: PlayState::Playing,
            ..Default::default()
        }
    }

    /// Start paused; a scroll trigger or explicit `play` starts it
    pub fn paused(mut self) -> Self {
        self.state = PlayState::Paused;
        self
    }

    pub fn defaults(mut self, duration_ms: f32, easing: Easing) -> Self {
        self.defaults = TimelineDefaults {
            duration_ms,
            easing,
        };
        self
    }

    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn repeat_delay(mut self, ms: f32) -> Self {
        self.repeat_delay_ms = ms.max(0.0);
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Builder-style [`add`](Self::add)
    pub fn with(mut self, tween: Tween, position: Position) -> Self {
        self.add(tween, position);
        self
    }

    /// Place a tween and return its entry index
    pub fn add(&mut self, tween: Tween, position: Position) -> usize {
        let base = self.resolve_position(position);
        let start = base + tween.delay_ms;
        self.last_start = start;
        self.insert(tween, start)
    }

    /// Place one tween per target, offset by the stagger
    ///
    /// Returns the entry indices in target order.
    pub fn add_staggered(
        &mut self,
        tween: Tween,
        targets: &[Target],
        stagger: StaggerConfig,
        position: Position,
    ) -> Vec<usize> {
        let base = self.resolve_position(position) + tween.delay_ms;
        let indices = targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let start = base + stagger.delay_for_index(i, targets.len());
                self.insert(tween.for_target(target.clone()), start)
            })
            .collect();
        self.last_start = base;
        indices
    }

    fn insert(&mut self, tween: Tween, start_ms: f32) -> usize {
        let index = self.entries.len();
        self.entries.push(TimelineEntry {
            tween,
            start_ms,
            span: None,
            phase: EntryPhase::Pending,
        });
        let slot = self
            .order
            .partition_point(|&i| self.entries[i].start_ms <= start_ms);
        self.order.insert(slot, index);
        index
    }

    fn resolve_position(&self, position: Position) -> f32 {
        match position {
            Position::At(ms) => ms,
            Position::End => self.end_of_entries(),
            Position::FromEnd(offset) => self.end_of_entries() + offset,
            Position::WithPrevious => self.last_start,
        }
    }

    /// End used for relative placement; endless entries count with one cycle
    fn end_of_entries(&self) -> f32 {
        self.entries
            .iter()
            .map(|e| {
                let total = e.tween.total_duration(self.defaults.duration_ms);
                if total.is_finite() {
                    e.start_ms + total
                } else {
                    e.start_ms + e.tween.resolved_duration(self.defaults.duration_ms)
                }
            })
            .fold(0.0, f32::max)
    }

    /// Length of one timeline cycle; infinite when any entry repeats forever
    pub fn duration(&self) -> f32 {
        self.entries
            .iter()
            .map(|e| e.start_ms + e.tween.total_duration(self.defaults.duration_ms))
            .fold(0.0, f32::max)
    }

    /// Duration including timeline repeats and the initial delay
    pub fn total_duration(&self) -> f32 {
        let cycle = self.duration();
        let body = match self.repeat {
            Repeat::Never => cycle,
            Repeat::Times(n) => cycle * (n + 1) as f32 + self.repeat_delay_ms * n as f32,
            Repeat::Infinite => f32::INFINITY,
        };
        self.delay_ms + body
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn defaults_ref(&self) -> &TimelineDefaults {
        &self.defaults
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn repeat_mode(&self) -> Repeat {
        self.repeat
    }

    pub fn is_yoyo(&self) -> bool {
        self.yoyo
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlayState::Completed
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Fraction of the total duration played, 0 for endless timelines
    pub fn progress(&self) -> f32 {
        let total = self.total_duration();
        if !total.is_finite() {
            return 0.0;
        }
        if total <= 0.0 {
            return if self.is_complete() { 1.0 } else { 0.0 };
        }
        (self.elapsed_ms / total).clamp(0.0, 1.0)
    }

    /// Drop entries whose target fails `present`; returns how many were dropped
    pub fn retain_targets(&mut self, present: impl Fn(&Target) -> bool) -> usize {
        let before = self.entries.len();
        let kept: Vec<TimelineEntry> = self
            .entries
            .drain(..)
            .filter(|entry| {
                let keep = present(&entry.tween.target);
                if !keep {
                    tracing::debug!(element = %entry.tween.target, "skipping animation of absent element");
                }
                keep
            })
            .collect();
        self.order.clear();
        for entry in kept {
            self.insert(entry.tween, entry.start_ms);
        }
        before - self.entries.len()
    }

    /// Write the start values of `From` and `FromTo` entries immediately
    ///
    /// Elements animated in from a hidden state must not flash before their
    /// entry starts. Called once when the timeline is registered.
    pub fn prime(&mut self, store: &mut PropertyStore) {
        if self.primed {
            return;
        }
        self.primed = true;
        for &index in &self.order {
            let TimelineEntry {
                tween, span, phase, ..
            } = &mut self.entries[index];
            if tween.start_values().is_none() || *phase != EntryPhase::Pending {
                continue;
            }
            let (from, _) = span.get_or_insert_with(|| TimelineEntry::resolve(tween, store));
            store.apply(&tween.target, from);
        }
    }

    pub fn play(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Return every entry to its start values and play from the beginning
    pub fn restart(&mut self, store: &mut PropertyStore) {
        self.rewind(store);
        self.elapsed_ms = 0.0;
        self.cycle = 0;
        self.state = PlayState::Playing;
    }

    /// Advance the playhead by `dt_ms` if playing
    pub fn advance(&mut self, dt_ms: f32, store: &mut PropertyStore, completed: &mut Vec<Completion>) {
        if self.state != PlayState::Playing {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        self.render_elapsed(store, completed);
    }

    /// Jump to a fraction of one cycle without changing the play state
    ///
    /// Scrubbed timelines are driven this way. Endless timelines ignore it.
    pub fn seek_progress(&mut self, progress: f32, store: &mut PropertyStore, completed: &mut Vec<Completion>) {
        let duration = self.duration();
        if !duration.is_finite() {
            return;
        }
        let time = progress.clamp(0.0, 1.0) * duration;
        self.elapsed_ms = self.delay_ms + time;
        self.render_time(time, store, completed);
    }

    fn render_elapsed(&mut self, store: &mut PropertyStore, completed: &mut Vec<Completion>) {
        let local = self.elapsed_ms - self.delay_ms;
        if local < 0.0 {
            return;
        }

        let duration = self.duration();
        if !duration.is_finite() {
            self.render_time(local, store, completed);
            return;
        }

        let cycle = cycle_progress(local, duration, self.repeat, self.repeat_delay_ms, self.yoyo);
        if cycle.cycle != self.cycle {
            if !self.yoyo {
                self.rewind(store);
            }
            self.cycle = cycle.cycle;
        }

        self.render_time(cycle.progress * duration, store, completed);

        if cycle.finished {
            tracing::trace!(entries = self.entries.len(), "timeline complete");
            self.state = PlayState::Completed;
        }
    }

    /// Render every entry at timeline-local `time`
    fn render_time(&mut self, time: f32, store: &mut PropertyStore, completed: &mut Vec<Completion>) {
        let defaults = self.defaults;
        for &index in &self.order {
            let TimelineEntry {
                tween,
                start_ms,
                span,
                phase,
            } = &mut self.entries[index];

            let local = time - *start_ms;
            if local < 0.0 {
                // Playhead moved back before this entry
                if *phase != EntryPhase::Pending {
                    if let Some((from, _)) = span.as_ref() {
                        store.apply(&tween.target, from);
                    }
                    *phase = EntryPhase::Pending;
                }
                continue;
            }

            let total = tween.total_duration(defaults.duration_ms);
            if *phase == EntryPhase::Done && local >= total {
                continue;
            }

            let (from, to) = span.get_or_insert_with(|| TimelineEntry::resolve(tween, store));
            let progress = tween.eased_progress(local, defaults.duration_ms, defaults.easing);
            store.apply(&tween.target, &PropertyValues::lerp(from, to, progress.progress));

            if progress.finished {
                *phase = EntryPhase::Done;
                if let Some(label) = &tween.label {
                    completed.push(Completion {
                        entry: index,
                        target: tween.target.clone(),
                        label: label.clone(),
                    });
                }
            } else {
                *phase = EntryPhase::Active;
            }
        }
    }

    /// Put activated entries back to their start values, latest first
    fn rewind(&mut self, store: &mut PropertyStore) {
        for &index in self.order.iter().rev() {
            let entry = &mut self.entries[index];
            if entry.phase == EntryPhase::Pending && entry.tween.start_values().is_none() {
                continue;
            }
            if let Some((from, _)) = entry.span.as_ref() {
                store.apply(&entry.tween.target, from);
            }
            entry.phase = EntryPhase::Pending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Property;

    fn opacity(v: f32) -> PropertyValues {
        PropertyValues::new().with(Property::Opacity, v)
    }

    fn y(v: f32) -> PropertyValues {
        PropertyValues::new().with(Property::Y, v)
    }

    #[test]
    fn test_relative_positions() {
        let mut tl = Timeline::new().defaults(1000.0, Easing::Linear);
        let a = tl.add(Tween::to("a", opacity(0.0)), Position::End);
        let b = tl.add(Tween::to("b", opacity(0.0)), Position::FromEnd(-800.0));
        let c = tl.add(Tween::to("c", opacity(0.0)).duration(500.0), Position::WithPrevious);
        let d = tl.add(Tween::to("d", opacity(0.0)), Position::At(3000.0));
        let e = tl.add(Tween::to("e", opacity(0.0)).delay(100.0), Position::End);

        let starts: Vec<f32> = [a, b, c, d, e]
            .iter()
            .map(|&i| tl.entry(i).map(|e| e.start_ms()).unwrap_or(-1.0))
            .collect();
        assert_eq!(starts, vec![0.0, 200.0, 200.0, 3000.0, 4100.0]);
        assert_eq!(tl.duration(), 5100.0);
    }

    #[test]
    fn test_staggered_entries() {
        let mut tl = Timeline::new().defaults(600.0, Easing::Power3Out);
        tl.add(Tween::from("heading", y(60.0)), Position::End);
        let targets: Vec<Target> = (0..4).map(|i| Target::indexed("card", i)).collect();
        let ids = tl.add_staggered(
            Tween::from("card", y(50.0)),
            &targets,
            StaggerConfig::new(150.0),
            Position::FromEnd(-400.0),
        );
        let starts: Vec<f32> = ids.iter().map(|&i| tl.entries()[i].start_ms()).collect();
        assert_eq!(starts, vec![200.0, 350.0, 500.0, 650.0]);
        assert_eq!(tl.entries()[ids[3]].target(), &Target::id("card-3"));
    }

    #[test]
    fn test_to_tween_interpolates_from_current() {
        let mut store = PropertyStore::new();
        let target = Target::id("a");
        store.set(&target, Property::Y, 100.0);

        let mut tl = Timeline::new()
            .defaults(1000.0, Easing::Linear)
            .with(Tween::to("a", y(0.0)), Position::End);
        let mut done = Vec::new();

        tl.advance(250.0, &mut store, &mut done);
        assert!((store.get(&target, Property::Y) - 75.0).abs() < 1e-3);

        tl.advance(1000.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Y), 0.0);
        assert!(tl.is_complete());
    }

    #[test]
    fn test_from_tween_is_primed() {
        let mut store = PropertyStore::new();
        let mut tl = Timeline::new()
            .paused()
            .with(Tween::from("a", opacity(0.0)).delay(1000.0), Position::End);
        tl.prime(&mut store);
        assert_eq!(store.get(&Target::id("a"), Property::Opacity), 0.0);

        // Paused timelines do not move
        let mut done = Vec::new();
        tl.advance(5000.0, &mut store, &mut done);
        assert_eq!(store.get(&Target::id("a"), Property::Opacity), 0.0);

        tl.play();
        tl.advance(5000.0, &mut store, &mut done);
        assert_eq!(store.get(&Target::id("a"), Property::Opacity), 1.0);
    }

    #[test]
    fn test_completed_entries_stop_writing() {
        let mut store = PropertyStore::new();
        let target = Target::id("card");
        let mut tl = Timeline::new()
            .defaults(100.0, Easing::Linear)
            .with(Tween::to("card", opacity(0.5)), Position::End)
            .with(Tween::to("other", opacity(0.5)).duration(1000.0), Position::End);
        let mut done = Vec::new();

        tl.advance(150.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Opacity), 0.5);

        // Something else now owns the value
        store.set(&target, Property::Opacity, 0.9);
        tl.advance(100.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Opacity), 0.9);
    }

    #[test]
    fn test_labels_report_completion_once() {
        let mut store = PropertyStore::new();
        let mut tl = Timeline::new()
            .defaults(100.0, Easing::Linear)
            .with(Tween::to("panel-0", opacity(0.0)).label("panel-hidden"), Position::End)
            .with(Tween::marker("trail", "trail-removed"), Position::At(300.0));
        let mut done = Vec::new();

        tl.advance(120.0, &mut store, &mut done);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].label, "panel-hidden");

        tl.advance(120.0, &mut store, &mut done);
        assert_eq!(done.len(), 1);

        tl.advance(120.0, &mut store, &mut done);
        assert_eq!(done.len(), 2);
        assert_eq!(done[1].target, Target::id("trail"));
        assert!(tl.is_complete());
    }

    #[test]
    fn test_endless_tween_with_negative_delay_starts_mid_cycle() {
        let mut store = PropertyStore::new();
        let mut tl = Timeline::new().with(
            Tween::to("p", y(-100.0))
                .duration(1000.0)
                .delay(-250.0)
                .ease(Easing::Linear)
                .repeat(Repeat::Infinite)
                .yoyo(true),
            Position::At(0.0),
        );
        let mut done = Vec::new();
        tl.advance(0.0, &mut store, &mut done);
        assert!((store.get(&Target::id("p"), Property::Y) + 25.0).abs() < 1e-3);

        tl.advance(1000.0, &mut store, &mut done);
        assert!((store.get(&Target::id("p"), Property::Y) + 75.0).abs() < 1e-3);
        assert!(tl.is_playing());
        assert!(tl.duration().is_infinite());
    }

    #[test]
    fn test_timeline_repeat_rewinds() {
        let mut store = PropertyStore::new();
        let target = Target::id("a");
        let mut tl = Timeline::new()
            .defaults(100.0, Easing::Linear)
            .repeat(Repeat::Times(1))
            .with(Tween::from_to("a", opacity(0.0), opacity(1.0)), Position::End);
        tl.prime(&mut store);
        let mut done = Vec::new();

        tl.advance(150.0, &mut store, &mut done);
        assert!((store.get(&target, Property::Opacity) - 0.5).abs() < 1e-3);
        assert!(tl.is_playing());

        tl.advance(100.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Opacity), 1.0);
        assert!(tl.is_complete());
    }

    #[test]
    fn test_yoyo_timeline_ends_at_start() {
        let mut store = PropertyStore::new();
        let target = Target::id("a");
        let mut tl = Timeline::new()
            .defaults(100.0, Easing::Linear)
            .repeat(Repeat::Times(1))
            .yoyo(true)
            .with(Tween::to("a", y(50.0)), Position::End);
        let mut done = Vec::new();

        tl.advance(150.0, &mut store, &mut done);
        assert!((store.get(&target, Property::Y) - 25.0).abs() < 1e-3);
        tl.advance(100.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Y), 0.0);
        assert!(tl.is_complete());
    }

    #[test]
    fn test_seek_progress_scrubs_both_ways() {
        let mut store = PropertyStore::new();
        let target = Target::id("bg");
        let mut tl = Timeline::new()
            .paused()
            .defaults(1000.0, Easing::Linear)
            .with(
                Tween::to("bg", PropertyValues::new().with(Property::Blur, 15.0)),
                Position::At(0.0),
            );
        let mut done = Vec::new();

        tl.seek_progress(1.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Blur), 15.0);
        tl.seek_progress(0.2, &mut store, &mut done);
        assert!((store.get(&target, Property::Blur) - 3.0).abs() < 1e-3);
        tl.seek_progress(0.0, &mut store, &mut done);
        assert_eq!(store.get(&target, Property::Blur), 0.0);
        assert_eq!(tl.state(), PlayState::Paused);
    }

    #[test]
    fn test_retain_targets() {
        let mut tl = Timeline::new()
            .with(Tween::to("a", opacity(0.0)), Position::At(100.0))
            .with(Tween::to("missing", opacity(0.0)), Position::At(0.0))
            .with(Tween::to("b", opacity(0.0)), Position::At(0.0));
        let removed = tl.retain_targets(|t| t.as_str() != "missing");
        assert_eq!(removed, 1);
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.entries()[1].target(), &Target::id("b"));
    }
}
