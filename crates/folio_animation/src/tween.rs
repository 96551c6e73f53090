//! Tweens: a target, property deltas, timing and easing
//!
//! ```rust
//! use folio_animation::{Easing, Property, PropertyValues, Repeat, Tween};
//!
//! let bounce = Tween::to("hero-scroll", PropertyValues::new().with(Property::Y, -10.0))
//!     .duration(1500.0)
//!     .ease(Easing::SineInOut)
//!     .repeat(Repeat::Infinite)
//!     .yoyo(true);
//! assert!(bounce.total_duration(500.0).is_infinite());
//! ```

use folio_core::Target;
use serde::Serialize;

use crate::easing::Easing;
use crate::property::PropertyValues;

/// How the start and end values of a tween are chosen
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TweenKind {
    /// Animate from the current values to these
    To(PropertyValues),
    /// Animate from these to the current values
    From(PropertyValues),
    /// Animate between two explicit value sets
    FromTo(PropertyValues, PropertyValues),
}

/// How many extra cycles a tween plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Repeat {
    #[default]
    Never,
    Times(u32),
    Infinite,
}

impl Repeat {
    /// Index of the last cycle, or None for infinite repetition
    pub fn last_cycle(&self) -> Option<u32> {
        match self {
            Repeat::Never => Some(0),
            Repeat::Times(n) => Some(*n),
            Repeat::Infinite => None,
        }
    }
}

/// Position of a playhead within a repeating span
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleProgress {
    /// Linear progress within the current cycle, already reversed on yoyo cycles
    pub progress: f32,
    pub cycle: u32,
    /// The playhead is past the final cycle
    pub finished: bool,
}

/// Map a local time onto a repeating span of `duration` ms
pub fn cycle_progress(
    local_ms: f32,
    duration: f32,
    repeat: Repeat,
    repeat_delay: f32,
    yoyo: bool,
) -> CycleProgress {
    let last = repeat.last_cycle();
    if duration <= 0.0 {
        let cycle = last.unwrap_or(0);
        let reversed = yoyo && cycle % 2 == 1;
        return CycleProgress {
            progress: if reversed { 0.0 } else { 1.0 },
            cycle,
            finished: local_ms >= 0.0,
        };
    }

    let local = local_ms.max(0.0);
    let period = duration + repeat_delay.max(0.0);
    let total = last.map(|n| period * n as f32 + duration);

    let (cycle, raw, finished) = match (last, total) {
        (Some(n), Some(total)) if local >= total => (n, 1.0, true),
        _ => {
            let cycle = (local / period).floor();
            let in_cycle = local - cycle * period;
            (cycle as u32, (in_cycle / duration).min(1.0), false)
        }
    };

    let progress = if yoyo && cycle % 2 == 1 { 1.0 - raw } else { raw };
    CycleProgress {
        progress,
        cycle,
        finished,
    }
}

/// A single animation of one target
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    pub target: Target,
    pub kind: TweenKind,
    /// Falls back to the timeline default when unset
    pub duration_ms: Option<f32>,
    /// Shifts the start relative to the tween's position; may be negative
    pub delay_ms: f32,
    /// Falls back to the timeline default when unset
    pub easing: Option<Easing>,
    pub repeat: Repeat,
    pub repeat_delay_ms: f32,
    pub yoyo: bool,
    /// Emitted as an [`AnimationEvent`](crate::AnimationEvent) when the tween completes
    pub label: Option<String>,
}

impl Tween {
    fn new(target: impl Into<Target>, kind: TweenKind) -> Self {
        Self {
            target: target.into(),
            kind,
            duration_ms: None,
            delay_ms: 0.0,
            easing: None,
            repeat: Repeat::Never,
            repeat_delay_ms: 0.0,
            yoyo: false,
            label: None,
        }
    }

    pub fn to(target: impl Into<Target>, values: PropertyValues) -> Self {
        Self::new(target, TweenKind::To(values))
    }

    pub fn from(target: impl Into<Target>, values: PropertyValues) -> Self {
        Self::new(target, TweenKind::From(values))
    }

    pub fn from_to(target: impl Into<Target>, from: PropertyValues, to: PropertyValues) -> Self {
        Self::new(target, TweenKind::FromTo(from, to))
    }

    /// Instantly apply values
    pub fn set(target: impl Into<Target>, values: PropertyValues) -> Self {
        Self::new(target, TweenKind::To(values)).duration(0.0)
    }

    /// A zero-length entry that only reports its label when the playhead passes it
    pub fn marker(target: impl Into<Target>, label: impl Into<String>) -> Self {
        Self::set(target, PropertyValues::new()).label(label)
    }

    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = Some(ms.max(0.0));
        self
    }

    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
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

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Retarget a copy of this tween, used when staggering one tween over a family
    pub fn for_target(&self, target: impl Into<Target>) -> Self {
        let mut tween = self.clone();
        tween.target = target.into();
        tween
    }

    /// Values written before the tween starts, if any
    pub fn start_values(&self) -> Option<&PropertyValues> {
        match &self.kind {
            TweenKind::To(_) => None,
            TweenKind::From(from) | TweenKind::FromTo(from, _) => Some(from),
        }
    }

    /// The properties this tween writes
    pub fn properties(&self) -> impl Iterator<Item = crate::Property> + '_ {
        let values = match &self.kind {
            TweenKind::To(v) | TweenKind::From(v) | TweenKind::FromTo(_, v) => v,
        };
        values.properties()
    }

    pub fn resolved_duration(&self, default_ms: f32) -> f32 {
        self.duration_ms.unwrap_or(default_ms)
    }

    /// Duration including repeats; infinite for endless repetition
    pub fn total_duration(&self, default_ms: f32) -> f32 {
        let duration = self.resolved_duration(default_ms);
        match self.repeat {
            Repeat::Never => duration,
            Repeat::Times(n) => duration * (n + 1) as f32 + self.repeat_delay_ms * n as f32,
            Repeat::Infinite => f32::INFINITY,
        }
    }

    /// Eased progress at `local_ms` after the tween's start
    pub fn eased_progress(&self, local_ms: f32, default_ms: f32, default_easing: Easing) -> CycleProgress {
        let mut cycle = cycle_progress(
            local_ms,
            self.resolved_duration(default_ms),
            self.repeat,
            self.repeat_delay_ms,
            self.yoyo,
        );
        cycle.progress = self.easing.unwrap_or(default_easing).apply(cycle.progress);
        cycle
    }
}
