//! Scroll-linked triggers
//!
//! A trigger watches one element's position relative to the viewport. Its
//! start and end are written the way web animation code writes them:
//! `"top 70%"` means "when the element's top reaches 70% down the viewport".
//!
//! ```rust
//! use folio_animation::{ScrollTrigger, TriggerPoint};
//! use folio_core::{Bounds, Target};
//!
//! let start: TriggerPoint = "top 70%".parse().unwrap();
//! let trigger = ScrollTrigger::play_once(Target::id("about"), start);
//!
//! // Element at y=1000, viewport 900 tall: fires once scrolled to 370
//! let (begin, _) = trigger.scroll_range(Bounds::new(1000.0, 600.0), 900.0);
//! assert_eq!(begin, 370.0);
//! ```

use std::fmt;
use std::str::FromStr;

use folio_core::{Bounds, Target};
use serde::Serialize;

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::scheduler::TimelineId;

/// A position along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    /// Percentage of the height
    Percent(f32),
    /// Pixels from the top
    Pixels(f32),
}

impl Anchor {
    /// Offset from the top of a span of the given height
    pub fn offset(&self, height: f32) -> f32 {
        match *self {
            Anchor::Top => 0.0,
            Anchor::Center => height * 0.5,
            Anchor::Bottom => height,
            Anchor::Percent(p) => height * p / 100.0,
            Anchor::Pixels(px) => px,
        }
    }

    fn parse(token: &str, input: &str) -> Result<Self, AnimationError> {
        let invalid = |reason| AnimationError::InvalidTriggerPoint {
            input: input.to_string(),
            reason,
        };
        match token {
            "top" => Ok(Anchor::Top),
            "center" => Ok(Anchor::Center),
            "bottom" => Ok(Anchor::Bottom),
            _ => {
                if let Some(number) = token.strip_suffix('%') {
                    number
                        .parse()
                        .map(Anchor::Percent)
                        .map_err(|_| invalid("percentage is not a number"))
                } else {
                    token
                        .strip_suffix("px")
                        .unwrap_or(token)
                        .parse()
                        .map(Anchor::Pixels)
                        .map_err(|_| invalid("expected top, center, bottom, N% or Npx"))
                }
            }
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => f.write_str("top"),
            Anchor::Center => f.write_str("center"),
            Anchor::Bottom => f.write_str("bottom"),
            Anchor::Percent(p) => write!(f, "{p}%"),
            Anchor::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Meeting point of an element anchor and a viewport anchor
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TriggerPoint {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPoint {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two anchors line up
    pub fn scroll_position(&self, bounds: Bounds, viewport_height: f32) -> f32 {
        bounds.top + self.element.offset(bounds.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for TriggerPoint {
    type Err = AnimationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = input.split_whitespace();
        let (Some(element), Some(viewport), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(AnimationError::InvalidTriggerPoint {
                input: input.to_string(),
                reason: "expected an element anchor and a viewport anchor",
            });
        };
        Ok(Self {
            element: Anchor::parse(element, input)?,
            viewport: Anchor::parse(viewport, input)?,
        })
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// What crossing a trigger does to its timeline
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum TriggerAction {
    /// Play the timeline the first time the start is crossed; never replays
    PlayOnce,
    /// Tie timeline progress to scroll progress between start and end
    Scrub {
        /// Time the timeline takes to catch up with the scroll position
        smoothing_ms: f32,
        /// Applied to scroll progress before it drives the timeline
        easing: Easing,
    },
}

/// A registered scroll trigger
#[derive(Clone, Debug, Serialize)]
pub struct ScrollTrigger {
    pub target: Target,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub action: TriggerAction,
    /// Timeline driven by this trigger
    #[serde(skip)]
    pub timeline: Option<TimelineId>,
    #[serde(skip)]
    fired: bool,
    #[serde(skip)]
    goal: f32,
    #[serde(skip)]
    progress: f32,
}

impl ScrollTrigger {
    fn new(target: Target, start: TriggerPoint, action: TriggerAction) -> Self {
        Self {
            target,
            start,
            end: TriggerPoint::new(Anchor::Bottom, Anchor::Top),
            action,
            timeline: None,
            fired: false,
            goal: 0.0,
            progress: 0.0,
        }
    }

    pub fn play_once(target: Target, start: TriggerPoint) -> Self {
        Self::new(target, start, TriggerAction::PlayOnce)
    }

    pub fn scrub(target: Target, start: TriggerPoint, end: TriggerPoint, smoothing_ms: f32, easing: Easing) -> Self {
        Self::new(
            target,
            start,
            TriggerAction::Scrub {
                smoothing_ms: smoothing_ms.max(0.0),
                easing,
            },
        )
        .end(end)
    }

    pub fn end(mut self, end: TriggerPoint) -> Self {
        self.end = end;
        self
    }

    /// Drive this timeline
    pub fn timeline(mut self, id: TimelineId) -> Self {
        self.timeline = Some(id);
        self
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Smoothed progress for scrubbed triggers
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Scroll offsets of the start and end points
    pub fn scroll_range(&self, bounds: Bounds, viewport_height: f32) -> (f32, f32) {
        (
            self.start.scroll_position(bounds, viewport_height),
            self.end.scroll_position(bounds, viewport_height),
        )
    }

    /// Record a new scroll position
    ///
    /// Returns true the first time a play-once trigger crosses its start.
    pub(crate) fn observe(&mut self, scroll_y: f32, bounds: Bounds, viewport_height: f32) -> bool {
        let (start, end) = self.scroll_range(bounds, viewport_height);
        match self.action {
            TriggerAction::PlayOnce => {
                if self.fired || scroll_y < start {
                    return false;
                }
                self.fired = true;
                true
            }
            TriggerAction::Scrub { easing, smoothing_ms } => {
                let span = end - start;
                let raw = if span.abs() <= f32::EPSILON {
                    if scroll_y >= start {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    ((scroll_y - start) / span).clamp(0.0, 1.0)
                };
                self.goal = easing.apply(raw);
                if smoothing_ms <= 0.0 {
                    self.progress = self.goal;
                }
                false
            }
        }
    }

    /// Move smoothed progress toward the scroll goal; returns the new progress
    /// when it changed
    pub(crate) fn smooth(&mut self, dt_ms: f32) -> Option<f32> {
        let TriggerAction::Scrub { smoothing_ms, .. } = self.action else {
            return None;
        };
        if (self.goal - self.progress).abs() <= 1e-4 {
            if self.progress != self.goal {
                self.progress = self.goal;
                return Some(self.progress);
            }
            return None;
        }
        let factor = if smoothing_ms <= 0.0 {
            1.0
        } else {
            (dt_ms / smoothing_ms).min(1.0)
        };
        self.progress += (self.goal - self.progress) * factor;
        Some(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trigger_points() {
        let p: TriggerPoint = "top 70%".parse().unwrap();
        assert_eq!(p, TriggerPoint::new(Anchor::Top, Anchor::Percent(70.0)));

        let p: TriggerPoint = "bottom top".parse().unwrap();
        assert_eq!(p, TriggerPoint::new(Anchor::Bottom, Anchor::Top));

        let p: TriggerPoint = "center 100px".parse().unwrap();
        assert_eq!(p.to_string(), "center 100px");
    }

    #[test]
    fn test_invalid_trigger_points() {
        for input in ["", "top", "top 70% extra", "top seventy%", "left top"] {
            let err = input.parse::<TriggerPoint>().unwrap_err();
            assert!(matches!(err, AnimationError::InvalidTriggerPoint { .. }), "{input}");
        }
    }

    #[test]
    fn test_play_once_never_replays() {
        let mut trigger = ScrollTrigger::play_once(Target::id("s"), "top 80%".parse().unwrap());
        let bounds = Bounds::new(1000.0, 400.0);
        // start = 1000 - 720 = 280
        assert!(!trigger.observe(100.0, bounds, 900.0));
        assert!(trigger.observe(300.0, bounds, 900.0));
        assert!(!trigger.observe(0.0, bounds, 900.0));
        assert!(!trigger.observe(300.0, bounds, 900.0));
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_scrub_follows_scroll_with_smoothing() {
        let mut trigger = ScrollTrigger::scrub(
            Target::id("bg"),
            "top top".parse().unwrap(),
            "bottom top".parse().unwrap(),
            2000.0,
            Easing::Linear,
        );
        let bounds = Bounds::new(0.0, 1000.0);
        trigger.observe(500.0, bounds, 900.0);
        assert_eq!(trigger.progress(), 0.0);

        // 1 second of a 2 second smoothing covers half the distance
        assert_eq!(trigger.smooth(1000.0), Some(0.25));
        assert_eq!(trigger.smooth(2000.0), Some(0.5));
        assert_eq!(trigger.smooth(16.0), None);
    }

    #[test]
    fn test_scrub_applies_cubic_ease_out() {
        let mut trigger = ScrollTrigger::scrub(
            Target::id("bg"),
            "top top".parse().unwrap(),
            "bottom top".parse().unwrap(),
            0.0,
            Easing::CUBIC_OUT,
        );
        trigger.observe(500.0, Bounds::new(0.0, 1000.0), 900.0);
        assert!((trigger.progress() - 0.875).abs() < 1e-6);
    }
}
