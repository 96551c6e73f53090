//! Serializable description of registered animations
//!
//! The manifest lets a browser runtime replay the same timelines and scroll
//! triggers against the rendered HTML.

use serde::Serialize;

use crate::error::Result;
use crate::scheduler::{TimelineId, TriggerId};
use crate::scroll_trigger::{ScrollTrigger, TriggerAction};
use crate::timeline::Timeline;
use crate::tween::{Repeat, TweenKind};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationManifest {
    pub timelines: Vec<TimelineManifest>,
    pub triggers: Vec<TriggerManifest>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineManifest {
    pub id: u64,
    pub delay_ms: f32,
    /// None for endless timelines
    pub duration_ms: Option<f32>,
    pub repeat: Repeat,
    pub yoyo: bool,
    pub entries: Vec<EntryManifest>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryManifest {
    /// CSS selector of the animated element
    pub target: String,
    pub start_ms: f32,
    pub duration_ms: f32,
    pub ease: String,
    pub tween: TweenKind,
    pub repeat: Repeat,
    pub yoyo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerManifest {
    pub id: u64,
    pub trigger: String,
    pub start: String,
    pub end: String,
    /// `play` or `scrub`
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing_ms: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<u64>,
}

impl AnimationManifest {
    pub(crate) fn build<'a>(
        timelines: impl Iterator<Item = (TimelineId, &'a Timeline)>,
        triggers: impl Iterator<Item = (TriggerId, &'a ScrollTrigger)>,
    ) -> Self {
        let mut timelines: Vec<TimelineManifest> = timelines
            .map(|(id, timeline)| TimelineManifest::describe(id, timeline))
            .collect();
        timelines.sort_by_key(|t| t.id);

        let mut triggers: Vec<TriggerManifest> = triggers
            .map(|(id, trigger)| TriggerManifest::describe(id, trigger))
            .collect();
        triggers.sort_by_key(|t| t.id);

        Self {
            timelines,
            triggers,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.timelines.iter().map(|t| t.entries.len()).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TimelineManifest {
    fn describe(id: TimelineId, timeline: &Timeline) -> Self {
        let defaults = timeline.defaults_ref();
        let duration = timeline.duration();
        Self {
            id: id.to_raw(),
            delay_ms: timeline.delay_ms(),
            duration_ms: duration.is_finite().then_some(duration),
            repeat: timeline.repeat_mode(),
            yoyo: timeline.is_yoyo(),
            entries: timeline
                .entries()
                .iter()
                .map(|entry| {
                    let tween = entry.tween();
                    EntryManifest {
                        target: tween.target.selector(),
                        start_ms: entry.start_ms(),
                        duration_ms: tween.resolved_duration(defaults.duration_ms),
                        ease: tween.easing.unwrap_or(defaults.easing).name(),
                        tween: tween.kind.clone(),
                        repeat: tween.repeat,
                        yoyo: tween.yoyo,
                        label: tween.label.clone(),
                    }
                })
                .collect(),
        }
    }
}

impl TriggerManifest {
    fn describe(id: TriggerId, trigger: &ScrollTrigger) -> Self {
        let (action, smoothing_ms, ease) = match trigger.action {
            TriggerAction::PlayOnce => ("play", None, None),
            TriggerAction::Scrub {
                smoothing_ms,
                easing,
            } => ("scrub", Some(smoothing_ms), Some(easing.name())),
        };
        Self {
            id: id.to_raw(),
            trigger: trigger.target.selector(),
            start: trigger.start.to_string(),
            end: trigger.end.to_string(),
            action,
            smoothing_ms,
            ease,
            timeline: trigger.timeline.map(TimelineId::to_raw),
        }
    }
}
