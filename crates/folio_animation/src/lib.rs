//! Folio Animation System
//!
//! Declarative animation scheduling for the portfolio sections:
//!
//! - **Easing**: Web-style curves (`power3.out`, `back.out`, `elastic.out`, bezier, spring)
//! - **Tweens**: One target, property deltas, timing, repeat and yoyo
//! - **Timelines**: Ordered tweens with relative positions and staggers
//! - **Scroll Triggers**: Play-once and scrubbed animations tied to scroll position
//! - **Scheduler**: Explicitly ticked registry with per-component [`AnimationScope`]s
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{
//!     AnimationScheduler, AnimationScope, Easing, Position, Property, PropertyValues,
//!     StaggerConfig, Timeline, Tween,
//! };
//! use folio_core::Target;
//!
//! let scheduler = AnimationScheduler::new();
//! let mut scope = AnimationScope::new(scheduler.handle(), "skills");
//!
//! let cards: Vec<Target> = (0..3).map(|i| Target::indexed("skills-card", i)).collect();
//! let mut timeline = Timeline::new().defaults(600.0, Easing::Power3Out);
//! timeline.add_staggered(
//!     Tween::from("skills-card", PropertyValues::new().with(Property::Opacity, 0.0)),
//!     &cards,
//!     StaggerConfig::new(100.0),
//!     Position::End,
//! );
//! scope.timeline(timeline);
//!
//! scheduler.advance(1000.0);
//! assert_eq!(scheduler.value(&cards[2], Property::Opacity), 1.0);
//!
//! scope.kill_all();
//! assert!(scheduler.is_empty());
//! ```

pub mod easing;
pub mod error;
pub mod manifest;
pub mod property;
pub mod scheduler;
pub mod scroll_trigger;
pub mod spring;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use manifest::{AnimationManifest, EntryManifest, TimelineManifest, TriggerManifest};
pub use property::{Property, PropertyStore, PropertyValues};
pub use scheduler::{
    AnimationEvent, AnimationScheduler, AnimationScope, SchedulerHandle, TimelineId, TriggerId,
};
pub use scroll_trigger::{Anchor, ScrollTrigger, TriggerAction, TriggerPoint};
pub use spring::{Spring, SpringConfig};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use timeline::{Completion, PlayState, Position, Timeline, TimelineDefaults, TimelineEntry};
pub use tween::{Repeat, Tween, TweenKind};
