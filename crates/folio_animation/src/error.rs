//! Error types for folio_animation

use thiserror::Error;

use crate::scheduler::TimelineId;

/// Errors raised while building or registering animations
#[derive(Error, Debug)]
pub enum AnimationError {
    /// A trigger point string such as `"top 70%"` could not be parsed
    #[error("Invalid trigger point `{input}`: {reason}")]
    InvalidTriggerPoint { input: String, reason: &'static str },

    /// A scroll trigger referenced a timeline that is not registered
    #[error("Unknown timeline {0:?}")]
    UnknownTimeline(TimelineId),

    /// The scheduler behind a handle has been dropped
    #[error("Animation scheduler has been dropped")]
    SchedulerDropped,

    /// Manifest serialization failed
    #[error("Manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for folio_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
