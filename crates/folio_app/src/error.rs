//! Error types for folio_app

use std::path::PathBuf;

use folio_animation::AnimationError;
use thiserror::Error;

/// Errors that can occur while building the site
#[derive(Error, Debug)]
pub enum FolioError {
    /// Reading a content or config file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A content file is not valid TOML for [`SiteContent`](crate::SiteContent)
    #[error("Invalid site content: {0}")]
    Content(#[from] toml::de::Error),

    /// The animation manifest could not be serialized
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Strict mode: an animation names an element that was not rendered
    #[error("Animated element `{0}` is not rendered")]
    MissingTarget(String),
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, FolioError>;
