//! Folio Application
//!
//! The portfolio page and its animation orchestration:
//!
//! - **Sections**: Hero, about, tech stack, services, projects, contact, navbar and footer
//! - **Page transition**: Eight seeded glass panels that reveal the page on every route
//! - **Background**: Scene embed, particle field and a scroll-scrubbed gradient
//! - **Components**: Render, mount, handle events, unmount with no leftover registrations
//! - **App host**: Scroll, frames, commands and HTML/manifest output
//!
//! # Example
//!
//! ```rust
//! use folio_app::prelude::*;
//!
//! let mut app = FolioApp::new(SiteContent::default(), FolioConfig::default()).unwrap();
//! app.scroll(1200.0);
//! app.frame(16.0);
//! assert!(app.html().contains("id=\"projects\""));
//!
//! app.unmount();
//! assert!(app.scheduler().is_empty());
//! ```

pub mod app;
pub mod background;
pub mod component;
pub mod content;
pub mod error;
pub mod hover;
pub mod page;
pub mod particles;
pub mod sections;
pub mod transition;

pub use app::{FolioApp, FolioConfig, REQUIRED_SECTIONS};
pub use background::{Background, BackgroundConfig};
pub use component::{trigger_point, Command, Component, MountContext};
pub use content::SiteContent;
pub use error::{FolioError, Result};
pub use page::Page;
pub use transition::{PageTransition, PanelParams};

/// Commonly used types
pub mod prelude {
    pub use crate::app::{FolioApp, FolioConfig};
    pub use crate::background::BackgroundConfig;
    pub use crate::component::{Command, Component, MountContext};
    pub use crate::content::SiteContent;
    pub use crate::error::{FolioError, Result};
    pub use crate::sections::MenuState;
    pub use folio_core::{Event, Target, Viewport};
}
