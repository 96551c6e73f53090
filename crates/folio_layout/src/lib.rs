//! Folio Layout
//!
//! Describes page markup and turns it into something the animation runtime
//! can address:
//!
//! - **Element builders**: `div()`, `section()`, `h2()` ... with ids, classes and styles
//! - **Render tree**: Slotmap arena with id lookup and block-flow bounds
//! - **Styles**: Optional inline style fields that animated values overlay
//! - **HTML output**: Deterministic, escaped markup and full documents
//!
//! # Example
//!
//! ```rust
//! use folio_core::{BoundsLookup, Target, Viewport};
//! use folio_layout::prelude::*;
//!
//! let page = main_content()
//!     .id("page-content")
//!     .child(section("hero").h_screen())
//!     .child(section("about").h_px(600.0));
//!
//! let tree = RenderTree::new(page, Viewport::new(1280.0, 800.0));
//! let about = tree.bounds_of(&Target::id("about")).unwrap();
//! assert_eq!(about.top, 800.0);
//! ```

pub mod element;
pub mod html;
pub mod style;
pub mod tree;

pub use element::{Element, ElementParts, Flow, Height, Tag};
pub use html::{render_document, render_html, DocumentMeta};
pub use style::{style, ElementStyle};
pub use tree::{NodeId, RenderNode, RenderTree};

/// Everything needed to describe and lay out a page
pub mod prelude {
    pub use crate::element::{
        a, button, div, external_link, footer, h1, h2, h3, iframe, img, li, main_content, nav, p,
        section, span, ul, Element, Flow, Height, Tag,
    };
    pub use crate::style::{style, ElementStyle};
    pub use crate::tree::RenderTree;
}
