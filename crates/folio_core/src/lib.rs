//! Folio Core
//!
//! Foundational primitives shared by every Folio crate:
//!
//! - **Targets**: Stable element addresses used by layout and animation
//! - **Events**: Pointer, scroll, load and resize events routed to sections
//! - **State Machines**: Small interaction FSMs (hover, menus, previews)
//! - **Geometry & Color**: Viewport/bounds math and CSS-ready colors
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Event, HoverState, StateMachine, Target};
//!
//! let card = Target::id("skills-card-0");
//! let mut hover = StateMachine::new(HoverState::Idle);
//!
//! let enter = Event::PointerEnter { target: card.clone() };
//! assert!(hover.dispatch(enter.event_type()));
//! assert_eq!(hover.state(), HoverState::Hovered);
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod target;

pub use color::Color;
pub use events::{event_types, Event};
pub use fsm::{HoverState, StateMachine, StateTransitions};
pub use geometry::{Bounds, BoundsLookup, Viewport};
pub use target::Target;
