//! Browser-style events routed to page sections
//!
//! Events carry the [`Target`] they happened on. Each event also maps to a
//! numeric type from [`event_types`] so that state machines can match on it
//! without depending on the payload.

use crate::geometry::Viewport;
use crate::target::Target;

/// Numeric event type identifiers used by [`StateTransitions`](crate::StateTransitions)
pub mod event_types {
    pub const POINTER_ENTER: u32 = 1;
    pub const POINTER_LEAVE: u32 = 2;
    pub const POINTER_DOWN: u32 = 3;
    pub const POINTER_UP: u32 = 4;
    pub const POINTER_MOVE: u32 = 5;
    pub const CLICK: u32 = 6;
    pub const SCROLL: u32 = 7;
    pub const LOAD: u32 = 8;
    pub const RESIZE: u32 = 9;

    /// First id available for component-defined events
    pub const USER: u32 = 1000;
}

/// An input or lifecycle event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Pointer entered an element
    PointerEnter { target: Target },
    /// Pointer left an element
    PointerLeave { target: Target },
    /// Pointer pressed on an element
    PointerDown { target: Target },
    /// Pointer released on an element
    PointerUp { target: Target },
    /// Pointer moved inside an element
    PointerMove {
        target: Target,
        /// X relative to the element's left edge
        x: f32,
        /// Y relative to the element's top edge
        y: f32,
        /// Element width
        width: f32,
        /// Element height
        height: f32,
    },
    /// Click on an element; `None` means the click landed on no tracked element
    Click { target: Option<Target> },
    /// Document scrolled to `y`
    Scroll { y: f32 },
    /// An embedded resource (iframe, image) finished loading
    Load { target: Target },
    /// Viewport resized
    Resize { viewport: Viewport },
}

impl Event {
    /// Numeric event type
    pub fn event_type(&self) -> u32 {
        use event_types::*;
        match self {
            Event::PointerEnter { .. } => POINTER_ENTER,
            Event::PointerLeave { .. } => POINTER_LEAVE,
            Event::PointerDown { .. } => POINTER_DOWN,
            Event::PointerUp { .. } => POINTER_UP,
            Event::PointerMove { .. } => POINTER_MOVE,
            Event::Click { .. } => CLICK,
            Event::Scroll { .. } => SCROLL,
            Event::Load { .. } => LOAD,
            Event::Resize { .. } => RESIZE,
        }
    }

    /// The element this event happened on, if any
    pub fn target(&self) -> Option<&Target> {
        match self {
            Event::PointerEnter { target }
            | Event::PointerLeave { target }
            | Event::PointerDown { target }
            | Event::PointerUp { target }
            | Event::PointerMove { target, .. }
            | Event::Load { target } => Some(target),
            Event::Click { target } => target.as_ref(),
            Event::Scroll { .. } | Event::Resize { .. } => None,
        }
    }

    /// Convenience constructor for a click on an element
    pub fn click(target: impl Into<Target>) -> Self {
        Event::Click {
            target: Some(target.into()),
        }
    }

    /// Pointer-move event at `(x, y)` inside an element of the given size
    pub fn pointer_move(target: Target, x: f32, y: f32, width: f32, height: f32) -> Self {
        Event::PointerMove {
            target,
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types_are_distinct() {
        let events = [
            Event::PointerEnter { target: "a".into() },
            Event::PointerLeave { target: "a".into() },
            Event::PointerDown { target: "a".into() },
            Event::PointerUp { target: "a".into() },
            Event::pointer_move("a".into(), 0.0, 0.0, 10.0, 10.0),
            Event::click("a"),
            Event::Scroll { y: 0.0 },
            Event::Load { target: "a".into() },
            Event::Resize {
                viewport: Viewport::default(),
            },
        ];
        let mut types: Vec<u32> = events.iter().map(Event::event_type).collect();
        types.sort_unstable();
        types.dedup();
        assert_eq!(types.len(), events.len());
    }

    #[test]
    fn test_outside_click_has_no_target() {
        assert!(Event::Click { target: None }.target().is_none());
        assert_eq!(
            Event::click("nav-link-0").target(),
            Some(&Target::id("nav-link-0"))
        );
    }
}
