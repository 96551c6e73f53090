//! Interaction state machines
//!
//! Sections describe their transient UI state as small enums and map
//! numeric events to transitions:
//!
//! ```rust
//! use folio_core::event_types::*;
//! use folio_core::{StateMachine, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Tab {
//!     About,
//!     Skills,
//! }
//!
//! const SHOW_SKILLS: u32 = USER;
//! const SHOW_ABOUT: u32 = USER + 1;
//!
//! impl StateTransitions for Tab {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Tab::About, SHOW_SKILLS) => Some(Tab::Skills),
//!             (Tab::Skills, SHOW_ABOUT) => Some(Tab::About),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut tab = StateMachine::new(Tab::About);
//! assert!(tab.dispatch(SHOW_SKILLS));
//! assert!(!tab.dispatch(SHOW_SKILLS));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::event_types::*;

/// A finite set of presentation modes with event-driven transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Current state plus transition bookkeeping
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    state: S,
    initial: S,
    transitions: u32,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            initial,
            transitions: 0,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Feed an event; returns true when the state changed
    pub fn dispatch(&mut self, event: u32) -> bool {
        match self.state.on_event(event) {
            Some(next) if next != self.state => {
                tracing::trace!(from = ?self.state, to = ?next, event, "state transition");
                self.state = next;
                self.transitions += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of transitions taken since creation or the last reset
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    /// Return to the initial state (used on remount)
    pub fn reset(&mut self) {
        self.state = self.initial;
        self.transitions = 0;
    }
}

/// Pointer hover state shared by cards, links and buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

impl StateTransitions for HoverState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (HoverState::Idle, POINTER_ENTER) => Some(HoverState::Hovered),
            (HoverState::Hovered, POINTER_LEAVE) => Some(HoverState::Idle),
            (HoverState::Hovered, POINTER_DOWN) => Some(HoverState::Pressed),
            // Touch: no hover first
            (HoverState::Idle, POINTER_DOWN) => Some(HoverState::Pressed),
            (HoverState::Pressed, POINTER_UP) => Some(HoverState::Hovered),
            (HoverState::Pressed, POINTER_LEAVE) => Some(HoverState::Idle),
            _ => None,
        }
    }
}

impl HoverState {
    pub fn is_active(&self) -> bool {
        !matches!(self, HoverState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_round_trip() {
        let mut hover = StateMachine::new(HoverState::Idle);
        assert!(hover.dispatch(POINTER_ENTER));
        assert!(hover.dispatch(POINTER_DOWN));
        assert!(hover.dispatch(POINTER_UP));
        assert!(hover.dispatch(POINTER_LEAVE));
        assert_eq!(hover.state(), HoverState::Idle);
        assert_eq!(hover.transition_count(), 4);
    }

    #[test]
    fn test_irrelevant_events_are_ignored() {
        let mut hover = StateMachine::new(HoverState::Idle);
        assert!(!hover.dispatch(POINTER_LEAVE));
        assert!(!hover.dispatch(SCROLL));
        assert_eq!(hover.transition_count(), 0);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut hover = StateMachine::new(HoverState::Idle);
        hover.dispatch(POINTER_ENTER);
        hover.reset();
        assert_eq!(hover.state(), HoverState::Idle);
        assert_eq!(hover.transition_count(), 0);
    }
}
