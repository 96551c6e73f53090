//! Viewport and element bounds

use serde::{Deserialize, Serialize};

/// Visible browser area
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Below the `md` breakpoint the navigation collapses into the mobile menu
    pub fn is_mobile(&self) -> bool {
        self.width < 768.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440.0, 900.0)
    }
}

/// Vertical document-space extent of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Distance from the top of the document
    pub top: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> f32 {
        self.top + self.height * 0.5
    }
}

/// Resolves the document-space bounds of a target
///
/// Scroll triggers consult this each scroll update. A target without bounds
/// is treated as absent and its trigger is skipped.
pub trait BoundsLookup {
    fn bounds_of(&self, target: &crate::Target) -> Option<Bounds>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(100.0, 50.0);
        assert_eq!(b.bottom(), 150.0);
        assert_eq!(b.center(), 125.0);
    }

    #[test]
    fn test_mobile_breakpoint() {
        assert!(Viewport::new(390.0, 844.0).is_mobile());
        assert!(!Viewport::default().is_mobile());
    }
}
