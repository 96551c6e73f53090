//! Element targets
//!
//! A [`Target`] names one element by its `id` attribute. Layout nodes carry
//! targets, animation entries address them, and events report them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address of a single element, by `id`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Target the element with the given `id` (without the leading `#`)
    pub fn id(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.strip_prefix('#') {
            Some(stripped) => Self(stripped.to_string()),
            None => Self(id),
        }
    }

    /// Target an indexed child of a family, e.g. `skills-card` + 3 → `skills-card-3`
    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}-{index}"))
    }

    /// Derive a sub-element target, e.g. `about-cta-0` + `glow` → `about-cta-0-glow`
    pub fn child(&self, suffix: &str) -> Self {
        Self(format!("{}-{}", self.0, suffix))
    }

    /// The raw id value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS selector form (`#id`)
    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }

    /// Whether this target belongs to the family named by `prefix`
    ///
    /// `nav` owns `nav`, `nav-link-0`, but not `navigation`.
    pub fn is_within(&self, prefix: &str) -> bool {
        self.0 == prefix
            || (self.0.starts_with(prefix) && self.0[prefix.len()..].starts_with('-'))
    }

    /// Parse the trailing index of an indexed target with the given prefix
    pub fn index_in(&self, prefix: &str) -> Option<usize> {
        self.0
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.parse().ok())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<&str> for Target {
    fn from(id: &str) -> Self {
        Target::id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prefix_is_stripped() {
        assert_eq!(Target::id("#page-content"), Target::id("page-content"));
        assert_eq!(Target::id("page-content").selector(), "#page-content");
    }

    #[test]
    fn test_family_membership() {
        let link = Target::id("nav-link-2");
        assert!(link.is_within("nav"));
        assert!(link.is_within("nav-link"));
        assert!(!Target::id("navigation").is_within("nav"));
        assert!(Target::id("nav").is_within("nav"));
    }

    #[test]
    fn test_index_parsing() {
        let card = Target::indexed("projects-card", 4);
        assert_eq!(card.as_str(), "projects-card-4");
        assert_eq!(card.index_in("projects-card"), Some(4));
        assert_eq!(card.child("preview").index_in("projects-card"), None);
        assert_eq!(Target::id("projects-heading").index_in("projects-card"), None);
    }
}
