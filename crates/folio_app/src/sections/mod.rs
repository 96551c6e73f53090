//! Page sections
//!
//! Element ids follow one scheme so animations, events and tests can find
//! things: the section id is the family prefix (`skills`), indexed children
//! use [`Target::indexed`](folio_core::Target::indexed) (`skills-card-3`) and sub-elements use
//! [`Target::child`](folio_core::Target::child) (`projects-card-0-preview`).

pub mod about;
pub mod contact;
pub mod footer;
pub mod hero;
pub mod navbar;
pub mod projects;
pub mod services;
pub mod skills;

pub use about::{AboutSection, AboutTab};
pub use contact::ContactSection;
pub use footer::FooterSection;
pub use hero::HeroSection;
pub use navbar::{MenuState, Navbar};
pub use projects::{PreviewState, ProjectsSection};
pub use services::ServicesSection;
pub use skills::SkillsSection;

use folio_animation::{Property, PropertyValues};

/// Hidden and offset vertically; the usual `from` of an entrance
pub(crate) fn fade_up(y: f32) -> PropertyValues {
    PropertyValues::new()
        .with(Property::Opacity, 0.0)
        .with(Property::Y, y)
}

/// Hover lift used by cards: scale plus glow
pub(crate) fn card_glow(scale: f32, glow: f32) -> PropertyValues {
    PropertyValues::new()
        .with(Property::Scale, scale)
        .with(Property::GlowOpacity, glow)
}

#[cfg(test)]
pub(crate) mod test_support {
    use folio_animation::{AnimationScheduler, Property};
    use folio_core::{Target, Viewport};
    use folio_layout::RenderTree;

    use crate::component::{Component, MountContext};

    /// Render a component on its own and mount it
    pub fn mount(component: &mut dyn Component, scheduler: &AnimationScheduler) -> RenderTree {
        let tree = RenderTree::new(component.render(), Viewport::default());
        component.mount(&MountContext::new(scheduler.handle(), &tree));
        tree
    }

    /// Scroll far enough that every play-once trigger fires, then settle
    pub fn reveal(scheduler: &AnimationScheduler, tree: &RenderTree) {
        let bottom = tree
            .node(tree.root())
            .map(|n| n.bounds().bottom())
            .unwrap_or(0.0);
        scheduler.update_scroll(bottom, tree.viewport(), tree);
        for _ in 0..100 {
            scheduler.advance(100.0);
        }
    }

    pub fn opacity(scheduler: &AnimationScheduler, id: &str) -> f32 {
        scheduler.value(&Target::id(id), Property::Opacity)
    }
}
