//! The whole page as one component
//!
//! The page owns every section and forwards lifecycle calls and events to
//! each of them. Sections never talk to each other; the page only composes
//! their subtrees into one document:
//!
//! ```text
//! #app
//! ├── #background          (overlay)
//! ├── #page-transition     (overlay)
//! ├── #nav                 (overlay)
//! └── #page-content
//!     ├── main: hero, about, skills, services, projects, contact
//!     └── #footer
//! ```

use folio_animation::AnimationEvent;
use folio_core::Event;
use folio_layout::prelude::*;

use crate::background::{Background, BackgroundConfig};
use crate::component::{Command, Component, MountContext};
use crate::content::SiteContent;
use crate::sections::{
    AboutSection, ContactSection, FooterSection, HeroSection, Navbar, ProjectsSection,
    ServicesSection, SkillsSection,
};
use crate::transition::{PageTransition, PAGE_CONTENT};

pub struct Page {
    transition: PageTransition,
    background: Background,
    navbar: Navbar,
    hero: HeroSection,
    about: AboutSection,
    skills: SkillsSection,
    services: ServicesSection,
    projects: ProjectsSection,
    contact: ContactSection,
    footer: FooterSection,
}

impl Page {
    pub fn new(content: &SiteContent, background: BackgroundConfig, seed: u64) -> Self {
        Self {
            transition: PageTransition::new(seed),
            background: Background::new(background, seed),
            navbar: Navbar::new(content.nav.clone(), &content.site),
            hero: HeroSection::new(content.hero.clone()),
            about: AboutSection::new(content.about.clone(), &content.site, seed),
            skills: SkillsSection::new(content.skills.clone()),
            services: ServicesSection::new(content.services.clone()),
            projects: ProjectsSection::new(
                content.projects.clone(),
                content.projects_more_url.as_str(),
            ),
            contact: ContactSection::new(content.contact.clone(), seed),
            footer: FooterSection::new(content.footer.clone(), seed),
        }
    }

    pub fn transition(&self) -> &PageTransition {
        &self.transition
    }

    pub fn transition_mut(&mut self) -> &mut PageTransition {
        &mut self.transition
    }

    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn navbar_mut(&mut self) -> &mut Navbar {
        &mut self.navbar
    }

    pub fn projects(&self) -> &ProjectsSection {
        &self.projects
    }

    pub fn about(&self) -> &AboutSection {
        &self.about
    }

    /// Every component, in mount order
    fn components(&self) -> [&dyn Component; 10] {
        [
            &self.transition,
            &self.background,
            &self.navbar,
            &self.hero,
            &self.about,
            &self.skills,
            &self.services,
            &self.projects,
            &self.contact,
            &self.footer,
        ]
    }

    fn components_mut(&mut self) -> [&mut dyn Component; 10] {
        [
            &mut self.transition,
            &mut self.background,
            &mut self.navbar,
            &mut self.hero,
            &mut self.about,
            &mut self.skills,
            &mut self.services,
            &mut self.projects,
            &mut self.contact,
            &mut self.footer,
        ]
    }

    /// Live registrations per component, for diagnostics
    pub fn registrations_by_component(&self) -> Vec<(&'static str, usize)> {
        self.components()
            .iter()
            .map(|c| (c.name(), c.registrations()))
            .collect()
    }
}

impl Component for Page {
    fn name(&self) -> &'static str {
        "page"
    }

    fn render(&self) -> Element {
        div()
            .id("app")
            .class("app")
            .child(self.background.render())
            .child(self.transition.render())
            .child(self.navbar.render())
            .child(
                div()
                    .id(PAGE_CONTENT)
                    .child(
                        main_content()
                            .child(self.hero.render())
                            .child(self.about.render())
                            .child(self.skills.render())
                            .child(self.services.render())
                            .child(self.projects.render())
                            .child(self.contact.render()),
                    )
                    .child(self.footer.render()),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        for component in self.components_mut() {
            component.mount(ctx);
        }
        tracing::debug!(registrations = self.registrations(), "page mounted");
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        self.components_mut()
            .into_iter()
            .flat_map(|component| component.handle_event(event))
            .collect()
    }

    fn on_animation_event(&mut self, event: &AnimationEvent) {
        for component in self.components_mut() {
            component.on_animation_event(event);
        }
    }

    fn unmount(&mut self) {
        for component in self.components_mut() {
            component.unmount();
        }
        tracing::debug!("page unmounted");
    }

    fn registrations(&self) -> usize {
        self.components().iter().map(|c| c.registrations()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::AnimationScheduler;
    use folio_core::{Target, Viewport};

    fn page() -> Page {
        Page::new(&SiteContent::default(), BackgroundConfig::default(), 11)
    }

    #[test]
    fn test_every_section_is_rendered() {
        let tree = RenderTree::new(page().render(), Viewport::default());
        for id in [
            "background", "page-transition", "nav", PAGE_CONTENT, "hero", "about", "skills",
            "services", "projects", "contact", "footer",
        ] {
            assert!(tree.contains(&Target::id(id)), "missing #{id}");
        }
        assert_eq!(tree.indexed_targets("transition-panel").len(), 8);
        assert_eq!(tree.indexed_targets("projects-card").len(), 5);
        assert_eq!(tree.indexed_targets("skills-card").len(), 17);
    }

    #[test]
    fn test_sections_stack_in_document_order() {
        let tree = RenderTree::new(page().render(), Viewport::default());
        let top = |id: &str| tree.get(&Target::id(id)).map(|n| n.bounds().top).unwrap_or(-1.0);
        assert_eq!(top("hero"), 0.0);
        assert!(top("about") >= 900.0);
        assert!(top("skills") > top("about"));
        assert!(top("footer") > top("contact"));
        // Overlays take no space
        assert_eq!(top("nav"), 0.0);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let scheduler = AnimationScheduler::new();
        let mut page = page();
        let tree = RenderTree::new(page.render(), Viewport::default());
        page.mount(&MountContext::new(scheduler.handle(), &tree));
        assert!(page.registrations() > 0);
        assert!(page
            .registrations_by_component()
            .iter()
            .all(|(_, count)| *count > 0));

        page.unmount();
        assert_eq!(page.registrations(), 0);
        assert!(scheduler.is_empty());
    }
}
