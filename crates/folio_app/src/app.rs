//! Application host
//!
//! [`FolioApp`] owns the animation scheduler, the page and the current render
//! tree. It plays the role of the browser: it feeds scroll positions and
//! input events in, advances animation frames, and carries out the commands
//! components hand back (scroll locking, in-page anchors and route changes).

use folio_animation::{AnimationManifest, AnimationScheduler};
use folio_core::{BoundsLookup, Event, Target, Viewport};
use folio_layout::{render_document, DocumentMeta, RenderTree};
use serde::{Deserialize, Serialize};

use crate::background::BackgroundConfig;
use crate::component::{Command, Component, MountContext};
use crate::content::SiteContent;
use crate::error::{FolioError, Result};
use crate::page::Page;
use crate::transition::{PageTransition, PANEL_COUNT, PAGE_CONTENT};

/// Elements strict mode requires in the rendered page
pub const REQUIRED_SECTIONS: [&str; 8] = [
    "nav", "hero", "about", "skills", "services", "projects", "contact", "footer",
];

/// Runtime options for the site
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Seed for particles and transition panels
    pub seed: u64,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fail instead of skipping when a structural element is missing
    pub strict: bool,
    /// Stylesheets linked from the document head
    pub stylesheets: Vec<String>,
    pub background: BackgroundConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            seed: 0x5eed,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            strict: false,
            stylesheets: vec!["styles.css".to_string()],
            background: BackgroundConfig::default(),
        }
    }
}

impl FolioConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }
}

pub struct FolioApp {
    content: SiteContent,
    config: FolioConfig,
    scheduler: AnimationScheduler,
    page: Page,
    tree: RenderTree,
    viewport: Viewport,
    route: String,
    scroll_locked: bool,
    mounted: bool,
}

impl FolioApp {
    /// Render the page and mount every component
    pub fn new(content: SiteContent, config: FolioConfig) -> Result<Self> {
        let viewport = config.viewport();
        let page = Page::new(&content, config.background.clone(), config.seed);
        let tree = RenderTree::new(page.render(), viewport);
        if config.strict {
            Self::check_structure(&tree)?;
        }

        let mut app = Self {
            content,
            config,
            scheduler: AnimationScheduler::new(),
            page,
            tree,
            viewport,
            route: "/".to_string(),
            scroll_locked: false,
            mounted: false,
        };
        app.mount();
        Ok(app)
    }

    fn check_structure(tree: &RenderTree) -> Result<()> {
        let required = REQUIRED_SECTIONS
            .iter()
            .chain(std::iter::once(&PAGE_CONTENT))
            .map(|id| Target::id(*id))
            .chain((0..PANEL_COUNT).map(PageTransition::panel));
        for target in required {
            if !tree.contains(&target) {
                return Err(FolioError::MissingTarget(target.to_string()));
            }
        }
        Ok(())
    }

    fn mount(&mut self) {
        let ctx = MountContext::new(self.scheduler.handle(), &self.tree);
        self.page.mount(&ctx);
        self.mounted = true;
        self.sync_scroll();
        tracing::info!(
            timelines = self.scheduler.timeline_count(),
            triggers = self.scheduler.trigger_count(),
            "site mounted"
        );
    }

    /// Tear every component down; the registry is empty afterwards
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.page.unmount();
        self.mounted = false;
        self.scroll_locked = false;
        tracing::debug!("site unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advance animations by `dt_ms` and refresh the tree
    ///
    /// Returns true while any timeline is still playing.
    pub fn frame(&mut self, dt_ms: f32) -> bool {
        let active = self.scheduler.advance(dt_ms);
        for event in self.scheduler.drain_events() {
            tracing::trace!(label = %event.label, "animation event");
            self.page.on_animation_event(&event);
        }
        self.rebuild();
        active
    }

    /// Re-render and overlay the current animated values
    fn rebuild(&mut self) {
        self.tree = RenderTree::new(self.page.render(), self.viewport);
        let snapshot = self.scheduler.snapshot();
        self.tree
            .apply_values(snapshot.iter().map(|(target, values)| (target, values)));
    }

    /// Scroll the document; ignored while body scrolling is locked
    pub fn scroll(&mut self, y: f32) -> Vec<Command> {
        if self.scroll_locked {
            tracing::debug!(y, "scroll ignored while locked");
            return Vec::new();
        }
        let y = y.max(0.0);
        self.scheduler.update_scroll(y, self.viewport, &self.tree);
        self.dispatch(Event::Scroll { y })
    }

    fn sync_scroll(&mut self) {
        let y = self.scheduler.scroll_y();
        self.scheduler.update_scroll(y, self.viewport, &self.tree);
    }

    /// Route an input event to every component and apply their commands
    ///
    /// Commands the host cannot carry out itself (opening URLs, downloads,
    /// off-site navigation) are returned to the caller.
    pub fn dispatch(&mut self, event: Event) -> Vec<Command> {
        if let Event::Resize { viewport } = event {
            self.viewport = viewport;
        }
        let commands = self.page.handle_event(&event);
        self.rebuild();
        if matches!(event, Event::Resize { .. }) {
            self.sync_scroll();
        }

        let mut external = Vec::new();
        for command in commands {
            match command {
                Command::LockBodyScroll(locked) => {
                    self.scroll_locked = locked;
                    external.push(Command::LockBodyScroll(locked));
                }
                Command::Navigate(href) if href.starts_with('#') => {
                    self.scroll_to_anchor(&href[1..]);
                }
                Command::Navigate(href) if href.starts_with('/') => {
                    self.navigate(&href);
                }
                other => external.push(other),
            }
        }
        external
    }

    fn scroll_to_anchor(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }
        match self.tree.bounds_of(&Target::id(id)) {
            Some(bounds) => {
                self.scroll(bounds.top);
            }
            None => tracing::debug!(anchor = id, "anchor not rendered"),
        }
    }

    /// Change route: replay the page transition and jump to the section
    /// named by the route, or to the top
    pub fn navigate(&mut self, route: &str) {
        tracing::debug!(from = %self.route, to = route, "navigate");
        self.route = route.to_string();
        self.page.navbar_mut().close_menu();
        self.scroll_locked = false;

        let transition = self.page.transition_mut();
        transition.unmount();
        self.rebuild();
        let ctx = MountContext::new(self.scheduler.handle(), &self.tree);
        self.page.transition_mut().mount(&ctx);

        let section = route.trim_matches('/');
        if section.is_empty() || !self.tree.contains(&Target::id(section)) {
            self.scroll(0.0);
        } else {
            self.scroll_to_anchor(section);
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn scroll_y(&self) -> f32 {
        self.scheduler.scroll_y()
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Live timeline and trigger registrations across all components
    pub fn registrations(&self) -> usize {
        self.page.registrations()
    }

    /// The current tree as a complete HTML document
    pub fn html(&self) -> String {
        let site = &self.content.site;
        let meta = DocumentMeta {
            title: site.title.clone(),
            description: site.description.clone(),
            lang: site.lang.clone(),
            stylesheets: self.config.stylesheets.clone(),
        };
        render_document(&self.tree, &meta)
    }

    /// Everything currently registered, for a browser runtime to replay
    pub fn manifest(&self) -> AnimationManifest {
        self.scheduler.manifest()
    }

    /// The manifest as pretty-printed JSON
    pub fn manifest_json(&self) -> Result<String> {
        Ok(self.manifest().to_json_pretty()?)
    }
}

impl Drop for FolioApp {
    fn drop(&mut self) {
        self.unmount();
    }
}
