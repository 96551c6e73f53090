//! Navigation bar and mobile menu
//!
//! The mobile menu is a two-state machine. The toggle flips it; any link,
//! the logo, a resume download or a click outside the navigation closes it.
//! Every change of the menu state locks or unlocks document scrolling.
//!
//! The bar hides while scrolling down past [`HIDE_AFTER_PX`] and comes back
//! on any upward scroll, but never hides while the menu is open.

use folio_animation::{
    AnimationScope, Easing, Position, Property, PropertyValues, SpringConfig, StaggerConfig,
    Timeline, TimelineId, Tween,
};
use folio_core::event_types::USER;
use folio_core::{Event, StateMachine, StateTransitions, Target};
use folio_layout::prelude::*;

use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::{Link, NavContent, SiteMeta};
use crate::hover::{HoverAnimator, HoverEffect, HoverTiming};

/// Scroll offset after which the bar turns opaque
pub const SCROLLED_AFTER_PX: f32 = 10.0;
/// Scroll offset after which scrolling down hides the bar
pub const HIDE_AFTER_PX: f32 = 80.0;

const SLIDE_CHANNEL: &str = "slide";
const WIGGLE_CHANNEL: &str = "wiggle";

/// Mobile menu state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub const TOGGLE: u32 = USER;
    pub const CLOSE: u32 = USER + 1;

    pub fn is_open(&self) -> bool {
        *self == MenuState::Open
    }
}

impl StateTransitions for MenuState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (MenuState::Closed, MenuState::TOGGLE) => Some(MenuState::Open),
            (MenuState::Open, MenuState::TOGGLE) => Some(MenuState::Closed),
            (MenuState::Open, MenuState::CLOSE) => Some(MenuState::Closed),
            _ => None,
        }
    }
}

pub struct Navbar {
    content: NavContent,
    resume_href: String,
    resume_filename: String,
    menu: StateMachine<MenuState>,
    scrolled: bool,
    hidden: bool,
    last_scroll_y: f32,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
    menu_items: Option<TimelineId>,
}

impl Navbar {
    pub fn new(content: NavContent, site: &SiteMeta) -> Self {
        Self {
            content,
            resume_href: site.resume_href.clone(),
            resume_filename: site.resume_filename.clone(),
            menu: StateMachine::new(MenuState::Closed),
            scrolled: false,
            hidden: false,
            last_scroll_y: 0.0,
            scope: None,
            hover: HoverAnimator::new(),
            menu_items: None,
        }
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn link_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new().with(Property::Scale, 1.05),
            300.0,
            Easing::Power2Out,
        )
    }

    fn social_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new()
                .with(Property::Y, -3.0)
                .with(Property::Scale, 1.2),
            300.0,
            Easing::Power2Out,
        )
    }

    fn mobile_items(&self) -> Vec<Target> {
        (0..self.content.links.len())
            .map(|i| Target::indexed("nav-mobile-link", i))
            .chain(std::iter::once(Target::id("nav-mobile-resume")))
            .collect()
    }

    fn download(&self) -> Command {
        Command::Download {
            href: self.resume_href.clone(),
            filename: self.resume_filename.clone(),
        }
    }

    /// Feed the menu machine; returns the scroll lock command on a change
    fn dispatch_menu(&mut self, event: u32) -> Option<Command> {
        if !self.menu.dispatch(event) {
            return None;
        }
        let open = self.menu.state().is_open();
        tracing::debug!(open, "mobile menu");
        if open {
            self.open_menu();
        } else if let (Some(id), Some(scope)) = (self.menu_items.take(), self.scope.as_mut()) {
            scope.kill(id);
        }
        Some(Command::LockBodyScroll(open))
    }

    fn open_menu(&mut self) {
        if self.hidden {
            self.set_hidden(false);
        }
        let items = self.mobile_items();
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let spring = SpringConfig::new(100.0, 10.0, 1.0);
        let mut tl = Timeline::new();
        tl.add_staggered(
            Tween::from(
                "nav-mobile-link",
                PropertyValues::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::X, 50.0),
            )
            .duration(spring.settle_duration_ms())
            .ease(Easing::Spring(spring)),
            &items,
            StaggerConfig::new(100.0),
            Position::At(200.0),
        );
        self.menu_items = scope.timeline(tl);
    }

    fn set_hidden(&mut self, hidden: bool) {
        if self.hidden == hidden {
            return;
        }
        self.hidden = hidden;
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let offset = if hidden { -100.0 } else { 0.0 };
        self.hover.animate(
            scope,
            &Target::id("nav"),
            SLIDE_CHANNEL,
            PropertyValues::new().with(Property::YPercent, offset),
            HoverTiming::new(300.0, Easing::Power2Out),
        );
    }

    fn on_scroll(&mut self, y: f32) {
        self.scrolled = y > SCROLLED_AFTER_PX;
        let delta = y - self.last_scroll_y;
        self.last_scroll_y = y;

        if self.menu.state().is_open() {
            self.set_hidden(false);
        } else if delta > 0.0 && y > HIDE_AFTER_PX {
            self.set_hidden(true);
        } else if delta < 0.0 {
            self.set_hidden(false);
        }
    }

    fn link_href(links: &[Link], target: &Target, prefix: &str) -> Option<String> {
        let index = target.index_in(prefix)?;
        links.get(index).map(|l| l.href.clone())
    }

    fn on_click(&mut self, target: Option<&Target>) -> Vec<Command> {
        let Some(target) = target else {
            return self.dispatch_menu(MenuState::CLOSE).into_iter().collect();
        };

        if *target == Target::id("nav-toggle") {
            return self.dispatch_menu(MenuState::TOGGLE).into_iter().collect();
        }
        let action = if let Some(href) = Self::link_href(&self.content.links, target, "nav-mobile-link")
            .or_else(|| Self::link_href(&self.content.links, target, "nav-link"))
        {
            Command::Navigate(href)
        } else if *target == Target::id("nav-mobile-resume") || *target == Target::id("nav-resume") {
            self.download()
        } else if target.is_within("nav-logo") {
            Command::Navigate("/".to_string())
        } else if !target.is_within("nav") {
            return self.close_menu().into_iter().collect();
        } else {
            return Vec::new();
        };

        // Every control closes the menu before it acts
        let mut commands: Vec<Command> = self.close_menu().into_iter().collect();
        commands.push(action);
        commands
    }

    /// Close the mobile menu; returns the unlock command if it was open
    pub fn close_menu(&mut self) -> Option<Command> {
        self.dispatch_menu(MenuState::CLOSE)
    }

    fn logo_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new().with(Property::Scale, 1.05),
            300.0,
            Easing::Power2Out,
        )
    }

    /// Glyph wiggle: 0, 10, -10, 0 degrees over half a second
    fn wiggle_logo(&mut self) {
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let glyph = Target::id("nav-logo").child("glyph");
        let mut tl = Timeline::new();
        for angle in [10.0, -10.0, 0.0] {
            tl.add(
                Tween::to(glyph.clone(), PropertyValues::new().with(Property::Rotate, angle))
                    .duration(500.0 / 3.0)
                    .ease(Easing::EASE_OUT),
                Position::End,
            );
        }
        self.hover.play(scope, &glyph, WIGGLE_CHANNEL, tl);
    }

    fn on_pointer(&mut self, event: &Event, target: &Target) {
        let entering = matches!(event, Event::PointerEnter { .. });
        let effect = if target.index_in("nav-link").is_some() {
            Self::link_hover()
        } else if target.index_in("nav-social").is_some() {
            Self::social_hover()
        } else if *target == Target::id("nav-logo") {
            Self::logo_hover()
        } else {
            return;
        };
        let Some(scope) = self.scope.as_mut() else {
            return;
        };
        let changed = if entering {
            self.hover.enter(scope, target, &effect)
        } else {
            self.hover.leave(scope, target, &effect)
        };
        if changed && entering && *target == Target::id("nav-logo") {
            self.wiggle_logo();
        }
    }

    fn render_logo(&self) -> Element {
        let id = Target::id("nav-logo");
        let hovered = self.hover.is_hovered(&id);
        a("/")
            .id(id.clone())
            .class("logo")
            .child(span("</>").id(id.child("glyph")).class("logo-glyph"))
            .child(span(self.content.logo.as_str()))
            .child_opt(hovered.then(|| span("").id(id.child("underline")).class("underline")))
    }

    fn render_links(&self) -> Element {
        let links = self.content.links.iter().enumerate().map(|(i, link)| {
            let id = Target::indexed("nav-link", i);
            let hovered = self.hover.is_hovered(&id);
            li().child(
                a(link.href.as_str())
                    .id(id.clone())
                    .class("nav-link")
                    .text(link.label.as_str())
                    .child_opt(hovered.then(|| span("").id(id.child("underline")).class("underline"))),
            )
        });
        ul().class("nav-links desktop").children(links)
    }

    fn render_socials(&self) -> Element {
        let socials = self.content.socials.iter().enumerate().map(|(i, link)| {
            external_link(link.href.as_str())
                .id(Target::indexed("nav-social", i))
                .class("nav-social")
                .aria_label(&link.label)
        });
        div().class("nav-socials desktop").children(socials)
    }

    fn render_mobile_menu(&self) -> Element {
        let links = self.content.links.iter().enumerate().map(|(i, link)| {
            li().child(
                a(link.href.as_str())
                    .id(Target::indexed("nav-mobile-link", i))
                    .class("mobile-link")
                    .text(link.label.as_str()),
            )
        });
        div()
            .id("nav-mobile")
            .class("mobile-menu")
            .overlay()
            .h_screen()
            .child(ul().children(links))
            .child(
                button()
                    .id("nav-mobile-resume")
                    .class("resume-button")
                    .text(self.content.resume_label.as_str()),
            )
    }
}

impl Component for Navbar {
    fn name(&self) -> &'static str {
        "nav"
    }

    fn render(&self) -> Element {
        let open = self.menu.state().is_open();
        nav()
            .id("nav")
            .class("navbar")
            .when(self.scrolled, |n| n.class("scrolled"))
            .when(self.hidden, |n| n.class("hidden"))
            .overlay()
            .child(self.render_logo())
            .child(self.render_links())
            .child(self.render_socials())
            .child(
                button()
                    .id("nav-resume")
                    .class("resume-button desktop")
                    .text(self.content.resume_label.as_str()),
            )
            .child(
                button()
                    .id("nav-toggle")
                    .class("menu-toggle")
                    .aria_label(if open { "Close menu" } else { "Open menu" })
                    .attr("aria-expanded", open.to_string()),
            )
            .child_opt(open.then(|| self.render_mobile_menu()))
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        ctx.timeline(
            &mut scope,
            Timeline::new().with(
                Tween::from(
                    "nav",
                    PropertyValues::new()
                        .with(Property::Y, -20.0)
                        .with(Property::Opacity, 0.0),
                )
                .duration(500.0)
                .ease(Easing::EASE_OUT),
                Position::At(0.0),
            ),
        );
        self.scope = Some(scope);
        if self.menu.state().is_open() {
            self.open_menu();
        }
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        match event {
            Event::Click { target } => return self.on_click(target.as_ref()),
            Event::Scroll { y } => self.on_scroll(*y),
            Event::PointerEnter { target } | Event::PointerLeave { target } => {
                self.on_pointer(event, target)
            }
            _ => {}
        }
        Vec::new()
    }

    fn unmount(&mut self) {
        if let Some(mut scope) = self.scope.take() {
            scope.kill_all();
        }
        self.hover.reset();
        self.menu_items = None;
        self.hidden = false;
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}
