//! Project cards with live previews

use folio_animation::{AnimationScope, Easing, Position, Property, PropertyValues, Timeline, Tween};
use folio_core::{Event, Target};
use folio_layout::prelude::*;

use super::fade_up;
use crate::component::{scope_size, Command, Component, MountContext};
use crate::content::Project;
use crate::hover::{HoverAnimator, HoverEffect};

/// Load state of one card's preview embed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Loading,
    Loaded,
}

impl PreviewState {
    /// The embed finished loading; a loaded preview stays loaded
    pub fn on_load(self) -> Self {
        PreviewState::Loaded
    }

    pub fn is_loading(self) -> bool {
        self == PreviewState::Loading
    }
}

pub struct ProjectsSection {
    projects: Vec<Project>,
    more_url: String,
    previews: Vec<PreviewState>,
    scope: Option<AnimationScope>,
    hover: HoverAnimator,
}

/// Split `projects-card-3-live` into `(3, "live")`
fn card_part(target: &Target) -> Option<(usize, &str)> {
    let rest = target.as_str().strip_prefix("projects-card-")?;
    let (index, part) = rest.split_once('-')?;
    Some((index.parse().ok()?, part))
}

impl ProjectsSection {
    pub fn new(projects: Vec<Project>, more_url: impl Into<String>) -> Self {
        let previews = vec![PreviewState::default(); projects.len()];
        Self {
            projects,
            more_url: more_url.into(),
            previews,
            scope: None,
            hover: HoverAnimator::new(),
        }
    }

    pub fn preview_state(&self, index: usize) -> Option<PreviewState> {
        self.previews.get(index).copied()
    }

    fn card_hover() -> HoverEffect {
        HoverEffect::new(
            PropertyValues::new()
                .with(Property::Scale, 1.02)
                .with(Property::Y, -5.0),
            300.0,
            Easing::Power2Out,
        )
    }

    fn render_card(&self, i: usize, project: &Project) -> Element {
        let id = Target::indexed("projects-card", i);
        let loading = self.previews.get(i).is_some_and(|s| s.is_loading());

        let preview = div()
            .id(id.child("preview"))
            .class("project-preview")
            .h_px(240.0)
            .attr("role", "link")
            .child(
                iframe(project.preview(), project.title.as_str())
                    .id(id.child("frame"))
                    .attr("loading", "lazy")
                    .overlay(),
            )
            .child_opt(loading.then(|| {
                div()
                    .id(id.child("placeholder"))
                    .class("preview-placeholder")
                    .overlay()
                    .child(div().class("spinner"))
            }));

        div()
            .id(id.clone())
            .class("project-card")
            .child(preview)
            .child(
                div()
                    .class("project-body")
                    .child(span(project.category.as_str()).id(id.child("category")).class("category"))
                    .child(h3(project.title.as_str()).id(id.child("title")))
                    .child(p(project.description.as_str()))
                    .child(
                        div()
                            .class("project-links")
                            .child(
                                external_link(project.live_url.as_str())
                                    .id(id.child("live"))
                                    .text("Live Demo"),
                            )
                            .child(
                                external_link(project.repo_url.as_str())
                                    .id(id.child("repo"))
                                    .text("Source Code"),
                            ),
                    ),
            )
    }

    fn on_click(&self, target: &Target) -> Vec<Command> {
        if *target == Target::id("projects-more") {
            return vec![Command::open_in_new_tab(self.more_url.as_str())];
        }
        let Some((index, part)) = card_part(target) else {
            return Vec::new();
        };
        let Some(project) = self.projects.get(index) else {
            return Vec::new();
        };
        let url = match part {
            "preview" | "live" => &project.live_url,
            "repo" => &project.repo_url,
            _ => return Vec::new(),
        };
        vec![Command::open_in_new_tab(url.as_str())]
    }

    fn on_load(&mut self, target: &Target) {
        let Some((index, "frame")) = card_part(target) else {
            return;
        };
        if let Some(state) = self.previews.get_mut(index) {
            if state.is_loading() {
                tracing::debug!(card = index, "project preview loaded");
            }
            *state = state.on_load();
        }
    }
}

impl Component for ProjectsSection {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn render(&self) -> Element {
        let cards = self
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| self.render_card(i, project));

        section("projects")
            .class("projects")
            .child(
                h2("Featured Projects")
                    .id("projects-heading")
                    .class("gradient-text")
                    .style(style().background_position(0.0, 50.0)),
            )
            .child(div().id("projects-grid").class("projects-grid").children(cards))
            .child(
                external_link(self.more_url.as_str())
                    .id("projects-more")
                    .class("view-more")
                    .text("View More Projects"),
            )
    }

    fn mount(&mut self, ctx: &MountContext<'_>) {
        let mut scope = ctx.scope(self.name());
        let section = Target::id("projects");

        ctx.play_on_scroll(
            &mut scope,
            Timeline::new().with(
                Tween::from(section.clone(), fade_up(50.0))
                    .duration(1000.0)
                    .ease(Easing::Power3Out),
                Position::At(0.0),
            ),
            &section,
            "top 80%",
        );

        let heading = Target::id("projects-heading");
        ctx.play_on_scroll(
            &mut scope,
            Timeline::new().with(
                Tween::from(
                    heading.clone(),
                    PropertyValues::new().with(Property::BackgroundPositionX, 100.0),
                )
                .duration(1500.0)
                .ease(Easing::Power4Out),
                Position::At(0.0),
            ),
            &heading,
            "top 85%",
        );

        for card in ctx.family("projects-card") {
            let Some(i) = card.index_in("projects-card") else {
                continue;
            };
            let reveal = Timeline::new().with(
                Tween::from(card.clone(), fade_up(40.0))
                    .duration(800.0)
                    .delay(i as f32 * 150.0)
                    .ease(Easing::BackOut(1.2)),
                Position::At(0.0),
            );
            ctx.play_on_scroll(&mut scope, reveal, &card, "top 85%");
        }

        self.scope = Some(scope);
    }

    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        match event {
            Event::Load { target } => self.on_load(target),
            Event::Click { target: Some(target) } => return self.on_click(target),
            Event::PointerEnter { target } if target.index_in("projects-card").is_some() => {
                if let Some(scope) = self.scope.as_mut() {
                    self.hover.enter(scope, target, &Self::card_hover());
                }
            }
            Event::PointerLeave { target } if target.index_in("projects-card").is_some() => {
                if let Some(scope) = self.scope.as_mut() {
                    self.hover.leave(scope, target, &Self::card_hover());
                }
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
        self.previews.fill(PreviewState::Loading);
    }

    fn registrations(&self) -> usize {
        scope_size(&self.scope)
    }
}
