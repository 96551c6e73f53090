//! Site operations behind the CLI commands

use anyhow::{Context, Result};
use folio_app::{Command, Component, FolioApp, SiteContent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{FolioProject, PreviewConfig, CONFIG_FILE};

/// Files written by a build
#[derive(Debug)]
pub struct BuildOutput {
    pub html: PathBuf,
    pub manifest: Option<PathBuf>,
    pub timelines: usize,
    pub triggers: usize,
}

/// Render the site and write `index.html` (and `animations.json`)
pub fn build(root: &Path, output: Option<&str>) -> Result<BuildOutput> {
    let project = FolioProject::load_from_dir(root)?;
    let content = project.load_content(root)?;
    let app = FolioApp::new(content, project.site.clone()).context("Failed to mount the site")?;

    let out_dir = project.output_dir(root, output);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let html = out_dir.join("index.html");
    fs::write(&html, app.html()).with_context(|| format!("Failed to write {}", html.display()))?;
    debug!("wrote {}", html.display());

    let manifest = if project.build.manifest {
        let path = out_dir.join("animations.json");
        let json = app
            .manifest_json()
            .context("Failed to serialize the animation manifest")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(BuildOutput {
        html,
        manifest,
        timelines: app.scheduler().timeline_count(),
        triggers: app.scheduler().trigger_count(),
    })
}

/// Registry state after one preview stop
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewStop {
    pub scroll_y: f32,
    pub active: bool,
    pub registrations: usize,
}

/// Outcome of a scripted preview session
#[derive(Debug)]
pub struct PreviewReport {
    pub stops: Vec<PreviewStop>,
    pub by_component: Vec<(&'static str, usize)>,
    /// Commands the session produced that a browser would carry out
    pub commands: Vec<Command>,
    /// Registrations left after unmount; anything but zero is a leak
    pub leaked: usize,
}

/// Mount, scroll through the stops, then unmount
pub fn preview(content: SiteContent, project: &FolioProject, script: &PreviewConfig) -> Result<PreviewReport> {
    let mut app = FolioApp::new(content, project.site.clone()).context("Failed to mount the site")?;
    let mut stops = Vec::with_capacity(script.scroll_stops.len());
    let mut commands = Vec::new();

    for &y in &script.scroll_stops {
        commands.extend(app.scroll(y));
        let mut active = false;
        for _ in 0..script.frames {
            active = app.frame(script.frame_ms);
        }
        let stop = PreviewStop {
            scroll_y: app.scroll_y(),
            active,
            registrations: app.registrations(),
        };
        debug!(?stop, "preview stop");
        stops.push(stop);
    }

    let by_component = app.page().registrations_by_component();
    app.unmount();
    let leaked = app.page().registrations()
        + app.scheduler().timeline_count()
        + app.scheduler().trigger_count();

    Ok(PreviewReport {
        stops,
        by_component,
        commands,
        leaked,
    })
}

/// Write `folio.toml` and `content.toml` into `root`
pub fn init(root: &Path, name: &str, force: bool) -> Result<()> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!("This directory already contains a {}", CONFIG_FILE);
    }

    let project = FolioProject::new(name);
    fs::write(&config_path, project.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let content_path = root.join(&project.build.content);
    if content_path.exists() && !force {
        info!("Keeping existing {}", content_path.display());
    } else {
        let content = toml::to_string_pretty(&SiteContent::default())
            .context("Failed to serialize site content")?;
        fs::write(&content_path, content)
            .with_context(|| format!("Failed to write {}", content_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path(), "portfolio", false).unwrap();
        dir
    }

    #[test]
    fn test_init_writes_loadable_files() {
        let dir = project_dir();
        let project = FolioProject::load_from_dir(dir.path()).unwrap();
        assert_eq!(project.project.name, "portfolio");
        assert_eq!(project.load_content(dir.path()).unwrap(), SiteContent::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = project_dir();
        assert!(init(dir.path(), "again", false).is_err());
        assert!(init(dir.path(), "again", true).is_ok());
    }

    #[test]
    fn test_build_writes_document_and_manifest() {
        let dir = project_dir();
        let output = build(dir.path(), None).unwrap();
        assert_eq!(output.html, dir.path().join("dist").join("index.html"));

        let html = fs::read_to_string(&output.html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"page-content\""));
        assert!(html.contains("Finance Tracker"));

        let manifest = output.manifest.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(manifest).unwrap()).unwrap();
        assert_eq!(json["timelines"].as_array().unwrap().len(), output.timelines);
        assert_eq!(json["triggers"].as_array().unwrap().len(), output.triggers);
    }

    #[test]
    fn test_build_output_override() {
        let dir = project_dir();
        let output = build(dir.path(), Some("public")).unwrap();
        assert!(output.html.starts_with(dir.path().join("public")));
    }

    #[test]
    fn test_preview_leaves_nothing_registered() {
        let project = FolioProject::new("portfolio");
        let script = PreviewConfig {
            scroll_stops: vec![0.0, 2000.0, 6000.0],
            frames: 30,
            frame_ms: 16.0,
        };
        let report = preview(SiteContent::default(), &project, &script).unwrap();
        assert_eq!(report.stops.len(), 3);
        assert_eq!(report.stops[1].scroll_y, 2000.0);
        // Endless decorative loops keep running
        assert!(report.stops.iter().all(|s| s.active));
        assert!(report.by_component.iter().any(|(name, _)| *name == "nav"));
        assert_eq!(report.leaked, 0);
    }
}
