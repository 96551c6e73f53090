//! Folio project configuration
//!
//! A site directory holds two files:
//! - `folio.toml` - Project settings (build output, preview script, runtime options)
//! - `content.toml` - Site copy; optional, built-in content is used when it is missing

use anyhow::{Context, Result};
use folio_app::{FolioConfig, SiteContent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "folio.toml";

/// Project configuration stored in folio.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct FolioProject {
    pub project: ProjectMetadata,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Runtime options handed to the app
    #[serde(default)]
    pub site: FolioConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Build configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Site content file (relative to the project root)
    #[serde(default = "default_content")]
    pub content: String,
    /// Output directory
    #[serde(default = "default_output")]
    pub output: String,
    /// Also write the animation manifest
    #[serde(default = "default_true")]
    pub manifest: bool,
}

fn default_content() -> String {
    "content.toml".to_string()
}

fn default_output() -> String {
    "dist".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            output: default_output(),
            manifest: true,
        }
    }
}

/// Scripted session for `folio preview`
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PreviewConfig {
    /// Scroll positions visited in order
    #[serde(default = "default_scroll_stops")]
    pub scroll_stops: Vec<f32>,
    /// Frames simulated at each stop
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Frame length in milliseconds
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32,
}

fn default_scroll_stops() -> Vec<f32> {
    vec![0.0, 900.0, 1800.0, 2700.0, 3600.0, 4500.0]
}

fn default_frames() -> u32 {
    120
}

fn default_frame_ms() -> f32 {
    16.0
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scroll_stops: default_scroll_stops(),
            frames: default_frames(),
            frame_ms: default_frame_ms(),
        }
    }
}

impl FolioProject {
    /// Load project configuration from folio.toml
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `folio init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: FolioProject = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    pub fn new(name: &str) -> Self {
        Self {
            project: ProjectMetadata {
                name: name.to_string(),
                version: default_version(),
                description: None,
            },
            build: BuildConfig::default(),
            preview: PreviewConfig::default(),
            site: FolioConfig::default(),
        }
    }

    /// Site content for a project rooted at `root`
    pub fn load_content(&self, root: &Path) -> Result<SiteContent> {
        let path = root.join(&self.build.content);
        if !path.exists() {
            tracing::warn!(
                "{} not found, using built-in content",
                path.display()
            );
            return Ok(SiteContent::default());
        }
        SiteContent::load(&path).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn preview_script(&self) -> PreviewConfig {
        self.preview.clone()
    }

    pub fn output_dir(&self, root: &Path, override_dir: Option<&str>) -> PathBuf {
        root.join(override_dir.unwrap_or(&self.build.output))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize project config")
    }
}
