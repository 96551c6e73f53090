//! Folio CLI
//!
//! Build, preview, and scaffold the portfolio site.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod site;

use config::FolioProject;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated portfolio site builder", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render index.html and the animation manifest
    Build {
        /// Project directory
        #[arg(default_value = ".")]
        source: String,

        /// Output directory (overrides folio.toml)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Simulate a session: mount, scroll through the page, unmount
    Preview {
        /// Project directory
        #[arg(default_value = ".")]
        source: String,

        /// Scroll positions to visit (overrides folio.toml)
        #[arg(short, long, value_delimiter = ',')]
        scroll: Vec<f32>,

        /// Frames simulated at each scroll position
        #[arg(short, long)]
        frames: Option<u32>,
    },

    /// Write folio.toml and content.toml in a directory
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: String,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Show version and site information
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Build { source, output } => cmd_build(&source, output.as_deref()),

        Commands::Preview {
            source,
            scroll,
            frames,
        } => cmd_preview(&source, scroll, frames),

        Commands::Init { path, force } => cmd_init(&path, force),

        Commands::Info => cmd_info(),
    }
}

fn cmd_build(source: &str, output: Option<&str>) -> Result<()> {
    let root = PathBuf::from(source);
    let built = site::build(&root, output)?;

    info!("Wrote {}", built.html.display());
    if let Some(manifest) = &built.manifest {
        info!("Wrote {}", manifest.display());
    }
    info!(
        "{} timelines, {} scroll triggers",
        built.timelines, built.triggers
    );
    Ok(())
}

fn cmd_preview(source: &str, scroll: Vec<f32>, frames: Option<u32>) -> Result<()> {
    let root = PathBuf::from(source);
    let project = FolioProject::load_from_dir(&root)?;
    let content = project.load_content(&root)?;

    let mut script = project.preview_script();
    if !scroll.is_empty() {
        script.scroll_stops = scroll;
    }
    if let Some(frames) = frames {
        script.frames = frames;
    }

    info!(
        "Previewing {} ({} stops, {} frames each)",
        project.project.name,
        script.scroll_stops.len(),
        script.frames
    );
    let report = site::preview(content, &project, &script)?;

    println!("{:>10}  {:>8}  {:>13}", "scroll", "playing", "registrations");
    for stop in &report.stops {
        println!(
            "{:>10.0}  {:>8}  {:>13}",
            stop.scroll_y,
            if stop.active { "yes" } else { "no" },
            stop.registrations
        );
    }
    println!();
    for (name, count) in &report.by_component {
        println!("  {:<16} {}", name, count);
    }
    for command in &report.commands {
        println!("  -> {:?}", command);
    }

    if report.leaked > 0 {
        anyhow::bail!("{} registrations left after unmount", report.leaked);
    }
    info!("Unmounted cleanly");
    Ok(())
}

fn cmd_init(path: &str, force: bool) -> Result<()> {
    let root = PathBuf::from(path);
    std::fs::create_dir_all(&root)?;
    let root = root.canonicalize()?;
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("portfolio");

    info!("Initializing Folio project in {}", root.display());
    site::init(&root, name, force)?;

    info!("Project initialized!");
    info!("Run `folio build` to render the site");
    Ok(())
}

fn cmd_info() -> Result<()> {
    let content = folio_app::SiteContent::default();
    println!("Folio");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Sections:");
    for section in folio_app::REQUIRED_SECTIONS {
        println!("  - {}", section);
    }
    println!();
    println!("Built-in content:");
    println!("  - {} projects", content.projects.len());
    println!("  - {} tech stack cards", content.skill_count());
    println!("  - {} services", content.services.items.len());
    println!();
    println!("Outputs:");
    println!("  - index.html (static markup)");
    println!("  - animations.json (timelines and scroll triggers)");

    Ok(())
}
