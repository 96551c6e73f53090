//! Static site content
//!
//! Everything the sections display lives in [`SiteContent`]. The defaults are
//! the portfolio's own content; a TOML file may override any part of it:
//!
//! ```toml
//! [hero]
//! name = "ADA LOVELACE"
//!
//! [[projects]]
//! title = "Analytical Engine"
//! category = "Hardware"
//! description = "General purpose computing"
//! live_url = "https://example.com"
//! repo_url = "https://github.com/example/engine"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// All static content of the site
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub site: SiteMeta,
    pub hero: HeroContent,
    pub about: AboutContent,
    pub skills: Vec<TechCategory>,
    pub services: ServicesContent,
    pub projects: Vec<Project>,
    pub projects_more_url: String,
    pub contact: ContactContent,
    pub nav: NavContent,
    pub footer: FooterContent,
}

impl SiteContent {
    /// Parse a TOML document; missing fields keep their defaults
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Number of skill cards across all categories
    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|c| c.items.len()).sum()
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            site: SiteMeta::default(),
            hero: HeroContent::default(),
            about: AboutContent::default(),
            skills: default_skills(),
            services: ServicesContent::default(),
            projects: default_projects(),
            projects_more_url: "https://github.com/ShaanSolanki?tab=repositories".to_string(),
            contact: ContactContent::default(),
            nav: NavContent::default(),
            footer: FooterContent::default(),
        }
    }
}

/// A labelled outbound link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub resume_href: String,
    pub resume_filename: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Shaan Solanki | Full Stack Developer".to_string(),
            description: "Portfolio of Shaan Solanki, creative full stack developer".to_string(),
            lang: "en".to_string(),
            resume_href: "/resume.pdf".to_string(),
            resume_filename: "resume.pdf".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub name: String,
    pub role: String,
    pub tags: Vec<String>,
    pub scroll_label: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            name: "SHAAN SOLANKI".to_string(),
            role: "Full Stack Developer".to_string(),
            tags: strings(&[
                "React", "Next.js", "Node.js", "MongoDB", "Express", "Firebase", "Three.js",
                "Flutter",
            ]),
            scroll_label: "SCROLL".to_string(),
        }
    }
}

/// A skill with a proficiency bar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub name: String,
    /// Percent, 0..=100
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub skills: Vec<SkillLevel>,
    pub badges: Vec<String>,
    pub download_label: String,
    pub connect_label: String,
}

impl Default for AboutContent {
    fn default() -> Self {
        let skill = |name: &str, level| SkillLevel {
            name: name.to_string(),
            level,
        };
        Self {
            heading: "About Me".to_string(),
            paragraphs: strings(&[
                "I'm a Creative Full Stack Developer who brings ideas to life through immersive, animated web experiences, where design meets precision.",
                "Fluent across the entire development stack, I build seamless interfaces using React, Next.js, and Three.js, while architecting powerful, scalable backends that keep everything running fast and secure.",
                "From dynamic UIs to secure APIs and database design, I specialize in blending functionality with storytelling, making every interaction feel purposeful and smooth.",
                "I don't just code websites. I craft digital experiences that engage, perform, and inspire.",
            ]),
            skills: vec![
                skill("React/Next.js", 95),
                skill("TypeScript", 90),
                skill("Node.js", 85),
                skill("Three.js", 80),
                skill("UI/UX Design", 75),
                skill("DevOps", 70),
            ],
            badges: strings(&["React", "TS", "JS", "CSS", "HTML", "Node"]),
            download_label: "Download CV".to_string(),
            connect_label: "Let's Connect".to_string(),
        }
    }
}

/// One tech-stack entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    /// Terminal-style caption, e.g. `$ react --ui`
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechCategory {
    pub title: String,
    pub items: Vec<TechItem>,
}

fn default_skills() -> Vec<TechCategory> {
    let category = |title: &str, items: &[(&str, &str)]| TechCategory {
        title: title.to_string(),
        items: items
            .iter()
            .map(|(name, label)| TechItem {
                name: name.to_string(),
                label: label.to_string(),
            })
            .collect(),
    };
    vec![
        category(
            "Frontend",
            &[
                ("HTML", "$ html --markup"),
                ("CSS", "$ css --styles"),
                ("JavaScript", "$ javascript --es6"),
                ("React", "$ react --ui"),
                ("Next.js", "$ next --ssr"),
                ("Tailwind CSS", "$ tailwind --utility"),
                ("Flutter", "$ flutter --mobile"),
            ],
        ),
        category(
            "Backend",
            &[
                ("Node.js", "$ node --runtime"),
                ("Express", "$ express --server"),
                ("MongoDB", "$ mongodb --database"),
                ("Firebase", "$ firebase --baaS"),
            ],
        ),
        category(
            "Tools & Cloud",
            &[
                ("Git", "$ git --vcs"),
                ("GitHub", "$ github --repo"),
                ("Postman", "$ postman --api"),
                ("Vercel", "$ vercel --deploy"),
                ("AWS", "$ aws --cloud"),
                ("Three.js", "$ threejs --3d"),
            ],
        ),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub description: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesContent {
    pub heading: String,
    pub items: Vec<Service>,
}

impl Default for ServicesContent {
    fn default() -> Self {
        let service = |title: &str, description: &str, label: &str| Service {
            title: title.to_string(),
            description: description.to_string(),
            label: label.to_string(),
        };
        Self {
            heading: "services provided".to_string(),
            items: vec![
                service(
                    "Web Development",
                    "Building responsive and dynamic websites.",
                    "$ web --responsive",
                ),
                service(
                    "App Development",
                    "Creating cross-platform mobile and desktop apps.",
                    "$ app --cross-platform",
                ),
                service(
                    "API & Backend Services",
                    "Developing fast, scalable backend solutions.",
                    "$ api --scalable",
                ),
                service(
                    "Cloud & Deployment",
                    "Deploying projects with modern cloud services.",
                    "$ cloud --deploy",
                ),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub category: String,
    pub description: String,
    pub live_url: String,
    pub repo_url: String,
    /// Page shown in the preview embed; the live URL when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Project {
    pub fn preview(&self) -> &str {
        self.preview_url.as_deref().unwrap_or(&self.live_url)
    }
}

fn default_projects() -> Vec<Project> {
    let project = |title: &str, category: &str, description: &str, live: &str, repo: &str| {
        Project {
            title: title.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            live_url: live.to_string(),
            repo_url: repo.to_string(),
            preview_url: None,
        }
    };
    vec![
        project(
            "CadTech",
            "Professional Website",
            "Professional engineering services website with modern design and responsive layout",
            "https://www.cadtech.co.in/",
            "https://github.com/yourusername/cadtech-engineering",
        ),
        project(
            "E-Cell PRMITR",
            "Institutional Website",
            "Entrepreneurship cell website featuring events, initiatives and startup resources",
            "https://ecell.prmitr.in/",
            "https://github.com/yourusername/ecell-prmitr",
        ),
        project(
            "Business Landing Page",
            "Landing Page",
            "Modern business landing page with smooth animations and clean UI design",
            "https://business-landing-page-mocha.vercel.app/",
            "https://github.com/yourusername/business-landing-page",
        ),
        project(
            "Static Website Design",
            "Portfolio Website",
            "Clean and responsive static website design with modern aesthetics",
            "https://static-website-design.vercel.app/",
            "https://github.com/yourusername/static-website-design",
        ),
        project(
            "Finance Tracker",
            "Web Application",
            "Financial management application for tracking expenses and budgets",
            "https://finance-tracker-drab-six.vercel.app/",
            "https://github.com/yourusername/finance-tracker",
        ),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactContent {
    pub heading: String,
    pub intro: String,
    pub email: String,
    pub phone: String,
    /// Dialable form of `phone`
    pub phone_href: String,
    pub socials: Vec<Link>,
}

impl Default for ContactContent {
    fn default() -> Self {
        Self {
            heading: "Contact Me".to_string(),
            intro: "Have a project or collaboration in mind? Let's connect!".to_string(),
            email: "shaansolanki17@gmail.com".to_string(),
            phone: "+91 90216 06508".to_string(),
            phone_href: "tel:+919021606508".to_string(),
            socials: vec![
                Link::new("GitHub", "https://github.com/ShaanSolanki"),
                Link::new(
                    "LinkedIn",
                    "https://www.linkedin.com/in/shaan-solanki-6212b0369/",
                ),
                Link::new("Twitter", "https://twitter.com"),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavContent {
    pub logo: String,
    pub links: Vec<Link>,
    pub socials: Vec<Link>,
    pub resume_label: String,
}

impl Default for NavContent {
    fn default() -> Self {
        Self {
            logo: "SHAAN SOLANKI".to_string(),
            links: vec![
                Link::new("Home", "/"),
                Link::new("Projects", "/projects"),
                Link::new("About", "/about"),
                Link::new("Contact", "/contact"),
            ],
            socials: vec![
                Link::new("GitHub", "https://github.com"),
                Link::new("LinkedIn", "https://linkedin.com"),
                Link::new("Twitter", "https://twitter.com"),
            ],
            resume_label: "Resume".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterContent {
    pub brand: String,
    pub tagline: String,
    pub anchors: Vec<String>,
    pub connect: Vec<Link>,
    pub owner: String,
    /// Year shown in the copyright line
    pub copyright_year: u16,
    pub legal: Vec<Link>,
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            brand: "SHAAN SOLANKI".to_string(),
            tagline: "Crafting immersive digital experiences with cutting-edge web technologies."
                .to_string(),
            anchors: strings(&["Home", "Projects", "About", "Contact"]),
            connect: vec![
                Link::new("GitHub", "https://github.com/yourusername"),
                Link::new("LinkedIn", "https://linkedin.com/in/yourusername"),
                Link::new("Twitter", "https://twitter.com/yourusername"),
                Link::new("Email", "mailto:hello@example.com"),
            ],
            owner: "Shaan Solanki".to_string(),
            copyright_year: 2025,
            legal: vec![
                Link::new("Privacy Policy", "#"),
                Link::new("Terms of Service", "#"),
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let content = SiteContent::default();
        assert_eq!(content.hero.tags.len(), 8);
        assert_eq!(content.about.paragraphs.len(), 4);
        assert_eq!(content.about.skills.len(), 6);
        assert_eq!(
            content.skills.iter().map(|c| c.items.len()).collect::<Vec<_>>(),
            vec![7, 4, 6]
        );
        assert_eq!(content.skill_count(), 17);
        assert_eq!(content.services.items.len(), 4);
        assert_eq!(content.projects.len(), 5);
        assert_eq!(content.contact.socials.len(), 3);
        assert_eq!(content.nav.links.len(), 4);
        assert_eq!(content.footer.connect.len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let content = SiteContent::from_toml(
            r#"
            [hero]
            name = "ADA LOVELACE"

            [footer]
            copyright_year = 2030
            "#,
        )
        .unwrap();
        assert_eq!(content.hero.name, "ADA LOVELACE");
        assert_eq!(content.hero.role, "Full Stack Developer");
        assert_eq!(content.footer.copyright_year, 2030);
        assert_eq!(content.projects.len(), 5);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = SiteContent::from_toml("hero = 3").unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }

    #[test]
    fn test_preview_falls_back_to_live_url() {
        let project = &SiteContent::default().projects[0];
        assert_eq!(project.preview(), project.live_url);
    }
}
