//! Static site generation.
//!
//! Reads the site source directory and writes the finished site. Each
//! `[[pages]]` entry becomes one HTML file, rendered from its own
//! [`Document`]:
//!
//! ```text
//! PageConfig ──► Document::new      static placeholders
//!            ──► markdown body      pulldown-cmark
//!            ──► load_navigation    header fragment, links rewritten and marked
//!            ──► render_projects    project cards or the error paragraph
//!            ──► load_profile       hero text and skill chips
//!            ──► reveal::arm        last, so inserted cards are observed
//!            ──► Document::render   maud
//! ```
//!
//! Pages don't depend on each other and are rendered in parallel on the rayon
//! pool. Each page does its own resource loads.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── projects/
//! │   └── index.html
//! ├── assets/
//! │   ├── site-3f2a9c1d04be.css     # colors from config + static/style.css
//! │   └── site-81c0d2e4aa17.js      # static/site.js
//! └── images/...                    # everything else from the source, copied
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Active-link clicks, scroll reveal, carousel buttons
//!
//! Both are written once per build with a SHA-256 content fingerprint in the
//! file name, so a changed stylesheet never hits a stale cache.

use crate::config::{self, PageConfig, SiteConfig};
use crate::document::{AssetLinks, Document};
use crate::fetch::{FsLoader, LoadError, ResourceLoader, fetch_text};
use crate::nav::{self, NavOutcome};
use crate::profile::{self, ProfileOutcome};
use crate::projects::{self, ProjectsOutcome};
use crate::reveal;
use maud::{Markup, PreEscaped};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read body {body} of page {page}: {source}")]
    Body {
        page: String,
        body: String,
        #[source]
        source: LoadError,
    },
    #[error("Cannot walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Hex digits of the content hash kept in asset file names.
const FINGERPRINT_LEN: usize = 12;

/// What the build did for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub path: String,
    pub title: String,
    pub nav: NavOutcome,
    pub projects: ProjectsOutcome,
    pub profile: ProfileOutcome,
    /// Elements observed by scroll reveal.
    pub reveal_targets: usize,
}

impl PageReport {
    /// True when a component fell back to its failure behavior.
    pub fn has_warnings(&self) -> bool {
        matches!(self.nav, NavOutcome::Failed(_))
            || matches!(self.projects, ProjectsOutcome::Failed { .. })
            || matches!(self.profile, ProfileOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    /// One entry per page, in config order.
    pub pages: Vec<PageReport>,
    pub assets: AssetLinks,
    /// Site-relative paths of the copied static files, sorted.
    pub copied: Vec<String>,
}

/// Build the whole site from `source` into `output`.
pub fn generate(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<BuildReport, GenerateError> {
    let loader = FsLoader::new(source);
    fs::create_dir_all(output)?;

    let copied = copy_static_files(source, output, config)?;
    let assets = write_assets(output, config)?;

    let pages = config
        .pages
        .par_iter()
        .map(|page| {
            let (doc, report) = build_document(page, config, &loader)?;
            write_page(output, &doc, doc.render(&config.site, &assets))?;
            Ok(report)
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    info!(
        pages = pages.len(),
        copied = copied.len(),
        output = %output.display(),
        "site generated"
    );
    Ok(BuildReport {
        pages,
        assets,
        copied,
    })
}

/// Run every component for every page without writing anything.
pub fn check(source: &Path, config: &SiteConfig) -> Result<Vec<PageReport>, GenerateError> {
    let loader = FsLoader::new(source);
    config
        .pages
        .par_iter()
        .map(|page| build_document(page, config, &loader).map(|(_, report)| report))
        .collect()
}

/// Assemble one page's document, running the components in order.
///
/// Component failures are recorded in the report and never fail the page.
/// Only a missing markdown body does, since it's named explicitly in config.
pub fn build_document(
    page: &PageConfig,
    config: &SiteConfig,
    loader: &dyn ResourceLoader,
) -> Result<(Document, PageReport), GenerateError> {
    let mut doc = Document::new(page);

    if let Some(body) = &page.body {
        let site_path = format!("/{}", body.trim_start_matches('/'));
        let markdown = fetch_text(loader, &site_path).map_err(|source| GenerateError::Body {
            page: page.path.clone(),
            body: body.clone(),
            source,
        })?;
        doc.body = Some(render_markdown(&markdown));
    }

    let nav = nav::load_navigation(&mut doc, loader, &config.resources.nav);
    let projects =
        projects::render_projects(&mut doc, loader, &config.resources, &config.projects);
    let profile = profile::load_profile(&mut doc, loader, &config.resources);
    let reveal_targets = reveal::arm(&mut doc, &config.reveal);

    let report = PageReport {
        path: page.path.clone(),
        title: page.title.clone(),
        nav,
        projects,
        profile,
        reveal_targets,
    };
    Ok((doc, report))
}

/// Convert markdown to HTML.
pub fn render_markdown(markdown: &str) -> Markup {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

fn write_page(output: &Path, doc: &Document, html: Markup) -> Result<(), GenerateError> {
    let path = output.join(doc.location.path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html.into_string())?;
    debug!(page = doc.location.path(), "page written");
    Ok(())
}

// ============================================================================
// Shared assets
// ============================================================================

/// The full stylesheet: color variables from config, then the static CSS.
pub fn site_css(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Short SHA-256 hex digest of `content`.
pub fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Write the stylesheet and script under `assets/` and return their paths.
pub fn write_assets(output: &Path, config: &SiteConfig) -> Result<AssetLinks, GenerateError> {
    let css = site_css(config);
    let links = AssetLinks {
        css: format!("assets/site-{}.css", fingerprint(&css)),
        js: format!("assets/site-{}.js", fingerprint(JS)),
    };
    fs::create_dir_all(output.join("assets"))?;
    fs::write(output.join(&links.css), css)?;
    fs::write(output.join(&links.js), JS)?;
    Ok(links)
}

// ============================================================================
// Static files
// ============================================================================

/// Copy every source file that isn't consumed by the build.
///
/// Skipped: dotfiles, `config.toml`, the three resource documents, markdown
/// page bodies, files that a generated page would overwrite, and the output
/// directory itself when it lives inside the source.
pub fn copy_static_files(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<Vec<String>, GenerateError> {
    let consumed = consumed_files(config);
    let output_root = output.canonicalize().ok();

    let mut copied = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let hidden =
                entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.');
            let is_output = match (&output_root, entry.path().canonicalize()) {
                (Some(out), Ok(path)) => path == *out,
                _ => false,
            };
            !hidden && !is_output
        });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let site_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if consumed.contains(site_path.as_str()) {
            continue;
        }

        let dest = output.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        copied.push(site_path);
    }
    Ok(copied)
}

fn consumed_files(config: &SiteConfig) -> HashSet<&str> {
    let resources = [
        "config.toml",
        config.resources.nav.as_str(),
        config.resources.projects.as_str(),
        config.resources.profile.as_str(),
    ];
    resources
        .into_iter()
        .chain(config.pages.iter().map(|p| p.path.as_str()))
        .chain(config.pages.iter().filter_map(|p| p.body.as_deref()))
        .map(|path| path.trim_start_matches('/'))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContainerContent;
    use crate::test_helpers::{MemoryLoader, count_occurrences, projects_page, setup_fixtures};

    const NAV: &str = r#"<header><nav><a href="index.html">Home</a><a href="projects/index.html">Projects</a></nav></header>"#;

    fn loader() -> MemoryLoader {
        MemoryLoader::new()
            .with("/nav.html", NAV)
            .with(
                "/projects.json",
                r#"[{"name": "A"}, {"name": "B", "show": false}, {"name": "C"}]"#,
            )
            .with(
                "/about_me.json",
                r#"{"name": "Jane Doe", "description": "Builder of things"}"#,
            )
    }

    #[test]
    fn components_run_for_home_page() {
        let config = SiteConfig::default();
        let (doc, report) = build_document(&config.pages[0], &config, &loader()).unwrap();

        assert_eq!(
            report.nav,
            NavOutcome::Inserted {
                links: 2,
                active: Some("Home".to_string()),
            }
        );
        assert!(matches!(
            report.projects,
            ProjectsOutcome::Rendered {
                shown: 2,
                hidden: 1,
                ..
            }
        ));
        assert_eq!(
            report.profile,
            ProfileOutcome::Applied {
                name: "Jane Doe".to_string()
            }
        );
        // hero, skills section + card, projects section + 2 cards
        assert_eq!(report.reveal_targets, 6);
        assert!(doc.reveal.is_some());
        assert!(!report.has_warnings());
    }

    #[test]
    fn nested_page_loads_from_parent() {
        let mut config = SiteConfig::default();
        config.pages.push(projects_page());
        let loader = loader();
        let (doc, report) = build_document(&config.pages[1], &config, &loader).unwrap();

        assert_eq!(
            report.nav,
            NavOutcome::Inserted {
                links: 2,
                active: Some("Projects".to_string()),
            }
        );
        assert_eq!(report.profile, ProfileOutcome::Skipped);
        assert!(matches!(
            doc.projects.unwrap().content,
            ContainerContent::Cards { count: 2, .. }
        ));
        assert_eq!(loader.requests(), vec!["/nav.html", "/projects.json"]);
    }

    #[test]
    fn component_failures_do_not_fail_the_page() {
        let config = SiteConfig::default();
        let (doc, report) =
            build_document(&config.pages[0], &config, &MemoryLoader::new()).unwrap();
        assert!(report.has_warnings());
        assert!(doc.header.is_none());
        assert!(matches!(
            doc.projects.unwrap().content,
            ContainerContent::Error(_)
        ));
    }

    #[test]
    fn missing_body_fails_the_page() {
        let mut config = SiteConfig::default();
        config.pages[0].body = Some("about.md".to_string());
        let result = build_document(&config.pages[0], &config, &loader());
        assert!(matches!(result, Err(GenerateError::Body { .. })));
    }

    #[test]
    fn markdown_body_is_a_revealed_card() {
        let mut config = SiteConfig::default();
        config.pages[0].body = Some("about.md".to_string());
        let loader = loader().with("/about.md", "This is **bold** and *italic*.");
        let (doc, report) = build_document(&config.pages[0], &config, &loader).unwrap();

        let body = doc.body.unwrap().into_string();
        assert!(body.contains("<strong>bold</strong>"));
        assert!(body.contains("<em>italic</em>"));
        assert_eq!(report.reveal_targets, 7);
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        assert_eq!(fingerprint("a"), fingerprint("a"));
        assert_ne!(fingerprint("a"), fingerprint("b"));
        assert_eq!(fingerprint("a").len(), FINGERPRINT_LEN);
        // SHA-256("a") = ca978112ca1bbdca...
        assert_eq!(fingerprint("a"), "ca978112ca1b");
    }

    #[test]
    fn site_css_starts_with_colors() {
        let css = site_css(&SiteConfig::default());
        assert!(css.starts_with(":root"));
        assert!(css.contains("--color-accent"));
    }

    #[test]
    fn generate_fixture_site() {
        let tmp = setup_fixtures();
        let source = tmp.path();
        let output = tempfile::TempDir::new().unwrap();
        let config = config::load_config(source, None).unwrap();

        let report = generate(source, output.path(), &config).unwrap();
        assert_eq!(report.pages.len(), config.pages.len());

        let index = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index.contains(&report.assets.css));
        assert!(index.contains("Jane Doe"));
        assert_eq!(count_occurrences(&index, r#"aria-current="page""#), 1);

        let nested = fs::read_to_string(output.path().join("projects/index.html")).unwrap();
        assert!(nested.contains(&format!("../{}", report.assets.js)));

        assert!(output.path().join(&report.assets.css).is_file());
        assert!(output.path().join(&report.assets.js).is_file());
    }

    #[test]
    fn static_files_skip_consumed_sources() {
        let tmp = setup_fixtures();
        let source = tmp.path();
        fs::write(source.join(".hidden"), "x").unwrap();
        let output = tempfile::TempDir::new().unwrap();
        let config = config::load_config(source, None).unwrap();

        let copied = copy_static_files(source, output.path(), &config).unwrap();
        assert!(copied.iter().any(|p| p.starts_with("images/")));
        for skipped in ["config.toml", "nav.html", "projects.json", "about_me.json", ".hidden"] {
            assert!(!copied.iter().any(|p| p == skipped), "{skipped} was copied");
        }
        assert!(!copied.iter().any(|p| p.ends_with(".md")));
    }

    #[test]
    fn output_inside_source_is_not_copied_into_itself() {
        let tmp = setup_fixtures();
        let source = tmp.path();
        let output = source.join("dist");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("stale.txt"), "old").unwrap();
        let config = config::load_config(source, None).unwrap();

        let copied = copy_static_files(source, &output, &config).unwrap();
        assert!(!copied.iter().any(|p| p.starts_with("dist/")));
    }

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_fixtures();
        let config = config::load_config(tmp.path(), None).unwrap();
        let before = WalkDir::new(tmp.path()).into_iter().count();

        let reports = check(tmp.path(), &config).unwrap();
        assert_eq!(reports.len(), config.pages.len());
        let after = WalkDir::new(tmp.path()).into_iter().count();
        assert_eq!(before, after);
    }
}
