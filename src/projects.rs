//! Project cards.
//!
//! Loads the project list relative to the page (`projects.json` on top-level
//! pages, `../projects.json` one level down), drops entries with
//! `"show": false`, and renders one `article.card.project` per remaining
//! entry, in file order:
//!
//! ```text
//! article.card.project
//! ├── h3                     name
//! ├── img.project-showcase   optional
//! ├── div.project-images     1-3 images, or div.carousel for more
//! ├── p.project-description
//! ├── div.chip-groups        tech stack by category
//! ├── ul.features            name: description
//! └── a.project-link         call to action
//! ```
//!
//! All cards are rendered in one batch and stored in the container at once.
//! If the list can't be loaded, fails with a non-success status, or doesn't
//! parse, the container holds only the configured error message.

use crate::config::{ProjectsConfig, ResourcesConfig};
use crate::carousel;
use crate::document::{ContainerContent, Document, PageLocation, chip_groups};
use crate::fetch::{ResourceLoader, fetch_json};
use crate::types::Project;
use maud::{Markup, html};
use tracing::{debug, warn};

/// What the renderer did for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsOutcome {
    /// The page has no projects section; nothing was loaded.
    Skipped,
    Rendered {
        /// Site-relative path as requested from the page.
        source: String,
        shown: usize,
        hidden: usize,
    },
    Failed {
        source: String,
        error: String,
    },
}

/// Projects that should appear, in their original order.
pub fn visible_projects(projects: &[Project]) -> impl Iterator<Item = &Project> {
    projects.iter().filter(|p| p.show)
}

/// Fill the page's project container.
pub fn render_projects(
    doc: &mut Document,
    loader: &dyn ResourceLoader,
    resources: &ResourcesConfig,
    config: &ProjectsConfig,
) -> ProjectsOutcome {
    if doc.projects.is_none() {
        return ProjectsOutcome::Skipped;
    }

    let source = doc.location.from_root(&resources.projects);
    let loaded = doc
        .location
        .resolve(&source)
        .ok_or_else(|| format!("cannot resolve {source}"))
        .and_then(|site_path| {
            fetch_json::<Vec<Project>>(loader, &site_path).map_err(|e| e.to_string())
        });

    let (content, outcome) = match loaded {
        Ok(projects) => {
            let shown = visible_projects(&projects).count();
            let markup = render_cards(&projects, &doc.location, config);
            debug!(page = doc.location.path(), shown, "projects rendered");
            (
                ContainerContent::Cards {
                    markup,
                    count: shown,
                },
                ProjectsOutcome::Rendered {
                    source,
                    shown,
                    hidden: projects.len() - shown,
                },
            )
        }
        Err(error) => {
            warn!(page = doc.location.path(), %error, "could not load projects");
            (
                ContainerContent::Error(config.error_message.clone()),
                ProjectsOutcome::Failed { source, error },
            )
        }
    };

    if let Some(section) = doc.projects.as_mut() {
        section.content = content;
    }
    outcome
}

/// Render every visible project, plus the "more" link on top-level pages.
pub fn render_cards(projects: &[Project], location: &PageLocation, config: &ProjectsConfig) -> Markup {
    let more = config
        .more_href
        .as_deref()
        .filter(|href| !href.is_empty())
        .filter(|href| location.depth() == 0 && location.resolve(href) != Some(location.site_path()));

    html! {
        @for project in visible_projects(projects) {
            (render_card(project, location, config))
        }
        @if let Some(href) = more {
            p.more-projects {
                a href=(location.from_root(href)) { (config.more_label) }
            }
        }
    }
}

fn render_card(project: &Project, location: &PageLocation, config: &ProjectsConfig) -> Markup {
    html! {
        article.card.project {
            h3 { (project.name) }
            @if let Some(showcase) = &project.showcase {
                img.project-showcase
                    src=(location.from_root(showcase))
                    alt={ "Screenshot of " (project.name) }
                    loading="lazy";
            }
            (carousel::render_images(&project.images, &format!("Screenshot of {}", project.name), location))
            @if !project.description.is_empty() {
                p.project-description { (project.description) }
            }
            @if !project.tech_stack.is_empty() {
                div.tech-stack {
                    h4 { "Tech Stack" }
                    (chip_groups(&project.tech_stack))
                }
            }
            @if !project.features.is_empty() {
                ul.features {
                    @for feature in &project.features {
                        li {
                            strong { (feature.name) }
                            @if let Some(description) = &feature.description {
                                ": " (description)
                            }
                        }
                    }
                }
            }
            @if let Some(link) = &project.link {
                a.project-link href=(location.from_root(&link.url)) target="_blank" rel="noopener" {
                    (link.label.as_deref().unwrap_or(&config.cta_label))
                }
            }
        }
    }
}
