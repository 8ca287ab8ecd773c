//! The per-page render context.
//!
//! Every component receives the page's [`Document`] explicitly and mutates
//! the slot it owns: the navigation loader fills `header`, the project
//! renderer fills `projects`, the profile loader overwrites `hero` and
//! `skills`, scroll reveal arms `reveal`. Nothing queries an ambient DOM, so
//! each component can be exercised against a document built in a test.
//!
//! Once every component has run, [`Document::render`] turns the context into
//! the final HTML with maud. The rendered markup keeps the element contract
//! the runtime script relies on:
//!
//! ```text
//! body[data-reveal-*]
//! ├── header            ← nav.html fragment, links rewritten, one marked active
//! └── main
//!     ├── section#hero  → h1, p...
//!     ├── section.card  ← markdown body
//!     ├── section#skills → div.card → chip groups
//!     └── section#projects → div#projects-container → article.card.project...
//! ```

use crate::config::{PageConfig, SiteMeta};
use crate::nav::NavHeader;
use crate::reveal::RevealSettings;
use crate::types::TechGroup;
use maud::{DOCTYPE, Markup, html};
use url::Url;

/// Origin used to resolve hrefs. Only paths are ever compared.
const SITE_ORIGIN: &str = "http://site.invalid/";

/// Where a page lives in the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    path: String,
}

impl PageLocation {
    /// `path` is site-relative, e.g. `"index.html"` or `"projects/index.html"`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of directories between the site root and the page.
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }

    /// Absolute URL path of the page, the equivalent of `location.pathname`.
    ///
    /// Percent-encoded the same way as [`resolve`](Self::resolve) output.
    pub fn site_path(&self) -> String {
        self.url()
            .map(|url| url.path().to_string())
            .unwrap_or_else(|| format!("/{}", self.path))
    }

    fn url(&self) -> Option<Url> {
        Url::parse(SITE_ORIGIN).ok()?.join(&self.path).ok()
    }

    /// Resolve an href the way the browser would on this page and return the
    /// resulting site path. Links to another origin return `None`.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let base = self.url()?;
        let resolved = base.join(href).ok()?;
        (resolved.origin() == base.origin()).then(|| resolved.path().to_string())
    }

    /// Turn a root-relative target into one relative to this page:
    /// `images/a.png` on `projects/index.html` becomes `../images/a.png`.
    ///
    /// Absolute URLs, protocol-relative URLs and fragments are returned as-is.
    pub fn from_root(&self, target: &str) -> String {
        if is_absolute_url(target) {
            return target.to_string();
        }
        format!("{}{}", "../".repeat(self.depth()), target.trim_start_matches('/'))
    }
}

/// True for targets that don't depend on the page's location.
pub fn is_absolute_url(target: &str) -> bool {
    target.starts_with('#') || target.starts_with("//") || Url::parse(target).is_ok()
}

/// Site-relative paths of the shared stylesheet and script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLinks {
    pub css: String,
    pub js: String,
}

/// The `#hero` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

/// The `#skills` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skills {
    pub heading: String,
    pub content: SkillsContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillsContent {
    /// Static text kept until a profile is applied.
    Placeholder(String),
    Groups(Vec<TechGroup>),
}

/// The section holding `#projects-container`.
#[derive(Debug, Clone)]
pub struct ProjectsSection {
    pub heading: String,
    pub content: ContainerContent,
}

#[derive(Debug, Clone)]
pub enum ContainerContent {
    /// Nothing rendered yet.
    Empty,
    /// Batch-rendered project cards.
    Cards { markup: Markup, count: usize },
    /// The only thing shown when the project list failed to load.
    Error(String),
}

/// Render context for one page.
#[derive(Debug, Clone)]
pub struct Document {
    pub location: PageLocation,
    pub title: String,
    /// Inserted as the first child of `<body>`.
    pub header: Option<NavHeader>,
    pub hero: Option<Hero>,
    /// Rendered markdown body.
    pub body: Option<Markup>,
    pub skills: Option<Skills>,
    pub projects: Option<ProjectsSection>,
    pub reveal: Option<RevealSettings>,
}

impl Document {
    /// A document holding the page's static placeholder content.
    pub fn new(page: &PageConfig) -> Self {
        Self {
            location: PageLocation::new(&page.path),
            title: page.title.clone(),
            header: None,
            hero: page.hero.as_ref().map(|hero| Hero {
                heading: hero.heading.clone(),
                paragraphs: hero.paragraphs.clone(),
            }),
            body: None,
            skills: page.skills.as_ref().map(|skills| Skills {
                heading: skills.heading.clone(),
                content: SkillsContent::Placeholder(skills.placeholder.clone()),
            }),
            projects: page.projects.as_ref().map(|projects| ProjectsSection {
                heading: projects.heading.clone(),
                content: ContainerContent::Empty,
            }),
            reveal: None,
        }
    }

    /// Number of elements matching `.card, section` in the rendered page.
    pub fn reveal_target_count(&self) -> usize {
        let hero = usize::from(self.hero.is_some());
        // The markdown body is one element that is both a section and a card.
        let body = usize::from(self.body.is_some());
        let skills = if self.skills.is_some() { 2 } else { 0 };
        let projects = match &self.projects {
            Some(section) => match &section.content {
                ContainerContent::Cards { count, .. } => 1 + count,
                _ => 1,
            },
            None => 0,
        };
        hero + body + skills + projects
    }

    /// Render the final HTML page.
    pub fn render(&self, site: &SiteMeta, assets: &AssetLinks) -> Markup {
        let title = format!("{} | {}", self.title, site.title);
        let css_href = self.location.from_root(&assets.css);
        let js_href = self.location.from_root(&assets.js);
        let reveal = self.reveal.as_ref();

        html! {
            (DOCTYPE)
            html lang=(site.lang) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                    link rel="stylesheet" href=(css_href);
                }
                body
                    data-reveal-threshold=[reveal.map(|r| r.threshold.to_string())]
                    data-reveal-margin=[reveal.map(|r| r.root_margin.clone())]
                    data-reveal-offset=[reveal.map(|r| r.offset.clone())]
                    data-reveal-duration=[reveal.map(|r| r.duration.clone())]
                {
                    @if let Some(header) = &self.header {
                        (header.render())
                    }
                    main {
                        @if let Some(hero) = &self.hero {
                            section #hero {
                                h1 { (hero.heading) }
                                @for paragraph in &hero.paragraphs {
                                    p { (paragraph) }
                                }
                            }
                        }
                        @if let Some(body) = &self.body {
                            section.card.page-body { (body) }
                        }
                        @if let Some(skills) = &self.skills {
                            section #skills {
                                h2 { (skills.heading) }
                                div.card {
                                    @match &skills.content {
                                        SkillsContent::Placeholder(text) => {
                                            p.placeholder { (text) }
                                        },
                                        SkillsContent::Groups(groups) => { (chip_groups(groups)) },
                                    }
                                }
                            }
                        }
                        @if let Some(projects) = &self.projects {
                            section #projects {
                                h2 { (projects.heading) }
                                div #projects-container {
                                    @match &projects.content {
                                        ContainerContent::Empty => {},
                                        ContainerContent::Cards { markup, .. } => { (markup) },
                                        ContainerContent::Error(message) => {
                                            p.error { (message) }
                                        },
                                    }
                                }
                            }
                        }
                    }
                    script src=(js_href) defer {}
                }
            }
        }
    }
}

/// Labeled chip groups, one chip per technology, in source order.
pub fn chip_groups(groups: &[TechGroup]) -> Markup {
    html! {
        div.chip-groups {
            @for group in groups {
                div.chip-group {
                    @if let Some(category) = &group.category {
                        h4.chip-group-label { (category) }
                    }
                    ul.chips {
                        @for tech in &group.technologies {
                            li.chip { (tech) }
                        }
                    }
                }
            }
        }
    }
}
