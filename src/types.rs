//! Portfolio records read from the site's JSON documents.
//!
//! The JSON files have been edited by hand over several revisions, so the same
//! field shows up in more than one shape. Every shape is accepted at parse
//! time and normalized into one canonical record; renderers only ever see the
//! canonical form.
//!
//! | Field | Accepted shapes | Canonical |
//! |-------|-----------------|-----------|
//! | `techStack` | `[{category, technologies}]`, `[{"Backend": [..]}]`, `["Rust", ..]` | `Vec<TechGroup>` |
//! | `features` | `[{name, description}]`, `["text", ..]` | `Vec<Feature>` |
//! | `link` | `{url, label}`, `"https://.."` | `Option<ProjectLink>` |
//! | `image` / `images` | string, list | `images: Vec<String>` (`image` first) |

use serde::Deserialize;
use std::collections::BTreeMap;

/// One portfolio entry, rendered as a card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProject")]
pub struct Project {
    pub name: String,
    pub description: String,
    /// Gallery images in display order.
    pub images: Vec<String>,
    /// A single large image shown above the gallery.
    pub showcase: Option<String>,
    pub tech_stack: Vec<TechGroup>,
    pub features: Vec<Feature>,
    pub link: Option<ProjectLink>,
    /// `false` hides the entry. Missing means shown.
    pub show: bool,
}

/// The personal profile shown in the hero and skills sections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<TechGroup>,
}

/// A labeled group of technology chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechGroup {
    /// `None` for entries that came from a flat list.
    pub category: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    pub url: String,
    /// Falls back to the configured call-to-action label when absent.
    pub label: Option<String>,
}

// ============================================================================
// Raw shapes
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    /// A nameless entry still renders, with an empty title.
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    showcase: Option<String>,
    #[serde(default)]
    tech_stack: Option<Vec<RawTechEntry>>,
    #[serde(default)]
    features: Option<Vec<RawFeature>>,
    #[serde(default)]
    link: Option<RawLink>,
    #[serde(default)]
    show: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tech_stack: Option<Vec<RawTechEntry>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTechEntry {
    Grouped {
        category: String,
        technologies: Vec<String>,
    },
    /// `{"Backend": ["Rust", "Go"]}`. Objects carry one key each in practice;
    /// several keys come out in key order.
    Keyed(BTreeMap<String, Vec<String>>),
    Flat(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFeature {
    Detailed {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Plain(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLink {
    Detailed {
        url: String,
        #[serde(default)]
        label: Option<String>,
    },
    Plain(String),
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        let images = raw
            .image
            .into_iter()
            .chain(raw.images.unwrap_or_default())
            .filter(|path| !path.is_empty())
            .collect();
        Self {
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            images,
            showcase: raw.showcase.filter(|path| !path.is_empty()),
            tech_stack: normalize_tech_stack(raw.tech_stack.unwrap_or_default()),
            features: raw
                .features
                .unwrap_or_default()
                .into_iter()
                .map(Feature::from)
                .collect(),
            link: raw.link.map(ProjectLink::from),
            show: raw.show.unwrap_or(true),
        }
    }
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            tech_stack: normalize_tech_stack(raw.tech_stack.unwrap_or_default()),
        }
    }
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        match raw {
            RawFeature::Detailed { name, description } => Self {
                name,
                description: description.filter(|d| !d.is_empty()),
            },
            RawFeature::Plain(name) => Self {
                name,
                description: None,
            },
        }
    }
}

impl From<RawLink> for ProjectLink {
    fn from(raw: RawLink) -> Self {
        match raw {
            RawLink::Detailed { url, label } => Self {
                url,
                label: label.filter(|l| !l.is_empty()),
            },
            RawLink::Plain(url) => Self { url, label: None },
        }
    }
}

/// Collapse every accepted tech-stack shape into ordered groups.
///
/// Consecutive flat strings share one uncategorised group, so a fully flat
/// list becomes a single group.
fn normalize_tech_stack(entries: Vec<RawTechEntry>) -> Vec<TechGroup> {
    let mut groups: Vec<TechGroup> = Vec::new();
    for entry in entries {
        match entry {
            RawTechEntry::Grouped {
                category,
                technologies,
            } => groups.push(TechGroup {
                category: Some(category),
                technologies,
            }),
            RawTechEntry::Keyed(map) => {
                groups.extend(map.into_iter().map(|(category, technologies)| TechGroup {
                    category: Some(category),
                    technologies,
                }));
            }
            RawTechEntry::Flat(tech) => match groups.last_mut() {
                Some(last) if last.category.is_none() => last.technologies.push(tech),
                _ => groups.push(TechGroup {
                    category: None,
                    technologies: vec![tech],
                }),
            },
        }
    }
    groups
}
