//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! layered: stock defaults are overridden by the site's `config.toml`, which
//! can in turn be overridden by an extra file passed with `--config` (handy
//! for local previews that swap the colors or the error message).
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Portfolio"
//! lang = "en"
//!
//! [resources]
//! nav = "nav.html"             # Shared header fragment, always loaded from the site root
//! projects = "projects.json"   # Resolved relative to each page
//! profile = "about_me.json"    # Resolved relative to each page
//!
//! [projects]
//! cta_label = "View Project"
//! error_message = "Error loading projects. Please try again later."
//! more_href = "projects/index.html"   # "" disables the "more" link
//! more_label = "See all projects"
//!
//! [reveal]
//! threshold = 0.1
//! bottom_margin_px = 50
//! offset_px = 20
//! duration_secs = 0.6
//!
//! [[pages]]
//! path = "index.html"
//! title = "Home"
//! hero = { heading = "Hello", paragraphs = ["Placeholder intro"] }
//! skills = { heading = "Skills", placeholder = "Loading skills..." }
//! projects = { heading = "Projects" }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings shared by every page.
    pub site: SiteMeta,
    /// File names of the fetched resources.
    pub resources: ResourcesConfig,
    /// Project card rendering settings.
    pub projects: ProjectsConfig,
    /// Scroll reveal animation settings.
    pub reveal: RevealConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
    /// Pages to generate, in navigation-independent build order.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta::default(),
            resources: ResourcesConfig::default(),
            projects: ProjectsConfig::default(),
            reveal: RevealConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
            pages: vec![PageConfig::default_home()],
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[pages]] entry is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for page in &self.pages {
            validate_page_path(&page.path)?;
            if !seen.insert(page.path.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page path: {}",
                    page.path
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if self.reveal.duration_secs <= 0.0 {
            return Err(ConfigError::Validation(
                "reveal.duration_secs must be positive".into(),
            ));
        }
        if self.resources.nav.is_empty()
            || self.resources.projects.is_empty()
            || self.resources.profile.is_empty()
        {
            return Err(ConfigError::Validation(
                "resources.* file names must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Page paths are site-relative `.html` files that stay inside the output.
fn validate_page_path(path: &str) -> Result<(), ConfigError> {
    let invalid = |why: &str| ConfigError::Validation(format!("page path {path:?} {why}"));
    if path.starts_with('/') {
        return Err(invalid("must be relative"));
    }
    if !path.ends_with(".html") {
        return Err(invalid("must end in .html"));
    }
    if path.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(invalid("must not contain empty or '..' segments"));
    }
    Ok(())
}

/// Document-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Suffix for every `<title>`: `"{page} | {site}"`.
    pub title: String,
    /// Value of `<html lang>`.
    pub lang: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// Names of the resources every page loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourcesConfig {
    /// Header fragment. Always loaded from the site root.
    pub nav: String,
    /// Project list. Resolved relative to the page, like a browser fetch.
    pub projects: String,
    /// Profile document. Resolved relative to the page.
    pub profile: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            nav: "nav.html".to_string(),
            projects: "projects.json".to_string(),
            profile: "about_me.json".to_string(),
        }
    }
}

/// Project card rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// Call-to-action label used when a project's link has none.
    pub cta_label: String,
    /// Replaces the whole container when the project list can't be loaded.
    pub error_message: String,
    /// Site-relative target of the "more" link on top-level pages. Empty disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_href: Option<String>,
    /// Label of the "more" link.
    pub more_label: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            cta_label: "View Project".to_string(),
            error_message: "Error loading projects. Please try again later.".to_string(),
            more_href: Some("projects/index.html".to_string()),
            more_label: "See all projects".to_string(),
        }
    }
}

/// Scroll reveal animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible (0..=1).
    pub threshold: f64,
    /// How far the viewport's bottom edge is shrunk, in pixels.
    pub bottom_margin_px: u32,
    /// Initial downward offset of hidden elements, in pixels.
    pub offset_px: u32,
    /// Transition duration in seconds.
    pub duration_secs: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin_px: 50,
            offset_px: 20,
            duration_secs: 0.6,
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of pages rendered in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// One generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Output path relative to the site root, e.g. `projects/index.html`.
    pub path: String,
    /// Page title, shown in `<title>`.
    pub title: String,
    /// Optional markdown file (relative to the source root) rendered into `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsSectionConfig>,
}

impl PageConfig {
    fn default_home() -> Self {
        Self {
            path: "index.html".to_string(),
            title: "Home".to_string(),
            body: None,
            hero: Some(HeroConfig::default()),
            skills: Some(SkillsConfig::default()),
            projects: Some(ProjectsSectionConfig::default()),
        }
    }
}

/// Static placeholder content of the `#hero` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            heading: "Welcome".to_string(),
            paragraphs: vec!["Software developer.".to_string()],
        }
    }
}

/// Static placeholder content of the `#skills` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillsConfig {
    pub heading: String,
    pub placeholder: String,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            heading: "Skills".to_string(),
            placeholder: "Skills are loading...".to_string(),
        }
    }
}

/// The `#projects-container` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsSectionConfig {
    pub heading: String,
}

impl Default for ProjectsSectionConfig {
    fn default() -> Self {
        Self {
            heading: "Projects".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (descriptions, feature details).
    pub text_muted: String,
    /// Card background.
    pub card: String,
    /// Tech-stack chip background.
    pub chip: String,
    /// Links, active nav entry, carousel buttons.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7f7f8".to_string(),
            text: "#1b1b1f".to_string(),
            text_muted: "#5c5c66".to_string(),
            card: "#ffffff".to_string(),
            chip: "#e8e8ee".to_string(),
            accent: "#3056d3".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#101014".to_string(),
            text: "#ececf1".to_string(),
            text_muted: "#a0a0ab".to_string(),
            card: "#1a1a21".to_string(),
            chip: "#2a2a35".to_string(),
            accent: "#7d9bff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer every user file is merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely. Arrays,
///   including `[[pages]]`, are replaced, never concatenated.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a TOML file as a raw value.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply each present overlay in order onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<SiteConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .flatten()
        .fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the source directory, plus an optional
/// extra overlay file.
///
/// A missing overlay file is an error: the user asked for it explicitly.
pub fn load_config(source: &Path, overlay: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let site = load_raw_config(&source.join("config.toml"))?;
    let extra = match overlay {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(base, [site, extra])
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "Home | Portfolio".
title = "Portfolio"
lang = "en"

# ---------------------------------------------------------------------------
# Resources
# ---------------------------------------------------------------------------
[resources]
# Shared header fragment. Must contain a <header> element.
nav = "nav.html"
# JSON array of projects. Resolved relative to each page.
projects = "projects.json"
# JSON profile document (name, description, techStack).
profile = "about_me.json"

# ---------------------------------------------------------------------------
# Project cards
# ---------------------------------------------------------------------------
[projects]
# Label of the call-to-action link when a project doesn't provide one.
cta_label = "View Project"
# Shown instead of the project list when projects.json can't be loaded.
error_message = "Error loading projects. Please try again later."
# "More" link shown under the list on top-level pages. Set to "" to disable.
more_href = "projects/index.html"
more_label = "See all projects"

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction of a card that must be visible before it fades in.
threshold = 0.1
# Shrinks the viewport's bottom edge so cards reveal slightly later.
bottom_margin_px = 50
# Initial downward offset of hidden cards.
offset_px = 20
duration_secs = 0.6

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7f7f8"
text = "#1b1b1f"
text_muted = "#5c5c66"
card = "#ffffff"
chip = "#e8e8ee"
accent = "#3056d3"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#101014"
text = "#ececf1"
text_muted = "#a0a0ab"
card = "#1a1a21"
chip = "#2a2a35"
accent = "#7d9bff"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum pages rendered in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
# One entry per generated page. Sections are optional; a page without
# `projects` never loads projects.json.
[[pages]]
path = "index.html"
title = "Home"
# body = "index.md"

[pages.hero]
heading = "Welcome"
paragraphs = ["Software developer."]

[pages.skills]
heading = "Skills"
placeholder = "Skills are loading..."

[pages.projects]
heading = "Projects"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-card: {light_card};
    --color-chip: {light_chip};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-card: {dark_card};
        --color-chip: {dark_chip};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_card = colors.light.card,
        light_chip = colors.light.chip,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_card = colors.dark.card,
        dark_chip = colors.dark.chip,
        dark_accent = colors.dark.accent,
    )
}
