//! Profile loader.
//!
//! Reads the personal profile document and writes it into the page: the name
//! becomes the hero heading, the description replaces the first hero
//! paragraph, and the tech stack replaces the skills placeholder with chip
//! groups. When the profile can't be loaded the static placeholders stay.

use crate::config::ResourcesConfig;
use crate::document::{Document, SkillsContent};
use crate::fetch::{ResourceLoader, fetch_json};
use crate::types::Profile;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// The page has neither a hero nor a skills section.
    Skipped,
    Applied { name: String },
    Failed { source: String, error: String },
}

pub fn load_profile(
    doc: &mut Document,
    loader: &dyn ResourceLoader,
    resources: &ResourcesConfig,
) -> ProfileOutcome {
    if doc.hero.is_none() && doc.skills.is_none() {
        return ProfileOutcome::Skipped;
    }

    let source = doc.location.from_root(&resources.profile);
    let loaded = doc
        .location
        .resolve(&source)
        .ok_or_else(|| format!("cannot resolve {source}"))
        .and_then(|site_path| fetch_json::<Profile>(loader, &site_path).map_err(|e| e.to_string()));

    match loaded {
        Ok(profile) => {
            apply_profile(doc, &profile);
            debug!(page = doc.location.path(), name = %profile.name, "profile applied");
            ProfileOutcome::Applied { name: profile.name }
        }
        Err(error) => {
            warn!(page = doc.location.path(), %error, "could not load profile");
            ProfileOutcome::Failed { source, error }
        }
    }
}

/// Write a loaded profile into the hero and skills sections.
///
/// A hero without paragraphs only gets the heading.
pub fn apply_profile(doc: &mut Document, profile: &Profile) {
    if let Some(hero) = doc.hero.as_mut() {
        hero.heading = profile.name.clone();
        if !profile.description.is_empty() {
            if let Some(first) = hero.paragraphs.first_mut() {
                *first = profile.description.clone();
            }
        }
    }
    if let Some(skills) = doc.skills.as_mut() {
        skills.content = SkillsContent::Groups(profile.tech_stack.clone());
    }
}
