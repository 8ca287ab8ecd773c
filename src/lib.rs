//! # Simple Folio
//!
//! A static site generator for a small personal developer portfolio. A shared
//! navigation header, a profile document and a project list are authored once
//! and rendered into every page at build time.
//!
//! # Architecture: One Document Per Page
//!
//! Every page is built from its own [`document::Document`], a render context
//! that each component receives explicitly and mutates in turn:
//!
//! ```text
//! site/nav.html        ──► nav        header inserted, links rewritten, one marked active
//! site/projects.json   ──► projects   cards (image strip or carousel) or an error paragraph
//! site/about_me.json   ──► profile    hero heading, first paragraph, skill chips
//!                          reveal     observer settings for every card and section
//!                          Document::render ──► dist/<page>.html
//! ```
//!
//! Component failures never fail a build. A missing header fragment leaves the
//! page without a header, a broken project list shows a fixed error message,
//! a broken profile keeps the static placeholders. Only config and output
//! errors abort.
//!
//! The browser half of the behavior (re-marking the active link on click,
//! watching the viewport for reveal, carousel buttons) lives in
//! `static/site.js`, driven by the markup and data attributes the Rust side
//! emits. The rules it applies are the ones implemented and tested here.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | Per-page render context, page locations, final HTML rendering |
//! | [`fetch`] | `ResourceLoader` seam: site-path loads with HTTP-style status, JSON helper |
//! | [`nav`] | Navigation loader and active-link setter |
//! | [`projects`] | Project renderer: filtering, card markup, "more" link |
//! | [`carousel`] | Image strip vs. carousel layout and wraparound index state |
//! | [`profile`] | Profile loader for hero and skills |
//! | [`reveal`] | Scroll reveal parameters |
//! | [`types`] | Canonical project/profile records normalized from every JSON shape |
//! | [`config`] | Layered `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Orchestrates pages in parallel, writes fingerprinted assets, copies static files |
//! | [`output`] | CLI output formatting for `build` and `check` |

pub mod carousel;
pub mod config;
pub mod document;
pub mod fetch;
pub mod generate;
pub mod nav;
pub mod output;
pub mod profile;
pub mod projects;
pub mod reveal;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
