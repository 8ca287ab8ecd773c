//! Scroll reveal.
//!
//! Cards and sections start transparent and shifted down, then fade and slide
//! into place once they scroll into view. The watching itself is done by the
//! runtime script (an `IntersectionObserver` that is never disconnected); this
//! module decides the parameters and hands them to the page as `<body>` data
//! attributes:
//!
//! | Attribute | Default | Meaning |
//! |-----------|---------|---------|
//! | `data-reveal-threshold` | `0.1` | visible fraction that triggers the reveal |
//! | `data-reveal-margin` | `0px 0px -50px 0px` | observer root margin |
//! | `data-reveal-offset` | `20px` | initial downward offset |
//! | `data-reveal-duration` | `0.6s` | opacity/transform transition time |
//!
//! Reveal is armed after every content component has run, so the project
//! cards inserted by the renderer are observed along with the static sections.

use crate::config::RevealConfig;
use crate::document::Document;
use tracing::debug;

/// Values written to the page for the runtime observer.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSettings {
    pub threshold: f64,
    pub root_margin: String,
    pub offset: String,
    pub duration: String,
}

impl From<&RevealConfig> for RevealSettings {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: format!("0px 0px -{}px 0px", config.bottom_margin_px),
            offset: format!("{}px", config.offset_px),
            duration: format!("{}s", config.duration_secs),
        }
    }
}

/// Arm scroll reveal on `doc`. Returns the number of observed elements.
pub fn arm(doc: &mut Document, config: &RevealConfig) -> usize {
    doc.reveal = Some(RevealSettings::from(config));
    let targets = doc.reveal_target_count();
    debug!(page = doc.location.path(), targets, "scroll reveal armed");
    targets
}
