//! Project image layouts and the carousel controller.
//!
//! A project with up to three images shows them side by side in a flex strip.
//! With more than three, the images go into a carousel: one image visible,
//! previous/next buttons, wrapping in both directions. Exactly three images
//! still use the strip.
//!
//! [`Carousel`] holds the index arithmetic. The build uses it to decide which
//! image starts visible; the runtime script applies the same rules when the
//! buttons are pressed.

use crate::document::PageLocation;
use maud::{Markup, html};

/// Most images a project can have and still use the strip layout.
pub const STRIP_MAX_IMAGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    None,
    Strip,
    Carousel,
}

impl ImageLayout {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            n if n <= STRIP_MAX_IMAGES => Self::Strip,
            _ => Self::Carousel,
        }
    }
}

/// Index state of one carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// A carousel at index 0. `None` for zero images.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance, wrapping from the last image to the first.
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    /// Step back, wrapping from the first image to the last.
    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index == self.current
    }
}

/// Render a project's images in the layout their count calls for.
pub fn render_images(images: &[String], alt: &str, location: &PageLocation) -> Markup {
    match ImageLayout::for_count(images.len()) {
        ImageLayout::None => html! {},
        ImageLayout::Strip => html! {
            div.project-images {
                @for src in images {
                    img src=(location.from_root(src)) alt=(alt) loading="lazy";
                }
            }
        },
        ImageLayout::Carousel => render_carousel(images, alt, location),
    }
}

fn render_carousel(images: &[String], alt: &str, location: &PageLocation) -> Markup {
    let Some(state) = Carousel::new(images.len()) else {
        return html! {};
    };
    html! {
        div.carousel data-carousel data-count=(state.count()) {
            button.carousel-button.carousel-prev type="button" aria-label="Previous image" data-carousel-prev { "‹" }
            div.carousel-track {
                @for (index, src) in images.iter().enumerate() {
                    img.carousel-image
                        src=(location.from_root(src))
                        alt={ (alt) " (" (index + 1) "/" (state.count()) ")" }
                        loading="lazy"
                        data-index=(index)
                        hidden[!state.is_visible(index)];
                }
            }
            button.carousel-button.carousel-next type="button" aria-label="Next image" data-carousel-next { "›" }
        }
    }
}
