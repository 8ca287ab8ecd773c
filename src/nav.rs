//! Shared navigation header.
//!
//! Every page starts with the same `<header>`, authored once in `nav.html`
//! with links written relative to the site root. For each page the header is:
//!
//! 1. **Loaded** from the fixed site path (`/nav.html`) and parsed with
//!    `scraper`. A fragment without a `<header>` element is ignored.
//! 2. **Rewritten** for the page's depth: on `projects/index.html` the link
//!    `about.html` (or `/about.html`) becomes `../about.html`. Absolute URLs,
//!    protocol-relative URLs, `#fragment` and `?query` links are left alone.
//! 3. **Marked**: the link whose resolved path equals the page's path gets
//!    `class="active"` and `aria-current="page"`; every other link has both
//!    cleared. With no match the first link is marked, so exactly one link is
//!    active whenever the header has any.
//! 4. **Inserted** as the first child of `<body>`.
//!
//! The parsed header is kept as a small owned tree so the markup around the
//! links (logo, wrappers, classes) survives untouched.

use crate::document::{Document, PageLocation, is_absolute_url};
use crate::fetch::{ResourceLoader, fetch_text};
use maud::{Escaper, Markup, PreEscaped};
use std::fmt::Write;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const ACTIVE_CLASS: &str = "active";

/// HTML elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A navigation link as seen after rewriting and marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// What happened to a page's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Inserted {
        links: usize,
        active: Option<String>,
    },
    /// The fragment loaded but had no `<header>`.
    NoHeader,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: String) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    fn is_link(&self) -> bool {
        self.name == "a" && self.attr("href").is_some()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn toggle_class(&mut self, class: &str, on: bool) {
        let mut classes: Vec<String> = self
            .attr("class")
            .map(|c| {
                c.split_whitespace()
                    .filter(|c| *c != class)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if on {
            classes.push(class.to_string());
        }
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", classes.join(" "));
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// Visit every link element in document order.
fn for_each_link<'a>(el: &'a Element, f: &mut impl FnMut(&'a Element)) {
    if el.is_link() {
        f(el);
    }
    for child in &el.children {
        if let Node::Element(child) = child {
            for_each_link(child, f);
        }
    }
}

fn for_each_link_mut(el: &mut Element, f: &mut impl FnMut(&mut Element)) {
    if el.is_link() {
        f(el);
    }
    for child in &mut el.children {
        if let Node::Element(child) = child {
            for_each_link_mut(child, f);
        }
    }
}

/// The shared header, parsed from the navigation fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavHeader {
    root: Element,
}

impl NavHeader {
    /// Parse a fragment and keep its first `<header>` element.
    ///
    /// Returns `None` if the fragment contains no header.
    pub fn parse(fragment: &str) -> Option<Self> {
        let document = Html::parse_fragment(fragment);
        let selector = Selector::parse("header").ok()?;
        let header = document.select(&selector).next()?;
        Some(Self {
            root: convert_element(header),
        })
    }

    /// All links in document order.
    pub fn links(&self) -> Vec<NavLink> {
        let mut links = Vec::new();
        for_each_link(&self.root, &mut |el| {
            links.push(NavLink {
                href: el.attr("href").unwrap_or_default().to_string(),
                label: el.text(),
                active: el.has_class(ACTIVE_CLASS),
            });
        });
        links
    }

    /// Prefix `../` once per directory level to every location-dependent link.
    pub fn rewrite_links(&mut self, depth: usize) {
        if depth == 0 {
            return;
        }
        let prefix = "../".repeat(depth);
        for_each_link_mut(&mut self.root, &mut |el| {
            let Some(href) = el.attr("href") else { return };
            // `?query` targets the current page, like `#fragment`.
            if href.is_empty() || href.starts_with('?') || is_absolute_url(href) {
                return;
            }
            let rewritten = format!("{}{}", prefix, href.trim_start_matches('/'));
            el.set_attr("href", rewritten);
        });
    }

    /// Mark exactly one link active for the page at `location`.
    ///
    /// Returns the index of the active link, or `None` if there are no links.
    pub fn set_active(&mut self, location: &PageLocation) -> Option<usize> {
        let current = location.site_path();
        let links = self.links();
        let active = links
            .iter()
            .position(|link| location.resolve(&link.href).as_deref() == Some(current.as_str()))
            .or_else(|| (!links.is_empty()).then_some(0))?;

        let mut index = 0;
        for_each_link_mut(&mut self.root, &mut |el| {
            let on = index == active;
            el.toggle_class(ACTIVE_CLASS, on);
            if on {
                el.set_attr("aria-current", "page".to_string());
            } else {
                el.remove_attr("aria-current");
            }
            index += 1;
        });
        Some(active)
    }

    /// Serialize the header back to HTML.
    pub fn render(&self) -> Markup {
        let mut out = String::new();
        write_element(&self.root, &mut out);
        PreEscaped(out)
    }
}

fn convert_element(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let mut children = Vec::new();
    for child in el.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let text: &str = text;
                children.push(Node::Text(text.to_string()));
            }
            scraper::Node::Comment(comment) => {
                let comment: &str = comment;
                children.push(Node::Comment(comment.to_string()));
            }
            scraper::Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    children.push(Node::Element(convert_element(child)));
                }
            }
            _ => {}
        }
    }
    Element {
        name: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, out);
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&el.name.as_str()) {
        return;
    }
    let raw_text = matches!(el.name.as_str(), "script" | "style");
    for child in &el.children {
        match child {
            Node::Element(child) => write_element(child, out),
            Node::Text(text) if raw_text => out.push_str(text),
            Node::Text(text) => escape_into(text, out),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

fn escape_into(s: &str, out: &mut String) {
    // Writing into a String can't fail.
    let _ = Escaper::new(out).write_str(s);
}

/// Load the shared header into `doc`.
///
/// Failures are logged and leave the page without a header.
pub fn load_navigation(
    doc: &mut Document,
    loader: &dyn ResourceLoader,
    nav_file: &str,
) -> NavOutcome {
    let site_path = format!("/{}", nav_file.trim_start_matches('/'));
    let fragment = match fetch_text(loader, &site_path) {
        Ok(fragment) => fragment,
        Err(e) => {
            warn!(page = doc.location.path(), error = %e, "could not load navigation");
            return NavOutcome::Failed(e.to_string());
        }
    };
    let Some(mut header) = NavHeader::parse(&fragment) else {
        debug!(page = doc.location.path(), "navigation fragment has no <header>");
        return NavOutcome::NoHeader;
    };

    header.rewrite_links(doc.location.depth());
    let active = header.set_active(&doc.location);
    let links = header.links();
    let active_label = active.and_then(|i| links.get(i)).map(|l| l.label.clone());
    debug!(
        page = doc.location.path(),
        links = links.len(),
        active = active_label.as_deref().unwrap_or(""),
        "navigation inserted"
    );

    doc.header = Some(header);
    NavOutcome::Inserted {
        links: links.len(),
        active: active_label,
    }
}
