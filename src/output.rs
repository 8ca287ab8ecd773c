//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Output is **page-centric**. Every page is listed by positional index and
//! title with its output path, followed by one indented line per component
//! saying what that component put on the page. Failures are shown inline
//! where they happened, so a broken `projects.json` reads as part of the
//! page inventory rather than a separate error dump.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Home → index.html
//!     Header: 3 links, active "Home"
//!     Projects: 4 shown, 1 hidden (projects.json)
//!     Profile: Jane Doe
//!     Reveal: 9 elements
//! 002 All projects → projects/index.html
//!     Header: 3 links, active "Projects"
//!     Projects: failed (../projects.json): HTTP 404 for /projects.json
//!     Reveal: 2 elements
//!
//! Assets
//!     assets/site-3f2a9c1d04be.css
//!     assets/site-81c0d2e4aa17.js
//!     4 static files copied
//!
//! Generated 2 pages (1 with warnings)
//! ```
//!
//! ## Check
//!
//! Same page listing, then a summary line instead of the asset section:
//!
//! ```text
//! Checked 2 pages (1 with warnings)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{BuildReport, PageReport};
use crate::nav::NavOutcome;
use crate::profile::ProfileOutcome;
use crate::projects::ProjectsOutcome;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn nav_line(outcome: &NavOutcome) -> String {
    match outcome {
        NavOutcome::Inserted {
            links,
            active: Some(label),
        } => format!("Header: {}, active \"{}\"", plural(*links, "link", "links"), label),
        NavOutcome::Inserted { links, active: None } => {
            format!("Header: {}", plural(*links, "link", "links"))
        }
        NavOutcome::NoHeader => "Header: none (fragment has no <header>)".to_string(),
        NavOutcome::Failed(error) => format!("Header: failed: {error}"),
    }
}

fn projects_line(outcome: &ProjectsOutcome) -> Option<String> {
    match outcome {
        ProjectsOutcome::Skipped => None,
        ProjectsOutcome::Rendered {
            source,
            shown,
            hidden: 0,
        } => Some(format!("Projects: {shown} shown ({source})")),
        ProjectsOutcome::Rendered {
            source,
            shown,
            hidden,
        } => Some(format!("Projects: {shown} shown, {hidden} hidden ({source})")),
        ProjectsOutcome::Failed { source, error } => {
            Some(format!("Projects: failed ({source}): {error}"))
        }
    }
}

fn profile_line(outcome: &ProfileOutcome) -> Option<String> {
    match outcome {
        ProfileOutcome::Skipped => None,
        ProfileOutcome::Applied { name } => Some(format!("Profile: {name}")),
        ProfileOutcome::Failed { source, error } => {
            Some(format!("Profile: failed ({source}), placeholders kept: {error}"))
        }
    }
}

/// Header line plus component lines for one page.
fn page_lines(index: usize, page: &PageReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} \u{2192} {}",
        format_index(index),
        page.title,
        page.path
    )];
    let details = std::iter::once(nav_line(&page.nav))
        .chain(projects_line(&page.projects))
        .chain(profile_line(&page.profile))
        .chain(std::iter::once(format!(
            "Reveal: {}",
            plural(page.reveal_targets, "element", "elements")
        )));
    lines.extend(details.map(|line| format!("{}{}", indent(1), line)));
    lines
}

fn pages_section(pages: &[PageReport]) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in pages.iter().enumerate() {
        lines.extend(page_lines(i + 1, page));
    }
    lines
}

fn summary(verb: &str, pages: &[PageReport]) -> String {
    let warned = pages.iter().filter(|p| p.has_warnings()).count();
    let count = plural(pages.len(), "page", "pages");
    if warned == 0 {
        format!("{verb} {count}")
    } else {
        format!("{verb} {count} ({warned} with warnings)")
    }
}

// ============================================================================
// Commands
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = pages_section(&report.pages);

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("{}{}", indent(1), report.assets.css));
    lines.push(format!("{}{}", indent(1), report.assets.js));
    lines.push(format!(
        "{}{} copied",
        indent(1),
        plural(report.copied.len(), "static file", "static files")
    ));

    lines.push(String::new());
    lines.push(summary("Generated", &report.pages));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

pub fn format_check_output(pages: &[PageReport]) -> Vec<String> {
    let mut lines = pages_section(pages);
    lines.push(String::new());
    lines.push(summary("Checked", pages));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(pages: &[PageReport]) {
    for line in format_check_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
