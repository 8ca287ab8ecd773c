//! Shared test utilities for the simple-folio test suite.
//!
//! Provides the fixture site copy, an in-memory [`ResourceLoader`] that
//! records every request, and ready-made page configs.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let loader = MemoryLoader::new()
//!     .with("/projects.json", r#"[{"name": "B"}]"#)
//!     .with_status("/about_me.json", 500);
//!
//! let mut doc = Document::new(&projects_page());
//! render_projects(&mut doc, &loader, &resources, &projects);
//! assert_eq!(loader.requests(), vec!["/projects.json"]);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

use crate::config::{PageConfig, ProjectsSectionConfig};
use crate::fetch::{FetchError, ResourceLoader, Response};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// In-memory loader
// =========================================================================

/// Serves canned responses by site path. Anything not registered is a 404.
#[derive(Default)]
pub struct MemoryLoader {
    resources: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `site_path`.
    pub fn with(self, site_path: &str, body: &str) -> Self {
        self.with_response(site_path, Response::ok(body))
    }

    /// Serve an empty body with `status` at `site_path`.
    pub fn with_status(self, site_path: &str, status: u16) -> Self {
        self.with_response(
            site_path,
            Response {
                status,
                body: String::new(),
            },
        )
    }

    pub fn with_response(mut self, site_path: &str, response: Response) -> Self {
        self.resources.insert(site_path.to_string(), response);
        self
    }

    /// Every site path requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ResourceLoader for MemoryLoader {
    fn fetch(&self, site_path: &str) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(site_path.to_string());
        Ok(self
            .resources
            .get(site_path)
            .cloned()
            .unwrap_or_else(Response::not_found))
    }
}

// =========================================================================
// Page configs
// =========================================================================

/// A page one level down that only lists projects.
pub fn projects_page() -> PageConfig {
    PageConfig {
        path: "projects/index.html".to_string(),
        title: "Projects".to_string(),
        body: None,
        hero: None,
        skills: None,
        projects: Some(ProjectsSectionConfig::default()),
    }
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
