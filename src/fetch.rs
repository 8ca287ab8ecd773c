//! Resource loading.
//!
//! Every component that needs an external document (the header fragment, the
//! project list, the profile) goes through [`ResourceLoader`]. The loader is
//! addressed by **site path** (`/projects.json`, `/nav.html`), the absolute URL
//! path a browser would request, so relative-path resolution stays in one place
//! ([`PageLocation::resolve`](crate::document::PageLocation::resolve)).
//!
//! Responses carry an HTTP-style status. [`FsLoader`] maps a missing file to
//! `404` instead of an error, which keeps "not found" on the same code path as
//! any other non-success status. Real I/O failures stay errors.

use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Path escapes the site root: {0}")]
    OutsideRoot(String),
    #[error("Path is not valid percent-encoded UTF-8: {0}")]
    BadEncoding(String),
}

/// Why a JSON resource could not be turned into a value.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("HTTP {status} for {path}")]
    Status { status: u16, path: String },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// Mirrors `Response.ok` in the Fetch API: any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of site resources.
///
/// Implementations must be `Sync`: pages are rendered in parallel and share
/// one loader.
pub trait ResourceLoader: Sync {
    /// Load the resource at an absolute site path such as `/projects.json`.
    fn fetch(&self, site_path: &str) -> Result<Response, FetchError>;
}

/// Loads resources from the site source directory.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a site path onto the source tree, refusing anything that could
    /// leave it.
    ///
    /// Segments are percent-decoded one at a time, so `%2F` can't introduce
    /// a separator and `%2E%2E` is still a parent segment.
    fn file_path(&self, site_path: &str) -> Result<PathBuf, FetchError> {
        let relative = site_path.trim_start_matches('/');
        let mut path = self.root.clone();
        for segment in relative.split('/') {
            let segment = urlencoding::decode(segment)
                .map_err(|_| FetchError::BadEncoding(site_path.to_string()))?;
            match segment.as_ref() {
                "" | "." => continue,
                ".." => return Err(FetchError::OutsideRoot(site_path.to_string())),
                s if s.contains('\\') || s.contains('/') => {
                    return Err(FetchError::OutsideRoot(site_path.to_string()));
                }
                s => path.push(s),
            }
        }
        Ok(path)
    }
}

impl ResourceLoader for FsLoader {
    fn fetch(&self, site_path: &str) -> Result<Response, FetchError> {
        let path = self.file_path(site_path)?;
        if !path.is_file() {
            return Ok(Response::not_found());
        }
        let body = std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: site_path.to_string(),
            source,
        })?;
        Ok(Response::ok(body))
    }
}

/// Load a resource and require a success status.
pub fn fetch_text(loader: &dyn ResourceLoader, site_path: &str) -> Result<String, LoadError> {
    let response = loader.fetch(site_path)?;
    if !response.is_success() {
        return Err(LoadError::Status {
            status: response.status,
            path: site_path.to_string(),
        });
    }
    Ok(response.body)
}

/// Load a resource and deserialize it as JSON.
pub fn fetch_json<T: DeserializeOwned>(
    loader: &dyn ResourceLoader,
    site_path: &str,
) -> Result<T, LoadError> {
    let body = fetch_text(loader, site_path)?;
    serde_json::from_str(&body).map_err(|source| LoadError::Json {
        path: site_path.to_string(),
        source,
    })
}
