//! Directory-backed JSON source.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use dualtem_traits::error::{TraitError, TraitResult};
use dualtem_traits::source::{JsonRequest, JsonSource};

/// File name under which the payload for `request` is stored.
///
/// The URL scheme is dropped, the query parameters are sorted by name and
/// appended after `__`, and every character outside `[A-Za-z0-9.-]` becomes
/// `_`:
///
/// ```rust
/// use dualtem_ext_json::file_name_for;
/// use dualtem_traits::JsonRequest;
///
/// let req = JsonRequest::new("https://data912.com/live/arg_bonds");
/// assert_eq!(file_name_for(&req), "data912.com_live_arg_bonds.json");
///
/// let req = JsonRequest::new("https://api.test/series/44")
///     .query("hasta", "2026-03-02")
///     .query("desde", "2025-01-15");
/// assert_eq!(
///     file_name_for(&req),
///     "api.test_series_44__desde_2025-01-15_hasta_2026-03-02.json"
/// );
/// ```
pub fn file_name_for(request: &JsonRequest) -> String {
    let without_scheme = request
        .url
        .split_once("://")
        .map_or(request.url.as_str(), |(_, rest)| rest)
        .trim_end_matches('/');

    let mut name = sanitize(without_scheme);
    if !request.query.is_empty() {
        let mut params = request.query.clone();
        params.sort();
        let joined: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        name.push_str("__");
        name.push_str(&sanitize(&joined.join("&")));
    }
    name.push_str(".json");
    name
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// JSON source reading captured payloads from a directory.
///
/// A request for which the exact file (URL plus query) is missing falls back
/// to the file for the bare URL, so one capture per endpoint is enough.
#[derive(Debug, Clone)]
pub struct FileJsonSource {
    root: PathBuf,
}

impl FileJsonSource {
    /// Create a source over `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` is not a directory.
    pub fn new(root: impl AsRef<Path>) -> TraitResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(TraitError::NotFound(format!(
                "offline directory {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn candidates(&self, request: &JsonRequest) -> Vec<PathBuf> {
        let mut paths = vec![self.root.join(file_name_for(request))];
        if !request.query.is_empty() {
            let bare = JsonRequest::new(request.url.clone());
            paths.push(self.root.join(file_name_for(&bare)));
        }
        paths
    }
}

impl JsonSource for FileJsonSource {
    fn get_json(&self, request: &JsonRequest) -> TraitResult<Value> {
        let Some(path) = self.candidates(request).into_iter().find(|p| p.is_file()) else {
            return Err(TraitError::NotFound(file_name_for(request)));
        };
        debug!(path = %path.display(), url = %request.url, "reading captured payload");
        let text = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
