//! JSON data source abstraction.
//!
//! Both live dependencies of the engine (the central-bank statistics API and
//! the market data feeds) are plain HTTP GETs returning JSON. [`JsonSource`]
//! is the single seam through which they are reached, so resolvers can be
//! driven by fixtures or captured files.

use std::sync::Arc;

use crate::error::TraitResult;

/// A GET request for a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonRequest {
    /// Absolute URL without query string.
    pub url: String,
    /// Extra request headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
}

impl JsonRequest {
    /// Create a request for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Look up a header value, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Source of parsed JSON documents.
///
/// Failures are returned as values; implementations must not panic on
/// network or payload errors.
pub trait JsonSource: Send + Sync {
    /// Fetch and parse the document for `request`.
    fn get_json(&self, request: &JsonRequest) -> TraitResult<serde_json::Value>;
}

impl<T: JsonSource + ?Sized> JsonSource for Arc<T> {
    fn get_json(&self, request: &JsonRequest) -> TraitResult<serde_json::Value> {
        (**self).get_json(request)
    }
}

impl<T: JsonSource + ?Sized> JsonSource for &T {
    fn get_json(&self, request: &JsonRequest) -> TraitResult<serde_json::Value> {
        (**self).get_json(request)
    }
}
