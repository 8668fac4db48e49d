//! In-memory JSON source.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use dualtem_traits::error::{TraitError, TraitResult};
use dualtem_traits::source::{JsonRequest, JsonSource};

#[derive(Debug, Clone)]
enum Entry {
    Document(Value),
    Failure(String),
}

/// JSON source answering from a fixed URL → document map.
///
/// Query parameters and headers are ignored when matching. Every request is
/// recorded and can be inspected with [`StaticJsonSource::requests`].
#[derive(Debug, Default)]
pub struct StaticJsonSource {
    entries: HashMap<String, Entry>,
    log: Mutex<Vec<JsonRequest>>,
}

impl StaticJsonSource {
    /// Create an empty source; every request fails with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `url`.
    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.entries.insert(url.into(), Entry::Document(document));
        self
    }

    /// Fail requests for `url` with a connection error.
    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.entries.insert(url.into(), Entry::Failure(message.into()));
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<JsonRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl JsonSource for StaticJsonSource {
    fn get_json(&self, request: &JsonRequest) -> TraitResult<Value> {
        if let Ok(mut log) = self.log.lock() {
            log.push(request.clone());
        }
        match self.entries.get(&request.url) {
            Some(Entry::Document(value)) => Ok(value.clone()),
            Some(Entry::Failure(message)) => Err(TraitError::ConnectionFailed(message.clone())),
            None => Err(TraitError::NotFound(request.url.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serves_documents_by_url() {
        let source = StaticJsonSource::new()
            .with_document("https://a.test/x", json!({"results": []}))
            .with_failure("https://a.test/down", "refused");

        let req = JsonRequest::new("https://a.test/x").query("limit", "3000");
        assert_eq!(source.get_json(&req).unwrap(), json!({"results": []}));

        let err = source.get_json(&JsonRequest::new("https://a.test/down")).unwrap_err();
        assert!(matches!(err, TraitError::ConnectionFailed(_)));

        let err = source.get_json(&JsonRequest::new("https://a.test/y")).unwrap_err();
        assert!(matches!(err, TraitError::NotFound(_)));
    }

    #[test]
    fn test_records_requests() {
        let source = StaticJsonSource::new();
        let _ = source.get_json(&JsonRequest::new("one"));
        let _ = source.get_json(&JsonRequest::new("two"));
        assert_eq!(source.requested_urls(), vec!["one", "two"]);
    }
}
