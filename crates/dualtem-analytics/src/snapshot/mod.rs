//! Market snapshot assembled from live bond feeds.
//!
//! Feeds are scanned in priority order. Within a feed every JSON object is
//! visited pre-order in document order; objects whose symbol fields mention
//! the ticker contribute values. Each snapshot attribute keeps the first
//! value found, tagged `"<feed>.<field>"`.

mod schema;

pub use schema::{
    FaceExtractor, FeedSchema, FieldExtractor, FieldValue, MaturityExtractor, PriceExtractor,
    Role, YieldExtractor,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use dualtem_core::Date;
use dualtem_traits::{FeedId, JsonRequest, JsonSource};

/// A named feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEndpoint {
    /// Feed name, used in provenance tags.
    pub name: FeedId,
    /// Feed URL.
    pub url: String,
}

impl FeedEndpoint {
    /// Create an endpoint.
    pub fn new(name: impl Into<FeedId>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Bond and note boards of the default live data provider, in priority order.
pub fn default_feeds() -> Vec<FeedEndpoint> {
    vec![
        FeedEndpoint::new("arg_bonds", "https://data912.com/live/arg_bonds"),
        FeedEndpoint::new("arg_notes", "https://data912.com/live/arg_notes"),
    ]
}

/// A value with its provenance tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    /// The value.
    pub value: T,
    /// Where it came from, e.g. `arg_bonds.last`.
    pub source: String,
}

/// Live values found for one ticker.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MarketSnapshot {
    /// Upper-case ticker.
    pub ticker: String,
    /// Price per 100 of face.
    pub price: Option<Sourced<f64>>,
    /// Annual effective yield, decimal.
    pub yield_decimal: Option<Sourced<f64>>,
    /// Face value.
    pub face: Option<Sourced<f64>>,
    /// Maturity date.
    pub maturity: Option<Sourced<Date>>,
}

impl MarketSnapshot {
    /// Empty snapshot for `ticker` (upper-cased).
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            ..Self::default()
        }
    }

    /// True once price, yield and maturity are all known.
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.yield_decimal.is_some() && self.maturity.is_some()
    }

    /// Stores `value` for `role` unless the role is already set.
    fn offer(&mut self, role: Role, value: FieldValue, source: String) {
        match (role, value) {
            (Role::Price, FieldValue::Number(v)) => set_once(&mut self.price, v, source),
            (Role::Yield, FieldValue::Number(v)) => set_once(&mut self.yield_decimal, v, source),
            (Role::Face, FieldValue::Number(v)) => set_once(&mut self.face, v, source),
            (Role::Maturity, FieldValue::Date(d)) => set_once(&mut self.maturity, d, source),
            _ => {}
        }
    }

    /// Merges every matching object of `document`, read from `feed`.
    pub fn scan(&mut self, feed: &FeedId, document: &Value, schema: &FeedSchema) {
        let ticker = self.ticker.clone();
        for node in objects_preorder(document) {
            if !schema.matches_symbol(node, &ticker) {
                continue;
            }
            for role in Role::ALL {
                if let Some((field, value)) = schema.extract(node, role) {
                    self.offer(role, value, format!("{feed}.{field}"));
                }
            }
        }
    }
}

fn set_once<T>(slot: &mut Option<Sourced<T>>, value: T, source: String) {
    if slot.is_none() {
        *slot = Some(Sourced { value, source });
    }
}

/// Every object in `root`, pre-order, children in document order.
fn objects_preorder(root: &Value) -> Vec<&serde_json::Map<String, Value>> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                out.push(map);
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }
    out
}

/// Scans the configured feeds for a ticker.
pub struct MarketSnapshotResolver {
    source: Arc<dyn JsonSource>,
    feeds: Vec<FeedEndpoint>,
    schema: FeedSchema,
}

impl std::fmt::Debug for MarketSnapshotResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketSnapshotResolver")
            .field("feeds", &self.feeds)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl MarketSnapshotResolver {
    /// Create a resolver scanning `feeds` in order with the default schema.
    pub fn new(source: Arc<dyn JsonSource>, feeds: Vec<FeedEndpoint>) -> Self {
        Self {
            source,
            feeds,
            schema: FeedSchema::default(),
        }
    }

    /// Builds the snapshot for `ticker`. Never fails: unreachable feeds are
    /// skipped and missing values stay `None`.
    pub fn resolve(&self, ticker: &str) -> MarketSnapshot {
        let mut snapshot = MarketSnapshot::new(ticker);
        for feed in &self.feeds {
            match self.source.get_json(&JsonRequest::new(feed.url.clone())) {
                Ok(document) => snapshot.scan(&feed.name, &document, &self.schema),
                Err(e) => {
                    warn!(feed = %feed.name, error = %e, "feed unavailable, skipping");
                    continue;
                }
            }
            if snapshot.is_complete() {
                debug!(feed = %feed.name, "snapshot complete");
                break;
            }
        }
        debug!(
            ticker = %snapshot.ticker,
            price = ?snapshot.price.as_ref().map(|s| &s.source),
            yield_decimal = ?snapshot.yield_decimal.as_ref().map(|s| &s.source),
            maturity = ?snapshot.maturity.as_ref().map(|s| &s.source),
            "resolved market snapshot"
        );
        snapshot
    }
}
