//! Reference-rate series from the central-bank monetary statistics API.
//!
//! The API lists every monetary variable at `{base}` and serves one
//! variable's history at `{base}/{id}`. Both answer `{"results": [...]}` with
//! entries carrying `idVariable`, `descripcion`, `fecha` and `valor` (a
//! percentage).

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use dualtem_core::Date;
use dualtem_traits::{JsonRequest, JsonSource, SeriesId};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::json;

/// Monetary statistics API v3.0.
pub const DEFAULT_SERIES_BASE_URL: &str = "https://api.bcra.gob.ar/estadisticas/v3.0/monetarias";

/// Page size requested for series history.
pub const SERIES_PAGE_LIMIT: u32 = 3000;

/// Default `Accept-Language` for statistics requests.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "es-AR";

/// How well a catalog description matches the private-bank reference rate.
///
/// Fields compare lexicographically in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SeriesScore {
    /// Mentions "tamar".
    pub reference_rate: bool,
    /// Mentions "promedio", "bancos" and "privados".
    pub private_bank_average: bool,
    /// Mentions "plazo fijo".
    pub time_deposit: bool,
    /// Quotes the billion-peso deposit tier.
    pub billion_scale: bool,
}

impl SeriesScore {
    /// Scores a description, case-insensitively.
    pub fn of(description: &str) -> Self {
        let d = description.to_lowercase();
        Self {
            reference_rate: d.contains("tamar"),
            private_bank_average: d.contains("promedio")
                && d.contains("bancos")
                && d.contains("privados"),
            time_deposit: d.contains("plazo fijo"),
            billion_scale: d.contains("mil millones")
                || d.contains("1.000.000.000")
                || d.contains("1000000000"),
        }
    }
}

/// Picks the best-scoring series from catalog entries.
///
/// Entries without an integral `idVariable` are skipped. Ties keep the first
/// entry seen. Returns `None` unless the winner mentions the reference rate.
pub fn select_series_id(entries: &[Value]) -> Option<SeriesId> {
    let mut best: Option<(SeriesId, SeriesScore)> = None;
    for entry in entries {
        let Some(id) = entry.get("idVariable").and_then(json::lenient_integer) else {
            continue;
        };
        let description = entry
            .get("descripcion")
            .filter(|v| !v.is_null())
            .map(json::text)
            .unwrap_or_default();
        let score = SeriesScore::of(&description);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((SeriesId::new(id), score));
        }
    }
    best.filter(|(_, score)| score.reference_rate)
        .map(|(id, _)| id)
}

/// One dated observation of a percentage series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateObservation {
    /// Observation date.
    pub date: Date,
    /// Value in percent (`32.5` for 32.5%).
    pub percent: f64,
}

impl RateObservation {
    /// Value as a decimal.
    pub fn decimal(&self) -> f64 {
        self.percent / 100.0
    }
}

/// Discovers the reference-rate series and reads its values.
pub struct RateSeriesResolver {
    source: Arc<dyn JsonSource>,
    base_url: String,
    accept_language: String,
}

impl std::fmt::Debug for RateSeriesResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateSeriesResolver")
            .field("base_url", &self.base_url)
            .field("accept_language", &self.accept_language)
            .finish_non_exhaustive()
    }
}

impl RateSeriesResolver {
    /// Create a resolver over `source` for the API rooted at `base_url`.
    pub fn new(source: Arc<dyn JsonSource>, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }

    /// Override the `Accept-Language` header.
    #[must_use]
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    fn catalog_request(&self) -> JsonRequest {
        JsonRequest::new(self.base_url.clone()).header("Accept-Language", &self.accept_language)
    }

    fn series_request(&self, id: SeriesId, from: Date, to: Date) -> JsonRequest {
        JsonRequest::new(format!("{}/{id}", self.base_url))
            .header("Accept-Language", &self.accept_language)
            .query("desde", from.to_string())
            .query("hasta", to.to_string())
            .query("limit", SERIES_PAGE_LIMIT.to_string())
            .query("offset", "0")
    }

    fn catalog(&self) -> AnalyticsResult<Vec<Value>> {
        let document = self
            .source
            .get_json(&self.catalog_request())
            .map_err(|e| AnalyticsError::unavailable("series catalog", e.to_string()))?;
        json::results(&document)
            .cloned()
            .ok_or_else(|| AnalyticsError::unavailable("series catalog", "missing results list"))
    }

    fn window(&self, id: SeriesId, from: Date, to: Date) -> AnalyticsResult<Vec<Value>> {
        debug!(series = %id, %from, %to, "fetching series window");
        let document = self
            .source
            .get_json(&self.series_request(id, from, to))
            .map_err(|e| AnalyticsError::unavailable(format!("series {id}"), e.to_string()))?;
        json::results(&document)
            .cloned()
            .ok_or_else(|| AnalyticsError::unavailable(format!("series {id}"), "missing results list"))
    }

    /// Finds the reference-rate series by scoring the catalog descriptions.
    pub fn resolve_series_id(&self) -> AnalyticsResult<SeriesId> {
        let entries = self.catalog()?;
        let id = select_series_id(&entries).ok_or_else(|| {
            AnalyticsError::unavailable("series id", "no catalog entry mentions the reference rate")
        })?;
        debug!(series = %id, candidates = entries.len(), "resolved reference-rate series");
        Ok(id)
    }

    /// Returns `id` when given, otherwise resolves it from the catalog.
    pub fn series_id_or_resolve(&self, id: Option<SeriesId>) -> AnalyticsResult<SeriesId> {
        match id {
            Some(id) => Ok(id),
            None => self.resolve_series_id(),
        }
    }

    /// Mean of the series over `[from, to]`, as a decimal.
    ///
    /// Rows with a non-numeric `valor` are ignored; an empty window is an error.
    pub fn fetch_average(&self, id: SeriesId, from: Date, to: Date) -> AnalyticsResult<f64> {
        let rows = self.window(id, from, to)?;
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.get("valor").and_then(json::lenient_number))
            .collect();
        if values.is_empty() {
            warn!(series = %id, %from, %to, "no observations in window");
            return Err(AnalyticsError::unavailable(
                format!("series {id}"),
                format!("no observations between {from} and {to}"),
            ));
        }
        let mean_percent = values.iter().sum::<f64>() / values.len() as f64;
        Ok(mean_percent / 100.0)
    }

    /// Observations over `[from, to]`, ascending by date.
    ///
    /// Rows with an unparsable date or value are skipped.
    pub fn fetch_series(
        &self,
        id: SeriesId,
        from: Date,
        to: Date,
    ) -> AnalyticsResult<Vec<RateObservation>> {
        let rows = self.window(id, from, to)?;
        let mut observations: Vec<RateObservation> = rows
            .iter()
            .filter_map(|row| {
                Some(RateObservation {
                    date: row.get("fecha").and_then(json::date)?,
                    percent: row.get("valor").and_then(json::lenient_number)?,
                })
            })
            .collect();
        if observations.len() < rows.len() {
            debug!(
                series = %id,
                skipped = rows.len() - observations.len(),
                "skipped unparsable rows"
            );
        }
        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }

    /// Latest published value of `id` from the catalog listing, as a decimal.
    pub fn fetch_latest(&self, id: SeriesId) -> AnalyticsResult<f64> {
        let entries = self.catalog()?;
        entries
            .iter()
            .find(|entry| {
                entry.get("idVariable").and_then(json::lenient_integer) == Some(id.value())
            })
            .and_then(|entry| entry.get("valor").and_then(json::lenient_number))
            .map(|percent| percent / 100.0)
            .ok_or_else(|| {
                AnalyticsError::unavailable(format!("series {id}"), "not listed in catalog")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dualtem_ext_json::StaticJsonSource;
    use serde_json::json;

    const BASE: &str = "https://stats.test/monetarias";

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn catalog() -> Value {
        json!({"results": [
            {"idVariable": 1, "descripcion": "Reservas Internacionales del BCRA", "valor": 29000},
            {"idVariable": 43, "descripcion": "TAMAR en pesos de bancos (en % n.a.)", "valor": 31.0},
            {"idVariable": "44", "descripcion": "TAMAR promedio de bancos privados, plazo fijo de mil millones (en % n.a.)", "valor": "32.5"},
            {"idVariable": 45, "descripcion": "BADLAR promedio bancos privados plazo fijo", "valor": 30.0}
        ]})
    }

    fn resolver(source: StaticJsonSource) -> RateSeriesResolver {
        RateSeriesResolver::new(Arc::new(source), BASE)
    }

    #[test]
    fn test_score_order() {
        let full = SeriesScore::of("TAMAR Promedio BANCOS privados Plazo Fijo 1.000.000.000");
        assert!(full.reference_rate && full.private_bank_average);
        assert!(full.time_deposit && full.billion_scale);
        assert!(SeriesScore::of("tamar") > SeriesScore::of("promedio bancos privados plazo fijo mil millones"));
    }

    #[test]
    fn test_select_prefers_full_match() {
        let doc = catalog();
        let entries = json::results(&doc).unwrap();
        assert_eq!(select_series_id(entries), Some(SeriesId::new(44)));
    }

    #[test]
    fn test_select_tie_keeps_first_seen() {
        let entries = vec![
            json!({"idVariable": 7, "descripcion": "TAMAR bancos"}),
            json!({"idVariable": 8, "descripcion": "tamar BANCOS"}),
        ];
        assert_eq!(select_series_id(&entries), Some(SeriesId::new(7)));
    }

    #[test]
    fn test_select_requires_reference_keyword() {
        let entries = vec![
            json!({"idVariable": 45, "descripcion": "BADLAR promedio bancos privados plazo fijo"}),
            json!({"idVariable": "abc", "descripcion": "TAMAR"}),
            json!({"descripcion": "TAMAR"}),
        ];
        assert_eq!(select_series_id(&entries), None);
        assert_eq!(select_series_id(&[]), None);
    }

    #[test]
    fn test_resolve_series_id_from_catalog() {
        let resolver = resolver(StaticJsonSource::new().with_document(BASE, catalog()));
        assert_eq!(resolver.resolve_series_id().unwrap(), SeriesId::new(44));
        assert_eq!(
            resolver.series_id_or_resolve(Some(SeriesId::new(9))).unwrap(),
            SeriesId::new(9)
        );
    }

    #[test]
    fn test_fetch_average_and_request_shape() {
        let source = Arc::new(StaticJsonSource::new().with_document(
            format!("{BASE}/44"),
            json!({"results": [
                {"fecha": "2025-01-15", "valor": 30.0},
                {"fecha": "2025-01-16", "valor": "32.0"},
                {"fecha": "2025-01-17", "valor": null}
            ]}),
        ));
        let resolver = RateSeriesResolver::new(source.clone(), format!("{BASE}/"));
        let avg = resolver
            .fetch_average(SeriesId::new(44), date(2025, 1, 15), date(2025, 1, 17))
            .unwrap();
        assert_relative_eq!(avg, 0.31, epsilon = 1e-12);

        let request = &source.requests()[0];
        assert_eq!(request.url, format!("{BASE}/44"));
        assert_eq!(request.header_value("Accept-Language"), Some("es-AR"));
        let query: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            query,
            vec![
                ("desde", "2025-01-15"),
                ("hasta", "2025-01-17"),
                ("limit", "3000"),
                ("offset", "0")
            ]
        );
    }

    #[test]
    fn test_fetch_average_unavailable() {
        let empty = resolver(
            StaticJsonSource::new().with_document(format!("{BASE}/44"), json!({"results": []})),
        );
        assert!(empty
            .fetch_average(SeriesId::new(44), date(2025, 1, 1), date(2025, 2, 1))
            .is_err());

        let down = resolver(StaticJsonSource::new().with_failure(format!("{BASE}/44"), "refused"));
        let err = down
            .fetch_average(SeriesId::new(44), date(2025, 1, 1), date(2025, 2, 1))
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::DataUnavailable { .. }));
    }

    #[test]
    fn test_fetch_series_sorted_and_tolerant() {
        let resolver = resolver(StaticJsonSource::new().with_document(
            format!("{BASE}/44"),
            json!({"results": [
                {"fecha": "17/01/2025", "valor": 31.5},
                {"fecha": "2025/01/15", "valor": 30.0},
                {"fecha": "yesterday", "valor": 99.0},
                {"fecha": "16-01-2025", "valor": "31"}
            ]}),
        ));
        let series = resolver
            .fetch_series(SeriesId::new(44), date(2025, 1, 15), date(2025, 1, 17))
            .unwrap();
        let dates: Vec<String> = series.iter().map(|o| o.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-15", "2025-01-16", "2025-01-17"]);
        assert_relative_eq!(series[2].decimal(), 0.315);
    }

    #[test]
    fn test_fetch_latest() {
        let resolver = resolver(StaticJsonSource::new().with_document(BASE, catalog()));
        assert_relative_eq!(resolver.fetch_latest(SeriesId::new(44)).unwrap(), 0.325);
        assert_relative_eq!(resolver.fetch_latest(SeriesId::new(43)).unwrap(), 0.31);
        assert!(resolver.fetch_latest(SeriesId::new(999)).is_err());
    }
}
