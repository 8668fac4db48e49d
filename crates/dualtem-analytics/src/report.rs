//! Full TEM report for a ticker.
//!
//! The assembler reconciles explicit overrides, the live market snapshot and
//! the bond catalog into one set of inputs, then runs both engines. Each
//! section fails on its own: a failure becomes `{"error": "..."}` in that
//! section and the rest of the report is still produced.

use serde::Serialize;
use tracing::{debug, info, warn};

use dualtem_bonds::{BondCatalog, BondIdentity};
use dualtem_core::Date;
use dualtem_traits::SeriesId;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::market::{MarketInputs, MarketTem, MarketTemEngine, SourcePreference};
use crate::prospectus::{ProspectusParams, ProspectusTem, ProspectusTemEngine};
use crate::series::RateSeriesResolver;
use crate::snapshot::{MarketSnapshot, MarketSnapshotResolver, Sourced};

/// Face value assumed when neither an override nor a feed supplies one.
pub const DEFAULT_FACE_VALUE: f64 = 100.0;

/// Provenance tag for explicit overrides.
pub const SOURCE_OVERRIDE: &str = "override";
/// Provenance tag for catalog fallbacks.
pub const SOURCE_CATALOG: &str = "catalog";
/// Provenance tag when nothing supplied a value.
pub const SOURCE_UNAVAILABLE: &str = "unavailable";

/// What to compute, with optional overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportRequest {
    /// Bond ticker.
    pub ticker: String,
    /// Issue date override.
    pub issue: Option<Date>,
    /// Maturity date override.
    pub maturity: Option<Date>,
    /// Fixed monthly TEM override.
    pub fixed_tem: Option<f64>,
    /// Settlement date; today when absent.
    pub settlement: Option<Date>,
    /// Face value override.
    pub face: Option<f64>,
    /// Price override, per 100.
    pub price: Option<f64>,
    /// Annual yield override, decimal.
    pub yield_decimal: Option<f64>,
    /// Reference-rate average override, decimal.
    pub reference_average: Option<f64>,
    /// Reference-rate series id; resolved from the catalog when absent.
    pub series_id: Option<SeriesId>,
    /// Skip holidays when shifting the observation window.
    pub use_holidays: bool,
    /// Market TEM selection rule.
    pub market_source: SourcePreference,
}

impl ReportRequest {
    /// Request for `ticker` with holidays on and automatic source selection.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            use_holidays: true,
            ..Self::default()
        }
    }
}

/// The reconciled inputs shared by both sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportInputs {
    /// Upper-case ticker.
    pub ticker: String,
    /// Settlement date.
    pub settlement_date: Date,
    /// Maturity date, if determined.
    pub maturity_date: Option<Date>,
    /// Where the maturity came from.
    pub maturity_source: String,
    /// Face value.
    pub face_value: f64,
    /// Price per 100.
    pub price: Option<f64>,
    /// Where the price came from.
    pub price_source: Option<String>,
    /// Annual effective yield, decimal.
    pub yield_decimal: Option<f64>,
    /// Where the yield came from.
    pub yield_source: Option<String>,
}

/// A report section: the computed value or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionOutcome<T> {
    /// Computed section.
    Ok(T),
    /// Section-scoped failure.
    Error {
        /// Failure description.
        error: String,
    },
}

impl<T> SectionOutcome<T> {
    /// Failed section with `error`.
    pub fn error(error: impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }

    /// The computed value, if any.
    pub fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error { .. } => None,
        }
    }

    /// The failure description, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Error { error } => Some(error),
        }
    }
}

impl<T, E: ToString> From<Result<T, E>> for SectionOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::error(e),
        }
    }
}

/// The consumer-facing report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemReport {
    /// Reconciled inputs.
    pub inputs: ReportInputs,
    /// Prospectus section; `None` when the ticker is not a known dual bond
    /// and no complete set of overrides was given.
    pub prospectus: Option<SectionOutcome<ProspectusTem>>,
    /// Market section.
    pub market: SectionOutcome<MarketTem>,
}

/// Builds [`TemReport`]s.
#[derive(Debug)]
pub struct ReportAssembler {
    series: RateSeriesResolver,
    snapshot: MarketSnapshotResolver,
    catalog: BondCatalog,
    today: Date,
}

impl ReportAssembler {
    /// Assembler over the global catalog.
    pub fn new(series: RateSeriesResolver, snapshot: MarketSnapshotResolver, today: Date) -> Self {
        Self {
            series,
            snapshot,
            catalog: BondCatalog::global().clone(),
            today,
        }
    }

    /// Produces the report. Never fails.
    ///
    /// Both engines are total: fetch failures and undefined formulas come
    /// back as `None` fields, so the only section error is a maturity that
    /// cannot be determined. A panic inside an engine is a bug and is not
    /// caught here.
    pub fn assemble(&self, request: &ReportRequest) -> TemReport {
        let ticker = request.ticker.trim().to_uppercase();
        let known = self.catalog.get(&ticker);
        let snapshot = self.snapshot.resolve(&ticker);
        let inputs = self.reconcile(&ticker, request, &snapshot, known);

        let market = match inputs.maturity_date {
            Some(maturity) => SectionOutcome::Ok(self.market_section(request, &inputs, maturity)),
            None => {
                warn!(ticker = %ticker, "maturity date could not be determined");
                SectionOutcome::error(AnalyticsError::Configuration(
                    "maturity date could not be determined".into(),
                ))
            }
        };

        let prospectus: Option<SectionOutcome<ProspectusTem>> = self
            .prospectus_identity(&ticker, request, known)
            .map(|identity| {
                identity
                    .map(|identity| {
                        ProspectusTemEngine::new(&self.series, self.today).compute(
                            &identity,
                            &ProspectusParams {
                                use_holidays: request.use_holidays,
                                series_id: request.series_id,
                                average_override: request.reference_average,
                            },
                        )
                    })
                    .into()
            });

        info!(
            ticker = %ticker,
            prospectus = prospectus.is_some(),
            market_ok = market.ok().is_some(),
            "report assembled"
        );

        TemReport {
            inputs,
            prospectus,
            market,
        }
    }

    fn reconcile(
        &self,
        ticker: &str,
        request: &ReportRequest,
        snapshot: &MarketSnapshot,
        known: Option<&BondIdentity>,
    ) -> ReportInputs {
        let (price, price_source) = pick(request.price, snapshot.price.as_ref());

        let (mut yield_decimal, mut yield_source) =
            pick(request.yield_decimal, snapshot.yield_decimal.as_ref());
        if yield_decimal.is_none() {
            if let Some(catalog_yield) = known.and_then(BondIdentity::reference_annual_yield) {
                debug!(ticker, "yield from catalog");
                yield_decimal = Some(catalog_yield);
                yield_source = Some(SOURCE_CATALOG.to_string());
            }
        }

        let (maturity_date, maturity_source) = match (request.maturity, snapshot.maturity.as_ref())
        {
            (Some(maturity), _) => (Some(maturity), SOURCE_OVERRIDE.to_string()),
            (None, Some(found)) => (Some(found.value), found.source.clone()),
            (None, None) => match known {
                Some(bond) => (Some(bond.maturity_date()), SOURCE_CATALOG.to_string()),
                None => (None, SOURCE_UNAVAILABLE.to_string()),
            },
        };

        let face_value = request
            .face
            .or_else(|| snapshot.face.as_ref().map(|f| f.value))
            .unwrap_or(DEFAULT_FACE_VALUE);

        ReportInputs {
            ticker: ticker.to_string(),
            settlement_date: request.settlement.unwrap_or(self.today),
            maturity_date,
            maturity_source,
            face_value,
            price,
            price_source,
            yield_decimal,
            yield_source,
        }
    }

    fn market_section(
        &self,
        request: &ReportRequest,
        inputs: &ReportInputs,
        maturity: Date,
    ) -> MarketTem {
        let fallback_reference_rate = self
            .series
            .series_id_or_resolve(request.series_id)
            .and_then(|id| self.series.fetch_latest(id))
            .map_err(|e| warn!(error = %e, "latest reference rate unavailable"))
            .ok();

        MarketTemEngine::new().compute(&MarketInputs {
            maturity,
            settlement: inputs.settlement_date,
            face: inputs.face_value,
            price: inputs.price,
            yield_decimal: inputs.yield_decimal,
            fallback_reference_rate,
            preference: request.market_source,
        })
    }

    /// The bond the prospectus section is computed for, if any.
    fn prospectus_identity(
        &self,
        ticker: &str,
        request: &ReportRequest,
        known: Option<&BondIdentity>,
    ) -> Option<AnalyticsResult<BondIdentity>> {
        let identity = match (known, request.issue, request.maturity, request.fixed_tem) {
            (Some(bond), issue, maturity, fixed) => bond.with_overrides(issue, maturity, fixed),
            (None, Some(issue), Some(maturity), Some(fixed)) => {
                BondIdentity::new(ticker, issue, maturity, fixed)
            }
            _ => {
                debug!(ticker, "not a known dual bond, no prospectus section");
                return None;
            }
        };
        Some(identity.map_err(|e| AnalyticsError::Configuration(e.to_string())))
    }
}

/// Override first, then the snapshot value with its provenance.
fn pick(
    override_value: Option<f64>,
    found: Option<&Sourced<f64>>,
) -> (Option<f64>, Option<String>) {
    match (override_value, found) {
        (Some(value), _) => (Some(value), Some(SOURCE_OVERRIDE.to_string())),
        (None, Some(found)) => (Some(found.value), Some(found.source.clone())),
        (None, None) => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use dualtem_ext_json::StaticJsonSource;
    use serde_json::json;

    use crate::market::MarketSource;
    use crate::prospectus::RateSource;
    use crate::snapshot::FeedEndpoint;

    const BASE: &str = "https://rates.test/monetarias";
    const BONDS: &str = "https://feeds.test/bonds";

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn assembler(source: StaticJsonSource) -> ReportAssembler {
        let source = Arc::new(source);
        ReportAssembler::new(
            RateSeriesResolver::new(source.clone(), BASE),
            MarketSnapshotResolver::new(source, vec![FeedEndpoint::new("arg_bonds", BONDS)]),
            date(2025, 6, 2),
        )
    }

    #[test]
    fn test_unknown_ticker_without_maturity() {
        let report = assembler(StaticJsonSource::new()).assemble(&ReportRequest::new("al30"));
        assert_eq!(report.inputs.ticker, "AL30");
        assert_eq!(report.inputs.maturity_source, "unavailable");
        assert_eq!(report.inputs.face_value, 100.0);
        assert!(report.prospectus.is_none());
        assert!(report
            .market
            .error_message()
            .unwrap()
            .contains("maturity date could not be determined"));
    }

    #[test]
    fn test_known_ticker_falls_back_to_catalog() {
        let report = assembler(StaticJsonSource::new()).assemble(&ReportRequest {
            reference_average: Some(0.50),
            ..ReportRequest::new("TTM26")
        });
        let inputs = &report.inputs;
        assert_eq!(inputs.maturity_date, Some(date(2026, 3, 16)));
        assert_eq!(inputs.maturity_source, "catalog");
        assert_eq!(inputs.yield_decimal, Some(0.3055));
        assert_eq!(inputs.yield_source.as_deref(), Some("catalog"));
        assert_eq!(inputs.settlement_date, date(2025, 6, 2));
        assert_eq!(inputs.price_source, None);

        let market = report.market.ok().unwrap();
        assert_eq!(market.tem_market_source, Some(MarketSource::Yield));
        assert_eq!(market.fallback_reference_rate, None);

        let prospectus = report.prospectus.unwrap();
        let prospectus = prospectus.ok().unwrap();
        assert_eq!(prospectus.rate_source, RateSource::Override);
        assert_relative_eq!(prospectus.tem_prospectus, 0.0416222, epsilon = 1e-6);
    }

    #[test]
    fn test_overrides_win_over_snapshot() {
        let source = StaticJsonSource::new().with_document(
            BONDS,
            json!([{"symbol": "TTJ26", "last": 97.0, "tir": 29.0, "vto": "2026-06-30"}]),
        );
        let report = assembler(source).assemble(&ReportRequest {
            price: Some(95.0),
            ..ReportRequest::new("TTJ26")
        });
        let inputs = &report.inputs;
        assert_eq!(inputs.price, Some(95.0));
        assert_eq!(inputs.price_source.as_deref(), Some("override"));
        assert_relative_eq!(inputs.yield_decimal.unwrap(), 0.29, epsilon = 1e-12);
        assert_eq!(inputs.yield_source.as_deref(), Some("arg_bonds.tir"));
        assert_eq!(inputs.maturity_source, "arg_bonds.vto");
    }

    #[test]
    fn test_complete_overrides_enable_prospectus_for_unknown_ticker() {
        let report = assembler(StaticJsonSource::new()).assemble(&ReportRequest {
            issue: Some(date(2025, 2, 1)),
            maturity: Some(date(2026, 2, 1)),
            fixed_tem: Some(0.02),
            ..ReportRequest::new("TTX26")
        });
        assert_eq!(report.inputs.maturity_source, "override");
        let prospectus = report.prospectus.unwrap();
        let prospectus = prospectus.ok().unwrap();
        assert_eq!(prospectus.rate_source, RateSource::Unavailable);
        assert_eq!(prospectus.tem_prospectus, 0.02);

        // No yield, price or reference rate to derive a market TEM from
        assert!(report.market.ok().unwrap().tem_market.is_none());
    }

    #[test]
    fn test_invalid_override_schedule_is_section_error() {
        let report = assembler(StaticJsonSource::new()).assemble(&ReportRequest {
            issue: Some(date(2027, 1, 1)),
            ..ReportRequest::new("TTD26")
        });
        let prospectus = report.prospectus.unwrap();
        assert!(prospectus.error_message().is_some());
        assert!(report.market.ok().is_some());
    }

    #[test]
    fn test_fallback_rate_from_catalog_listing() {
        let source = StaticJsonSource::new().with_document(
            BASE,
            json!({"results": [
                {"idVariable": 44, "descripcion": "TAMAR en pesos de bancos privados (en % n.a.)", "valor": 40.0}
            ]}),
        );
        let report = assembler(source).assemble(&ReportRequest {
            market_source: SourcePreference::Fallback,
            ..ReportRequest::new("TTS26")
        });
        let market = report.market.ok().unwrap();
        assert_eq!(market.fallback_reference_rate, Some(0.40));
        assert_eq!(market.tem_market_source, Some(MarketSource::Fallback));
    }

    #[test]
    fn test_serialized_shape() {
        let report = assembler(StaticJsonSource::new()).assemble(&ReportRequest::new("AL30"));
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["prospectus"].is_null());
        assert!(value["market"]["error"].is_string());
        assert_eq!(value["inputs"]["maturity_date"], serde_json::Value::Null);
        assert_eq!(value["inputs"]["settlement_date"], "2025-06-02");
    }
}
