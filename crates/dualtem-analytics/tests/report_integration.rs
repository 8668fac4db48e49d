//! End-to-end report assembly against in-memory payloads shaped like the
//! central-bank statistics API and the live bond boards.

use std::sync::Arc;

use approx::assert_relative_eq;
use serde_json::{json, Value};

use dualtem_analytics::prelude::*;
use dualtem_core::Date;
use dualtem_ext_json::StaticJsonSource;
use dualtem_traits::SeriesId;

const BASE: &str = "https://api.test/estadisticas/v3.0/monetarias";
const ARG_BONDS: &str = "https://live.test/arg_bonds";
const ARG_NOTES: &str = "https://live.test/arg_notes";

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn catalog() -> Value {
    json!({
        "status": 200,
        "results": [
            {"idVariable": 7, "descripcion": "BADLAR en pesos de bancos privados (en % n.a.)", "fecha": "2025-05-30", "valor": 29.8},
            {"idVariable": 44, "descripcion": "TAMAR en pesos de bancos privados (en % n.a.)", "fecha": "2025-05-30", "valor": "31.5"},
            {"idVariable": 45, "descripcion": "TAMAR en pesos de bancos privados (en % e.a.)", "fecha": "2025-05-30", "valor": 36.4}
        ]
    })
}

fn series(values: &[(&str, f64)]) -> Value {
    let rows: Vec<Value> = values
        .iter()
        .map(|(fecha, valor)| json!({"fecha": fecha, "valor": valor}))
        .collect();
    json!({"status": 200, "results": rows})
}

fn feeds() -> Vec<FeedEndpoint> {
    vec![
        FeedEndpoint::new("arg_bonds", ARG_BONDS),
        FeedEndpoint::new("arg_notes", ARG_NOTES),
    ]
}

fn assembler(source: &Arc<StaticJsonSource>) -> ReportAssembler {
    ReportAssembler::new(
        RateSeriesResolver::new(source.clone(), BASE),
        MarketSnapshotResolver::new(source.clone(), feeds()),
        date(2025, 6, 2),
    )
}

fn live_source(window: Value) -> Arc<StaticJsonSource> {
    Arc::new(
        StaticJsonSource::new()
            .with_document(BASE, catalog())
            .with_document(format!("{BASE}/44"), window)
            .with_document(
                ARG_BONDS,
                json!([
                    {"symbol": "TTM26", "c": 101.5, "v": 1200000, "q_op": 310},
                    {"symbol": "TTJ26", "c": 99.1}
                ]),
            )
            .with_document(
                ARG_NOTES,
                json!({"data": [{"ticker": "TTM26", "tir": 31.2, "vto": "16/03/2026"}]}),
            ),
    )
}

#[test]
fn test_full_report_from_live_payloads() {
    let source = live_source(series(&[("2025-01-16", 32.0), ("2025-01-15", 30.0)]));
    let report = assembler(&source).assemble(&ReportRequest::new("ttm26"));

    let inputs = &report.inputs;
    assert_eq!(inputs.ticker, "TTM26");
    assert_eq!(inputs.price, Some(101.5));
    assert_eq!(inputs.price_source.as_deref(), Some("arg_bonds.c"));
    assert_relative_eq!(inputs.yield_decimal.unwrap(), 0.312, epsilon = 1e-12);
    assert_eq!(inputs.yield_source.as_deref(), Some("arg_notes.tir"));
    assert_eq!(inputs.maturity_date, Some(date(2026, 3, 16)));
    assert_eq!(inputs.maturity_source, "arg_notes.vto");
    assert_eq!(inputs.face_value, 100.0);

    let market = report.market.ok().expect("market section");
    assert_eq!(market.tem_market_source, Some(MarketSource::Yield));
    assert_relative_eq!(market.tem_market.unwrap(), 0.022887378, epsilon = 1e-9);
    assert_eq!(market.tem_market_percentage_str.as_deref(), Some("2.29%"));
    assert_relative_eq!(market.fallback_reference_rate.unwrap(), 0.315, epsilon = 1e-12);
    assert!(market.tem_from_bullet.is_some());

    let prospectus = report.prospectus.as_ref().and_then(SectionOutcome::ok).unwrap();
    assert_eq!(prospectus.rate_source, RateSource::Resolved);
    assert_eq!(prospectus.series_id, Some(SeriesId::new(44)));
    assert_eq!(prospectus.window_start, date(2025, 1, 15));
    assert_eq!(prospectus.window_end, date(2026, 3, 2));
    assert_eq!(prospectus.window_end_clamped, date(2025, 6, 2));
    assert_relative_eq!(prospectus.reference_average.unwrap(), 0.31, epsilon = 1e-12);
    assert_relative_eq!(prospectus.reference_tem.unwrap(), 0.025816127, epsilon = 1e-9);
    assert_eq!(prospectus.tem_prospectus, prospectus.reference_tem.unwrap());
    assert_eq!(prospectus.samples_count, 2);
    assert_eq!(prospectus.last_5_percent.as_deref(), Some(&[30.0, 32.0][..]));
    assert_eq!(prospectus.latest_percent, Some(32.0));
}

#[test]
fn test_low_reference_rate_keeps_fixed_floor() {
    let source = live_source(series(&[("2025-01-15", 20.0), ("2025-01-16", 20.0)]));
    let report = assembler(&source).assemble(&ReportRequest::new("TTM26"));
    let prospectus = report.prospectus.as_ref().and_then(SectionOutcome::ok).unwrap();
    assert_relative_eq!(prospectus.reference_tem.unwrap(), 0.016659481, epsilon = 1e-9);
    assert_eq!(prospectus.tem_prospectus, 0.0225);
    assert_eq!(prospectus.tem_prospectus_percentage_str, "2.25%");
}

#[test]
fn test_series_requests_carry_window_and_language() {
    let source = live_source(series(&[("2025-01-15", 30.0)]));
    assembler(&source).assemble(&ReportRequest::new("TTM26"));

    let window_requests: Vec<_> = source
        .requests()
        .into_iter()
        .filter(|r| r.url == format!("{BASE}/44"))
        .collect();
    assert_eq!(window_requests.len(), 2);
    for request in &window_requests {
        assert_eq!(request.header_value("accept-language"), Some("es-AR"));
        let query: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            query,
            vec![
                ("desde", "2025-01-15"),
                ("hasta", "2025-06-02"),
                ("limit", "3000"),
                ("offset", "0"),
            ]
        );
    }
}

#[test]
fn test_everything_offline_degrades_to_fixed_and_catalog() {
    let source = Arc::new(
        StaticJsonSource::new()
            .with_failure(BASE, "connection refused")
            .with_failure(ARG_BONDS, "connection refused")
            .with_failure(ARG_NOTES, "connection refused"),
    );
    let report = assembler(&source).assemble(&ReportRequest {
        use_holidays: false,
        ..ReportRequest::new("TTD26")
    });

    assert_eq!(report.inputs.maturity_source, "catalog");
    assert_eq!(report.inputs.yield_source.as_deref(), Some("catalog"));

    let prospectus = report.prospectus.as_ref().and_then(SectionOutcome::ok).unwrap();
    assert_eq!(prospectus.rate_source, RateSource::Unavailable);
    assert_eq!(prospectus.tem_prospectus, 0.0214);
    assert!(prospectus.reference_tem.is_none());
    assert!(prospectus.last_5_percent.is_none());
    assert_eq!(prospectus.samples_count, 0);

    let market = report.market.ok().unwrap();
    assert_eq!(market.tem_market_source, Some(MarketSource::Yield));
    assert!(market.fallback_reference_rate.is_none());
}

#[test]
fn test_price_preference_without_price_is_null() {
    let source = Arc::new(StaticJsonSource::new());
    let report = assembler(&source).assemble(&ReportRequest {
        yield_decimal: Some(0.30),
        market_source: SourcePreference::Price,
        ..ReportRequest::new("TTS26")
    });
    let market = report.market.ok().unwrap();
    assert!(market.tem_from_yield.is_some());
    assert!(market.tem_market.is_none());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["market"]["tem_market"], Value::Null);
    assert_eq!(value["market"]["source_preference"], "price");
    assert_eq!(value["inputs"]["yield_source"], "override");
}

#[test]
fn test_report_json_sections() {
    let source = live_source(series(&[("2025-01-15", 30.0)]));
    let report = assembler(&source).assemble(&ReportRequest {
        reference_average: Some(0.50),
        ..ReportRequest::new("TTM26")
    });
    let value = serde_json::to_value(&report).unwrap();

    let sections: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(sections, vec!["inputs", "prospectus", "market"]);
    assert_eq!(value["prospectus"]["rate_source"], "override");
    assert_eq!(value["prospectus"]["tem_prospectus_percentage_str"], "4.16%");
    assert_eq!(value["prospectus"]["window_start"], "2025-01-15");
    assert!(value["prospectus"]["series_id"].is_null());
}

#[test]
fn test_feed_yield_below_minus_one_leaves_market_null() {
    let source = Arc::new(
        StaticJsonSource::new()
            .with_document(ARG_BONDS, json!([{"symbol": "TTM26", "ytm": -150.0}])),
    );
    let report = assembler(&source).assemble(&ReportRequest::new("TTM26"));

    assert_eq!(report.inputs.yield_decimal, Some(-1.5));
    assert_eq!(report.inputs.yield_source.as_deref(), Some("arg_bonds.ytm"));

    let market = report.market.ok().unwrap();
    assert!(market.tem_from_yield.is_none());
    assert!(market.tem_market.is_none());
    assert!(market.tem_market_percentage_str.is_none());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["market"]["tem_market"], Value::Null);
    assert_eq!(value["market"]["tem_market_percentage_str"], Value::Null);
}
