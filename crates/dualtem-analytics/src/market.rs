//! Market TEM from the quoted yield, the price, or the reference rate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dualtem_core::rates;
use dualtem_core::Date;

use crate::error::AnalyticsError;

/// Which computed TEM becomes the market TEM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePreference {
    /// TEM from the quoted yield.
    Yield,
    /// TEM from the yield implied by the price as a bullet.
    Price,
    /// TEM from the latest reference rate.
    Fallback,
    /// First available of yield, price, fallback.
    #[default]
    Auto,
}

impl SourcePreference {
    /// All variants.
    pub const ALL: [SourcePreference; 4] = [
        SourcePreference::Yield,
        SourcePreference::Price,
        SourcePreference::Fallback,
        SourcePreference::Auto,
    ];

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SourcePreference::Yield => "yield",
            SourcePreference::Price => "price",
            SourcePreference::Fallback => "fallback",
            SourcePreference::Auto => "auto",
        }
    }
}

impl fmt::Display for SourcePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourcePreference {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                AnalyticsError::Configuration(format!(
                    "unknown market source '{s}', expected yield, price, fallback or auto"
                ))
            })
    }
}

/// The TEM that was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSource {
    /// From the quoted yield.
    Yield,
    /// From the implied bullet yield.
    Price,
    /// From the reference rate.
    Fallback,
}

/// Inputs of a market TEM computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    /// Maturity date.
    pub maturity: Date,
    /// Settlement (valuation) date.
    pub settlement: Date,
    /// Face value repaid at maturity.
    pub face: f64,
    /// Price per 100.
    pub price: Option<f64>,
    /// Annual effective yield, decimal.
    pub yield_decimal: Option<f64>,
    /// Latest reference rate, decimal.
    pub fallback_reference_rate: Option<f64>,
    /// Selection rule.
    pub preference: SourcePreference,
}

/// Result of a market TEM computation. Absent values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTem {
    /// Settlement date.
    pub settlement_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Face value.
    pub face_value: f64,
    /// Price per 100.
    pub price: Option<f64>,
    /// Quoted annual yield.
    pub yield_decimal: Option<f64>,
    /// 30E/360 years from settlement to maturity.
    pub year_fraction: f64,
    /// TEM from the quoted yield.
    pub tem_from_yield: Option<f64>,
    /// Yield implied by the price, before clamping.
    pub implied_bullet_yield: Option<f64>,
    /// TEM from the clamped implied yield.
    pub tem_from_bullet: Option<f64>,
    /// Reference rate used for the fallback.
    pub fallback_reference_rate: Option<f64>,
    /// TEM from the reference rate.
    pub tem_from_fallback: Option<f64>,
    /// Selection rule applied.
    pub source_preference: SourcePreference,
    /// Source of `tem_market`.
    pub tem_market_source: Option<MarketSource>,
    /// Selected market TEM.
    pub tem_market: Option<f64>,
    /// `tem_market` in percent, two decimals.
    pub tem_market_percentage: Option<f64>,
    /// `tem_market` as `"2.25%"`.
    pub tem_market_percentage_str: Option<String>,
}

/// Computes the market TEM.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketTemEngine;

impl MarketTemEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Computes every derivable TEM and selects one.
    pub fn compute(&self, inputs: &MarketInputs) -> MarketTem {
        let year_fraction = rates::year_fraction_30e360(inputs.settlement, inputs.maturity);

        let tem_from_yield = inputs.yield_decimal.and_then(|y| {
            rates::annual_yield_to_monthly_tem(y)
                .map_err(|e| debug!(error = %e, "no TEM from yield"))
                .ok()
        });

        let implied_bullet_yield = inputs
            .price
            .filter(|p| *p > 0.0)
            .and_then(|price| {
                rates::implied_annual_yield_from_bullet_price(inputs.face, price, year_fraction)
                    .map_err(|e| debug!(error = %e, "no implied bullet yield"))
                    .ok()
            });
        let tem_from_bullet = implied_bullet_yield
            .and_then(|y| rates::annual_yield_to_monthly_tem(rates::clamp_implied_yield(y)).ok());

        let tem_from_fallback = inputs.fallback_reference_rate.and_then(|rate| {
            rates::reference_rate_to_monthly_tem(rate)
                .map_err(|e| debug!(error = %e, "no TEM from fallback rate"))
                .ok()
        });

        let candidates = [
            (MarketSource::Yield, tem_from_yield),
            (MarketSource::Price, tem_from_bullet),
            (MarketSource::Fallback, tem_from_fallback),
        ];
        let selected = match inputs.preference {
            SourcePreference::Auto => candidates
                .iter()
                .find_map(|&(source, tem)| tem.map(|t| (source, t))),
            SourcePreference::Yield => tem_from_yield.map(|t| (MarketSource::Yield, t)),
            SourcePreference::Price => tem_from_bullet.map(|t| (MarketSource::Price, t)),
            SourcePreference::Fallback => tem_from_fallback.map(|t| (MarketSource::Fallback, t)),
        };
        let tem_market = selected.map(|(_, t)| t);

        info!(
            preference = %inputs.preference,
            source = ?selected.map(|(s, _)| s),
            tem_market = ?tem_market,
            "market TEM"
        );

        MarketTem {
            settlement_date: inputs.settlement,
            maturity_date: inputs.maturity,
            face_value: inputs.face,
            price: inputs.price,
            yield_decimal: inputs.yield_decimal,
            year_fraction,
            tem_from_yield,
            implied_bullet_yield,
            tem_from_bullet,
            fallback_reference_rate: inputs.fallback_reference_rate,
            tem_from_fallback,
            source_preference: inputs.preference,
            tem_market_source: selected.map(|(s, _)| s),
            tem_market,
            tem_market_percentage: tem_market.map(rates::percentage),
            tem_market_percentage_str: tem_market.map(rates::format_percentage),
        }
    }
}
