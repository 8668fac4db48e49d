//! Prospectus TEM: the greater of the contractual fixed rate and the
//! reference-rate TEM averaged over the observation window.
//!
//! The window runs from ten business days before issue to ten business days
//! before maturity. Its end is clamped to today before querying, since the
//! series has no future observations.

use serde::Serialize;
use tracing::{debug, info, warn};

use dualtem_bonds::BondIdentity;
use dualtem_core::calendars::shift_business_days;
use dualtem_core::rates;
use dualtem_core::Date;
use dualtem_traits::SeriesId;

use crate::series::{RateObservation, RateSeriesResolver};

/// Business-day offset applied to issue and maturity.
pub const WINDOW_OFFSET_BUSINESS_DAYS: i32 = -10;

/// Number of trailing observations reported for audit.
pub const AUDIT_TAIL_LEN: usize = 5;

/// Observation window of the reference rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservationWindow {
    /// Issue shifted back ten business days.
    pub start: Date,
    /// Maturity shifted back ten business days.
    pub end: Date,
    /// `end`, capped at today.
    pub clamped_end: Date,
}

impl ObservationWindow {
    /// Window for `identity` as seen on `today`.
    pub fn for_bond(identity: &BondIdentity, use_holidays: bool, today: Date) -> Self {
        let start = shift_business_days(
            identity.issue_date(),
            WINDOW_OFFSET_BUSINESS_DAYS,
            use_holidays,
        );
        let end = shift_business_days(
            identity.maturity_date(),
            WINDOW_OFFSET_BUSINESS_DAYS,
            use_holidays,
        );
        Self {
            start,
            end,
            clamped_end: end.min(today),
        }
    }

    /// True if the end had to be capped.
    pub fn is_clamped(&self) -> bool {
        self.clamped_end < self.end
    }
}

/// How the reference-rate average was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Supplied by the caller.
    Override,
    /// Averaged from the published series.
    Resolved,
    /// Could not be obtained; the fixed rate applies.
    Unavailable,
}

/// First and last observation dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleRange {
    /// Earliest observation.
    pub from: Date,
    /// Latest observation.
    pub to: Date,
}

/// Parameters of a prospectus computation beyond the bond itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProspectusParams {
    /// Skip Argentine holidays when shifting the window.
    pub use_holidays: bool,
    /// Series to read; resolved from the catalog when `None`.
    pub series_id: Option<SeriesId>,
    /// Reference-rate average (decimal) to use instead of the series.
    pub average_override: Option<f64>,
}

/// Result of a prospectus TEM computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProspectusTem {
    /// Issue date used.
    pub issue_date: Date,
    /// Maturity date used.
    pub maturity_date: Date,
    /// 30E/360 months from issue to maturity, the capitalization exponent
    /// of the monthly rate.
    pub months_to_maturity: f64,
    /// Window start.
    pub window_start: Date,
    /// Window end before clamping.
    pub window_end: Date,
    /// Window end used for the query.
    pub window_end_clamped: Date,
    /// Reference-rate average, decimal.
    pub reference_average: Option<f64>,
    /// TEM equivalent of the average.
    pub reference_tem: Option<f64>,
    /// Contractual fixed TEM.
    pub fixed_tem: f64,
    /// `max(fixed_tem, reference_tem)`.
    pub tem_prospectus: f64,
    /// `tem_prospectus` in percent, two decimals.
    pub tem_prospectus_percentage: f64,
    /// `tem_prospectus` as `"2.25%"`.
    pub tem_prospectus_percentage_str: String,
    /// Provenance of the average.
    pub rate_source: RateSource,
    /// Series read, when one was resolved.
    pub series_id: Option<SeriesId>,
    /// Latest observation in percent.
    pub latest_percent: Option<f64>,
    /// TEM equivalent of the latest observation.
    pub latest_tem: Option<f64>,
    /// Up to five trailing observations in percent.
    pub last_5_percent: Option<Vec<f64>>,
    /// Observations in the window.
    pub samples_count: usize,
    /// Dates spanned by the observations.
    pub sample_range: Option<SampleRange>,
}

/// Computes the prospectus TEM of a dual bond.
#[derive(Debug)]
pub struct ProspectusTemEngine<'a> {
    series: &'a RateSeriesResolver,
    today: Date,
}

impl<'a> ProspectusTemEngine<'a> {
    /// Engine reading `series`, clamping windows at `today`.
    pub fn new(series: &'a RateSeriesResolver, today: Date) -> Self {
        Self { series, today }
    }

    /// Computes the prospectus TEM. Never fails: an unobtainable average
    /// leaves the fixed rate in force.
    pub fn compute(&self, identity: &BondIdentity, params: &ProspectusParams) -> ProspectusTem {
        let window = ObservationWindow::for_bond(identity, params.use_holidays, self.today);
        if window.is_clamped() {
            debug!(end = %window.end, today = %self.today, "window end clamped to today");
        }

        let mut series_id = None;
        let mut observations: Option<Vec<RateObservation>> = None;
        let (average, rate_source) = if let Some(average) = params.average_override {
            (Some(average), RateSource::Override)
        } else {
            match self.series.series_id_or_resolve(params.series_id) {
                Ok(id) => {
                    series_id = Some(id);
                    let average = self
                        .series
                        .fetch_average(id, window.start, window.clamped_end)
                        .map_err(|e| warn!(series = %id, error = %e, "reference average unavailable"))
                        .ok();
                    observations = self
                        .series
                        .fetch_series(id, window.start, window.clamped_end)
                        .map_err(|e| warn!(series = %id, error = %e, "reference series unavailable"))
                        .ok()
                        .filter(|obs| !obs.is_empty());
                    let source = if average.is_some() {
                        RateSource::Resolved
                    } else {
                        RateSource::Unavailable
                    };
                    (average, source)
                }
                Err(e) => {
                    warn!(error = %e, "reference series id unavailable");
                    (None, RateSource::Unavailable)
                }
            }
        };

        let reference_tem = average.and_then(|avg| {
            rates::reference_rate_to_monthly_tem(avg)
                .map_err(|e| warn!(error = %e, "reference TEM undefined"))
                .ok()
        });
        let fixed_tem = identity.fixed_monthly_tem();
        let tem_prospectus = floor_at_fixed(fixed_tem, reference_tem);

        info!(
            ticker = identity.ticker(),
            fixed_tem,
            reference_tem = ?reference_tem,
            tem_prospectus,
            source = ?rate_source,
            "prospectus TEM"
        );

        let audit = observations.as_deref();
        ProspectusTem {
            issue_date: identity.issue_date(),
            maturity_date: identity.maturity_date(),
            months_to_maturity: rates::months_fraction_30e360(
                identity.issue_date(),
                identity.maturity_date(),
            ),
            window_start: window.start,
            window_end: window.end,
            window_end_clamped: window.clamped_end,
            reference_average: average,
            reference_tem,
            fixed_tem,
            tem_prospectus,
            tem_prospectus_percentage: rates::percentage(tem_prospectus),
            tem_prospectus_percentage_str: rates::format_percentage(tem_prospectus),
            rate_source,
            series_id,
            latest_percent: audit.and_then(<[_]>::last).map(|o| o.percent),
            latest_tem: audit
                .and_then(<[_]>::last)
                .and_then(|o| rates::reference_rate_to_monthly_tem(o.decimal()).ok()),
            last_5_percent: audit.map(|obs| {
                obs[obs.len().saturating_sub(AUDIT_TAIL_LEN)..]
                    .iter()
                    .map(|o| o.percent)
                    .collect()
            }),
            samples_count: audit.map_or(0, <[_]>::len),
            sample_range: audit.and_then(|obs| {
                Some(SampleRange {
                    from: obs.first()?.date,
                    to: obs.last()?.date,
                })
            }),
        }
    }
}

/// The fixed rate acts as a floor under the reference TEM.
fn floor_at_fixed(fixed_tem: f64, reference_tem: Option<f64>) -> f64 {
    match reference_tem {
        Some(reference) if reference > fixed_tem => reference,
        _ => fixed_tem,
    }
}
