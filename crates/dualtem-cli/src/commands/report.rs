//! Report command implementation.

use anyhow::Result;
use clap::Args;

use dualtem_analytics::prelude::*;
use dualtem_core::Date;
use dualtem_traits::SeriesId;

use super::{parse_amount, parse_date, parse_rate, Context};
use crate::cli::MarketSourceArg;
use crate::output::print_report;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Bond ticker, e.g. TTM26
    pub ticker: String,

    /// Issue date override (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub issue: Option<Date>,

    /// Maturity date override (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub maturity: Option<Date>,

    /// Fixed monthly TEM override, decimal
    #[arg(long, value_parser = parse_rate, allow_negative_numbers = true)]
    pub fixed_tem: Option<f64>,

    /// Settlement date for the market TEM (default: valuation date)
    #[arg(long, value_parser = parse_date)]
    pub settlement: Option<Date>,

    /// Face value override
    #[arg(long, value_parser = parse_amount)]
    pub face: Option<f64>,

    /// Price per 100 override
    #[arg(long, value_parser = parse_amount)]
    pub price: Option<f64>,

    /// Annual effective yield override, decimal (e.g. 0.3055)
    #[arg(long = "yield", value_parser = parse_rate, allow_negative_numbers = true)]
    pub yield_decimal: Option<f64>,

    /// Reference-rate average override, decimal
    #[arg(long = "reference-avg", value_parser = parse_rate, allow_negative_numbers = true)]
    pub reference_average: Option<f64>,

    /// Reference-rate series id (default: resolved from the catalog)
    #[arg(long)]
    pub series_id: Option<i64>,

    /// Weekends only when shifting the observation window
    #[arg(long)]
    pub no_holidays: bool,

    /// Source of the market TEM
    #[arg(long, value_enum)]
    pub market_source: Option<MarketSourceArg>,

    /// Valuation date for defaults and window clamping (default: today)
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<Date>,
}

impl ReportArgs {
    /// Merges flags over the configured defaults.
    pub fn to_request(&self, ctx: &Context) -> ReportRequest {
        let defaults = &ctx.config.defaults;
        ReportRequest {
            ticker: self.ticker.clone(),
            issue: self.issue,
            maturity: self.maturity,
            fixed_tem: self.fixed_tem,
            settlement: self.settlement,
            face: self.face,
            price: self.price,
            yield_decimal: self.yield_decimal,
            reference_average: self.reference_average,
            series_id: self.series_id.map(SeriesId::new).or(defaults.series_id),
            use_holidays: defaults.use_holidays && !self.no_holidays,
            market_source: self
                .market_source
                .map_or(defaults.market_source, SourcePreference::from),
        }
    }
}

/// Executes the report command.
pub fn execute(args: &ReportArgs, ctx: &Context) -> Result<()> {
    let source = ctx.source()?;
    let sources = &ctx.config.sources;
    let series = RateSeriesResolver::new(source.clone(), sources.series_base_url.clone())
        .with_accept_language(ctx.config.http.accept_language.clone());
    let snapshot = MarketSnapshotResolver::new(source, sources.feeds.clone());
    let today = args.as_of.unwrap_or_else(Date::today);

    let report = ReportAssembler::new(series, snapshot, today).assemble(&args.to_request(ctx));
    print_report(&report, ctx.format)
}
