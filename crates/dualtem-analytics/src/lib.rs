//! # Dualtem Analytics
//!
//! TEM engines for Argentine dual bonds.
//!
//! - [`series`]: reference-rate series discovery, windowed average, raw
//!   observations and latest value
//! - [`snapshot`]: price, yield, face and maturity scraped from live feeds
//! - [`prospectus`]: contractual TEM, the fixed floor against the
//!   reference-rate TEM over the shifted observation window
//! - [`market`]: market TEM from yield, bullet price or reference rate
//! - [`report`]: reconciles overrides, feeds and the catalog and runs both
//!   engines
//!
//! All remote data goes through a [`dualtem_traits::JsonSource`], so the
//! engines run the same against HTTP, captured files or in-memory fixtures.
//!
//! ## Example
//!
//! ```rust
//! use dualtem_analytics::prelude::*;
//! use dualtem_core::Date;
//!
//! let inputs = MarketInputs {
//!     maturity: Date::from_ymd(2026, 3, 16).unwrap(),
//!     settlement: Date::from_ymd(2025, 3, 16).unwrap(),
//!     face: 100.0,
//!     price: Some(80.0),
//!     yield_decimal: None,
//!     fallback_reference_rate: None,
//!     preference: SourcePreference::Auto,
//! };
//! let market = MarketTemEngine::new().compute(&inputs);
//! assert_eq!(market.tem_market_source, Some(MarketSource::Price));
//! assert_eq!(market.tem_market_percentage_str.as_deref(), Some("1.88%"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
mod json;
pub mod market;
pub mod prospectus;
pub mod report;
pub mod series;
pub mod snapshot;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::market::{
        MarketInputs, MarketSource, MarketTem, MarketTemEngine, SourcePreference,
    };
    pub use crate::prospectus::{
        ObservationWindow, ProspectusParams, ProspectusTem, ProspectusTemEngine, RateSource,
    };
    pub use crate::report::{
        ReportAssembler, ReportInputs, ReportRequest, SectionOutcome, TemReport,
    };
    pub use crate::series::{RateObservation, RateSeriesResolver};
    pub use crate::snapshot::{default_feeds, FeedEndpoint, MarketSnapshot, MarketSnapshotResolver};
}

pub use error::{AnalyticsError, AnalyticsResult};
