//! # Dualtem Bonds
//!
//! Static reference data for Argentine dual bonds.
//!
//! - [`BondIdentity`]: issue/maturity dates, contractual fixed TEM and the
//!   reference annual yield used when live data is incomplete
//! - [`BondCatalog`]: process-wide read-only registry keyed by ticker
//!
//! ## Example
//!
//! ```rust
//! use dualtem_bonds::BondCatalog;
//!
//! let ttm26 = BondCatalog::global().get("ttm26").unwrap();
//! assert_eq!(ttm26.ticker(), "TTM26");
//! assert_eq!(ttm26.maturity_date().to_string(), "2026-03-16");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]

pub mod catalog;
pub mod error;
pub mod identity;

pub use catalog::BondCatalog;
pub use error::{BondError, BondResult};
pub use identity::BondIdentity;
