//! Domain types.
//!
//! - [`Date`]: Calendar date for financial calculations

mod date;

pub use date::{Date, TOLERATED_FORMATS};
