//! # Dualtem Ext JSON
//!
//! Offline implementations of [`JsonSource`](dualtem_traits::JsonSource):
//!
//! - [`StaticJsonSource`]: documents held in memory, keyed by URL; used as
//!   test fixtures
//! - [`FileJsonSource`]: documents read from a directory of captured
//!   payloads, so the tool can run without network access

#![warn(missing_docs)]
#![warn(clippy::all)]

mod file;
mod fixture;

pub use file::{file_name_for, FileJsonSource};
pub use fixture::StaticJsonSource;
