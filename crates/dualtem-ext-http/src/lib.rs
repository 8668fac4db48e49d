//! # Dualtem Ext HTTP
//!
//! [`HttpJsonSource`]: the network implementation of
//! [`JsonSource`](dualtem_traits::JsonSource), a blocking `reqwest` client
//! with a bounded per-request timeout.
//!
//! When enabled, a request that fails during the TLS handshake is retried
//! once with certificate verification disabled. The retry is confined to
//! this crate and is logged at `warn`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;

pub use client::{HttpJsonSource, HttpSettings, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
