//! # Dualtem Traits
//!
//! Trait definitions for the dualtem TEM engine.
//!
//! This crate contains ONLY trait definitions and identifier types.
//! Implementations live in the extension crates:
//!
//! - `dualtem-ext-http`: live HTTP source
//! - `dualtem-ext-json`: in-memory fixtures and captured payload files
//!
//! ## Module Structure
//!
//! - [`source`]: The [`JsonSource`] collaborator and its request type
//! - [`ids`]: Series and feed identifiers
//! - [`error`]: [`TraitError`]
//!
//! ## Dependency Injection
//!
//! The resolvers take the JSON source as a shared trait object:
//!
//! ```ignore
//! let source: Arc<dyn JsonSource> = Arc::new(HttpJsonSource::new(&settings)?);
//! let series = RateSeriesResolver::new(source.clone(), base_url);
//! let snapshots = MarketSnapshotResolver::new(source, feeds);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod source;

// Re-export commonly used types
pub use error::{TraitError, TraitResult};
pub use ids::*;
pub use source::{JsonRequest, JsonSource};
