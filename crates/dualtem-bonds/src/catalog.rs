//! Registry of known dual bonds.
//!
//! # Example
//!
//! ```rust
//! use dualtem_bonds::BondCatalog;
//!
//! let catalog = BondCatalog::global();
//! assert!(catalog.contains("TTD26"));
//! assert!(catalog.get("AL30").is_none());
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use dualtem_core::Date;

use crate::identity::BondIdentity;

/// Ticker, fixed TEM, maturity (y, m, d), issue (y, m, d), reference annual yield.
type CatalogRow = (&'static str, f64, (i32, u32, u32), (i32, u32, u32), f64);

const DUAL_BONDS: &[CatalogRow] = &[
    ("TTM26", 0.0225, (2026, 3, 16), (2025, 1, 29), 0.3055),
    ("TTJ26", 0.0219, (2026, 6, 30), (2025, 1, 29), 0.2965),
    ("TTS26", 0.0217, (2026, 9, 15), (2025, 1, 29), 0.2931),
    ("TTD26", 0.0214, (2026, 12, 15), (2025, 1, 29), 0.2893),
];

/// Read-only registry of dual bonds keyed by upper-case ticker.
#[derive(Debug, Clone, Default)]
pub struct BondCatalog {
    bonds: BTreeMap<String, BondIdentity>,
}

/// Global singleton catalog.
static GLOBAL_CATALOG: OnceLock<BondCatalog> = OnceLock::new();

impl BondCatalog {
    /// Returns the global catalog of dual bonds.
    ///
    /// Initialized on first access and never mutated afterwards.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL_CATALOG.get_or_init(Self::dual_bonds)
    }

    /// Builds a catalog holding the listed dual bonds.
    #[must_use]
    pub fn dual_bonds() -> Self {
        let mut catalog = Self::default();
        for &(ticker, fixed_tem, (my, mm, md), (iy, im, id), annual_yield) in DUAL_BONDS {
            let (Ok(maturity), Ok(issue)) = (Date::from_ymd(my, mm, md), Date::from_ymd(iy, im, id))
            else {
                continue;
            };
            if let Ok(bond) = BondIdentity::new(ticker, issue, maturity, fixed_tem) {
                catalog.insert(bond.with_reference_annual_yield(annual_yield));
            }
        }
        catalog
    }

    /// Adds or replaces a bond.
    pub fn insert(&mut self, bond: BondIdentity) {
        self.bonds.insert(bond.ticker().to_string(), bond);
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&BondIdentity> {
        self.bonds.get(&ticker.trim().to_uppercase())
    }

    /// Returns true if the ticker is known.
    #[must_use]
    pub fn contains(&self, ticker: &str) -> bool {
        self.get(ticker).is_some()
    }

    /// Known tickers, sorted.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.bonds.keys().map(String::as_str)
    }

    /// Number of bonds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}
