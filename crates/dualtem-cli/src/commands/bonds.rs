//! Bonds command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use dualtem_bonds::{BondCatalog, BondIdentity};
use dualtem_core::rates;

use super::Context;
use crate::output::print_rows;

/// One catalogued bond.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BondRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Issue")]
    pub issue_date: String,
    #[tabled(rename = "Maturity")]
    pub maturity_date: String,
    #[tabled(skip)]
    pub fixed_monthly_tem: f64,
    #[tabled(rename = "Fixed TEM")]
    #[serde(skip)]
    pub fixed_tem_display: String,
    #[tabled(rename = "Reference Yield", display_with = "display_optional_rate")]
    pub reference_annual_yield: Option<f64>,
}

impl From<&BondIdentity> for BondRow {
    fn from(bond: &BondIdentity) -> Self {
        Self {
            ticker: bond.ticker().to_string(),
            issue_date: bond.issue_date().to_string(),
            maturity_date: bond.maturity_date().to_string(),
            fixed_monthly_tem: bond.fixed_monthly_tem(),
            fixed_tem_display: rates::format_percentage(bond.fixed_monthly_tem()),
            reference_annual_yield: bond.reference_annual_yield(),
        }
    }
}

fn display_optional_rate(rate: &Option<f64>) -> String {
    rate.map_or_else(|| "-".to_string(), rates::format_percentage)
}

/// Executes the bonds command.
pub fn execute(ctx: &Context) -> Result<()> {
    let catalog = BondCatalog::global();
    let rows: Vec<BondRow> = catalog
        .tickers()
        .filter_map(|ticker| catalog.get(ticker))
        .map(BondRow::from)
        .collect();
    print_rows(&rows, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_catalog() {
        let bond = BondCatalog::global().get("TTM26").unwrap();
        let row = BondRow::from(bond);
        assert_eq!(row.maturity_date, "2026-03-16");
        assert_eq!(row.fixed_tem_display, "2.25%");
        assert_eq!(display_optional_rate(&row.reference_annual_yield), "30.55%");
        assert_eq!(display_optional_rate(&None), "-");
    }
}
