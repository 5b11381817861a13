//! Terminal rendering of the dashboard sections

pub mod capex;
pub mod cards;
pub mod composition;
pub mod dashboard;
pub mod export;
pub mod highlights;
pub mod setup;
pub mod trends;
pub mod ui;

use crate::core::{BudgetData, CurrencyFormat, FiscalYear};

/// What every section renderer needs.
///
/// The fiscal year only feeds description labels; the figures always come
/// from `data` as loaded.
pub struct DashboardView<'a> {
    pub data: &'a BudgetData,
    pub currency: &'a CurrencyFormat,
    pub fiscal_year: FiscalYear,
    pub bar_width: usize,
}
