//! Budget data and the figures derived from it

pub mod analytics;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod format;
pub mod log;
pub mod model;

// Re-export main types for cleaner imports
pub use format::CurrencyFormat;
pub use model::{BudgetData, CategoryValue, FiscalYear, MetricCard, TrendDirection, YearTrend};
