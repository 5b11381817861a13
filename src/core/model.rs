//! Budget records shown on the dashboard

use anyhow::{Result, bail};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Direction of the delta badge on a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Decided on the change rounded to two places, as it is displayed.
    /// Zero counts as up.
    pub fn from_change(change: Decimal) -> Self {
        let shown = change.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if shown.is_sign_negative() && !shown.is_zero() {
            TrendDirection::Down
        } else {
            TrendDirection::Up
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
        }
    }
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrendDirection::Up => "up",
                TrendDirection::Down => "down",
            }
        )
    }
}

/// A headline figure with its change from the previous year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: Decimal,
    /// Signed percent change from the previous year.
    pub change: Decimal,
    pub trend: TrendDirection,
}

impl MetricCard {
    pub fn new(title: &str, value: Decimal, change: Decimal) -> Self {
        MetricCard {
            title: title.to_string(),
            value,
            change,
            trend: TrendDirection::from_change(change),
        }
    }

    pub fn trend_matches_change(&self) -> bool {
        self.trend == TrendDirection::from_change(self.change)
    }
}

/// One slice of a proportion or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: Decimal,
    /// Display hint in `#rrggbb` form.
    pub color: String,
}

impl CategoryValue {
    pub fn new(category: &str, value: Decimal, color: &str) -> Self {
        CategoryValue {
            category: category.to_string(),
            value,
            color: color.to_string(),
        }
    }

    /// Parses the color hint into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Estimate stage of a trend period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Estimate {
    Actual,
    BudgetEstimate,
    RevisedEstimate,
}

impl Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Estimate::Actual => "Actual",
                Estimate::BudgetEstimate => "BE",
                Estimate::RevisedEstimate => "RE",
            }
        )
    }
}

/// Revenue, expenditure and deficit for one fiscal period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTrend {
    /// Period label, e.g. `2024-2025 (RE)`.
    pub year: String,
    pub revenue: Decimal,
    pub expenditure: Decimal,
    pub deficit: Decimal,
}

impl YearTrend {
    pub fn new(year: &str, revenue: Decimal, expenditure: Decimal, deficit: Decimal) -> Self {
        YearTrend {
            year: year.to_string(),
            revenue,
            expenditure,
            deficit,
        }
    }

    pub fn fiscal_year(&self) -> Option<FiscalYear> {
        let label = self.year.split_whitespace().next()?;
        label.parse().ok()
    }

    pub fn estimate(&self) -> Estimate {
        if self.year.ends_with("(BE)") {
            Estimate::BudgetEstimate
        } else if self.year.ends_with("(RE)") {
            Estimate::RevisedEstimate
        } else {
            Estimate::Actual
        }
    }

    /// Gap between expenditure and revenue, which the deficit should equal.
    pub fn gap(&self) -> Decimal {
        self.expenditure - self.revenue
    }
}

/// A `YYYY-YYYY` fiscal year label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct FiscalYear {
    start: i32,
}

impl FiscalYear {
    pub fn new(start: i32) -> Self {
        FiscalYear { start }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.start + 1
    }
}

impl Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

impl FromStr for FiscalYear {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((start, end)) = s.trim().split_once('-') else {
            bail!("Invalid fiscal year '{s}', expected YYYY-YYYY");
        };
        let (Ok(start), Ok(end)) = (start.parse::<i32>(), end.parse::<i32>()) else {
            bail!("Invalid fiscal year '{s}', expected YYYY-YYYY");
        };
        if start < 1000 || end != start + 1 {
            bail!("Invalid fiscal year '{s}', end year must follow start year");
        }
        Ok(FiscalYear { start })
    }
}

impl Serialize for FiscalYear {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FiscalYear {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetData {
    pub title: String,
    /// Selectable fiscal year tabs, in display order.
    pub fiscal_years: Vec<FiscalYear>,
    pub default_fiscal_year: FiscalYear,
    pub summary: Vec<MetricCard>,
    pub revenue: Vec<CategoryValue>,
    pub tax_revenue: Vec<CategoryValue>,
    pub expenditure: Vec<CategoryValue>,
    pub capital_expenditure: Vec<CategoryValue>,
    pub trend: Vec<YearTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_direction_from_change() {
        assert_eq!(
            TrendDirection::from_change(Decimal::new(1002, 2)),
            TrendDirection::Up
        );
        assert_eq!(
            TrendDirection::from_change(Decimal::new(-1413, 2)),
            TrendDirection::Down
        );
        assert_eq!(TrendDirection::from_change(Decimal::ZERO), TrendDirection::Up);
    }

    #[test]
    fn test_trend_direction_agrees_with_displayed_change() {
        use crate::core::format::percent_change;

        for (raw, expected, text) in [
            ("-0.001", TrendDirection::Up, "+0.00%"),
            ("-0.004", TrendDirection::Up, "+0.00%"),
            ("-0.005", TrendDirection::Down, "-0.01%"),
            ("0.004", TrendDirection::Up, "+0.00%"),
        ] {
            let change = Decimal::from_str(raw).unwrap();
            assert_eq!(TrendDirection::from_change(change), expected, "{raw}");
            assert_eq!(percent_change(change), text, "{raw}");
        }
    }

    #[test]
    fn test_fiscal_year_parse() {
        let fy: FiscalYear = "2025-2026".parse().unwrap();
        assert_eq!(fy.start(), 2025);
        assert_eq!(fy.to_string(), "2025-2026");

        assert!("2025-2027".parse::<FiscalYear>().is_err());
        assert!("2025".parse::<FiscalYear>().is_err());
        assert!("abcd-efgh".parse::<FiscalYear>().is_err());
    }

    #[test]
    fn test_year_trend_labels() {
        let t = YearTrend::new("2024-2025 (RE)", Decimal::ONE, Decimal::TWO, Decimal::ONE);
        assert_eq!(t.estimate(), Estimate::RevisedEstimate);
        assert_eq!(t.fiscal_year(), Some(FiscalYear::new(2024)));
        assert_eq!(t.gap(), Decimal::ONE);

        let t = YearTrend::new("2023-2024", Decimal::ONE, Decimal::TWO, Decimal::ONE);
        assert_eq!(t.estimate(), Estimate::Actual);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4f46e5"), Some((0x4f, 0x46, 0xe5)));
        assert_eq!(parse_hex_color("4f46e5"), None);
        assert_eq!(parse_hex_color("#4f46"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_metric_card_yaml() {
        let yaml = r#"
title: "Fiscal Deficit"
value: 524433.89
change: -14.13
trend: down
"#;
        let card: MetricCard = serde_yaml::from_str(yaml).expect("Failed to deserialize");
        assert_eq!(card.value, Decimal::new(52443389, 2));
        assert_eq!(card.trend, TrendDirection::Down);
        assert!(card.trend_matches_change());
    }
}
