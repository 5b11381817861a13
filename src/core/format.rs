//! Currency and percentage formatting shared by every dashboard section.
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How the integer part of an amount is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Groups of three: `3,835,268.52`.
    #[default]
    Western,
    /// Last three digits, then groups of two: `38,35,268.52`.
    Indian,
}

/// Renders amounts as `<symbol><grouped value> <unit>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub unit: String,
    /// Long unit name used in prose, e.g. "crores".
    pub unit_name: String,
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "₹".to_string(),
            unit: "Cr".to_string(),
            unit_name: "crores".to_string(),
            grouping: Grouping::Western,
        }
    }
}

impl CurrencyFormat {
    /// `₹3,835,268.52 Cr`
    pub fn amount(&self, value: Decimal) -> String {
        format!("{}{} {}", self.symbol, self.number(value), self.unit)
    }

    /// `₹3,835,268.52 crores`
    pub fn amount_long(&self, value: Decimal) -> String {
        format!("{}{} {}", self.symbol, self.number(value), self.unit_name)
    }

    /// The grouped magnitude with exactly two decimals, no symbol or unit.
    pub fn number(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}.{frac_part}",
            group_digits(int_part, self.grouping)
        )
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 2);
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && needs_separator(remaining, grouping) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn needs_separator(remaining: usize, grouping: Grouping) -> bool {
    match grouping {
        Grouping::Western => remaining % 3 == 0,
        Grouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
    }
}

/// Signed percent change with two decimals: `+10.02%`, `-14.13%`.
pub fn percent_change(change: Decimal) -> String {
    let rounded = change.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded:.2}%")
    } else {
        format!("+{:.2}%", rounded.abs())
    }
}

/// Share of a whole with one decimal: `74.3%`.
pub fn share(percent: Decimal) -> String {
    format!("{:.1}%", percent.round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_amount_western() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.amount(d("3835268.52")), "₹3,835,268.52 Cr");
        assert_eq!(fmt.amount(d("987479.63")), "₹987,479.63 Cr");
        assert_eq!(fmt.amount(d("11186.3")), "₹11,186.30 Cr");
        assert_eq!(fmt.amount(d("4778")), "₹4,778.00 Cr");
        assert_eq!(fmt.amount(d("999")), "₹999.00 Cr");
        assert_eq!(fmt.amount(Decimal::ZERO), "₹0.00 Cr");
    }

    #[test]
    fn test_amount_indian() {
        let fmt = CurrencyFormat {
            grouping: Grouping::Indian,
            ..CurrencyFormat::default()
        };
        assert_eq!(fmt.amount(d("3835268.52")), "₹38,35,268.52 Cr");
        assert_eq!(fmt.amount(d("524433.89")), "₹5,24,433.89 Cr");
        assert_eq!(fmt.amount(d("4778")), "₹4,778.00 Cr");
        assert_eq!(fmt.amount(d("12")), "₹12.00 Cr");
    }

    #[test]
    fn test_amount_long_and_negative() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.amount_long(d("956245.31")), "₹956,245.31 crores");
        assert_eq!(fmt.number(d("-1234.5")), "-1,234.50");
        assert_eq!(fmt.number(d("0.005")), "0.01");
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(d("10.02")), "+10.02%");
        assert_eq!(percent_change(d("-14.13")), "-14.13%");
        assert_eq!(percent_change(d("7.4")), "+7.40%");
        assert_eq!(percent_change(Decimal::ZERO), "+0.00%");
        assert_eq!(percent_change(d("-0.001")), "+0.00%");
    }

    #[test]
    fn test_share() {
        assert_eq!(share(d("74.3")), "74.3%");
        assert_eq!(share(d("100")), "100.0%");
    }
}
