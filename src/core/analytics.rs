//! Derived figures computed from the static budget data.
use crate::core::format::CurrencyFormat;
use crate::core::model::{BudgetData, CategoryValue, YearTrend};
use anyhow::{Result, anyhow};
use rust_decimal::{Decimal, RoundingStrategy, prelude::*};
use rust_finprim::rate::cagr;
use serde::Serialize;
use tracing::{debug, warn};

/// A category with its share of the chart total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub category: String,
    pub value: Decimal,
    pub color: String,
    /// Percent of the total with one decimal place.
    pub percent: Decimal,
}

/// Sum of the values, or `None` when it does not fit in a `Decimal`.
pub fn checked_total(values: &[CategoryValue]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v.value))
}

/// Computes one-decimal shares that add up to exactly 100.0.
///
/// Raw shares are floored to tenths and the leftover tenths go to the rows
/// with the largest remainders, ties broken by position. A zero total gives
/// every row 0.0, as does a total too large to represent.
pub fn shares(values: &[CategoryValue]) -> Vec<Share> {
    let total = checked_total(values).unwrap_or_else(|| {
        warn!("Category total overflows, shares shown as zero");
        Decimal::ZERO
    });
    if total.is_zero() {
        return values
            .iter()
            .map(|v| Share {
                category: v.category.clone(),
                value: v.value,
                color: v.color.clone(),
                percent: Decimal::ZERO,
            })
            .collect();
    }

    let tenths: Vec<Decimal> = values
        .iter()
        .map(|v| {
            v.value
                .checked_div(total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_THOUSAND))
                .unwrap_or(Decimal::ZERO)
        })
        .collect();
    let mut units: Vec<i64> = tenths
        .iter()
        .map(|t| t.floor().to_i64().unwrap_or(0))
        .collect();

    let assigned: i64 = units.iter().sum();
    let leftover = (1000 - assigned).max(0) as usize;

    let mut by_remainder: Vec<usize> = (0..values.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        let ra = tenths[a].fract();
        let rb = tenths[b].fract();
        rb.cmp(&ra).then(a.cmp(&b))
    });
    for &idx in by_remainder.iter().take(leftover) {
        units[idx] += 1;
    }

    debug!(?units, %total, "Computed shares in tenths of a percent");

    values
        .iter()
        .zip(units)
        .map(|(v, u)| Share {
            category: v.category.clone(),
            value: v.value,
            color: v.color.clone(),
            percent: Decimal::new(u, 1),
        })
        .collect()
}

/// Percent change from `previous` to `current`, rounded to two places.
///
/// Undefined when `previous` is zero or the change is too large to represent.
pub fn change_percent(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    let change = current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(change.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Derived figures for one trend period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMetrics {
    pub year: String,
    pub revenue_change: Option<Decimal>,
    pub expenditure_change: Option<Decimal>,
    pub deficit_change: Option<Decimal>,
    /// Deficit as percent of expenditure.
    pub deficit_ratio: Option<Decimal>,
}

/// Period-over-period changes, each row compared with the row before it.
pub fn period_metrics(trend: &[YearTrend]) -> Vec<PeriodMetrics> {
    trend
        .iter()
        .enumerate()
        .map(|(i, period)| {
            let previous = i.checked_sub(1).map(|p| &trend[p]);
            let deficit_ratio = period
                .deficit
                .checked_div(period.expenditure)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .map(|r| r.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero));
            PeriodMetrics {
                year: period.year.clone(),
                revenue_change: previous.and_then(|p| change_percent(p.revenue, period.revenue)),
                expenditure_change: previous
                    .and_then(|p| change_percent(p.expenditure, period.expenditure)),
                deficit_change: previous.and_then(|p| change_percent(p.deficit, period.deficit)),
                deficit_ratio,
            }
        })
        .collect()
}

/// Compound annual revenue growth between the first and last periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRate {
    pub from: String,
    pub to: String,
    pub years: i32,
    /// Annual growth in percent, two decimals.
    pub percent: Decimal,
}

pub fn revenue_growth(trend: &[YearTrend]) -> Result<GrowthRate> {
    let (first, last) = match (trend.first(), trend.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(anyhow!("No trend periods available for growth calculation")),
    };
    let start = first
        .fiscal_year()
        .ok_or_else(|| anyhow!("Invalid period label: {}", first.year))?;
    let end = last
        .fiscal_year()
        .ok_or_else(|| anyhow!("Invalid period label: {}", last.year))?;
    let years = end.start() - start.start();
    if years <= 0 {
        return Err(anyhow!(
            "Trend periods span less than a year: {} to {}",
            first.year,
            last.year
        ));
    }
    if first.revenue <= Decimal::ZERO || last.revenue <= Decimal::ZERO {
        return Err(anyhow!("Revenue must be positive for growth calculation"));
    }

    if last.revenue.checked_div(first.revenue).is_none() {
        return Err(anyhow!("Revenue growth is too large to compute"));
    }

    let rate = cagr(first.revenue, last.revenue, Decimal::from(years));
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    debug!(
        "cagr: {}, {}, {years} = {rate}, {percent}",
        first.revenue, last.revenue
    );

    Ok(GrowthRate {
        from: first.year.clone(),
        to: last.year.clone(),
        years,
        percent,
    })
}

/// A titled insight for the highlights panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub title: String,
    pub body: String,
}

/// Builds the highlights from the latest two trend periods and the capital
/// expenditure heads.
pub fn highlights(data: &BudgetData, currency: &CurrencyFormat) -> Vec<Highlight> {
    let mut out = Vec::new();

    let latest = data.trend.len().checked_sub(1).map(|i| &data.trend[i]);
    let previous = data.trend.len().checked_sub(2).map(|i| &data.trend[i]);

    if let (Some(prev), Some(cur)) = (previous, latest) {
        if let Some(change) = change_percent(prev.revenue, cur.revenue) {
            out.push(Highlight {
                title: "Revenue Growth".to_string(),
                body: format!(
                    "Total revenue receipts projected at {}, showing a {} {} from {}.",
                    currency.amount_long(cur.revenue),
                    percent_magnitude(change),
                    if change.is_sign_negative() { "decrease" } else { "increase" },
                    prev.year
                ),
            });
        }
        if let Some(change) = change_percent(prev.deficit, cur.deficit) {
            let verb = if change.is_sign_negative() { "reduced" } else { "increased" };
            out.push(Highlight {
                title: "Fiscal Deficit".to_string(),
                body: format!(
                    "Fiscal deficit {verb} to {}, showing a {} {} from {}.",
                    currency.amount_long(cur.deficit),
                    percent_magnitude(change),
                    if change.is_sign_negative() { "decrease" } else { "increase" },
                    prev.year
                ),
            });
        }
    }

    let capex_total = checked_total(&data.capital_expenditure).unwrap_or(Decimal::ZERO);
    if let Some(largest) = data
        .capital_expenditure
        .iter()
        .max_by(|a, b| a.value.cmp(&b.value))
    {
        let largest_share = shares(&data.capital_expenditure)
            .into_iter()
            .find(|s| s.category == largest.category)
            .map_or(Decimal::ZERO, |s| s.percent);
        out.push(Highlight {
            title: "Capital Expenditure".to_string(),
            body: format!(
                "Capital expenditure stands at {}, led by {} at {largest_share:.1}% of the total.",
                currency.amount_long(capex_total),
                largest.category,
            ),
        });
    }

    out
}

fn percent_magnitude(change: Decimal) -> String {
    format!("{:.2}%", change.abs())
}
