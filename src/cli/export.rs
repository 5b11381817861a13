use super::DashboardView;
use super::composition::ProportionChart;
use crate::core::analytics::{self, GrowthRate, Highlight, PeriodMetrics, Share};
use crate::core::model::{Estimate, FiscalYear, TrendDirection};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct CardReport {
    pub title: String,
    pub value: Decimal,
    pub formatted_value: String,
    pub change: Decimal,
    pub trend: TrendDirection,
}

#[derive(Debug, Serialize)]
pub struct CompositionReport {
    pub chart: ProportionChart,
    pub title: String,
    pub total: Decimal,
    pub shares: Vec<Share>,
}

#[derive(Debug, Serialize)]
pub struct TrendReport {
    pub estimate: Estimate,
    pub revenue: Decimal,
    pub expenditure: Decimal,
    pub deficit: Decimal,
    #[serde(flatten)]
    pub metrics: PeriodMetrics,
}

/// The detailed budget report: raw figures plus everything derived from them.
#[derive(Debug, Serialize)]
pub struct BudgetReport {
    pub title: String,
    pub fiscal_year: FiscalYear,
    pub generated_at: DateTime<Utc>,
    pub currency_unit: String,
    pub summary: Vec<CardReport>,
    pub composition: Vec<CompositionReport>,
    pub capital_expenditure: Vec<Share>,
    pub capital_expenditure_total: Decimal,
    pub trend: Vec<TrendReport>,
    pub revenue_growth: Option<GrowthRate>,
    pub highlights: Vec<Highlight>,
}

pub fn build_report(view: &DashboardView) -> BudgetReport {
    let data = view.data;

    let summary = data
        .summary
        .iter()
        .map(|card| CardReport {
            title: card.title.clone(),
            value: card.value,
            formatted_value: view.currency.amount(card.value),
            change: card.change,
            trend: card.trend,
        })
        .collect();

    let composition = ProportionChart::ALL
        .iter()
        .map(|which| {
            let values = which.values(view);
            CompositionReport {
                chart: *which,
                title: which.title().to_string(),
                total: analytics::checked_total(values).unwrap_or(Decimal::ZERO),
                shares: analytics::shares(values),
            }
        })
        .collect();

    let trend = data
        .trend
        .iter()
        .zip(analytics::period_metrics(&data.trend))
        .map(|(period, metrics)| TrendReport {
            estimate: period.estimate(),
            revenue: period.revenue,
            expenditure: period.expenditure,
            deficit: period.deficit,
            metrics,
        })
        .collect();

    let revenue_growth = match analytics::revenue_growth(&data.trend) {
        Ok(g) => Some(g),
        Err(e) => {
            debug!(error = %e, "No revenue growth for report");
            None
        }
    };

    BudgetReport {
        title: data.title.clone(),
        fiscal_year: view.fiscal_year,
        generated_at: Utc::now(),
        currency_unit: view.currency.unit.clone(),
        summary,
        composition,
        capital_expenditure: analytics::shares(&data.capital_expenditure),
        capital_expenditure_total: analytics::checked_total(&data.capital_expenditure)
            .unwrap_or(Decimal::ZERO),
        trend,
        revenue_growth,
        highlights: analytics::highlights(data, view.currency),
    }
}

/// Serializes the report as pretty JSON.
pub fn render(view: &DashboardView) -> Result<String> {
    serde_json::to_string_pretty(&build_report(view)).context("Failed to serialize budget report")
}

/// Writes the report to `output`, or prints it when no path is given.
pub fn run(view: &DashboardView, output: Option<&Path>) -> Result<()> {
    let json = render(view)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Wrote budget report to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
