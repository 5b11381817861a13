use super::{DashboardView, ui};
use crate::core::analytics::{self, Share};
use crate::core::chart;
use crate::core::format::share;
use crate::core::model::CategoryValue;
use clap::ValueEnum;
use comfy_table::Cell;
use rust_decimal::Decimal;
use serde::Serialize;

/// The proportion charts on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProportionChart {
    Revenue,
    Tax,
    Expenditure,
}

impl ProportionChart {
    pub const ALL: [ProportionChart; 3] = [
        ProportionChart::Revenue,
        ProportionChart::Tax,
        ProportionChart::Expenditure,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ProportionChart::Revenue => "Revenue Composition",
            ProportionChart::Tax => "Tax Revenue Breakdown",
            ProportionChart::Expenditure => "Expenditure Distribution",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ProportionChart::Revenue => "Breakdown of revenue sources for",
            ProportionChart::Tax => "Major tax revenue sources for",
            ProportionChart::Expenditure => "Major spending categories for",
        }
    }

    pub fn values<'a>(&self, view: &DashboardView<'a>) -> &'a [CategoryValue] {
        match self {
            ProportionChart::Revenue => &view.data.revenue,
            ProportionChart::Tax => &view.data.tax_revenue,
            ProportionChart::Expenditure => &view.data.expenditure,
        }
    }
}

/// Renders one proportion chart: a row per category with its amount, share and bar.
pub fn render(view: &DashboardView, which: ProportionChart) -> String {
    let values = which.values(view);
    let shares = analytics::shares(values);
    let total = analytics::checked_total(values).unwrap_or(Decimal::ZERO);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Share"),
        ui::header_cell(""),
    ]);

    for s in &shares {
        table.add_row(share_row(view, s));
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Total", ui::StyleType::TotalLabel)),
        ui::amount_cell(ui::style_text(
            &view.currency.amount(total),
            ui::StyleType::TotalValue,
        )),
        ui::amount_cell(share(shares.iter().map(|s| s.percent).sum())),
        Cell::new(""),
    ]);

    format!(
        "{}\n{table}",
        ui::section_header(
            which.title(),
            &format!("{} {}", which.description(), view.fiscal_year)
        )
    )
}

fn share_row(view: &DashboardView, s: &Share) -> Vec<Cell> {
    // Bars are scaled against the whole, so a full bar means 100%.
    let bar = chart::bar(s.percent, Decimal::ONE_HUNDRED, view.bar_width);
    vec![
        ui::hinted_cell(s.category.clone(), &s.color),
        ui::amount_cell(view.currency.amount(s.value)),
        ui::amount_cell(share(s.percent)),
        ui::hinted_cell(bar, &s.color),
    ]
}

/// Renders all three proportion charts, separated.
pub fn render_all(view: &DashboardView) -> String {
    ProportionChart::ALL
        .iter()
        .map(|which| render(view, *which))
        .collect::<Vec<_>>()
        .join(&ui::separator())
}
