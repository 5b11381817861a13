use super::{DashboardView, ui};
use crate::core::analytics::{self, PeriodMetrics};
use crate::core::chart;
use crate::core::format::percent_change;
use crate::core::model::{TrendDirection, YearTrend};
use comfy_table::Cell;
use rust_decimal::Decimal;
use tracing::warn;

/// Renders revenue, expenditure and deficit across the trend periods.
pub fn render(view: &DashboardView) -> String {
    let trend = &view.data.trend;
    let metrics = analytics::period_metrics(trend);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Period"),
        ui::header_cell("Stage"),
        ui::header_cell("Revenue"),
        ui::header_cell("Expenditure"),
        ui::header_cell("Deficit"),
        ui::header_cell("Deficit / Exp."),
    ]);

    for (period, m) in trend.iter().zip(&metrics) {
        table.add_row(period_row(view, period, m));
    }

    let series = [
        ("Revenue", trend.iter().map(|t| t.revenue).collect::<Vec<_>>()),
        ("Expenditure", trend.iter().map(|t| t.expenditure).collect()),
        ("Deficit", trend.iter().map(|t| t.deficit).collect()),
    ];
    let mut lines = String::new();
    for (name, values) in &series {
        lines.push_str(&format!("{name:<12} {}\n", chart::sparkline(values)));
    }

    let growth = match analytics::revenue_growth(trend) {
        Ok(g) => format!(
            "{} {} ({} to {}, {} yrs)",
            ui::style_text("Revenue CAGR:", ui::StyleType::TotalLabel),
            ui::style_text(&percent_change(g.percent), ui::StyleType::TotalValue),
            g.from,
            g.to,
            g.years
        ),
        Err(e) => {
            warn!(error = %e, "Skipping revenue growth");
            ui::style_text("Revenue CAGR: N/A", ui::StyleType::Subtle)
        }
    };

    format!(
        "{}\n{table}\n\n{lines}\n{growth}",
        ui::section_header(
            "Budget Trends",
            "Revenue, expenditure and deficit trends over years"
        )
    )
}

fn period_row(view: &DashboardView, period: &YearTrend, m: &PeriodMetrics) -> Vec<Cell> {
    vec![
        Cell::new(&period.year),
        Cell::new(period.estimate().to_string()),
        value_with_change(view, period.revenue, m.revenue_change),
        value_with_change(view, period.expenditure, m.expenditure_change),
        value_with_change(view, period.deficit, m.deficit_change),
        ui::format_optional_cell(m.deficit_ratio, |r| format!("{r:.2}%")),
    ]
}

fn value_with_change(view: &DashboardView, value: Decimal, change: Option<Decimal>) -> Cell {
    let amount = view.currency.amount(value);
    let text = match change {
        Some(c) => format!(
            "{amount}\n{}",
            ui::style_text(
                &format!("{} {}", TrendDirection::from_change(c).arrow(), percent_change(c)),
                ui::StyleType::Subtle
            )
        ),
        None => amount,
    };
    ui::amount_cell(text)
}
