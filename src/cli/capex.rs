use super::{DashboardView, ui};
use crate::core::{analytics, chart};
use comfy_table::Cell;
use rust_decimal::Decimal;

/// Renders capital expenditure as a horizontal bar chart.
///
/// Bars are scaled to the largest head rather than the total, as a column
/// chart would be.
pub fn render(view: &DashboardView) -> String {
    let heads = &view.data.capital_expenditure;
    let max = heads.iter().map(|c| c.value).max().unwrap_or(Decimal::ZERO);
    let total = analytics::checked_total(heads).unwrap_or(Decimal::ZERO);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({} {})", view.currency.symbol, view.currency.unit)),
        ui::header_cell(""),
    ]);

    for head in heads {
        table.add_row(vec![
            ui::hinted_cell(head.category.clone(), &head.color),
            ui::amount_cell(view.currency.amount(head.value)),
            ui::hinted_cell(chart::bar(head.value, max, view.bar_width), &head.color),
        ]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Total", ui::StyleType::TotalLabel)),
        ui::amount_cell(ui::style_text(
            &view.currency.amount(total),
            ui::StyleType::TotalValue,
        )),
        Cell::new(""),
    ]);

    format!(
        "{}\n{table}",
        ui::section_header(
            "Capital Expenditure",
            &format!("Breakdown of capital expenditure for {}", view.fiscal_year)
        )
    )
}
