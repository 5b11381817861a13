use super::{DashboardView, ui};
use comfy_table::Cell;

/// Renders the metric cards as one table row per card.
pub fn render(view: &DashboardView) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Metric"),
        ui::header_cell("Value"),
        ui::header_cell("Change"),
    ]);

    for card in &view.data.summary {
        table.add_row(vec![
            Cell::new(&card.title),
            ui::amount_cell(view.currency.amount(card.value)),
            ui::change_cell(card.change, card.trend),
        ]);
    }

    format!(
        "{}\n{table}\n{}",
        ui::section_header("Key Metrics", &format!("Headline figures for {}", view.fiscal_year)),
        ui::style_text("Changes are from the previous year.", ui::StyleType::Subtle)
    )
}
