use super::{DashboardView, ui};
use crate::core::analytics;

/// Renders the highlights panel and the pointer to the detailed report.
pub fn render(view: &DashboardView) -> String {
    let mut output = ui::section_header(
        "Budget Highlights",
        &format!("Key insights from the {} budget", view.fiscal_year),
    );
    output.push('\n');

    for highlight in analytics::highlights(view.data, view.currency) {
        output.push_str(&format!(
            "• {}\n  {}\n\n",
            ui::style_text(&highlight.title, ui::StyleType::TotalLabel),
            highlight.body
        ));
    }

    output.push_str(&ui::style_text(
        "View the detailed budget report with `budgetdash export`.",
        ui::StyleType::Subtle,
    ));
    output
}
