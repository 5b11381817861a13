use super::{DashboardView, capex, cards, composition, highlights, trends, ui};

/// Title line with the fiscal year tabs, the selected one highlighted.
pub fn header(view: &DashboardView) -> String {
    let tabs = view
        .data
        .fiscal_years
        .iter()
        .map(|fy| {
            if *fy == view.fiscal_year {
                ui::style_text(&format!("[{fy}]"), ui::StyleType::Selected)
            } else {
                ui::style_text(&format!(" {fy} "), ui::StyleType::Subtle)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{}\n{tabs}\n",
        ui::style_text(&view.data.title, ui::StyleType::Title)
    )
}

/// Renders every section in page order.
pub fn render(view: &DashboardView) -> String {
    let sections = [
        header(view),
        cards::render(view),
        composition::render_all(view),
        trends::render(view),
        capex::render(view),
        highlights::render(view),
    ];
    sections.join(&ui::separator())
}
