use crate::core::format::percent_change;
use crate::core::model::{TrendDirection, parse_hex_color};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::Decimal;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Heading,
    TotalLabel,
    TotalValue,
    Subtle,
    Selected,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Heading => style(text).bold().cyan(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
        StyleType::Selected => style(text).reverse().bold(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

fn trend_color(trend: TrendDirection) -> Color {
    match trend {
        TrendDirection::Up => Color::Green,
        TrendDirection::Down => Color::Red,
    }
}

/// Creates a cell for a percentage change with an arrow and color coding.
pub fn change_cell(change: Decimal, trend: TrendDirection) -> Cell {
    Cell::new(format!("{} {}", trend.arrow(), percent_change(change)))
        .fg(trend_color(trend))
        .set_alignment(CellAlignment::Right)
}

/// Creates a cell colored with a `#rrggbb` hint, or plain when the hint is invalid.
pub fn hinted_cell(text: String, color: &str) -> Cell {
    let cell = Cell::new(text);
    match parse_hex_color(color) {
        Some((r, g, b)) => cell.fg(Color::Rgb { r, g, b }),
        None => cell,
    }
}

/// A bold section title followed by a dim description line.
pub fn section_header(title: &str, description: &str) -> String {
    format!(
        "{}\n{}\n",
        style_text(title, StyleType::Heading),
        style_text(description, StyleType::Subtle)
    )
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    format!("\n{}\n", "─".repeat(term_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_cell_content() {
        let cell = change_cell(Decimal::new(-1413, 2), TrendDirection::Down);
        assert_eq!(cell.content(), "↓ -14.13%");
        let cell = change_cell(Decimal::new(1002, 2), TrendDirection::Up);
        assert_eq!(cell.content(), "↑ +10.02%");
    }

    #[test]
    fn test_format_optional_cell() {
        assert_eq!(format_optional_cell::<i32>(None, |v| v.to_string()).content(), "N/A");
        assert_eq!(format_optional_cell(Some(3), |v| format!("{v}%")).content(), "3%");
    }

    #[test]
    fn test_section_header_contains_text() {
        let header = section_header("Capital Expenditure", "for 2025-2026");
        assert!(header.contains("Capital Expenditure"));
        assert!(header.contains("for 2025-2026"));
    }
}
