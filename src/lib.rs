pub mod cli;
pub mod core;

use crate::cli::DashboardView;
use crate::cli::composition::ProportionChart;
use crate::core::config::AppConfig;
use crate::core::{BudgetData, FiscalYear, dataset};
use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard,
    Cards,
    /// One proportion chart, or all three when `None`.
    Composition(Option<ProportionChart>),
    Trends,
    Capex,
    Highlights,
    /// JSON report, printed or written to the given path.
    Export(Option<PathBuf>),
}

/// Loads the configured dataset, or the built-in figures when none is set.
pub fn load_data(config: &AppConfig) -> Result<BudgetData> {
    match &config.dataset_path {
        Some(path) => dataset::load_from_path(path),
        None => {
            debug!("Using built-in dataset");
            Ok(dataset::builtin())
        }
    }
}

/// Picks the fiscal year label: the command line, then the config, then the
/// dataset default. The choice must be one of the dataset's tabs.
pub fn select_fiscal_year(
    data: &BudgetData,
    config: &AppConfig,
    requested: Option<FiscalYear>,
) -> Result<FiscalYear> {
    let fiscal_year = requested
        .or(config.fiscal_year)
        .unwrap_or(data.default_fiscal_year);
    if !data.fiscal_years.contains(&fiscal_year) {
        let available = data
            .fiscal_years
            .iter()
            .map(|fy| fy.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("Fiscal year {fiscal_year} is not available (choose from {available})");
    }
    Ok(fiscal_year)
}

/// Renders a command's output for the terminal.
pub fn render(command: &AppCommand, view: &DashboardView) -> Result<String> {
    let output = match command {
        AppCommand::Dashboard => cli::dashboard::render(view),
        AppCommand::Cards => cli::cards::render(view),
        AppCommand::Composition(Some(which)) => cli::composition::render(view, *which),
        AppCommand::Composition(None) => cli::composition::render_all(view),
        AppCommand::Trends => cli::trends::render(view),
        AppCommand::Capex => cli::capex::render(view),
        AppCommand::Highlights => cli::highlights::render(view),
        AppCommand::Export(_) => cli::export::render(view)?,
    };
    Ok(output)
}

pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    fiscal_year: Option<FiscalYear>,
) -> Result<()> {
    info!("Budget dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data = load_data(&config)?;
    let fiscal_year = select_fiscal_year(&data, &config, fiscal_year)?;
    debug!(%fiscal_year, "Selected fiscal year");

    let view = DashboardView {
        data: &data,
        currency: &config.currency,
        fiscal_year,
        bar_width: config.chart.bar_width,
    };

    match &command {
        AppCommand::Export(output) => cli::export::run(&view, output.as_deref()),
        _ => {
            println!("{}", render(&command, &view)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_fiscal_year_precedence() -> Result<()> {
        let data = dataset::builtin();
        let mut config = AppConfig::default();

        assert_eq!(select_fiscal_year(&data, &config, None)?, FiscalYear::new(2025));

        config.fiscal_year = Some(FiscalYear::new(2024));
        assert_eq!(select_fiscal_year(&data, &config, None)?, FiscalYear::new(2024));
        assert_eq!(
            select_fiscal_year(&data, &config, Some(FiscalYear::new(2023)))?,
            FiscalYear::new(2023)
        );
        Ok(())
    }

    #[test]
    fn test_select_unknown_fiscal_year() {
        let data = dataset::builtin();
        let config = AppConfig::default();
        let err = select_fiscal_year(&data, &config, Some(FiscalYear::new(2019))).unwrap_err();
        assert!(err.to_string().contains("2019-2020 is not available"));
    }

    #[test]
    fn test_fiscal_year_only_changes_labels() -> Result<()> {
        let data = dataset::builtin();
        let currency = crate::core::CurrencyFormat::default();
        let strip_year = |s: String, fy: FiscalYear| s.replace(&fy.to_string(), "<FY>");

        let mut renders = Vec::new();
        for fy in &data.fiscal_years {
            let view = DashboardView {
                data: &data,
                currency: &currency,
                fiscal_year: *fy,
                bar_width: 40,
            };
            let cards = strip_year(render(&AppCommand::Cards, &view)?, *fy);
            let composition = strip_year(render(&AppCommand::Composition(None), &view)?, *fy);
            let capex = strip_year(render(&AppCommand::Capex, &view)?, *fy);
            // Trend labels name their own periods, never the selected tab.
            let trends = render(&AppCommand::Trends, &view)?;
            let highlights = render(&AppCommand::Highlights, &view)?
                .replace(&format!("Key insights from the {fy} budget"), "<header>");

            let mut report = serde_json::to_value(cli::export::build_report(&view))?;
            assert_eq!(report["fiscal_year"], fy.to_string());
            report["fiscal_year"] = serde_json::Value::Null;
            report["generated_at"] = serde_json::Value::Null;

            renders.push((cards, composition, capex, trends, highlights, report));
        }

        // Every tab shows the same figures.
        assert!(renders.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(data, dataset::builtin());
        Ok(())
    }
}
