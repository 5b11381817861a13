use anyhow::Result;
use budgetdash::cli::composition::ProportionChart;
use budgetdash::core::FiscalYear;
use budgetdash::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Fiscal year label to show, e.g. 2025-2026
    #[arg(short = 'y', long, global = true)]
    fiscal_year: Option<FiscalYear>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for budgetdash::AppCommand {
    fn from(cmd: Commands) -> budgetdash::AppCommand {
        match cmd {
            Commands::Dashboard => budgetdash::AppCommand::Dashboard,
            Commands::Cards => budgetdash::AppCommand::Cards,
            Commands::Composition { chart } => budgetdash::AppCommand::Composition(chart),
            Commands::Trends => budgetdash::AppCommand::Trends,
            Commands::Capex => budgetdash::AppCommand::Capex,
            Commands::Highlights => budgetdash::AppCommand::Highlights,
            Commands::Export { output } => budgetdash::AppCommand::Export(output),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the full dashboard
    Dashboard,
    /// Display the key metric cards
    Cards,
    /// Display revenue, tax and expenditure composition
    Composition {
        /// Show only this chart
        #[arg(long, value_enum)]
        chart: Option<ProportionChart>,
    },
    /// Display revenue, expenditure and deficit trends
    Trends,
    /// Display the capital expenditure breakdown
    Capex,
    /// Display budget highlights
    Highlights,
    /// Export the detailed budget report as JSON
    Export {
        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => budgetdash::cli::setup::setup(),
        Some(cmd) => {
            budgetdash::run_command(cmd.into(), cli.config_path.as_deref(), cli.fiscal_year)
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
