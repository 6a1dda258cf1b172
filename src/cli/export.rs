//! CLI commands for data export
//!
//! Everything is written to stdout unless `--output` names a file.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{BudgetError, BudgetResult};
use crate::export::{csv, json, yaml};
use crate::reports::YearlyOverview;
use crate::storage::UserStorage;

use super::report::create_file;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV (overview and expenses only)
    Csv,
    /// JSON
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the yearly overview
    Overview {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every expense with its month-by-month charges (CSV)
    Expenses {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all of your records
    Data {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &UserStorage, cmd: ExportCommands) -> BudgetResult<()> {
    match cmd {
        ExportCommands::Overview { format, output } => {
            let overview = YearlyOverview::generate(storage)?;
            with_writer(output, |mut writer| match format {
                ExportFormat::Csv => csv::export_overview_csv(&overview, &mut writer),
                ExportFormat::Json => json::export_overview_json(&overview, &mut writer, true),
                ExportFormat::Yaml => yaml::export_overview_yaml(&overview, &mut writer),
            })
        }

        ExportCommands::Expenses { output } => {
            with_writer(output, |mut writer| csv::export_expenses_csv(storage, &mut writer))
        }

        ExportCommands::Data {
            format,
            output,
            pretty,
        } => with_writer(output, |mut writer| match format {
            ExportFormat::Csv => Err(BudgetError::Export(
                "CSV cannot hold the full record set. Use --format json or yaml.".into(),
            )),
            ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty),
            ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer),
        }),
    }
}

fn with_writer(
    output: Option<PathBuf>,
    write: impl FnOnce(&mut dyn Write) -> BudgetResult<()>,
) -> BudgetResult<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(create_file(&path)?);
            write(&mut writer)?;
            writer
                .flush()
                .map_err(|e| BudgetError::Export(e.to_string()))?;
            eprintln!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write(&mut writer)?;
            writer
                .flush()
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
    }
    Ok(())
}
