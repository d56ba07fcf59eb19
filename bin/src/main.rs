//! CLI for the quarry quarterly fundamentals dataset builder.
//!
//! This binary consumes scraped-table documents (JSON), runs the
//! normalization and feature pipeline and writes the final dataset as CSV.
//! Scraping itself lives upstream; the document format mirrors the raw
//! shapes the library accepts.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use serde::Deserialize;

use quarry::{
    CompanyPanel, DatasetConfig, DividendTable, EconomicPanel, FeatureDict, Quarter, QuoteRow,
    RawTable, StatementKind, build_dataset, monthly_series, normalize_table, quote_series,
};

/// Dividend status text marking a paid-out year on the source site.
const DEFAULT_PAID_MARKER: &str = "wypłacona";

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Quarterly fundamentals dataset builder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default cross-sectional configuration as JSON
    Config,
    /// Resolve a report date (DD.MM.YYYY) to its fiscal quarter
    Quarter {
        /// Report date
        date: String,
    },
    /// Build the final dataset from a scraped-table document
    Build {
        /// Path to the scrape document (JSON)
        #[arg(long)]
        input: PathBuf,
        /// Path of the CSV file to write
        #[arg(long)]
        output: PathBuf,
        /// Dividend status text counted as paid
        #[arg(long, default_value = DEFAULT_PAID_MARKER)]
        paid_marker: String,
    },
}

/// Everything one scrape run hands over, as a single JSON document.
#[derive(Debug, Deserialize)]
struct ScrapeDocument {
    /// Label dictionary; missing labels pass through unchanged
    #[serde(default)]
    features: FeatureDict,
    /// Cross-sectional configuration override
    config: Option<DatasetConfig>,
    companies: Vec<CompanyDocument>,
    economic: EconomicDocument,
}

#[derive(Debug, Deserialize)]
struct CompanyDocument {
    code: String,
    market_table: RawTable,
    #[serde(default)]
    statements: Vec<RawTable>,
    profit_loss: Option<RawTable>,
    dividends: Option<DividendTable>,
}

#[derive(Debug, Deserialize)]
struct EconomicDocument {
    #[serde(default)]
    series: Vec<SeriesDocument>,
    currency: SeriesDocument,
    market_index: SeriesDocument,
}

#[derive(Debug, Deserialize)]
struct SeriesDocument {
    field: String,
    rows: Vec<QuoteRow>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Config => {
            let config = DatasetConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Quarter { date } => match Quarter::from_report_date(&date) {
            Some(quarter) => println!("{quarter}"),
            None => {
                eprintln!("{date} is not a quarter-end reporting date");
                std::process::exit(1);
            }
        },
        Commands::Build {
            input,
            output,
            paid_marker,
        } => build(&input, &output, &paid_marker)?,
    }
    Ok(())
}

fn build(input: &Path, output: &Path, paid_marker: &str) -> Result<(), Box<dyn std::error::Error>> {
    let document: ScrapeDocument = serde_json::from_str(&fs::read_to_string(input)?)?;
    let config = document.config.clone().unwrap_or_default();

    let bar = ProgressBar::new(document.companies.len() as u64);
    bar.set_style(ProgressStyle::with_template("{msg:12} {bar:40} {pos}/{len}")?);

    let mut panels = Vec::with_capacity(document.companies.len());
    for company in &document.companies {
        bar.set_message(company.code.clone());
        panels.push(company_panel(company, &document.features, paid_marker)?);
        bar.inc(1);
    }
    bar.finish_with_message("companies done");

    let mut economic = EconomicPanel::new();
    for series in &document.economic.series {
        economic.add_series(quote_series(&series.rows, &series.field)?);
    }
    economic.with_benchmark(
        monthly_series(
            &document.economic.currency.rows,
            &document.economic.currency.field,
        )?,
        monthly_series(
            &document.economic.market_index.rows,
            &document.economic.market_index.field,
        )?,
    );

    let mut dataset = build_dataset(&panels, &economic.finish()?, &config)?;
    let file = File::create(output)?;
    CsvWriter::new(file).finish(&mut dataset)?;
    println!(
        "Wrote {} rows x {} columns to {}",
        dataset.height(),
        dataset.width(),
        output.display()
    );
    Ok(())
}

/// Run one company's tables through the panel pipeline.
fn company_panel(
    company: &CompanyDocument,
    features: &FeatureDict,
    paid_marker: &str,
) -> quarry::Result<DataFrame> {
    let market = normalize_table(&company.market_table, features)?;
    let mut panel = CompanyPanel::from_market_table(company.code.clone(), &market)?;
    for table in &company.statements {
        panel.add_statement(&normalize_table(table, features)?, StatementKind::General)?;
    }
    if let Some(table) = &company.profit_loss {
        panel.add_statement(&normalize_table(table, features)?, StatementKind::ProfitLoss)?;
    }
    panel.add_dividends(company.dividends.as_ref(), paid_marker)?;
    Ok(panel.finish())
}
