//! Lustrum CLI binary.
//!
//! Fetches annual statements for a ticker symbol, reconciles them into the
//! canonical five-year sequence and prints or exports the analysis.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lustrum::av::AvClient;
use lustrum::fmp::FmpClient;
use lustrum::prelude::*;
use lustrum::report::{ExportFormat, table, write_csv, write_json};
use std::fs::File;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lustrum")]
#[command(about = "Five-year financial statement aggregation and anomaly screening", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which data provider to fetch statements from.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Provider {
    /// Financial Modeling Prep (requires `FMP_API_KEY`)
    #[default]
    Fmp,
    /// Alpha Vantage (requires `ALPHAVANTAGE_API_KEY`)
    Alphavantage,
}

/// Divisor basis for the cash conversion ratio.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum CashConversion {
    /// Operating cash flow over EBITDA
    #[default]
    Ebitda,
    /// Operating cash flow over profit after tax
    Pat,
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    /// Financials table as CSV
    #[default]
    Csv,
    /// Full snapshot as pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, reconcile and print the full analysis for a symbol
    Analyze {
        /// Ticker symbol
        symbol: String,

        /// Data provider
        #[arg(short, long, value_enum, default_value_t = Provider::Fmp)]
        provider: Provider,

        /// Cash conversion ratio basis
        #[arg(long, value_enum, default_value_t = CashConversion::Ebitda)]
        cash_conversion: CashConversion,
    },

    /// Export the reconciled data for a symbol to a file
    Export {
        /// Ticker symbol
        symbol: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Data provider
        #[arg(short, long, value_enum, default_value_t = Provider::Fmp)]
        provider: Provider,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            provider,
            cash_conversion,
        } => {
            let config = MetricsConfig {
                cash_conversion_basis: match cash_conversion {
                    CashConversion::Ebitda => CashConversionBasis::Ebitda,
                    CashConversion::Pat => CashConversionBasis::Pat,
                },
            };
            let snapshot = fetch_snapshot(&symbol, provider, &config).await?;
            println!("{}", table::full_report(&snapshot));
        }
        Commands::Export {
            symbol,
            output,
            format,
            provider,
        } => {
            let snapshot = fetch_snapshot(&symbol, provider, &MetricsConfig::default()).await?;
            let file = File::create(&output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            match format {
                Format::Csv => write_csv(&snapshot.records, file)?,
                Format::Json => write_json(&snapshot, file, true)?,
            }
            println!(
                "Exported {} years for {} to {} ({})",
                snapshot.records.len(),
                snapshot.symbol,
                output.display(),
                ExportFormat::from(format).extension()
            );
        }
    }

    Ok(())
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::PrettyJson,
        }
    }
}

async fn fetch_snapshot(
    symbol: &str,
    provider: Provider,
    config: &MetricsConfig,
) -> Result<CompanySnapshot> {
    let provider: Box<dyn StatementProvider> = match provider {
        Provider::Fmp => Box::new(FmpClient::from_env()?),
        Provider::Alphavantage => Box::new(AvClient::from_env()?),
    };

    info!(symbol, provider = provider.name(), "fetching statements");
    let bundle = provider.statements(symbol).await?;
    let records = reconcile(&bundle)?;

    Ok(CompanySnapshot::compute(
        bundle.symbol,
        bundle.company_name,
        records,
        config,
    ))
}
