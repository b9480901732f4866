use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "acordos")]
#[command(
    version,
    about = "Parse installment descriptions of settlement agreements"
)]
#[command(
    long_about = "Extract structured installments (amount, fees, net value, due date, payment status) from free-text Portuguese payment-plan descriptions and reconcile them against agreement totals."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an installment description (reads stdin when TEXT is omitted)
    Parse {
        /// Description text
        text: Option<String>,

        /// Use only the legacy phrase catalogue, accumulating every match
        #[arg(long)]
        legacy: bool,
    },

    /// Normalize a currency string (e.g. "R$ 1.234,56", "2.100", "1500.00")
    Amount {
        /// Currency string
        value: String,
    },

    /// Parse a description and reconcile it against the row totals
    Check {
        /// Description text
        text: String,

        /// Total agreement value (VALOR DO ACORDO)
        #[arg(long)]
        agreement: String,

        /// Amount transferred to the client (VALOR DO REPASSE)
        #[arg(long)]
        transferred: String,

        /// Total fees (HONORÁRIOS)
        #[arg(long, default_value = "")]
        fees: String,
    },

    /// Reconcile a JSON array of agreement rows
    Batch {
        /// Path to the JSON file
        file: PathBuf,
    },
}
