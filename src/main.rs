mod cli;

use acordos::config::{load_config, Config};
use acordos::currency::try_normalize_amount;
use acordos::error::AcordosError;
use acordos::installments::{analyze_installments_with, ParseMode};
use acordos::reconcile::{analyze_batch, analyze_row, AgreementRow};
use acordos::utils::format_currency;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{formatters, Cli, Commands};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.no_color || !config.display.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Parse { text, legacy } => {
            let mode = if legacy { ParseMode::Legacy } else { config.parser.mode };
            handle_parse(text, mode, cli.json)
        }
        Commands::Amount { value } => handle_amount(&value, cli.json),
        Commands::Check {
            text,
            agreement,
            transferred,
            fees,
        } => {
            let row = AgreementRow {
                client: None,
                description: text,
                agreement_total: agreement,
                fee_total: fees,
                transferred_total: transferred,
            };
            handle_check(&row, &config, cli.json)
        }
        Commands::Batch { file } => handle_batch(&file, &config, cli.json),
    }
}

fn read_description(text: Option<String>) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(AcordosError::from)
                .context("failed to read description from stdin")?;
            Ok(buf)
        }
    }
}

fn handle_parse(text: Option<String>, mode: ParseMode, json: bool) -> Result<()> {
    let description = read_description(text)?;
    info!("Parsing description ({} chars, mode {})", description.len(), mode.as_str());

    let outcome = analyze_installments_with(&description, mode);

    if json {
        println!("{}", formatters::format_json(&outcome));
    } else {
        println!("{}", formatters::format_installments_table(&outcome));
    }
    Ok(())
}

fn handle_amount(value: &str, json: bool) -> Result<()> {
    let amount = match try_normalize_amount(value) {
        Some(v) => v,
        None => {
            warn!("Could not read amount '{}', using zero", value);
            Decimal::ZERO
        }
    };

    if json {
        println!(
            "{}",
            formatters::format_json(&serde_json::json!({
                "input": value,
                "amount": amount,
                "formatted": format_currency(amount),
            }))
        );
    } else {
        println!("{}  ({})", amount, format_currency(amount));
    }
    Ok(())
}

fn handle_check(row: &AgreementRow, config: &Config, json: bool) -> Result<()> {
    let analysis = analyze_row(row, config.parser.mode, config.reconcile.tolerance);

    if json {
        println!("{}", formatters::format_json(&analysis));
    } else {
        println!("{}", formatters::format_row_analysis(&analysis));
    }
    Ok(())
}

fn handle_batch(file: &Path, config: &Config, json: bool) -> Result<()> {
    info!("Reconciling agreement rows from: {}", file.display());

    let content = std::fs::read_to_string(file)
        .map_err(AcordosError::from)
        .with_context(|| format!("read {}", file.display()))?;
    let rows: Vec<AgreementRow> = serde_json::from_str(&content)
        .map_err(AcordosError::from)
        .with_context(|| format!("parse rows from {}", file.display()))?;

    if rows.is_empty() {
        return Err(AcordosError::InvalidInput(format!("{} contains no rows", file.display())).into());
    }

    let report = analyze_batch(&rows, config.parser.mode, config.reconcile.tolerance);

    if json {
        println!("{}", formatters::format_json(&report));
    } else {
        println!("{}", formatters::format_batch_report(&report));
    }
    Ok(())
}
