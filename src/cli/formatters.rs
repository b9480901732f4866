//! Output formatting module for CLI display
//!
//! Keeps presentation (tables, colors, JSON) out of the parsing code.

use acordos::installments::display::format_gross;
use acordos::installments::{format_installment, Installment, ParseOutcome, PaymentStatus};
use acordos::reconcile::{BatchReport, Reconciliation, RowAnalysis};
use acordos::utils::{format_currency, format_optional_date_br};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

/// Serialize any report for `--json`
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn optional_amount(value: Option<Decimal>) -> String {
    value.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

fn status_cell(installment: &Installment) -> String {
    match installment.payment_status {
        PaymentStatus::Paid => installment.payment_status.as_str().green().to_string(),
        PaymentStatus::Pending => installment.payment_status.as_str().yellow().to_string(),
    }
}

/// Format parsed installments as a table followed by one-line summaries
pub fn format_installments_table(outcome: &ParseOutcome) -> String {
    let installments = match outcome {
        ParseOutcome::Parsed(list) => list,
        ParseOutcome::NotRecognized => {
            return format!("\n{} Pattern not recognized\n", "⚠".yellow().bold());
        }
    };

    #[derive(Tabled)]
    struct InstallmentRow {
        #[tabled(rename = "Nº")]
        number: String,
        #[tabled(rename = "Valor")]
        gross: String,
        #[tabled(rename = "Honorários")]
        fees: String,
        #[tabled(rename = "Líquido")]
        net: String,
        #[tabled(rename = "Vencimento")]
        due: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Pagamento")]
        paid_on: String,
    }

    let rows: Vec<InstallmentRow> = installments
        .iter()
        .map(|i| InstallmentRow {
            number: i.sequence_number.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            gross: format_gross(&i.gross_amount),
            fees: optional_amount(i.total_fees()),
            net: optional_amount(i.net_amount),
            due: format_optional_date_br(i.due_date),
            status: status_cell(i),
            paid_on: format_optional_date_br(i.payment_date),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    let mut output = format!(
        "\n{} Found {} installment(s)\n\n",
        "✓".green().bold(),
        installments.len()
    );
    output.push_str(&table.to_string());
    output.push('\n');

    for installment in installments {
        output.push_str(&format!("\n  {}", format_installment(installment)));
    }

    output.push_str(&format!(
        "\n\n{:<16} {}\n",
        "Total:".bold(),
        format_currency(outcome.total_gross())
    ));
    output
}

fn reconciliation_cell(reconciliation: &Reconciliation) -> String {
    match reconciliation {
        Reconciliation::NotChecked => "not checked".bright_black().to_string(),
        Reconciliation::MatchesTransferred => "matches transferred".green().to_string(),
        Reconciliation::MatchesAgreement => "matches agreement".green().to_string(),
        Reconciliation::Mismatch { extracted } => {
            format!("MISMATCH ({})", format_currency(*extracted)).red().to_string()
        }
    }
}

/// Format a single reconciled row
pub fn format_row_analysis(analysis: &RowAnalysis) -> String {
    let mut output = format_installments_table(&analysis.outcome);
    output.push_str(&format!(
        "{:<16} {}\n{:<16} {}\n{:<16} {}\n{:<16} {}\n",
        "Agreement:".bold(),
        format_currency(analysis.agreement_total),
        "Transferred:".bold(),
        format_currency(analysis.transferred_total),
        "Fees:".bold(),
        format_currency(analysis.fee_total),
        "Reconciliation:".bold(),
        reconciliation_cell(&analysis.reconciliation)
    ));
    output
}

/// Format a batch report: one row per agreement plus totals
pub fn format_batch_report(report: &BatchReport) -> String {
    #[derive(Tabled)]
    struct BatchRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Cliente")]
        client: String,
        #[tabled(rename = "Parcelas")]
        installments: String,
        #[tabled(rename = "Extraído")]
        extracted: String,
        #[tabled(rename = "Acordo")]
        agreement: String,
        #[tabled(rename = "Repasse")]
        transferred: String,
        #[tabled(rename = "Conferência")]
        check: String,
    }

    let rows: Vec<BatchRow> = report
        .rows
        .iter()
        .enumerate()
        .map(|(idx, r)| BatchRow {
            index: idx + 1,
            client: r.client.clone().unwrap_or_else(|| "-".to_string()),
            installments: match &r.outcome {
                ParseOutcome::Parsed(list) => list.len().to_string(),
                ParseOutcome::NotRecognized => "not recognized".yellow().to_string(),
            },
            extracted: format_currency(r.outcome.total_gross()),
            agreement: format_currency(r.agreement_total),
            transferred: format_currency(r.transferred_total),
            check: reconciliation_cell(&r.reconciliation),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    let mut output = format!("\n{} Analyzed {} row(s)\n\n", "✓".green().bold(), report.rows.len());
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{:<20} {}\n{:<20} {}\n{:<20} {}\n{:<20} {}\n",
        "Total agreements:".bold(),
        format_currency(report.total_agreements),
        "Total fees:".bold(),
        format_currency(report.total_fees),
        "Not recognized:".bold(),
        report.unrecognized,
        "Mismatches:".bold(),
        report.mismatches
    ));
    output
}
