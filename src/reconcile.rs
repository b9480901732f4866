//! Agreement row reconciliation
//!
//! Cross-checks the installments extracted from a row's description against
//! the row's own ledger figures. The extracted gross total should match either
//! the amount transferred to the client or the total agreement value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::normalize_amount;
use crate::installments::{analyze_installments_with, ParseMode, ParseOutcome};

/// Default tolerance: one cent
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// One agreement row as supplied by the spreadsheet layer (raw strings)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementRow {
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agreement_total: String,
    #[serde(default)]
    pub fee_total: String,
    #[serde(default)]
    pub transferred_total: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Nothing to compare: description unrecognized or no known amounts
    NotChecked,
    MatchesTransferred,
    MatchesAgreement,
    Mismatch { extracted: Decimal },
}

impl Reconciliation {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Reconciliation::Mismatch { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reconciliation::NotChecked => "NOT_CHECKED",
            Reconciliation::MatchesTransferred => "MATCHES_TRANSFERRED",
            Reconciliation::MatchesAgreement => "MATCHES_AGREEMENT",
            Reconciliation::Mismatch { .. } => "MISMATCH",
        }
    }
}

/// Compare extracted installments against the row's references.
///
/// The transferred total is checked first, then the agreement total; a
/// mismatch is flagged only when both differ by more than `tolerance`.
pub fn reconcile(
    outcome: &ParseOutcome,
    transferred_total: Decimal,
    agreement_total: Decimal,
    tolerance: Decimal,
) -> Reconciliation {
    if !outcome.is_recognized() {
        return Reconciliation::NotChecked;
    }

    // An extracted total outside the Decimal range cannot be compared
    let Some(extracted) = outcome.checked_total_gross() else {
        debug!("Extracted gross total overflows, skipping reconciliation");
        return Reconciliation::NotChecked;
    };
    if extracted <= Decimal::ZERO {
        return Reconciliation::NotChecked;
    }

    let within = |reference: Decimal| {
        extracted
            .checked_sub(reference)
            .is_some_and(|diff| diff.abs() <= tolerance)
    };

    if within(transferred_total) {
        Reconciliation::MatchesTransferred
    } else if within(agreement_total) {
        Reconciliation::MatchesAgreement
    } else {
        Reconciliation::Mismatch { extracted }
    }
}

/// Parsed and reconciled view of one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAnalysis {
    pub client: Option<String>,
    pub outcome: ParseOutcome,
    pub agreement_total: Decimal,
    pub fee_total: Decimal,
    pub transferred_total: Decimal,
    pub reconciliation: Reconciliation,
}

pub fn analyze_row(row: &AgreementRow, mode: ParseMode, tolerance: Decimal) -> RowAnalysis {
    let outcome = analyze_installments_with(&row.description, mode);
    let agreement_total = normalize_amount(&row.agreement_total);
    let fee_total = normalize_amount(&row.fee_total);
    let transferred_total = normalize_amount(&row.transferred_total);
    let reconciliation = reconcile(&outcome, transferred_total, agreement_total, tolerance);

    if let Reconciliation::Mismatch { extracted } = reconciliation {
        warn!(
            "Extracted total {} matches neither transferred {} nor agreement {} (client: {})",
            extracted,
            transferred_total,
            agreement_total,
            row.client.as_deref().unwrap_or("-")
        );
    }

    RowAnalysis {
        client: row.client.clone(),
        outcome,
        agreement_total,
        fee_total,
        transferred_total,
        reconciliation,
    }
}

/// Totals over a batch of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<RowAnalysis>,
    pub total_agreements: Decimal,
    pub total_fees: Decimal,
    pub unrecognized: usize,
    pub mismatches: usize,
}

/// Analyze every row independently; a row that fails to parse never stops the batch.
pub fn analyze_batch(rows: &[AgreementRow], mode: ParseMode, tolerance: Decimal) -> BatchReport {
    let rows: Vec<RowAnalysis> = rows.iter().map(|r| analyze_row(r, mode, tolerance)).collect();

    // Totals saturate at the Decimal range rather than abort the batch
    let total_agreements = rows
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.agreement_total));
    let total_fees = rows
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.fee_total));
    let unrecognized = rows.iter().filter(|r| !r.outcome.is_recognized()).count();
    let mismatches = rows.iter().filter(|r| r.reconciliation.is_mismatch()).count();

    debug!(
        "Batch of {} rows: {} unrecognized, {} mismatches",
        rows.len(),
        unrecognized,
        mismatches
    );

    BatchReport {
        rows,
        total_agreements,
        total_fees,
        unrecognized,
        mismatches,
    }
}
