// Summary matcher: "6 parcelas de R$ 2.000,00 ... vencível a primeira dia 05/03/2025"

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::model::{Installment, InstallmentAmount};
use super::schedule::{build_schedule, monthly_dates};
use crate::currency::normalize_amount;
use crate::utils::parse_date_br;

static COUNT_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*parcelas\s+de\s+R\$\s*([\d.,]*\d)").expect("valid summary regex")
});

static FIRST_DUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)venc[íi]vel\s+a\s+primeira\s*(?:dia)?\s*(\d{2}/\d{2}/\d{4})")
        .expect("valid first due regex")
});

/// Matcher: a single summary sentence describing equal monthly installments.
///
/// Both the count/amount phrase and the first due date must be present and
/// readable, otherwise nothing is synthesized.
pub fn match_summary(text: &str) -> Option<Vec<Installment>> {
    let flattened = text.replace(['\r', '\n'], " ");

    let caps = COUNT_AMOUNT_RE.captures(&flattened)?;
    let first_due = FIRST_DUE_RE.captures(&flattened)?;

    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    let amount = normalize_amount(caps.get(2)?.as_str());
    let first = parse_date_br(first_due.get(1)?.as_str())?;

    let dates = monthly_dates(first, count)?;
    debug!("Summary phrasing: {} installments from {}", count, first);
    Some(build_schedule(&dates, InstallmentAmount::Known(amount)))
}
