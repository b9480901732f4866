// Phrase catalogue: fixed phrasings seen in older agreement spreadsheets
//
// Each entry is an independent regex attempt. Unlike the cascade stages, the
// catalogue accumulates: every entry that matches contributes its records.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::model::{parse_sequence_number, Installment, InstallmentAmount};
use super::schedule::{build_schedule, monthly_dates_on_day};
use super::Matcher;
use crate::currency::normalize_amount;
use crate::utils::parse_date_br;

fn compile(pattern: &str) -> Regex {
    let pattern = pattern
        .replace("{DATE}", r"(\d{2}/\d{2}/\d{4})")
        .replace("{MONEY}", r"R\$\s*([\d.,]*\d)")
        .replace("{ORD}", r"(\d+)[ªº°]");
    Regex::new(&format!("(?i){}", pattern)).expect("valid catalogue regex")
}

// "1ª parcela, no valor de R$ 500,00, até 10/01/2025"
static VALUE_UNTIL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"{ORD}\s*parcela,?\s*no\s*valor\s*de\s*{MONEY},?\s*at[ée]\s*(?:o\s+dia\s+|dia\s+)?{DATE}")
});

// "1ª PARCELA - R$ 500,00 EM 10/01/2025"
static DASH_ON_RE: Lazy<Regex> = Lazy::new(|| compile(r"{ORD}\s*parcela\s*-\s*{MONEY}\s*em\s*{DATE}"));

// "1ª PARCELA DIA 10/01/2025"
static DAY_ONLY_RE: Lazy<Regex> = Lazy::new(|| compile(r"{ORD}\s*parcela\s*dia\s*{DATE}"));

// "parcela única, até o dia 10/01/2025"
static SINGLE_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\bparcela\s*[úu]nica,?\s*at[ée]\s*(?:o\s+dia\s+|dia\s+)?{DATE}")
});

// "Parecela única até 10/01/2025"
static SINGLE_TYPO_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"parecela\s*[úu]nica,?\s*at[ée]\s*(?:o\s+dia\s+|dia\s+)?{DATE}")
});

// "1ª PARCELA DE R$ 500,00 DIA 10/01/2025"
static OF_VALUE_DAY_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"{ORD}\s*parcela\s*de\s*{MONEY}\s*dia\s*{DATE}"));

// "2x de R$ 500,00 dia 10/01/2025 e 10/02/2025"
static TIMES_TWO_DATES_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(\d+)x\s*de\s*{MONEY}\s*dia\s*{DATE}\s*e\s*{DATE}"));

// "10 (dez) parcelas de R$ 500,00 com vencimento da 1ª parcela em 10/01/2025
//  e as demais ocorrerão até o dia 10 dos meses subsequentes"
static MONTHLY_ON_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"(\d+)\s*(?:\([^)]+\))?\s*parcelas?\s*de\s*{MONEY}\s*com\s*vencimento\s*da\s*1[ªº°]\s*parcelas?\s*em\s*{DATE}",
        r"\s*e\s*as\s*demais\s*ocorrer[ãa]o\s*at[ée]\s*o\s*dia\s*(\d+)"
    ))
});

/// Catalogue entries in evaluation order
pub const CATALOGUE: &[Matcher] = &[
    Matcher::new("value_until", match_value_until),
    Matcher::new("dash_on", match_dash_on),
    Matcher::new("day_only", match_day_only),
    Matcher::new("single", match_single),
    Matcher::new("single_typo", match_single_typo),
    Matcher::new("of_value_day", match_of_value_day),
    Matcher::new("times_two_dates", match_times_two_dates),
    Matcher::new("monthly_on_day", match_monthly_on_day),
];

fn non_empty(installments: Vec<Installment>) -> Option<Vec<Installment>> {
    if installments.is_empty() {
        None
    } else {
        Some(installments)
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str())
}

/// Every "<ordinal> ... <money> ... <date>" occurrence of `re` as one installment;
/// a "0ª" ordinal is not an installment
fn ordinal_amount_date(re: &Regex, text: &str) -> Option<Vec<Installment>> {
    non_empty(
        re.captures_iter(text)
            .filter_map(|caps| {
                Some(Installment::scheduled(
                    Some(group(&caps, 1).and_then(parse_sequence_number)?),
                    InstallmentAmount::Known(normalize_amount(group(&caps, 2).unwrap_or_default())),
                    group(&caps, 3).and_then(parse_date_br),
                ))
            })
            .collect(),
    )
}

pub fn match_value_until(text: &str) -> Option<Vec<Installment>> {
    ordinal_amount_date(&VALUE_UNTIL_RE, text)
}

pub fn match_dash_on(text: &str) -> Option<Vec<Installment>> {
    ordinal_amount_date(&DASH_ON_RE, text)
}

/// Dated installments without a value; defers to the valued phrasings.
pub fn match_day_only(text: &str) -> Option<Vec<Installment>> {
    if VALUE_UNTIL_RE.is_match(text) || DASH_ON_RE.is_match(text) {
        return None;
    }
    non_empty(
        DAY_ONLY_RE
            .captures_iter(text)
            .filter_map(|caps| {
                Some(Installment::scheduled(
                    Some(group(&caps, 1).and_then(parse_sequence_number)?),
                    InstallmentAmount::NotSpecified,
                    group(&caps, 2).and_then(parse_date_br),
                ))
            })
            .collect(),
    )
}

fn single(re: &Regex, text: &str) -> Option<Vec<Installment>> {
    let caps = re.captures(text)?;
    Some(vec![Installment::scheduled(
        None,
        InstallmentAmount::Single,
        group(&caps, 1).and_then(parse_date_br),
    )])
}

/// "Parcela única" yields to its misspelled form so a description is not counted twice.
pub fn match_single(text: &str) -> Option<Vec<Installment>> {
    if SINGLE_TYPO_RE.is_match(text) {
        return None;
    }
    single(&SINGLE_RE, text)
}

pub fn match_single_typo(text: &str) -> Option<Vec<Installment>> {
    single(&SINGLE_TYPO_RE, text)
}

pub fn match_of_value_day(text: &str) -> Option<Vec<Installment>> {
    ordinal_amount_date(&OF_VALUE_DAY_RE, text)
}

pub fn match_times_two_dates(text: &str) -> Option<Vec<Installment>> {
    let caps = TIMES_TWO_DATES_RE.captures(text)?;
    let amount = InstallmentAmount::Known(normalize_amount(group(&caps, 2)?));
    Some(vec![
        Installment::scheduled(Some(1), amount, group(&caps, 3).and_then(parse_date_br)),
        Installment::scheduled(Some(2), amount, group(&caps, 4).and_then(parse_date_br)),
    ])
}

pub fn match_monthly_on_day(text: &str) -> Option<Vec<Installment>> {
    let flattened = text.replace(['\r', '\n'], " ");
    let caps = MONTHLY_ON_DAY_RE.captures(&flattened)?;

    let count: u32 = group(&caps, 1)?.parse().ok()?;
    let amount = normalize_amount(group(&caps, 2)?);
    let first = parse_date_br(group(&caps, 3)?)?;
    let day: u32 = group(&caps, 4)?.parse().ok()?;

    let dates = monthly_dates_on_day(first, count, day)?;
    debug!("Monthly phrasing: {} installments, day {}", count, day);
    Some(build_schedule(&dates, InstallmentAmount::Known(amount)))
}

/// Run every catalogue entry and accumulate results.
///
/// With `dedupe`, a record whose sequence number was already collected is
/// skipped; unnumbered records are always kept.
pub fn run_catalogue(text: &str, dedupe: bool) -> Vec<Installment> {
    let mut collected: Vec<Installment> = Vec::new();

    for matcher in CATALOGUE {
        let Some(found) = (matcher.run)(text) else {
            continue;
        };
        debug!("Catalogue entry '{}' matched {} record(s)", matcher.name, found.len());

        for installment in found {
            let duplicate = dedupe
                && installment.sequence_number.is_some()
                && collected
                    .iter()
                    .any(|c| c.sequence_number == installment.sequence_number);
            if duplicate {
                debug!(
                    "Skipping duplicate installment {:?} from '{}'",
                    installment.sequence_number, matcher.name
                );
                continue;
            }
            collected.push(installment);
        }
    }

    // Numbered records in order, unnumbered ones after them
    collected.sort_by_key(|i| i.sequence_number.unwrap_or(u32::MAX));
    collected
}
