// Line-oriented matcher: one installment per "parcela" line
//
// Handles the per-installment phrasing typed into most agreements, e.g.
// "1ª parcela, no valor de R$ 1.000,00 - R$ 300,00 = R$ 700,00, até 10/01/2025 - pago em 12/01/2025"

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::model::{parse_sequence_number, Installment, InstallmentAmount, PaymentStatus};
use crate::currency::normalize_amount;
use crate::utils::parse_date_br;

static SEQUENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[ªº°]?\s*parcela").expect("valid sequence regex"));

static DUE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)at[ée]\s*(?:o\s+dia\s+|dia\s+)?(\d{2}/\d{2}/\d{4})").expect("valid due date regex")
});

// "reliazado" is a recurring typo in the source spreadsheets
static PAID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:realizado|reliazado|pago|efetuado|pix)\s*(?:em)?\s*(\d{2}/\d{2}/\d{4})")
        .expect("valid payment regex")
});

// Trailing punctuation is never part of the amount
static MONEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"R\$\s*([\d.,]*\d)").expect("valid money regex"));

static NET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"=\s*R\$\s*([\d.,]*\d)").expect("valid net regex"));

/// Extract everything recognizable from a single line.
///
/// Fields that cannot be found stay `None`; the caller decides whether the
/// line carries enough to count as an installment.
pub fn extract_line(line: &str) -> Installment {
    let sequence_number = SEQUENCE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_sequence_number(m.as_str()));

    let due_date = DUE_DATE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_date_br(m.as_str()));

    let (payment_status, payment_date) = match PAID_RE.captures(line) {
        Some(caps) => (
            PaymentStatus::Paid,
            caps.get(1).and_then(|m| parse_date_br(m.as_str())),
        ),
        None => (PaymentStatus::Pending, None),
    };

    let amounts: Vec<Decimal> = MONEY_RE
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| normalize_amount(m.as_str()))
        .collect();

    let mut installment = Installment {
        sequence_number,
        gross_amount: InstallmentAmount::NotSpecified,
        fee_amount: None,
        additional_fee_amounts: Vec::new(),
        net_amount: None,
        due_date,
        payment_status,
        payment_date,
    };

    let Some((&gross, others)) = amounts.split_first() else {
        return installment;
    };
    installment.gross_amount = InstallmentAmount::Known(gross);

    let stated_net = NET_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| normalize_amount(m.as_str()));
    installment.net_amount = stated_net;

    // A repeated net figure is not a fee
    let mut fees = others.iter().copied().filter(|v| stated_net != Some(*v));

    installment.fee_amount = fees.next();
    installment.additional_fee_amounts = fees.collect();

    // Skipped when the fee sum or the difference leaves the Decimal range
    if installment.net_amount.is_none() {
        installment.net_amount = installment
            .total_fees()
            .and_then(|total_fees| gross.checked_sub(total_fees));
    }

    installment
}

/// Matcher: every line mentioning "parcela" with a sequence number and a due date.
pub fn match_lines(text: &str) -> Option<Vec<Installment>> {
    let mut installments: Vec<Installment> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.to_lowercase().contains("parcela"))
        .filter_map(|line| {
            let installment = extract_line(line);
            if installment.sequence_number.is_some() && installment.due_date.is_some() {
                Some(installment)
            } else {
                debug!("Dropping line without sequence number or due date: {}", line);
                None
            }
        })
        .collect();

    if installments.is_empty() {
        return None;
    }

    installments.sort_by_key(|i| i.sequence_number);
    Some(installments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_simple_lines() {
        let text = "1ª parcela, no valor de R$500,00, até 10/01/2025\n2ª parcela, no valor de R$500,00, até 10/02/2025";
        let result = match_lines(text).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].sequence_number, Some(1));
        assert_eq!(result[1].sequence_number, Some(2));
        assert_eq!(result[0].gross_amount, InstallmentAmount::Known(dec!(500.00)));
        assert_eq!(result[0].due_date, Some(date(2025, 1, 10)));
        assert_eq!(result[1].due_date, Some(date(2025, 2, 10)));
        assert!(result.iter().all(|i| i.payment_status == PaymentStatus::Pending));
        assert!(result.iter().all(|i| i.fee_amount.is_none() && i.net_amount.is_none()));
    }

    #[test]
    fn test_paid_with_date() {
        let inst = extract_line("1ª parcela de R$ 800,00 até 10/01/2025, pago em 15/01/2025");
        assert_eq!(inst.payment_status, PaymentStatus::Paid);
        assert_eq!(inst.payment_date, Some(date(2025, 1, 15)));
    }

    #[test]
    fn test_paid_with_invalid_date_keeps_status() {
        let inst = extract_line("1ª parcela até 10/01/2025 - pix 31/02/2025");
        assert_eq!(inst.payment_status, PaymentStatus::Paid);
        assert_eq!(inst.payment_date, None);
    }

    #[test]
    fn test_typo_realizado() {
        let inst = extract_line("3ª parcela até o dia 05/05/2025 reliazado em 04/05/2025");
        assert_eq!(inst.payment_status, PaymentStatus::Paid);
        assert_eq!(inst.payment_date, Some(date(2025, 5, 4)));
        assert_eq!(inst.due_date, Some(date(2025, 5, 5)));
    }

    #[test]
    fn test_net_derived_from_single_fee() {
        let inst = extract_line("1ª parcela R$ 1.000,00 - R$ 300,00 até 10/01/2025");
        assert_eq!(inst.gross_amount, InstallmentAmount::Known(dec!(1000)));
        assert_eq!(inst.fee_amount, Some(dec!(300)));
        assert_eq!(inst.net_amount, Some(dec!(700.00)));
    }

    #[test]
    fn test_stated_net_wins_and_is_not_a_fee() {
        let inst = extract_line(
            "1ª parcela R$ 1.000,00 - R$ 300,00 (honorários) = R$ 650,00 até 10/01/2025",
        );
        assert_eq!(inst.fee_amount, Some(dec!(300)));
        assert!(inst.additional_fee_amounts.is_empty());
        assert_eq!(inst.net_amount, Some(dec!(650)));
    }

    #[test]
    fn test_additional_fees() {
        let inst = extract_line(
            "2ª parcela R$ 2.000,00 - R$ 600,00 - R$ 100,00 - R$ 50,00 até dia 10/02/2025",
        );
        assert_eq!(inst.fee_amount, Some(dec!(600)));
        assert_eq!(inst.additional_fee_amounts, vec![dec!(100), dec!(50)]);
        assert_eq!(inst.net_amount, Some(dec!(1250)));
    }

    #[test]
    fn test_lines_missing_fields_are_dropped() {
        let text = "Parcela sem número até 10/01/2025\n2ª parcela sem data\n3ª parcela até 10/03/2025";
        let result = match_lines(text).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sequence_number, Some(3));
        assert_eq!(result[0].gross_amount, InstallmentAmount::NotSpecified);
    }

    #[test]
    fn test_sorted_by_sequence() {
        let text = "2ª PARCELA até 10/02/2025\n\n  1ª PARCELA até 10/01/2025  ";
        let result = match_lines(text).unwrap();
        assert_eq!(result[0].sequence_number, Some(1));
        assert_eq!(result[1].sequence_number, Some(2));
    }

    #[test]
    fn test_zero_ordinal_is_dropped() {
        assert!(match_lines("0ª parcela de R$ 100,00 até 10/01/2025").is_none());

        let text = "0ª parcela de R$ 100,00 até 10/01/2025\n1ª parcela de R$ 100,00 até 10/02/2025";
        let result = match_lines(text).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sequence_number, Some(1));
    }

    #[test]
    fn test_overflowing_fees_skip_net() {
        let inst = extract_line(
            "1ª parcela R$ 1,00 - R$ 79228162514264337593543950335 - R$ 79228162514264337593543950335 até 10/01/2025",
        );
        assert_eq!(inst.gross_amount, InstallmentAmount::Known(dec!(1)));
        assert_eq!(inst.fee_amount, Some(Decimal::MAX));
        assert_eq!(inst.additional_fee_amounts, vec![Decimal::MAX]);
        assert_eq!(inst.net_amount, None);
    }

    #[test]
    fn test_no_parcela_lines() {
        assert!(match_lines("pagamento a combinar").is_none());
        assert!(match_lines("").is_none());
    }
}
