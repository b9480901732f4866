use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Face value of an installment as stated (or not) in the description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InstallmentAmount {
    Known(Decimal),
    /// "Parcela única" with no stated value
    Single,
    /// Installment named with a due date but no value
    NotSpecified,
}

impl InstallmentAmount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            InstallmentAmount::Known(v) => Some(*v),
            InstallmentAmount::Single | InstallmentAmount::NotSpecified => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallmentAmount::Known(_) => "Valor",
            InstallmentAmount::Single => "Única",
            InstallmentAmount::NotSpecified => "Não especificado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Paid => "Pago",
        }
    }
}

/// One scheduled payment (parcela) extracted from a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub sequence_number: Option<u32>,
    pub gross_amount: InstallmentAmount,
    pub fee_amount: Option<Decimal>,
    pub additional_fee_amounts: Vec<Decimal>,
    pub net_amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
}

impl Installment {
    /// Pending installment with a gross amount and due date only
    pub fn scheduled(
        sequence_number: Option<u32>,
        gross_amount: InstallmentAmount,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            sequence_number,
            gross_amount,
            fee_amount: None,
            additional_fee_amounts: Vec::new(),
            net_amount: None,
            due_date,
            payment_status: PaymentStatus::Pending,
            payment_date: None,
        }
    }

    /// Primary plus additional fees; `None` when no fee was stated or the sum overflows
    pub fn total_fees(&self) -> Option<Decimal> {
        let fee = self.fee_amount?;
        self.additional_fee_amounts
            .iter()
            .try_fold(fee, |acc, extra| acc.checked_add(*extra))
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// Result of parsing one description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "installments", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// At least one installment was recognized
    Parsed(Vec<Installment>),
    /// No matcher recognized the phrasing
    NotRecognized,
}

impl ParseOutcome {
    pub(crate) fn from_installments(installments: Vec<Installment>) -> Self {
        if installments.is_empty() {
            ParseOutcome::NotRecognized
        } else {
            ParseOutcome::Parsed(installments)
        }
    }

    pub fn installments(&self) -> &[Installment] {
        match self {
            ParseOutcome::Parsed(list) => list,
            ParseOutcome::NotRecognized => &[],
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    /// Sum of all known gross amounts, `None` on overflow
    pub fn checked_total_gross(&self) -> Option<Decimal> {
        self.installments()
            .iter()
            .filter_map(|i| i.gross_amount.value())
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
    }

    /// Sum of all known gross amounts for display, saturating at the Decimal range
    pub fn total_gross(&self) -> Decimal {
        self.installments()
            .iter()
            .filter_map(|i| i.gross_amount.value())
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
    }
}

/// Parse an ordinal such as the "3" in "3ª parcela"; installments are numbered from 1
pub(crate) fn parse_sequence_number(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_fees_includes_additional() {
        let mut inst = Installment::scheduled(Some(1), InstallmentAmount::Known(dec!(1000)), None);
        assert_eq!(inst.total_fees(), None);

        inst.fee_amount = Some(dec!(300));
        inst.additional_fee_amounts = vec![dec!(50), dec!(25.50)];
        assert_eq!(inst.total_fees(), Some(dec!(375.50)));
    }

    #[test]
    fn test_outcome_total_skips_sentinels() {
        let outcome = ParseOutcome::Parsed(vec![
            Installment::scheduled(Some(1), InstallmentAmount::Known(dec!(500)), None),
            Installment::scheduled(Some(2), InstallmentAmount::NotSpecified, None),
            Installment::scheduled(None, InstallmentAmount::Single, None),
        ]);
        assert_eq!(outcome.total_gross(), dec!(500));
        assert!(ParseOutcome::from_installments(Vec::new()) == ParseOutcome::NotRecognized);
    }

    #[test]
    fn test_total_fees_overflow_is_none() {
        let mut inst = Installment::scheduled(Some(1), InstallmentAmount::Known(dec!(1)), None);
        inst.fee_amount = Some(Decimal::MAX);
        inst.additional_fee_amounts = vec![Decimal::MAX];
        assert_eq!(inst.total_fees(), None);
    }

    #[test]
    fn test_total_gross_overflow() {
        let outcome = ParseOutcome::Parsed(vec![
            Installment::scheduled(Some(1), InstallmentAmount::Known(Decimal::MAX), None),
            Installment::scheduled(Some(2), InstallmentAmount::Known(Decimal::MAX), None),
        ]);
        assert_eq!(outcome.checked_total_gross(), None);
        assert_eq!(outcome.total_gross(), Decimal::MAX);
    }

    #[test]
    fn test_sequence_numbers_start_at_one() {
        assert_eq!(parse_sequence_number("3"), Some(3));
        assert_eq!(parse_sequence_number("0"), None);
        assert_eq!(parse_sequence_number("99999999999"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentStatus::Paid.as_str(), "Pago");
        assert_eq!(InstallmentAmount::Single.label(), "Única");
    }
}
