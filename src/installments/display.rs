// One-line human-readable installment summaries

use rust_decimal::Decimal;

use super::model::{Installment, InstallmentAmount};
use crate::utils::{format_currency, format_date_br};

fn amount_or_na(value: Option<Decimal>) -> String {
    value.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

/// Display text for a gross amount, including the sentinels
pub fn format_gross(amount: &InstallmentAmount) -> String {
    match amount {
        InstallmentAmount::Known(v) => format_currency(*v),
        other => other.label().to_string(),
    }
}

/// Format an installment on one line.
///
/// # Examples
/// ```
/// use acordos::installments::{analyze_installments, format_installment};
///
/// let outcome = analyze_installments("1ª parcela R$ 1.000,00 - R$ 300,00 até 10/01/2025");
/// assert_eq!(
///     format_installment(&outcome.installments()[0]),
///     "1ª parcela: R$ 1.000,00 - R$ 300,00 (honorários) = R$ 700,00 até 10/01/2025"
/// );
/// ```
pub fn format_installment(installment: &Installment) -> String {
    let label = match installment.sequence_number {
        Some(n) => format!("{}ª parcela", n),
        None => "Parcela".to_string(),
    };

    let mut text = format!("{}: {}", label, format_gross(&installment.gross_amount));

    if let Some(fee) = installment.fee_amount {
        text.push_str(&format!(" - {} (honorários)", format_currency(fee)));
    }
    for extra in &installment.additional_fee_amounts {
        text.push_str(&format!(" - {} (honorários adicionais)", format_currency(*extra)));
    }

    text.push_str(&format!(" = {}", amount_or_na(installment.net_amount)));

    if let Some(due) = installment.due_date {
        text.push_str(&format!(" até {}", format_date_br(due)));
    }

    if installment.is_paid() {
        text.push_str(&format!(" - {}", installment.payment_status.as_str()));
        if let Some(paid_on) = installment.payment_date {
            text.push_str(&format!(" em {}", format_date_br(paid_on)));
        }
    }

    text
}
