// Schedule generator for recurring installments ("6 parcelas de R$ X a partir de D")

use chrono::{Datelike, Months, NaiveDate};

use super::model::{Installment, InstallmentAmount};

/// Upper bound on synthesized installments; larger counts are treated as typos.
pub const MAX_SCHEDULED_INSTALLMENTS: u32 = 600;

/// Due dates advancing one calendar month at a time from `first`.
///
/// Day-of-month is kept where possible and clamped to the last day of shorter
/// months (31/01 → 28/02 → 31/03). Returns `None` for an empty or oversized
/// schedule, or when the calendar overflows.
pub fn monthly_dates(first: NaiveDate, count: u32) -> Option<Vec<NaiveDate>> {
    if count == 0 || count > MAX_SCHEDULED_INSTALLMENTS {
        return None;
    }
    (0..count)
        .map(|i| first.checked_add_months(Months::new(i)))
        .collect()
}

/// First due date as given, later ones on `day` of each following month.
///
/// `day` is capped at 28 so every month has it.
pub fn monthly_dates_on_day(first: NaiveDate, count: u32, day: u32) -> Option<Vec<NaiveDate>> {
    if count == 0 || count > MAX_SCHEDULED_INSTALLMENTS || day == 0 {
        return None;
    }
    let day = day.min(28);
    let month_start = first.with_day(1)?;

    let mut dates = Vec::with_capacity(count as usize);
    dates.push(first);
    for i in 1..count {
        let month = month_start.checked_add_months(Months::new(i))?;
        dates.push(month.with_day(day)?);
    }
    Some(dates)
}

/// Pending installments numbered from 1, one per due date, all with `amount`.
pub fn build_schedule(dates: &[NaiveDate], amount: InstallmentAmount) -> Vec<Installment> {
    dates
        .iter()
        .zip(1u32..)
        .map(|(date, n)| Installment::scheduled(Some(n), amount, Some(*date)))
        .collect()
}
