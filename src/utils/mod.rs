//! Brazilian display formatting for amounts and dates
//!
//! All formatting is stateless: separators are applied explicitly instead of
//! relying on a process-wide locale.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Date format used throughout agreement descriptions (DD/MM/AAAA)
pub const BR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "R$ " prefix (Brazilian Real)
    BRL,
    /// No currency symbol (for table cells)
    None,
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value using Brazilian conventions:
/// - Thousands separator: `.` (period)
/// - Decimal separator: `,` (comma)
///
/// # Examples
/// ```
/// use acordos::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::BRL),
///     "R$ 1.234,56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 15, CurrencySymbol::None),
///     "       1.234,00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::BRL => "R$ ",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{},{}", prefix, sign, grouped, decimal_part);

    if width > 0 && result.chars().count() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format as Brazilian Real with symbol: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use acordos::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
/// assert_eq!(format_currency(dec!(-500)), "R$ -500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::BRL)
}

/// Format as Brazilian Real, right-aligned to specified width.
pub fn format_currency_aligned(value: Decimal, width: usize) -> String {
    format_currency_with_width(value, width, CurrencySymbol::BRL)
}

/// Format number only (no symbol): "1.234,56"
pub fn format_decimal_br(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::None)
}

/// Format a date as DD/MM/AAAA
pub fn format_date_br(date: NaiveDate) -> String {
    date.format(BR_DATE_FORMAT).to_string()
}

/// Format an optional date, empty when absent
pub fn format_optional_date_br(date: Option<NaiveDate>) -> String {
    date.map(format_date_br).unwrap_or_default()
}

/// Parse a DD/MM/AAAA date; invalid calendar dates (31/02) yield `None`
pub fn parse_date_br(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), BR_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_installment_figures() {
        // Gross, fee and net of a typical "R$ 3.000,00 - R$ 900,00 = R$ 2.100,00" line
        assert_eq!(format_currency(dec!(3000)), "R$ 3.000,00");
        assert_eq!(format_currency(dec!(900)), "R$ 900,00");
        assert_eq!(format_currency(dec!(2100)), "R$ 2.100,00");
        assert_eq!(format_currency(dec!(1950.00)), "R$ 1.950,00");
    }

    #[test]
    fn test_normalizer_inputs_format_back() {
        // Tokens accepted by the amount normalizer render in their canonical form
        assert_eq!(format_currency(dec!(0.01)), "R$ 0,01");
        assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_currency(dec!(1500.50)), "R$ 1.500,50");
        assert_eq!(format_currency(dec!(0)), "R$ 0,00");
    }

    #[test]
    fn test_formatted_amounts_normalize_back() {
        for token in ["R$ 0,01", "R$ 2.100,00", "R$ 1.234,56", "R$ 79.000,00"] {
            let value = crate::currency::normalize_amount(token);
            assert_eq!(format_currency(value), token);
        }
    }

    #[test]
    fn test_batch_totals() {
        assert_eq!(format_currency(dec!(10000)), "R$ 10.000,00");
        assert_eq!(format_currency(dec!(1250000.75)), "R$ 1.250.000,75");
    }

    #[test]
    fn test_negative_difference() {
        // Agreement minus transferred when the client received more than agreed
        assert_eq!(format_currency(dec!(-300)), "R$ -300,00");
        assert_eq!(format_currency(dec!(-0.01)), "R$ -0,01");
    }

    #[test]
    fn test_rounds_fee_percentages_to_cents() {
        // 30% of R$ 1.234,55 and 1/3 of R$ 1.000,00
        assert_eq!(format_currency(dec!(370.365)), "R$ 370,37");
        assert_eq!(format_currency(dec!(333.3333)), "R$ 333,33");
    }

    #[test]
    fn test_format_with_width() {
        assert_eq!(format_currency_aligned(dec!(500), 15), "      R$ 500,00");
        assert_eq!(format_currency_aligned(dec!(1000000), 5), "R$ 1.000.000,00");
        assert_eq!(format_decimal_br(dec!(2100)), "2.100,00");
    }

    #[test]
    fn test_due_dates() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_date_br(due), "05/03/2025");
        assert_eq!(parse_date_br("05/03/2025"), Some(due));
        assert_eq!(parse_date_br("31/02/2025"), None);
        assert_eq!(parse_date_br("10/13/2025"), None);
        assert_eq!(format_optional_date_br(None), "");
    }
}
