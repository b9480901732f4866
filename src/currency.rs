//! Currency string normalization
//!
//! Spreadsheet and free-text amounts arrive in mixed conventions:
//! Brazilian (`1.234,56`), plain decimal (`1500.00`) and bare thousands
//! (`2.100` meaning 2100). Everything funnels through [`normalize_amount`],
//! which never fails: dirty input becomes zero and is caught later by the
//! reconciliation check.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Normalize a currency token, returning `None` when it cannot be read.
///
/// # Examples
/// ```
/// use acordos::currency::try_normalize_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(try_normalize_amount("R$ 1.234,56"), Some(dec!(1234.56)));
/// assert_eq!(try_normalize_amount("a combinar"), None);
/// ```
pub fn try_normalize_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let s = s.strip_prefix("R$").unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }

    let normalized = if s.contains(',') {
        // Brazilian format: "1.234,56" - dot is thousands, comma is decimal
        s.replace('.', "").replace(',', ".")
    } else if let Some((_, last)) = s.rsplit_once('.') {
        // "2.100" is an integer with a thousands separator, "1500.00" is decimal
        if last.len() == 3 {
            s.replace('.', "")
        } else {
            s.to_string()
        }
    } else {
        s.to_string()
    };

    Decimal::from_str(&normalized).ok()
}

/// Normalize a currency token, yielding zero for anything unreadable.
///
/// # Examples
/// ```
/// use acordos::currency::normalize_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(normalize_amount("2.100"), dec!(2100));
/// assert_eq!(normalize_amount(""), dec!(0));
/// ```
pub fn normalize_amount(raw: &str) -> Decimal {
    try_normalize_amount(raw).unwrap_or(Decimal::ZERO)
}
