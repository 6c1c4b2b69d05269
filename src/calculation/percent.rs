//! Formatting helpers shared by the statement builders.
//!
//! Percentages guard against a zero denominator and report a neutral "0%"
//! instead of failing; euro amounts are grouped with a dot separator and
//! carry the sign before the currency mark.

use rust_decimal::Decimal;

/// Formats `value / denominator` as a percentage with one decimal.
///
/// Returns `"0%"` when the denominator is zero.
///
/// # Example
///
/// ```
/// use plan_engine::calculation::format_percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_percent(Decimal::from(25), Decimal::from(200)), "12.5%");
/// assert_eq!(format_percent(Decimal::from(25), Decimal::ZERO), "0%");
/// ```
pub fn format_percent(value: Decimal, denominator: Decimal) -> String {
    if denominator.is_zero() {
        return "0%".to_string();
    }
    let ratio = value / denominator * Decimal::from(100);
    format!("{:.1}%", ratio)
}

/// Formats a monetary amount as a euro string with dot-grouped thousands.
///
/// # Example
///
/// ```
/// use plan_engine::calculation::format_euro;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_euro(Decimal::from(1234567)), "€ 1.234.567");
/// assert_eq!(format_euro(Decimal::from(-950)), "-€ 950");
/// ```
pub fn format_euro(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().normalize().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-€ {}", grouped)
    } else {
        format!("€ {}", grouped)
    }
}
