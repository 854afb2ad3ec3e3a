//! Monetary amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are plain `rust_decimal::Decimal` values; this module owns the
//! report's rounding rule and its display format.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every reported amount is rounded to.
pub const AMOUNT_SCALE: u32 = 2;

/// Rounds an amount to [`AMOUNT_SCALE`] places, halves away from zero.
///
/// This matches SQL `ROUND`, not banker's rounding.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for metric cards and summary tables, e.g. `1,234,567.89`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_amount(amount);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// Formats a count with thousands separators, e.g. `12,345`.
#[must_use]
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
