//! Money parsing and rounding helpers shared across the workspace.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse a raw amount string with lenient coercion.
///
/// Tries a direct decimal parse first, then retries with every character
/// that is not a digit, sign, or decimal point stripped. Returns zero when
/// nothing numeric remains. Never fails.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    if let Ok(amount) = Decimal::from_str(trimmed) {
        return amount;
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    Decimal::from_str(&stripped).unwrap_or(Decimal::ZERO)
}

/// Round a money amount to two decimal places, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a Decimal as a normalized string.
pub fn format_money(amount: &Decimal) -> String {
    let s = amount.to_string();
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
