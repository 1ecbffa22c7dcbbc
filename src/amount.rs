//! Parsing of money amounts stored as text.
//!
//! Receipt totals and line item values arrive as strings that may or may not include a dollar
//! sign and thousands separators, e.g. `"53.95"`, `"$53.95"` or `"$1,234.50"`. All arithmetic on
//! these amounts is done on [Decimal] so that sums never lose cents to floating point rounding.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::Error;

/// Parse `text` as a decimal money amount.
///
/// Surrounding whitespace, a leading dollar sign (after an optional minus sign) and commas are
/// ignored.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is empty or is not a decimal number once the dollar
/// sign and commas have been removed.
pub fn parse_amount(text: &str) -> Result<Decimal, Error> {
    let trimmed = text.trim();

    let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
        match after_minus.strip_prefix('$') {
            Some(after_dollar) => format!("-{after_dollar}"),
            None => trimmed.to_owned(),
        }
    } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
        after_dollar.to_owned()
    } else {
        trimmed.to_owned()
    };

    let without_commas = without_dollar.replace(',', "");

    Decimal::from_str(&without_commas).map_err(|_| Error::InvalidAmount(text.to_owned()))
}

/// Parse `text` as an amount that must not be negative, such as a receipt total.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` cannot be parsed or is negative.
pub fn parse_non_negative_amount(text: &str) -> Result<Decimal, Error> {
    let amount = parse_amount(text)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::InvalidAmount(text.to_owned()));
    }

    Ok(amount)
}

/// Add `amount` to `total`, clamping at the largest [Decimal] instead of overflowing.
///
/// Overflow is logged as a warning.
pub(crate) fn add_saturating(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!("Adding {amount} to {total} overflowed, clamping the sum");
        total.saturating_add(amount)
    })
}
