//! Prices
//!
//! Product prices arrive as display strings (`"$89.99"`, `"₹1,234.56"`, `"49.99"`). Totals are kept
//! in integer minor units so cart arithmetic stays exact.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

/// Errors raised while converting prices to money.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price does not fit in minor units.
    #[error("price {0} does not fit in minor units")]
    Overflow(String),

    /// The currency code is not one the client supports.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Parses a display price into a decimal amount.
///
/// Every character that is not an ASCII digit or `.` is discarded before parsing, which removes
/// currency symbols and thousands separators. Anything that still fails to parse is zero.
pub fn parse_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Parses a display price into minor units (hundredths).
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] when the parsed amount cannot be represented as `i64` minor
/// units.
pub fn price_minor_units(raw: &str) -> Result<i64, PriceError> {
    parse_price(raw)
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::Overflow(raw.to_string()))
}

/// Resolves an ISO currency code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes outside the supported set.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(iso::INR),
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        _ => Err(PriceError::UnknownCurrency(code.to_string())),
    }
}
