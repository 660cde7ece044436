//! Conversion between decimal display amounts and contract base units
//!
//! The contract stores every amount as an integer scaled by 10^18. The UI
//! works with decimal strings in the token's display unit. Both directions are
//! done on integers so amounts above 2^53 keep every digit.
//!
//! # Rounding
//!
//! `parse_units` keeps the first 18 fractional digits and drops the rest, i.e.
//! it truncates toward zero. For the non-negative amounts accepted here that is
//! `floor(decimal * 10^18)`, matching what the contract receives when the user
//! types more precision than the token has.

use alloy_primitives::U256;

use crate::{FriendPayError, Result};

/// Number of fractional digits in one display unit
pub const DECIMALS: usize = 18;

/// 10^18: base units per display unit
pub const BASE_UNITS_PER_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Parse a decimal display amount into base units
///
/// Accepts `"12"`, `"0.5"`, `".5"` and `"5."`. Surrounding whitespace is
/// ignored. Signs, exponents and thousands separators are rejected.
///
/// # Example
///
/// ```
/// use friend_pay::units::parse_units;
/// use alloy_primitives::U256;
///
/// let wei = parse_units("0.5").unwrap();
/// assert_eq!(wei, U256::from(500_000_000_000_000_000u64));
/// ```
pub fn parse_units(decimal: &str) -> Result<U256> {
    let trimmed = decimal.trim();
    if trimmed.is_empty() {
        return Err(FriendPayError::InvalidAmount("amount is empty".to_string()));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(FriendPayError::InvalidAmount(format!(
            "'{}' has no digits",
            decimal
        )));
    }

    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(FriendPayError::InvalidAmount(format!(
            "'{}' is not a non-negative decimal number",
            decimal
        )));
    }

    let overflow = || FriendPayError::InvalidAmount(format!("'{}' is too large", decimal));

    let whole = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| overflow())?
    };

    // Digits past the 18th are dropped: truncation toward zero.
    let kept = &frac_part[..frac_part.len().min(DECIMALS)];
    if kept.len() < frac_part.len() {
        log::debug!(
            "✂️  Truncating '{}' to {} fractional digits",
            decimal,
            DECIMALS
        );
    }
    let mut padded = kept.to_string();
    padded.extend(std::iter::repeat('0').take(DECIMALS - kept.len()));
    let fraction = U256::from_str_radix(&padded, 10).map_err(|_| overflow())?;

    whole
        .checked_mul(BASE_UNITS_PER_TOKEN)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Format base units as an exact decimal string
///
/// Trailing fractional zeros are removed, so `10^18` formats as `"1"` and
/// `5 * 10^17` as `"0.5"`.
pub fn format_units(amount: U256) -> String {
    let whole = amount / BASE_UNITS_PER_TOKEN;
    let fraction = (amount % BASE_UNITS_PER_TOKEN).as_limbs()[0];

    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fraction, width = DECIMALS);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Format base units for display with a fixed number of decimal places
///
/// Extra digits are truncated, never rounded up, so a displayed total never
/// exceeds what the contract holds. `places` is capped at 18.
pub fn format_display(amount: U256, places: usize) -> String {
    let places = places.min(DECIMALS);
    let whole = amount / BASE_UNITS_PER_TOKEN;

    if places == 0 {
        return whole.to_string();
    }

    let fraction = (amount % BASE_UNITS_PER_TOKEN).as_limbs()[0];
    let digits = format!("{:0width$}", fraction, width = DECIMALS);
    format!("{}.{}", whole, &digits[..places])
}
