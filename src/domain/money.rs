use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Money is held as an exact decimal so sub-cent amounts survive and sums do not drift.
/// Rounding to cents happens only when an amount is displayed.
pub type Amount = Decimal;

/// Powers of ten beyond this cannot produce a representable non-zero amount.
const MAX_EXPONENT: i32 = 60;

/// Format an amount to two decimal places without currency symbol, rounding half away from zero.
/// Example: 15 -> "15.00", 0.125 -> "0.13", -12.3 -> "-12.30"
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a real number written in plain or exponent notation.
/// Example: "15.00", "12.5", ".5", "7.", "-3", "1e3", "2.5E-2"
///
/// Anything else ("inf", "nan", "1,000", "1_000") is an invalid format. Values too
/// large, or non-zero values too small, for a 28-digit decimal are out of range.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (units_str, decimal_str) = match mantissa.split_once('.') {
        Some((units, decimal)) => (units, decimal),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if !all_digits(units_str) || !all_digits(decimal_str) {
        return Err(ParseAmountError::InvalidFormat);
    }

    let exponent = match exponent {
        None => 0,
        Some(exp) => parse_exponent(exp)?,
    };

    let units_str = if units_str.is_empty() { "0" } else { units_str };
    let canonical = if decimal_str.is_empty() {
        units_str.to_string()
    } else {
        format!("{}.{}", units_str, decimal_str)
    };
    let mut value = Decimal::from_str(&canonical).map_err(|_| ParseAmountError::OutOfRange)?;

    if !value.is_zero() {
        if exponent.abs() > MAX_EXPONENT {
            return Err(ParseAmountError::OutOfRange);
        }
        for _ in 0..exponent.max(0) {
            value = value
                .checked_mul(Decimal::TEN)
                .ok_or(ParseAmountError::OutOfRange)?;
        }
        for _ in 0..(-exponent).max(0) {
            value = value
                .checked_div(Decimal::TEN)
                .ok_or(ParseAmountError::OutOfRange)?;
        }
        if value.is_zero() {
            return Err(ParseAmountError::OutOfRange);
        }
    }

    Ok(if negative { -value } else { value })
}

fn parse_exponent(exp: &str) -> Result<i32, ParseAmountError> {
    let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFormat);
    }
    // Too many digits to fit i32 is certainly beyond MAX_EXPONENT.
    let magnitude: i32 = digits.parse().unwrap_or(i32::MAX);
    Ok(if exp.starts_with('-') { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::OutOfRange => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
