use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits every ledger amount is normalized to.
pub const AMOUNT_SCALE: u32 = 2;

/// Normalize an amount to exactly 2 fractional digits.
///
/// Ties on the third decimal round toward zero (half-down), so 10.005
/// becomes 10.00 and -10.005 becomes -10.00. This rounding mode is a
/// behavioral contract of the ledger, not an implementation detail.
pub fn scale_amount(amount: Decimal) -> Decimal {
    let mut scaled = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointTowardZero);
    scaled.rescale(AMOUNT_SCALE);
    scaled
}

/// A zero amount with the ledger's 2-digit scale, so it renders as "0.00".
pub fn zero_amount() -> Decimal {
    scale_amount(Decimal::ZERO)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "10.005" -> 10.005 (unscaled)
pub fn parse_amount(input: &str) -> Result<Decimal, ParseAmountError> {
    input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
