//! Decimal helpers for quoted amounts
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Every converted amount goes through [`quote_amount`]: division by the
//! rate, scale 2, HALF_UP.

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale of every quoted (converted) amount
pub const QUOTE_DP: u32 = 2;

/// Convert `from_amount` at `rate`: `from_amount / rate`, 2 dp, HALF_UP.
///
/// The rounding decision is taken on the exact remainder, not on the
/// 28-digit quotient, so a quotient just below a half cent never rounds up.
///
/// Returns `None` when the rate is not positive or the arithmetic overflows.
/// The result always carries exactly [`QUOTE_DP`] decimal places.
pub fn quote_amount(from_amount: Decimal, rate: Decimal) -> Option<Decimal> {
    if rate <= Decimal::ZERO {
        return None;
    }
    let amount = from_amount.abs();
    let cent = Decimal::new(1, QUOTE_DP);
    // `amount` units worth one cent of the quote
    let step = rate.checked_mul(cent)?;

    let mut quoted = amount
        .checked_div(rate)?
        .round_dp_with_strategy(QUOTE_DP, RoundingStrategy::ToZero);
    let mut remainder = amount.checked_sub(quoted.checked_mul(rate)?)?;

    // The rounded quotient can land one cent either side of the true truncation
    if remainder < Decimal::ZERO {
        quoted = quoted.checked_sub(cent)?;
        remainder = remainder.checked_add(step)?;
    } else if remainder >= step {
        quoted = quoted.checked_add(cent)?;
        remainder = remainder.checked_sub(step)?;
    }

    // Half up: remainder covers at least half of one cent
    if remainder >= step.checked_sub(remainder)? {
        quoted = quoted.checked_add(cent)?;
    }
    if from_amount < Decimal::ZERO {
        quoted = -quoted;
    }
    quoted.rescale(QUOTE_DP);
    Some(quoted)
}
