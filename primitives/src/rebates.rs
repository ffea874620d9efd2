//! Exponential rebate curve for query-fee redistribution.
//!
//! Approximates a Cobb-Douglas split between fees burnt and fees rebated to
//! the service provider. The accumulated rebate for an allocation is a pure
//! function of its lifetime collected fees and its allocated tokens:
//!
//! `rebates(fees, stake) = fees - fees * alpha * e^(-lambda * stake / fees)`
//!
//! With `alpha <= 1` the curve is monotonically increasing in `fees` with
//! slope at most 1, so collecting in many small steps accumulates exactly the
//! same rebate as one large collection under fixed parameters.

use crate::ecosystem::params::FIXED_POINT_SCALE;
use crate::fixed_math::{exp_fixed, mul_div, mul_fixed};

/// Exponents beyond this make `e^(-x)` indistinguishable from zero at the
/// global scale; the whole fee amount is rebated.
const MAX_EXPONENT: u128 = 40 * FIXED_POINT_SCALE;

/// Accumulated rebates for an allocation with `stake` allocated tokens and
/// `fees` lifetime collected fees.
///
/// Returns `None` only on malformed ratios (zero denominators) or arithmetic
/// overflow; the result is always `<= fees` (value conservation).
pub fn exponential_rebates(
  fees: u128,
  stake: u128,
  alpha_numerator: u32,
  alpha_denominator: u32,
  lambda_numerator: u32,
  lambda_denominator: u32,
) -> Option<u128> {
  if alpha_denominator == 0 || lambda_denominator == 0 {
    return None;
  }
  // Zero alpha weights purely by fee share: everything is rebated.
  if alpha_numerator == 0 {
    return Some(fees);
  }
  if fees == 0 {
    return Some(0);
  }

  let lambda_fixed = mul_div(
    FIXED_POINT_SCALE,
    lambda_numerator as u128,
    lambda_denominator as u128,
  )?;

  // exponent = lambda * stake / fees; an overflow here means the exponent is
  // astronomically large, so the exponential term vanishes either way.
  let exponent = match mul_div(lambda_fixed, stake, fees) {
    Some(x) if x <= MAX_EXPONENT => x,
    _ => return Some(fees),
  };

  let exp_x = exp_fixed(exponent)?;
  let alpha_fixed = mul_div(
    FIXED_POINT_SCALE,
    alpha_numerator as u128,
    alpha_denominator as u128,
  )?;

  // unrebated = fees * alpha / e^exponent
  let alpha_fees = mul_fixed(fees, alpha_fixed)?;
  let unrebated = mul_div(alpha_fees, FIXED_POINT_SCALE, exp_x)?;

  Some(fees.saturating_sub(unrebated))
}
