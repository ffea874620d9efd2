//! Deterministic fixed-point arithmetic over `u128`.
//!
//! Every operation uses the single global `FIXED_POINT_SCALE` and rounds
//! down, so repeated multiplication can only lose value, never create it.
//! Both the issuance engine (rate^blocks by squaring) and the rebate engine
//! (e^x for the exponential rebate curve) are built from these helpers.

use crate::ecosystem::params::FIXED_POINT_SCALE;
use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};

/// Euler's number scaled by `FIXED_POINT_SCALE`.
pub const E_FIXED: u128 = 2_718_281_828_459_045_235;

/// Taylor terms used for the fractional part of `exp_fixed`.
/// 1/20! is far below one part in 10^18, so the truncation error is
/// swallowed by the rounding of the scale itself.
const EXP_TAYLOR_TERMS: u128 = 20;

/// `a * b / denominator` with a 256-bit intermediate, rounding down.
///
/// Returns `None` if the result overflows `u128` or the denominator is zero.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
  multiply_by_rational_with_rounding(a, b, denominator, Rounding::Down)
}

/// Multiply two scale-denominated fixed-point numbers.
pub fn mul_fixed(a: u128, b: u128) -> Option<u128> {
  mul_div(a, b, FIXED_POINT_SCALE)
}

/// `base^exp` where `base` is scale-denominated, by squaring.
///
/// Every intermediate multiplication stays on the shared scale, so rounding
/// is always downward and bounded by one unit per multiplication.
pub fn pow_fixed(base: u128, mut exp: u64) -> Option<u128> {
  let mut result = FIXED_POINT_SCALE;
  let mut base = base;
  while exp > 0 {
    if exp & 1 == 1 {
      result = mul_fixed(result, base)?;
    }
    exp >>= 1;
    if exp > 0 {
      base = mul_fixed(base, base)?;
    }
  }
  Some(result)
}

/// `e^x` for a scale-denominated `x >= 0`.
///
/// The integer part is raised by squaring from `E_FIXED`; the fractional part
/// (strictly below 1) uses a truncated Taylor series, which converges after a
/// handful of terms at this scale.
pub fn exp_fixed(x: u128) -> Option<u128> {
  let whole = x / FIXED_POINT_SCALE;
  let frac = x % FIXED_POINT_SCALE;

  let int_part = pow_fixed(E_FIXED, u64::try_from(whole).ok()?)?;

  let mut term = FIXED_POINT_SCALE;
  let mut sum = FIXED_POINT_SCALE;
  for k in 1..=EXP_TAYLOR_TERMS {
    term = mul_div(term, frac, k.checked_mul(FIXED_POINT_SCALE)?)?;
    if term == 0 {
      break;
    }
    sum = sum.checked_add(term)?;
  }

  mul_fixed(int_part, sum)
}
