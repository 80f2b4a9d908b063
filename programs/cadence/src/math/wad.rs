/// Fixed-point scaling between native token precision and the internal
/// 18-decimal (WAD) domain, plus full-precision multiply-divide primitives
/// on 256-bit intermediates. Every reserve mutation crosses this boundary
/// exactly twice: native to WAD at entry, WAD to native at exit.
use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

use crate::constants::WAD_DECIMALS;
use crate::error::CadenceError;

/// Rounding direction for division results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or_else(|| CadenceError::MathOverflow.into())
}

/// Scale a native-precision amount up (or down) to the WAD domain.
///
/// Precision below 18 decimals multiplies by `10^(18 - d)`; precision above
/// 18 decimals divides by `10^(d - 18)` with truncation. A pass-through
/// shortcut for `d >= 18` would silently misprice high-precision assets.
pub fn to_wad(amount: u64, decimals: u8) -> Result<u128> {
    let amount = amount as u128;
    if decimals <= WAD_DECIMALS {
        amount
            .checked_mul(pow10(WAD_DECIMALS - decimals)?)
            .ok_or_else(|| CadenceError::MathOverflow.into())
    } else {
        Ok(amount / pow10(decimals - WAD_DECIMALS)?)
    }
}

/// Scale a WAD amount back down to native precision.
///
/// `Rounding::Down` truncates in the user's disfavor on outputs;
/// `Rounding::Up` is used when charging inputs so the pool is never shorted.
pub fn from_wad(amount: u128, decimals: u8, rounding: Rounding) -> Result<u64> {
    let scaled = if decimals <= WAD_DECIMALS {
        let divisor = pow10(WAD_DECIMALS - decimals)?;
        let q = amount / divisor;
        if rounding == Rounding::Up && amount % divisor != 0 {
            q.checked_add(1)
                .ok_or::<anchor_lang::error::Error>(CadenceError::MathOverflow.into())?
        } else {
            q
        }
    } else {
        amount
            .checked_mul(pow10(decimals - WAD_DECIMALS)?)
            .ok_or::<anchor_lang::error::Error>(CadenceError::MathOverflow.into())?
    };
    u64::try_from(scaled).map_err(|_| CadenceError::AmountTooLarge.into())
}

/// Full-precision `a * b / denominator` through a 256-bit intermediate.
/// Overflow of the final 128-bit result is a hard error, never a wrap.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(CadenceError::DivisionByZero.into());
    }
    let numerator = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let mut quotient = numerator / denominator;
    if rounding == Rounding::Up && numerator % denominator != U256::from(0u128) {
        quotient += U256::from(1u128);
    }
    if quotient > U256::from(u128::MAX) {
        return Err(CadenceError::MathOverflow.into());
    }
    Ok(quotient.as_u128())
}

/// Floor square root of `a * b` without overflowing the 128-bit product.
/// Used to mint bootstrap LP shares as `isqrt(pt * virtual_quote)`.
pub fn sqrt_product(a: u128, b: u128) -> Result<u128> {
    match a.checked_mul(b) {
        Some(product) => Ok(product.integer_sqrt()),
        None => Ok(isqrt_u256(U256::from(a) * U256::from(b))),
    }
}

/// Newton's method floor square root over a 256-bit value. The result of a
/// product of two u128 factors always fits in u128.
fn isqrt_u256(value: U256) -> u128 {
    if value <= U256::from(1u128) {
        return value.as_u128();
    }
    // Initial guess: 2^ceil(bits/2) >= sqrt(value), so the iteration
    // decreases monotonically onto the floor root.
    let shift = (257 - value.leading_zeros()) / 2;
    let mut x = U256::from(1u128) << shift;
    loop {
        let y = (x + value / x) >> 1;
        if y >= x {
            break;
        }
        x = y;
    }
    x.as_u128()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;

    #[test]
    fn test_to_wad_low_precision() {
        // 100 units of a 6-decimal asset normalize to exactly 100e18
        assert_eq!(to_wad(100_000_000, 6).unwrap(), 100 * WAD);
        // 18-decimal asset passes through
        assert_eq!(to_wad(1_000_000_000_000_000_000, 18).unwrap(), WAD);
    }

    #[test]
    fn test_to_wad_high_precision_scales_down() {
        // 24-decimal asset must divide by 1e6, not pass through
        assert_eq!(to_wad(1_000_000, 24).unwrap(), 1);
        assert_eq!(to_wad(999_999, 24).unwrap(), 0);
    }

    #[test]
    fn test_from_wad_truncation() {
        // 1.9999999 tokens at 6 native decimals floors at the last native digit
        let wad = 1_999_999_900_000_000_000u128;
        assert_eq!(from_wad(wad, 6, Rounding::Down).unwrap(), 1_999_999);
        assert_eq!(from_wad(wad, 6, Rounding::Up).unwrap(), 2_000_000);
        // exact conversions do not round up
        assert_eq!(from_wad(2 * WAD, 6, Rounding::Up).unwrap(), 2_000_000);
    }

    #[test]
    fn test_from_wad_high_precision() {
        assert_eq!(from_wad(1, 24, Rounding::Down).unwrap(), 1_000_000);
    }

    #[test]
    fn test_from_wad_overflow_guard() {
        assert!(from_wad(u128::MAX, 6, Rounding::Down).is_err());
    }

    #[test]
    fn test_mul_div_full_precision() {
        // (u128::MAX / 2) * 4 / 2 would overflow a naive two-step multiply
        let a = u128::MAX / 2;
        assert_eq!(mul_div(a, 4, 2, Rounding::Down).unwrap(), a * 2);
        assert!(mul_div(u128::MAX, 2, 1, Rounding::Down).is_err());
        assert!(mul_div(1, 1, 0, Rounding::Down).is_err());
    }

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div(10, 3, 4, Rounding::Down).unwrap(), 7);
        assert_eq!(mul_div(10, 3, 4, Rounding::Up).unwrap(), 8);
        assert_eq!(mul_div(10, 2, 4, Rounding::Up).unwrap(), 5);
    }

    #[test]
    fn test_sqrt_product_u128_path() {
        assert_eq!(sqrt_product(1000, 950).unwrap(), 974); // isqrt(950000)
        assert_eq!(sqrt_product(0, 950).unwrap(), 0);
        assert_eq!(sqrt_product(4, 4).unwrap(), 4);
    }

    #[test]
    fn test_sqrt_product_u256_path() {
        // 1000e18 * 950e18 overflows u128 and takes the 256-bit path
        let shares = sqrt_product(1000 * WAD, 950 * WAD).unwrap();
        assert_eq!(shares, 974_679_434_480_896_390_683);
        // perfect square sanity on the wide path
        let r = sqrt_product(u128::MAX, u128::MAX).unwrap();
        assert_eq!(r, u128::MAX);
    }

    #[test]
    fn test_isqrt_u256_floor() {
        let v = U256::from(2u128) * U256::from(WAD) * U256::from(WAD);
        let root = isqrt_u256(v);
        assert!(U256::from(root) * U256::from(root) <= v);
        let next = root + 1;
        assert!(U256::from(next) * U256::from(next) > v);
    }
}
