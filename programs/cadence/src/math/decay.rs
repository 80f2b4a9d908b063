/// Time-decay engine.
///
/// The decay factor is quadratic in the elapsed fraction of a cycle:
/// slow early (protecting fresh LPs from rapid re-pricing) and steep near
/// maturity (driving the PT price to parity exactly at maturity). Effective
/// reserves derived from the factor are a pricing lens only and are never
/// persisted.
use anchor_lang::prelude::*;

use crate::constants::WAD;
use crate::error::CadenceError;
use crate::math::wad::{mul_div, Rounding};

/// Decay-adjusted reserves used for pricing a single instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveReserves {
    /// Quote-side input reserve for Quote -> PT pricing.
    pub quote: u128,
    /// PT-side input reserve for PT -> Quote pricing.
    pub pt: u128,
}

/// Normalized decay factor in `[0, WAD]`.
///
/// ```text
/// ratio  = clamp((now - created_at) / (maturity - created_at), 0, 1)
/// factor = ratio^2
/// ```
/// Clamps to `WAD` at or after maturity instead of overflowing.
pub fn decay_factor(now: i64, created_at: i64, maturity: i64) -> Result<u128> {
    if maturity <= created_at {
        return Err(CadenceError::InvalidCycleBounds.into());
    }
    let elapsed = now.saturating_sub(created_at).max(0) as u128;
    let duration = (maturity - created_at) as u128;
    let ratio = mul_div(elapsed, WAD, duration, Rounding::Down)?.min(WAD);
    mul_div(ratio, ratio, WAD, Rounding::Down)
}

/// Shift both pricing reserves toward parity by the given factor.
///
/// Both directions consume the same factor for the same instant; pricing one
/// direction with decay and the other without is a correctness defect.
pub fn effective_reserves(
    pt_reserve: u128,
    virtual_quote_reserve: u128,
    factor: u128,
) -> Result<EffectiveReserves> {
    if pt_reserve >= virtual_quote_reserve {
        let shift = mul_div(
            pt_reserve - virtual_quote_reserve,
            factor,
            WAD,
            Rounding::Down,
        )?;
        Ok(EffectiveReserves {
            quote: virtual_quote_reserve
                .checked_add(shift)
                .ok_or(CadenceError::MathOverflow)?,
            pt: pt_reserve
                .checked_sub(shift)
                .ok_or(CadenceError::ArithmeticUnderflow)?,
        })
    } else {
        // PT trading at a premium: the gap closes from the other side.
        let shift = mul_div(
            virtual_quote_reserve - pt_reserve,
            factor,
            WAD,
            Rounding::Down,
        )?;
        Ok(EffectiveReserves {
            quote: virtual_quote_reserve
                .checked_sub(shift)
                .ok_or(CadenceError::ArithmeticUnderflow)?,
            pt: pt_reserve
                .checked_add(shift)
                .ok_or(CadenceError::MathOverflow)?,
        })
    }
}
