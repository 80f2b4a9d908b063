/// Pricing engine: dynamic time-scaled fee plus the constant-product
/// formula over decay-adjusted reserves, in exact-input and exact-output
/// modes. Pure arithmetic; direction selection and reserve mutation live in
/// `logic::swap`.
use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, MAX_AMM_FEE_BPS, MIN_AMM_FEE_BPS, PROTOCOL_FEE_SHARE_BPS, SECONDS_PER_YEAR,
};
use crate::error::CadenceError;
use crate::math::safe::SafeMath;
use crate::math::wad::{mul_div, Rounding};

/// Priced swap: all values in the 18-decimal domain, fee denominated in the
/// input token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapAmounts {
    pub amount_in: u128,
    pub amount_out: u128,
    pub fee_amount: u128,
    pub lp_fee: u128,
    pub protocol_fee: u128,
}

/// Swap fee in basis points, linear in time remaining and clamped to
/// `[MIN_AMM_FEE_BPS, MAX_AMM_FEE_BPS]`. A full year or more to maturity
/// pays the minimum; the fee reaches the maximum at maturity.
pub fn dynamic_fee_bps(now: i64, maturity: i64) -> u16 {
    let time_to_maturity = maturity.saturating_sub(now).max(0);
    if time_to_maturity >= SECONDS_PER_YEAR {
        return MIN_AMM_FEE_BPS;
    }
    let span = (MAX_AMM_FEE_BPS - MIN_AMM_FEE_BPS) as i64;
    let fee = MIN_AMM_FEE_BPS as i64
        + span * (SECONDS_PER_YEAR - time_to_maturity) / SECONDS_PER_YEAR;
    fee.clamp(MIN_AMM_FEE_BPS as i64, MAX_AMM_FEE_BPS as i64) as u16
}

/// Exact-input constant product, fee deducted from the input before the
/// product formula:
///
/// ```text
/// fee = in * fee_bps / 10000
/// out = (in - fee) * reserve_out / (reserve_in + (in - fee))
/// ```
pub fn exact_in(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u16,
) -> Result<SwapAmounts> {
    if amount_in == 0 {
        return Err(CadenceError::ZeroAmount.into());
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(CadenceError::InsufficientLiquidity.into());
    }
    let fee_amount = mul_div(
        amount_in,
        fee_bps as u128,
        BPS_DENOMINATOR as u128,
        Rounding::Down,
    )?;
    let amount_in_net = amount_in.safe_sub(fee_amount)?;
    if amount_in_net == 0 {
        return Err(CadenceError::ZeroAmount.into());
    }
    let amount_out = mul_div(
        amount_in_net,
        reserve_out,
        reserve_in.safe_add(amount_in_net)?,
        Rounding::Down,
    )?;
    let (lp_fee, protocol_fee) = split_fee(fee_amount)?;
    Ok(SwapAmounts {
        amount_in,
        amount_out,
        fee_amount,
        lp_fee,
        protocol_fee,
    })
}

/// Exact-output inverse of `exact_in`. The required net input solves the
/// product formula and the fee is applied as a markup on it; both divisions
/// round up so an exact-output swap never pays less than the equivalent
/// exact-input swap.
pub fn exact_out(
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u16,
) -> Result<SwapAmounts> {
    if amount_out == 0 {
        return Err(CadenceError::ZeroAmount.into());
    }
    if reserve_in == 0 || amount_out >= reserve_out {
        return Err(CadenceError::InsufficientLiquidity.into());
    }
    let amount_in_net = mul_div(
        amount_out,
        reserve_in,
        reserve_out - amount_out,
        Rounding::Up,
    )?;
    let amount_in = mul_div(
        amount_in_net,
        BPS_DENOMINATOR as u128,
        (BPS_DENOMINATOR - fee_bps) as u128,
        Rounding::Up,
    )?;
    let fee_amount = amount_in.safe_sub(amount_in_net)?;
    let (lp_fee, protocol_fee) = split_fee(fee_amount)?;
    Ok(SwapAmounts {
        amount_in,
        amount_out,
        fee_amount,
        lp_fee,
        protocol_fee,
    })
}

/// Split a fee between LPs and the protocol. The protocol share floors;
/// the integer-division remainder stays with the LPs, so the two parts
/// always sum to the fee exactly.
pub fn split_fee(fee_amount: u128) -> Result<(u128, u128)> {
    let protocol_fee = mul_div(
        fee_amount,
        PROTOCOL_FEE_SHARE_BPS as u128,
        BPS_DENOMINATOR as u128,
        Rounding::Down,
    )?;
    let lp_fee = fee_amount.safe_sub(protocol_fee)?;
    Ok((lp_fee, protocol_fee))
}
