//! LP accounting: bootstrap and proportional deposits, withdrawals with
//! pro-rata fee share, and re-bootstrap bookkeeping. Pure state logic over
//! `&mut Market`; token movement happens in the instruction handlers.

use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::CadenceError;
use crate::math::wad::{mul_div, sqrt_product, Rounding};
use crate::math::SafeMath;
use crate::state::Market;

/// Result of a deposit, for event emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    pub shares_minted: u128,
    pub bootstrap: bool,
}

/// Per-bucket withdrawal breakdown. The mutating withdrawal and the
/// position-value view both derive their payouts from this single struct so
/// the two can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalAmounts {
    pub pt_principal: u128,
    pub pt_fee_share: u128,
    pub quote_principal: u128,
    pub quote_fee_share: u128,
}

impl WithdrawalAmounts {
    pub fn pt_total(&self) -> Result<u128> {
        self.pt_principal.safe_add(self.pt_fee_share)
    }

    pub fn quote_total(&self) -> Result<u128> {
        self.quote_principal.safe_add(self.quote_fee_share)
    }
}

/// Deposit PT into a market, minting LP shares.
///
/// With no shares outstanding this is a bootstrap: the discount fixes the
/// virtual quote reserve and shares are minted as
/// `isqrt(pt * virtual_quote)`. Otherwise shares are proportional and the
/// discount argument is ignored; the virtual reserve scales by the same
/// ratio as the PT reserve so the deposit leaves the price unchanged.
pub fn deposit(market: &mut Market, pt_amount: u128, discount_bps: u16) -> Result<DepositOutcome> {
    if pt_amount == 0 {
        return Err(CadenceError::ZeroAmount.into());
    }

    if market.total_lp_shares == 0 {
        if discount_bps == 0 || discount_bps >= BPS_DENOMINATOR {
            return Err(CadenceError::InvalidDiscount.into());
        }
        let virtual_quote = mul_div(
            pt_amount,
            (BPS_DENOMINATOR - discount_bps) as u128,
            BPS_DENOMINATOR as u128,
            Rounding::Down,
        )?;
        let shares = sqrt_product(pt_amount, virtual_quote)?;
        if shares == 0 {
            return Err(CadenceError::AmountTooSmall.into());
        }

        market.pt_reserve = pt_amount;
        market.virtual_quote_reserve = virtual_quote;
        // Re-bootstrap after a full drain restores the zero-state invariant
        // even when these are already expected to be zero.
        market.real_quote_reserve = 0;
        market.accumulated_fees_pt = 0;
        market.accumulated_fees_quote = 0;
        market.total_lp_shares = shares;
        market.activated = true;

        return Ok(DepositOutcome {
            shares_minted: shares,
            bootstrap: true,
        });
    }

    // Proportional deposit: discount is ignored.
    let shares = mul_div(
        pt_amount,
        market.total_lp_shares,
        market.pt_reserve,
        Rounding::Down,
    )?;
    if shares == 0 {
        return Err(CadenceError::AmountTooSmall.into());
    }
    let pt_after = market.pt_reserve.safe_add(pt_amount)?;
    market.virtual_quote_reserve = mul_div(
        market.virtual_quote_reserve,
        pt_after,
        market.pt_reserve,
        Rounding::Down,
    )?;
    market.pt_reserve = pt_after;
    market.total_lp_shares = market.total_lp_shares.safe_add(shares)?;

    Ok(DepositOutcome {
        shares_minted: shares,
        bootstrap: false,
    })
}

/// Amounts a withdrawal of `shares` pays out under the current reserves.
/// This is the formula the mutating path applies; `get_lp_position_value`
/// must report exactly these numbers.
pub fn withdrawal_amounts(market: &Market, shares: u128) -> Result<WithdrawalAmounts> {
    if shares == 0 {
        return Err(CadenceError::ZeroAmount.into());
    }
    if shares > market.total_lp_shares {
        return Err(CadenceError::InsufficientShares.into());
    }
    let total = market.total_lp_shares;
    Ok(WithdrawalAmounts {
        pt_principal: mul_div(shares, market.pt_reserve, total, Rounding::Down)?,
        pt_fee_share: mul_div(shares, market.accumulated_fees_pt, total, Rounding::Down)?,
        quote_principal: mul_div(shares, market.real_quote_reserve, total, Rounding::Down)?,
        quote_fee_share: mul_div(shares, market.accumulated_fees_quote, total, Rounding::Down)?,
    })
}

/// Burn `shares` and reduce each reserve and fee bucket by the amount paid
/// from it. The virtual reserve shrinks by the same ratio as the PT reserve
/// so a withdrawal leaves the price unchanged, mirroring deposits.
pub fn withdraw(market: &mut Market, shares: u128) -> Result<WithdrawalAmounts> {
    let amounts = withdrawal_amounts(market, shares)?;

    let pt_before = market.pt_reserve;
    let pt_after = pt_before.safe_sub(amounts.pt_principal)?;
    market.virtual_quote_reserve = mul_div(
        market.virtual_quote_reserve,
        pt_after,
        pt_before,
        Rounding::Down,
    )?;
    market.pt_reserve = pt_after;
    market.real_quote_reserve = market.real_quote_reserve.safe_sub(amounts.quote_principal)?;
    market.accumulated_fees_pt = market.accumulated_fees_pt.safe_sub(amounts.pt_fee_share)?;
    market.accumulated_fees_quote = market
        .accumulated_fees_quote
        .safe_sub(amounts.quote_fee_share)?;
    market.total_lp_shares = market.total_lp_shares.safe_sub(shares)?;

    Ok(amounts)
}
