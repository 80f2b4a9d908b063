//! Read-only swap previews.
//!
//! A preview runs the identical planning path as the corresponding swap,
//! including the tradability and pool-ban checks, and applies the same
//! native-precision rounding. The quoted output is exactly what an
//! execution in the same slot would pay.

use anchor_lang::prelude::*;

use crate::constants::{MARKET_SEED, POOL_INFO_SEED};
use crate::error::CadenceError;
use crate::logic::swap::{plan_exact_in, SwapDirection};
use crate::math::wad::{from_wad, to_wad, Rounding};
use crate::state::{Market, PoolInfo};
use crate::utils::current_timestamp;

/// Quoted swap, native precision for the legs, 18-decimal for the fees.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct SwapPreview {
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_wad: u128,
    pub lp_fee_wad: u128,
    pub protocol_fee_wad: u128,
}

#[derive(Accounts)]
pub struct PreviewSwap<'info> {
    #[account(
        seeds = [POOL_INFO_SEED, market.pool_id.as_ref()],
        bump = pool_info.bump,
        constraint = !pool_info.banned @ CadenceError::PoolBanned
    )]
    pub pool_info: Account<'info, PoolInfo>,

    #[account(
        seeds = [
            MARKET_SEED,
            market.pool_id.as_ref(),
            &market.cycle_id.to_le_bytes()
        ],
        bump = market.bump
    )]
    pub market: Account<'info, Market>,
}

fn preview_exact_in(
    ctx: Context<PreviewSwap>,
    direction: SwapDirection,
    amount_in: u64,
) -> Result<SwapPreview> {
    let now = current_timestamp()?;
    let market = &ctx.accounts.market;
    market.ensure_tradable(now)?;

    let (in_decimals, out_decimals) = match direction {
        SwapDirection::QuoteToPt => (market.quote_decimals, market.pt_decimals),
        SwapDirection::PtToQuote => (market.pt_decimals, market.quote_decimals),
    };
    let plan = plan_exact_in(market, direction, to_wad(amount_in, in_decimals)?, now)?;
    let amount_out = from_wad(plan.amounts.amount_out, out_decimals, Rounding::Down)?;
    require!(amount_out > 0, CadenceError::AmountTooSmall);

    Ok(SwapPreview {
        amount_in,
        amount_out,
        fee_wad: plan.amounts.fee_amount,
        lp_fee_wad: plan.amounts.lp_fee,
        protocol_fee_wad: plan.amounts.protocol_fee,
    })
}

pub fn preview_swap_quote_for_pt(ctx: Context<PreviewSwap>, amount_in: u64) -> Result<SwapPreview> {
    preview_exact_in(ctx, SwapDirection::QuoteToPt, amount_in)
}

pub fn preview_swap_pt_for_quote(ctx: Context<PreviewSwap>, amount_in: u64) -> Result<SwapPreview> {
    preview_exact_in(ctx, SwapDirection::PtToQuote, amount_in)
}
