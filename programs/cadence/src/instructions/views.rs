//! Read-only state views for off-chain consumers.

use anchor_lang::prelude::*;

use crate::constants::{LP_POSITION_SEED, MARKET_SEED};
use crate::logic::liquidity::withdrawal_amounts;
use crate::math::curve::dynamic_fee_bps;
use crate::math::wad::{from_wad, Rounding};
use crate::state::{LpPosition, Market, MarketStatus};
use crate::utils::current_timestamp;

/// Full market summary at the current slot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct MarketInfo {
    pub status: MarketStatus,
    pub pt_reserve: u128,
    pub virtual_quote_reserve: u128,
    pub real_quote_reserve: u128,
    /// Decay-adjusted reserves the pricing engine would use right now
    pub effective_pt_reserve: u128,
    pub effective_quote_reserve: u128,
    pub total_lp_shares: u128,
    pub accumulated_fees_pt: u128,
    pub accumulated_fees_quote: u128,
    pub protocol_fees_pt: u128,
    pub protocol_fees_quote: u128,
    /// Quote per PT, 18-decimal
    pub spot_price_wad: u128,
    /// Decay progress, 18-decimal, 0 at creation and 1e18 at maturity
    pub decay_factor_wad: u128,
    /// Fee a swap would pay right now, basis points
    pub fee_bps: u16,
    pub created_at: i64,
    pub maturity: i64,
}

/// What a position's shares would redeem for right now, native precision.
/// Mirrors `remove_liquidity` exactly, rounding included.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct LpPositionValue {
    pub shares: u128,
    pub pt_amount: u64,
    pub quote_amount: u64,
}

#[derive(Accounts)]
pub struct GetMarketInfo<'info> {
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

#[derive(Accounts)]
pub struct GetLpPositionValue<'info> {
    #[account(
        seeds = [
            MARKET_SEED,
            market.pool_id.as_ref(),
            &market.cycle_id.to_le_bytes()
        ],
        bump = market.bump
    )]
    pub market: Account<'info, Market>,

    #[account(
        seeds = [LP_POSITION_SEED, market.key().as_ref(), lp_position.owner.as_ref()],
        bump = lp_position.bump
    )]
    pub lp_position: Account<'info, LpPosition>,
}

pub fn get_market_info(ctx: Context<GetMarketInfo>) -> Result<MarketInfo> {
    let now = current_timestamp()?;
    let market = &ctx.accounts.market;
    let eff = market.effective_reserves_at(now)?;
    Ok(MarketInfo {
        status: market.status_at(now),
        pt_reserve: market.pt_reserve,
        virtual_quote_reserve: market.virtual_quote_reserve,
        real_quote_reserve: market.real_quote_reserve,
        effective_pt_reserve: eff.pt,
        effective_quote_reserve: eff.quote,
        total_lp_shares: market.total_lp_shares,
        accumulated_fees_pt: market.accumulated_fees_pt,
        accumulated_fees_quote: market.accumulated_fees_quote,
        protocol_fees_pt: market.protocol_fees_pt,
        protocol_fees_quote: market.protocol_fees_quote,
        spot_price_wad: market.spot_price_wad(now)?,
        decay_factor_wad: market.decay_factor_at(now)?,
        fee_bps: dynamic_fee_bps(now, market.maturity),
        created_at: market.created_at,
        maturity: market.maturity,
    })
}

pub fn get_lp_position_value(ctx: Context<GetLpPositionValue>) -> Result<LpPositionValue> {
    let market = &ctx.accounts.market;
    let position = &ctx.accounts.lp_position;
    if position.shares == 0 {
        return Ok(LpPositionValue {
            shares: 0,
            pt_amount: 0,
            quote_amount: 0,
        });
    }
    let amounts = withdrawal_amounts(market, position.shares)?;
    Ok(LpPositionValue {
        shares: position.shares,
        pt_amount: from_wad(amounts.pt_total()?, market.pt_decimals, Rounding::Down)?,
        quote_amount: from_wad(amounts.quote_total()?, market.quote_decimals, Rounding::Down)?,
    })
}
