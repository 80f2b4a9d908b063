//! Cadence: a secondary market for principal tokens.
//!
//! One constant-product market per (pool, cycle) pair, priced over
//! decay-adjusted reserves so the PT price converges to parity with the
//! quote asset at maturity. Liquidity is single-sided PT; the quote side of
//! the invariant starts out virtual, fixed by the bootstrap discount.

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod math;
pub mod state;
pub mod utils;

use instructions::*;

#[cfg(test)]
mod tests;

declare_id!("DT4CrKjG1eCaLkdVhQ2Xw8X2WNyxeuj3uHggjZ33sEiC");

#[program]
pub mod cadence {
    use super::*;

    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        guardian: Pubkey,
        fee_authority: Pubkey,
        registry_authority: Pubkey,
    ) -> Result<()> {
        instructions::initialize_protocol(ctx, guardian, fee_authority, registry_authority)
    }

    pub fn register_pool(
        ctx: Context<RegisterPool>,
        pool_id: [u8; 32],
        banned: bool,
    ) -> Result<()> {
        instructions::register_pool(ctx, pool_id, banned)
    }

    pub fn register_cycle(
        ctx: Context<RegisterCycle>,
        pool_id: [u8; 32],
        cycle_id: u64,
        created_at: i64,
        maturity: i64,
    ) -> Result<()> {
        instructions::register_cycle(ctx, pool_id, cycle_id, created_at, maturity)
    }

    pub fn initialize_market(ctx: Context<InitializeMarket>) -> Result<()> {
        instructions::initialize_market(ctx)
    }

    /// Deposit PT, minting LP shares. Returns the shares minted.
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        pt_amount: u64,
        discount_bps: u16,
    ) -> Result<u128> {
        instructions::add_liquidity(ctx, pt_amount, discount_bps)
    }

    /// Burn LP shares for PT plus quote. Returns the native payouts.
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        shares: u128,
    ) -> Result<RemovedLiquidity> {
        instructions::remove_liquidity(ctx, shares)
    }

    /// Buy PT with an exact quote input. Returns the PT paid out.
    pub fn swap_exact_quote_for_pt(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<u64> {
        instructions::swap_exact_quote_for_pt(ctx, amount_in, min_amount_out)
    }

    /// Sell an exact PT input for quote. Returns the quote paid out.
    pub fn swap_exact_pt_for_quote(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<u64> {
        instructions::swap_exact_pt_for_quote(ctx, amount_in, min_amount_out)
    }

    /// Buy an exact amount of PT. Returns the quote charged.
    pub fn swap_quote_for_exact_pt(
        ctx: Context<Swap>,
        amount_out: u64,
        max_amount_in: u64,
    ) -> Result<u64> {
        instructions::swap_quote_for_exact_pt(ctx, amount_out, max_amount_in)
    }

    /// Sell PT for an exact amount of quote. Returns the PT charged.
    pub fn swap_pt_for_exact_quote(
        ctx: Context<Swap>,
        amount_out: u64,
        max_amount_in: u64,
    ) -> Result<u64> {
        instructions::swap_pt_for_exact_quote(ctx, amount_out, max_amount_in)
    }

    /// Quote a quote-to-PT swap without executing it.
    pub fn preview_swap_quote_for_pt(
        ctx: Context<PreviewSwap>,
        amount_in: u64,
    ) -> Result<SwapPreview> {
        instructions::preview_swap_quote_for_pt(ctx, amount_in)
    }

    /// Quote a PT-to-quote swap without executing it.
    pub fn preview_swap_pt_for_quote(
        ctx: Context<PreviewSwap>,
        amount_in: u64,
    ) -> Result<SwapPreview> {
        instructions::preview_swap_pt_for_quote(ctx, amount_in)
    }

    pub fn get_market_info(ctx: Context<GetMarketInfo>) -> Result<MarketInfo> {
        instructions::get_market_info(ctx)
    }

    pub fn get_lp_position_value(ctx: Context<GetLpPositionValue>) -> Result<LpPositionValue> {
        instructions::get_lp_position_value(ctx)
    }

    pub fn ban_market(ctx: Context<SetMarketBan>) -> Result<()> {
        instructions::ban_market(ctx)
    }

    pub fn unban_market(ctx: Context<SetMarketBan>) -> Result<()> {
        instructions::unban_market(ctx)
    }

    pub fn collect_protocol_fees(ctx: Context<CollectProtocolFees>) -> Result<()> {
        instructions::collect_protocol_fees(ctx)
    }
}
