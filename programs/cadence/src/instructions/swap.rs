//! Swap handlers: exact-input and exact-output, in both directions.
//!
//! Every handler prices through `logic::swap::plan_*`, the same path the
//! preview instructions use, then settles token movement here. Slippage
//! limits are checked against native-precision amounts, which is what the
//! user actually receives or pays.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{MARKET_SEED, POOL_INFO_SEED, PROTOCOL_SEED};
use crate::error::CadenceError;
use crate::events::{MarketSnapshot, SwapExecuted};
use crate::logic::swap::{apply, plan_exact_in, plan_exact_out, SwapDirection, SwapPlan};
use crate::math::wad::{from_wad, to_wad, Rounding};
use crate::state::{Market, PoolInfo, Protocol};
use crate::utils::{current_timestamp, transfer_from_user_to_vault, transfer_from_vault_to_user};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, Protocol>,

    #[account(
        seeds = [POOL_INFO_SEED, market.pool_id.as_ref()],
        bump = pool_info.bump,
        constraint = !pool_info.banned @ CadenceError::PoolBanned
    )]
    pub pool_info: Account<'info, PoolInfo>,

    #[account(
        mut,
        seeds = [
            MARKET_SEED,
            market.pool_id.as_ref(),
            &market.cycle_id.to_le_bytes()
        ],
        bump = market.bump,
        has_one = pt_vault @ CadenceError::PoolMismatch,
        has_one = quote_vault @ CadenceError::PoolMismatch
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        constraint = user_pt.mint == market.pt_mint @ CadenceError::MintMismatch
    )]
    pub user_pt: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_quote.mint == market.quote_mint @ CadenceError::MintMismatch
    )]
    pub user_quote: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pt_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub quote_vault: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Native decimals of the (input, output) tokens for a direction.
fn leg_decimals(market: &Market, direction: SwapDirection) -> (u8, u8) {
    match direction {
        SwapDirection::QuoteToPt => (market.quote_decimals, market.pt_decimals),
        SwapDirection::PtToQuote => (market.pt_decimals, market.quote_decimals),
    }
}

/// Commit a priced swap: mutate reserves, move both token legs, emit.
fn settle(
    ctx: &mut Context<Swap>,
    plan: &SwapPlan,
    amount_in: u64,
    amount_out: u64,
    now: i64,
) -> Result<()> {
    apply(&mut ctx.accounts.market, plan)?;

    let (user_in, vault_in, vault_out, user_out) = match plan.direction {
        SwapDirection::QuoteToPt => (
            &ctx.accounts.user_quote,
            &ctx.accounts.quote_vault,
            &ctx.accounts.pt_vault,
            &ctx.accounts.user_pt,
        ),
        SwapDirection::PtToQuote => (
            &ctx.accounts.user_pt,
            &ctx.accounts.pt_vault,
            &ctx.accounts.quote_vault,
            &ctx.accounts.user_quote,
        ),
    };

    transfer_from_user_to_vault(
        user_in,
        vault_in,
        &ctx.accounts.user,
        &ctx.accounts.token_program,
        amount_in,
    )?;

    let market = &ctx.accounts.market;
    let cycle_id_bytes = market.cycle_id.to_le_bytes();
    let seeds = market.seeds(&cycle_id_bytes);
    let signer_seeds = [&seeds[..]];
    let market_authority = market.to_account_info();

    transfer_from_vault_to_user(
        vault_out,
        user_out,
        &market_authority,
        &ctx.accounts.token_program,
        &signer_seeds,
        amount_out,
    )?;

    let (token_in, token_out) = match plan.direction {
        SwapDirection::QuoteToPt => (market.quote_mint, market.pt_mint),
        SwapDirection::PtToQuote => (market.pt_mint, market.quote_mint),
    };
    emit!(SwapExecuted {
        market: market.key(),
        user: ctx.accounts.user.key(),
        token_in,
        token_out,
        amount_in,
        amount_out,
        fee_wad: plan.amounts.fee_amount,
        lp_fee_wad: plan.amounts.lp_fee,
        protocol_fee_wad: plan.amounts.protocol_fee,
        snapshot: MarketSnapshot::capture(market, now)?,
        timestamp: now,
    });

    Ok(())
}

/// Exact-input swap in the given direction. Returns the native output paid.
fn swap_exact_in(
    ctx: &mut Context<Swap>,
    direction: SwapDirection,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<u64> {
    ctx.accounts.protocol.acquire_lock()?;

    let now = current_timestamp()?;
    let market = &ctx.accounts.market;
    market.ensure_tradable(now)?;

    let (in_decimals, out_decimals) = leg_decimals(market, direction);
    let amount_in_wad = to_wad(amount_in, in_decimals)?;
    let plan = plan_exact_in(market, direction, amount_in_wad, now)?;

    let amount_out = from_wad(plan.amounts.amount_out, out_decimals, Rounding::Down)?;
    require!(amount_out > 0, CadenceError::AmountTooSmall);
    require!(amount_out >= min_amount_out, CadenceError::SlippageExceeded);

    settle(ctx, &plan, amount_in, amount_out, now)?;

    ctx.accounts.protocol.release_lock();
    Ok(amount_out)
}

/// Exact-output swap in the given direction. Returns the native input
/// charged, rounded up so the pool is never shorted.
fn swap_exact_out(
    ctx: &mut Context<Swap>,
    direction: SwapDirection,
    amount_out: u64,
    max_amount_in: u64,
) -> Result<u64> {
    ctx.accounts.protocol.acquire_lock()?;

    let now = current_timestamp()?;
    let market = &ctx.accounts.market;
    market.ensure_tradable(now)?;

    let (in_decimals, out_decimals) = leg_decimals(market, direction);
    let amount_out_wad = to_wad(amount_out, out_decimals)?;
    let plan = plan_exact_out(market, direction, amount_out_wad, now)?;

    let amount_in = from_wad(plan.amounts.amount_in, in_decimals, Rounding::Up)?;
    require!(amount_in > 0, CadenceError::AmountTooSmall);
    require!(amount_in <= max_amount_in, CadenceError::SlippageExceeded);

    settle(ctx, &plan, amount_in, amount_out, now)?;

    ctx.accounts.protocol.release_lock();
    Ok(amount_in)
}

pub fn swap_exact_quote_for_pt(
    mut ctx: Context<Swap>,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<u64> {
    swap_exact_in(&mut ctx, SwapDirection::QuoteToPt, amount_in, min_amount_out)
}

pub fn swap_exact_pt_for_quote(
    mut ctx: Context<Swap>,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<u64> {
    swap_exact_in(&mut ctx, SwapDirection::PtToQuote, amount_in, min_amount_out)
}

pub fn swap_quote_for_exact_pt(
    mut ctx: Context<Swap>,
    amount_out: u64,
    max_amount_in: u64,
) -> Result<u64> {
    swap_exact_out(&mut ctx, SwapDirection::QuoteToPt, amount_out, max_amount_in)
}

pub fn swap_pt_for_exact_quote(
    mut ctx: Context<Swap>,
    amount_out: u64,
    max_amount_in: u64,
) -> Result<u64> {
    swap_exact_out(&mut ctx, SwapDirection::PtToQuote, amount_out, max_amount_in)
}
