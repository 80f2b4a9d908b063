//! Burn LP shares for a pro-rata payout of PT plus quote, principal and
//! accrued LP fees alike.
//!
//! Removal is never gated: banned and expired markets still honor
//! withdrawals so liquidity can always leave.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{LP_POSITION_SEED, MARKET_SEED, PROTOCOL_SEED};
use crate::error::CadenceError;
use crate::events::{LiquidityRemoved, MarketSnapshot};
use crate::logic::liquidity::withdraw;
use crate::math::wad::{from_wad, Rounding};
use crate::math::SafeMath;
use crate::state::{LpPosition, Market, Protocol};
use crate::utils::{current_timestamp, transfer_from_vault_to_user};

/// Native-precision payout of a withdrawal, returned to the caller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct RemovedLiquidity {
    pub pt_amount: u64,
    pub quote_amount: u64,
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol.bump)]
    pub protocol: Account<'info, Protocol>,

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
        seeds = [LP_POSITION_SEED, market.key().as_ref(), provider.key().as_ref()],
        bump = lp_position.bump,
        constraint = lp_position.owner == provider.key() @ CadenceError::Unauthorized
    )]
    pub lp_position: Account<'info, LpPosition>,

    #[account(
        mut,
        constraint = provider_pt.mint == market.pt_mint @ CadenceError::MintMismatch
    )]
    pub provider_pt: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = provider_quote.mint == market.quote_mint @ CadenceError::MintMismatch
    )]
    pub provider_quote: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pt_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub quote_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub provider: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, shares: u128) -> Result<RemovedLiquidity> {
    ctx.accounts.protocol.acquire_lock()?;

    let now = current_timestamp()?;
    let position = &mut ctx.accounts.lp_position;
    require!(shares <= position.shares, CadenceError::InsufficientShares);

    let market = &mut ctx.accounts.market;
    let amounts = withdraw(market, shares)?;
    position.shares = position.shares.safe_sub(shares)?;

    // payouts truncate to native precision; dust stays in the vaults
    let pt_amount = from_wad(amounts.pt_total()?, market.pt_decimals, Rounding::Down)?;
    let quote_amount = from_wad(amounts.quote_total()?, market.quote_decimals, Rounding::Down)?;

    let market = &ctx.accounts.market;
    let cycle_id_bytes = market.cycle_id.to_le_bytes();
    let seeds = market.seeds(&cycle_id_bytes);
    let signer_seeds = [&seeds[..]];
    let market_authority = market.to_account_info();

    if pt_amount > 0 {
        transfer_from_vault_to_user(
            &ctx.accounts.pt_vault,
            &ctx.accounts.provider_pt,
            &market_authority,
            &ctx.accounts.token_program,
            &signer_seeds,
            pt_amount,
        )?;
    }
    if quote_amount > 0 {
        transfer_from_vault_to_user(
            &ctx.accounts.quote_vault,
            &ctx.accounts.provider_quote,
            &market_authority,
            &ctx.accounts.token_program,
            &signer_seeds,
            quote_amount,
        )?;
    }

    emit!(LiquidityRemoved {
        market: market.key(),
        provider: ctx.accounts.provider.key(),
        lp_shares_burned: shares,
        pt_amount,
        quote_amount,
        snapshot: MarketSnapshot::capture(market, now)?,
        timestamp: now,
    });

    ctx.accounts.protocol.release_lock();
    Ok(RemovedLiquidity {
        pt_amount,
        quote_amount,
    })
}
