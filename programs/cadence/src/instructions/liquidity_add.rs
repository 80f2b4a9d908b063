//! Single-sided PT deposit, minting LP shares.
//!
//! The first deposit bootstraps the market: the caller's discount sets the
//! virtual quote reserve and flips the market active. Later deposits are
//! proportional and the discount argument is ignored.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{LP_POSITION_SEED, MARKET_SEED, POOL_INFO_SEED, PROTOCOL_SEED};
use crate::error::CadenceError;
use crate::events::{LiquidityAdded, MarketSnapshot};
use crate::logic::liquidity::deposit;
use crate::math::wad::to_wad;
use crate::math::SafeMath;
use crate::state::{LpPosition, Market, PoolInfo, Protocol};
use crate::utils::{current_timestamp, transfer_from_user_to_vault};

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
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
        has_one = pt_vault @ CadenceError::PoolMismatch
    )]
    pub market: Account<'info, Market>,

    #[account(
        init_if_needed,
        payer = provider,
        space = 8 + LpPosition::INIT_SPACE,
        seeds = [LP_POSITION_SEED, market.key().as_ref(), provider.key().as_ref()],
        bump
    )]
    pub lp_position: Account<'info, LpPosition>,

    #[account(
        mut,
        constraint = provider_pt.mint == market.pt_mint @ CadenceError::MintMismatch
    )]
    pub provider_pt: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pt_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub provider: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn add_liquidity(ctx: Context<AddLiquidity>, pt_amount: u64, discount_bps: u16) -> Result<u128> {
    ctx.accounts.protocol.acquire_lock()?;

    let now = current_timestamp()?;
    let market = &mut ctx.accounts.market;
    market.ensure_open(now)?;

    let pt_wad = to_wad(pt_amount, market.pt_decimals)?;
    let outcome = deposit(market, pt_wad, discount_bps)?;

    transfer_from_user_to_vault(
        &ctx.accounts.provider_pt,
        &ctx.accounts.pt_vault,
        &ctx.accounts.provider,
        &ctx.accounts.token_program,
        pt_amount,
    )?;

    let position = &mut ctx.accounts.lp_position;
    if position.shares == 0 {
        position.market = ctx.accounts.market.key();
        position.owner = ctx.accounts.provider.key();
        position.bump = ctx.bumps.lp_position;
    }
    position.shares = position.shares.safe_add(outcome.shares_minted)?;

    let market = &ctx.accounts.market;
    emit!(LiquidityAdded {
        market: market.key(),
        provider: ctx.accounts.provider.key(),
        pt_amount,
        discount_bps: if outcome.bootstrap { discount_bps } else { 0 },
        lp_shares_minted: outcome.shares_minted,
        bootstrap: outcome.bootstrap,
        snapshot: MarketSnapshot::capture(market, now)?,
        timestamp: now,
    });

    ctx.accounts.protocol.release_lock();
    Ok(outcome.shares_minted)
}
