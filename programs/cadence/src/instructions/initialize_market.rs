//! Permissionless market creation for a registered (pool, cycle) pair.
//!
//! Anyone may pay to create the market; all parameters are read from the
//! registry entries, so there is nothing for the caller to get wrong. The
//! market PDA is also the authority over both vaults.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    CYCLE_INFO_SEED, MARKET_SEED, POOL_INFO_SEED, PT_VAULT_SEED, QUOTE_VAULT_SEED,
};
use crate::error::CadenceError;
use crate::events::MarketInitialized;
use crate::state::{CycleInfo, Market, PoolInfo};
use crate::utils::current_timestamp;

#[derive(Accounts)]
pub struct InitializeMarket<'info> {
    #[account(
        seeds = [POOL_INFO_SEED, pool_info.pool_id.as_ref()],
        bump = pool_info.bump,
        constraint = !pool_info.banned @ CadenceError::PoolBanned
    )]
    pub pool_info: Account<'info, PoolInfo>,

    #[account(
        seeds = [
            CYCLE_INFO_SEED,
            cycle_info.pool_id.as_ref(),
            &cycle_info.cycle_id.to_le_bytes()
        ],
        bump = cycle_info.bump,
        constraint = cycle_info.pool_id == pool_info.pool_id @ CadenceError::PoolMismatch
    )]
    pub cycle_info: Account<'info, CycleInfo>,

    #[account(
        init,
        payer = payer,
        space = 8 + Market::INIT_SPACE,
        seeds = [
            MARKET_SEED,
            cycle_info.pool_id.as_ref(),
            &cycle_info.cycle_id.to_le_bytes()
        ],
        bump
    )]
    pub market: Account<'info, Market>,

    #[account(address = cycle_info.pt_mint @ CadenceError::MintMismatch)]
    pub pt_mint: Account<'info, Mint>,

    #[account(address = pool_info.quote_mint @ CadenceError::MintMismatch)]
    pub quote_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        token::mint = pt_mint,
        token::authority = market,
        seeds = [PT_VAULT_SEED, market.key().as_ref()],
        bump
    )]
    pub pt_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        token::mint = quote_mint,
        token::authority = market,
        seeds = [QUOTE_VAULT_SEED, market.key().as_ref()],
        bump
    )]
    pub quote_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_market(ctx: Context<InitializeMarket>) -> Result<()> {
    let now = current_timestamp()?;
    let cycle = &ctx.accounts.cycle_info;
    require!(cycle.maturity > cycle.created_at, CadenceError::InvalidCycleBounds);
    // no point creating a market that can never trade
    require!(now < cycle.maturity, CadenceError::MarketExpired);

    let market = &mut ctx.accounts.market;
    market.pool_id = cycle.pool_id;
    market.cycle_id = cycle.cycle_id;
    market.pt_mint = ctx.accounts.pt_mint.key();
    market.quote_mint = ctx.accounts.quote_mint.key();
    market.pt_vault = ctx.accounts.pt_vault.key();
    market.quote_vault = ctx.accounts.quote_vault.key();
    market.pt_decimals = cycle.pt_decimals;
    market.quote_decimals = ctx.accounts.pool_info.quote_decimals;
    market.created_at = cycle.created_at;
    market.maturity = cycle.maturity;
    market.activated = false;
    market.banned = false;
    market.pt_reserve = 0;
    market.virtual_quote_reserve = 0;
    market.real_quote_reserve = 0;
    market.total_lp_shares = 0;
    market.accumulated_fees_pt = 0;
    market.accumulated_fees_quote = 0;
    market.protocol_fees_pt = 0;
    market.protocol_fees_quote = 0;
    market.bump = ctx.bumps.market;

    emit!(MarketInitialized {
        market: market.key(),
        pool_id: market.pool_id,
        cycle_id: market.cycle_id,
        pt_mint: market.pt_mint,
        quote_mint: market.quote_mint,
        created_at: market.created_at,
        maturity: market.maturity,
        timestamp: now,
    });

    Ok(())
}
