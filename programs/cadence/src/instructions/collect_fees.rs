//! Sweep accrued protocol fees from a market to the fee sink.
//!
//! Fees accrue per-swap into the market's protocol accumulators and are
//! collected lazily by the fee authority, in both tokens at once.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{MARKET_SEED, PROTOCOL_SEED};
use crate::error::CadenceError;
use crate::events::ProtocolFeesCollected;
use crate::math::wad::{from_wad, Rounding};
use crate::state::{Market, Protocol};
use crate::utils::{current_timestamp, transfer_from_vault_to_user};

#[derive(Accounts)]
pub struct CollectProtocolFees<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        has_one = fee_authority @ CadenceError::Unauthorized
    )]
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
        constraint = fee_sink_pt.mint == market.pt_mint @ CadenceError::MintMismatch
    )]
    pub fee_sink_pt: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = fee_sink_quote.mint == market.quote_mint @ CadenceError::MintMismatch
    )]
    pub fee_sink_quote: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pt_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub quote_vault: Account<'info, TokenAccount>,

    pub fee_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn collect_protocol_fees(ctx: Context<CollectProtocolFees>) -> Result<()> {
    ctx.accounts.protocol.acquire_lock()?;

    let now = current_timestamp()?;
    let market = &mut ctx.accounts.market;
    let pt_amount = from_wad(market.protocol_fees_pt, market.pt_decimals, Rounding::Down)?;
    let quote_amount = from_wad(market.protocol_fees_quote, market.quote_decimals, Rounding::Down)?;
    market.protocol_fees_pt = 0;
    market.protocol_fees_quote = 0;

    let market = &ctx.accounts.market;
    let cycle_id_bytes = market.cycle_id.to_le_bytes();
    let seeds = market.seeds(&cycle_id_bytes);
    let signer_seeds = [&seeds[..]];
    let market_authority = market.to_account_info();

    if pt_amount > 0 {
        transfer_from_vault_to_user(
            &ctx.accounts.pt_vault,
            &ctx.accounts.fee_sink_pt,
            &market_authority,
            &ctx.accounts.token_program,
            &signer_seeds,
            pt_amount,
        )?;
    }
    if quote_amount > 0 {
        transfer_from_vault_to_user(
            &ctx.accounts.quote_vault,
            &ctx.accounts.fee_sink_quote,
            &market_authority,
            &ctx.accounts.token_program,
            &signer_seeds,
            quote_amount,
        )?;
    }

    emit!(ProtocolFeesCollected {
        market: market.key(),
        fee_sink: ctx.accounts.fee_sink_quote.key(),
        pt_amount,
        quote_amount,
        timestamp: now,
    });

    ctx.accounts.protocol.release_lock();
    Ok(())
}
