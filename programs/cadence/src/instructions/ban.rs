//! Guardian market bans.
//!
//! Banning blocks deposits and swaps immediately; withdrawals stay open.
//! Unbanning restores whatever status the clock and activation flag imply.

use anchor_lang::prelude::*;

use crate::constants::{MARKET_SEED, PROTOCOL_SEED};
use crate::error::CadenceError;
use crate::events::{MarketBanned, MarketUnbanned};
use crate::state::{Market, Protocol};
use crate::utils::current_timestamp;

#[derive(Accounts)]
pub struct SetMarketBan<'info> {
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        has_one = guardian @ CadenceError::Unauthorized
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        mut,
        seeds = [
            MARKET_SEED,
            market.pool_id.as_ref(),
            &market.cycle_id.to_le_bytes()
        ],
        bump = market.bump
    )]
    pub market: Account<'info, Market>,

    pub guardian: Signer<'info>,
}

pub fn ban_market(ctx: Context<SetMarketBan>) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.banned = true;
    emit!(MarketBanned {
        market: market.key(),
        guardian: ctx.accounts.guardian.key(),
        timestamp: current_timestamp()?,
    });
    Ok(())
}

pub fn unban_market(ctx: Context<SetMarketBan>) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.banned = false;
    emit!(MarketUnbanned {
        market: market.key(),
        guardian: ctx.accounts.guardian.key(),
        timestamp: current_timestamp()?,
    });
    Ok(())
}
