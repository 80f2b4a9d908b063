//! Registry crank: writes a pool entry.
//!
//! Only the registry authority may call this. `init_if_needed` lets the
//! registry refresh the ban flag on an existing entry with the same
//! instruction; the quote wiring is immutable once set.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::POOL_INFO_SEED;
use crate::error::CadenceError;
use crate::state::{PoolInfo, Protocol};

#[derive(Accounts)]
#[instruction(pool_id: [u8; 32])]
pub struct RegisterPool<'info> {
    #[account(
        seeds = [crate::constants::PROTOCOL_SEED],
        bump = protocol.bump,
        has_one = registry_authority @ CadenceError::Unauthorized
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        init_if_needed,
        payer = registry_authority,
        space = 8 + PoolInfo::INIT_SPACE,
        seeds = [POOL_INFO_SEED, pool_id.as_ref()],
        bump
    )]
    pub pool_info: Account<'info, PoolInfo>,

    pub quote_mint: Account<'info, Mint>,

    #[account(mut)]
    pub registry_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_pool(ctx: Context<RegisterPool>, pool_id: [u8; 32], banned: bool) -> Result<()> {
    let pool_info = &mut ctx.accounts.pool_info;
    if pool_info.pool_id == [0u8; 32] {
        pool_info.pool_id = pool_id;
        pool_info.quote_mint = ctx.accounts.quote_mint.key();
        pool_info.quote_decimals = ctx.accounts.quote_mint.decimals;
        pool_info.bump = ctx.bumps.pool_info;
    } else {
        // refresh path: the quote wiring must not change
        require!(
            pool_info.quote_mint == ctx.accounts.quote_mint.key(),
            CadenceError::MintMismatch
        );
    }
    pool_info.banned = banned;
    Ok(())
}
