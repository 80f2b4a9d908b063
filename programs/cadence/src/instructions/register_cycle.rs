//! Registry crank: writes a cycle entry under an existing pool.
//!
//! Cycle anchors (creation time and maturity) are immutable; a bad entry is
//! abandoned, never edited, so markets can trust what they cached.

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::CYCLE_INFO_SEED;
use crate::error::CadenceError;
use crate::state::{CycleInfo, PoolInfo, Protocol};

#[derive(Accounts)]
#[instruction(pool_id: [u8; 32], cycle_id: u64)]
pub struct RegisterCycle<'info> {
    #[account(
        seeds = [crate::constants::PROTOCOL_SEED],
        bump = protocol.bump,
        has_one = registry_authority @ CadenceError::Unauthorized
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        seeds = [crate::constants::POOL_INFO_SEED, pool_id.as_ref()],
        bump = pool_info.bump
    )]
    pub pool_info: Account<'info, PoolInfo>,

    #[account(
        init,
        payer = registry_authority,
        space = 8 + CycleInfo::INIT_SPACE,
        seeds = [CYCLE_INFO_SEED, pool_id.as_ref(), &cycle_id.to_le_bytes()],
        bump
    )]
    pub cycle_info: Account<'info, CycleInfo>,

    pub pt_mint: Account<'info, Mint>,

    /// CHECK: recorded for off-chain consumers; the AMM never touches it
    pub yt_mint: UncheckedAccount<'info>,

    #[account(mut)]
    pub registry_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_cycle(
    ctx: Context<RegisterCycle>,
    pool_id: [u8; 32],
    cycle_id: u64,
    created_at: i64,
    maturity: i64,
) -> Result<()> {
    require!(maturity > created_at, CadenceError::InvalidCycleBounds);

    let cycle_info = &mut ctx.accounts.cycle_info;
    cycle_info.pool_id = pool_id;
    cycle_info.cycle_id = cycle_id;
    cycle_info.pt_mint = ctx.accounts.pt_mint.key();
    cycle_info.yt_mint = ctx.accounts.yt_mint.key();
    cycle_info.pt_decimals = ctx.accounts.pt_mint.decimals;
    cycle_info.created_at = created_at;
    cycle_info.maturity = maturity;
    cycle_info.bump = ctx.bumps.cycle_info;
    Ok(())
}
