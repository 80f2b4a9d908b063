//! One-time protocol bootstrap: creates the global state account and pins
//! the three privileged authorities.

use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::state::Protocol;

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + Protocol::INIT_SPACE,
        seeds = [PROTOCOL_SEED],
        bump
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_protocol(
    ctx: Context<InitializeProtocol>,
    guardian: Pubkey,
    fee_authority: Pubkey,
    registry_authority: Pubkey,
) -> Result<()> {
    let protocol = &mut ctx.accounts.protocol;
    protocol.guardian = guardian;
    protocol.fee_authority = fee_authority;
    protocol.registry_authority = registry_authority;
    protocol.locked = false;
    protocol.bump = ctx.bumps.protocol;
    Ok(())
}
