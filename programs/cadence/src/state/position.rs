//! LP position account: one per (market, owner).

use anchor_lang::prelude::*;

/// A claim on a pro-rata slice of a market's PT reserve, real quote reserve,
/// and both LP fee balances.
#[account]
#[derive(InitSpace)]
pub struct LpPosition {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub shares: u128,
    pub bump: u8,
}
