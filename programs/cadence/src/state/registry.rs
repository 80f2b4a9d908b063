//! Registry interface accounts.
//!
//! The pool/cycle registry is an external collaborator; these accounts are
//! its narrow on-chain interface. The AMM only reads them (pool metadata,
//! cycle anchors, pool-level ban flag) and never branches on whatever
//! liquidity back-end the registry wires a pool to.

use anchor_lang::prelude::*;

/// Per-pool entry: quote asset wiring and the registry-level ban flag.
#[account]
#[derive(InitSpace)]
pub struct PoolInfo {
    pub pool_id: [u8; 32],
    pub quote_mint: Pubkey,
    pub quote_decimals: u8,
    /// Registry-level ban; checked alongside the market-level guardian ban.
    pub banned: bool,
    pub bump: u8,
}

/// Per-cycle entry: principal/yield token mints and the decay anchors.
#[account]
#[derive(InitSpace)]
pub struct CycleInfo {
    pub pool_id: [u8; 32],
    pub cycle_id: u64,
    pub pt_mint: Pubkey,
    pub yt_mint: Pubkey,
    pub pt_decimals: u8,
    pub created_at: i64,
    pub maturity: i64,
    pub bump: u8,
}
