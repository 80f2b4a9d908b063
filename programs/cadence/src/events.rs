//! Event definitions
//!
//! Every liquidity and swap operation emits a full post-operation snapshot
//! (reserves, fee accumulators, derived price) sized for off-chain indexing.
//! User-facing amounts are in the token's native precision; snapshot fields
//! are in the internal 18-decimal domain.

use anchor_lang::prelude::*;

use crate::state::Market;

/// Reserve and fee snapshot attached to state-changing events.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct MarketSnapshot {
    pub pt_reserve: u128,
    pub virtual_quote_reserve: u128,
    pub real_quote_reserve: u128,
    pub total_lp_shares: u128,
    pub accumulated_fees_pt: u128,
    pub accumulated_fees_quote: u128,
    /// Quote per PT, 18-decimal, at the event timestamp.
    pub spot_price_wad: u128,
}

impl MarketSnapshot {
    /// Capture the post-operation state of a market for event emission.
    pub fn capture(market: &Market, now: i64) -> Result<Self> {
        Ok(Self {
            pt_reserve: market.pt_reserve,
            virtual_quote_reserve: market.virtual_quote_reserve,
            real_quote_reserve: market.real_quote_reserve,
            total_lp_shares: market.total_lp_shares,
            accumulated_fees_pt: market.accumulated_fees_pt,
            accumulated_fees_quote: market.accumulated_fees_quote,
            spot_price_wad: market.spot_price_wad(now)?,
        })
    }
}

/// Event emitted when a market is created for a (pool, cycle) pair
#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub pool_id: [u8; 32],
    pub cycle_id: u64,
    pub pt_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub created_at: i64,
    pub maturity: i64,
    pub timestamp: i64,
}

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub market: Pubkey,
    pub provider: Pubkey,
    /// PT deposited, native precision
    pub pt_amount: u64,
    /// Discount applied on bootstrap; 0 for proportional deposits
    pub discount_bps: u16,
    pub lp_shares_minted: u128,
    pub bootstrap: bool,
    pub snapshot: MarketSnapshot,
    pub timestamp: i64,
}

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub market: Pubkey,
    pub provider: Pubkey,
    pub lp_shares_burned: u128,
    /// PT paid out (principal plus fee share), native precision
    pub pt_amount: u64,
    /// Quote paid out (principal plus fee share), native precision
    pub quote_amount: u64,
    pub snapshot: MarketSnapshot,
    pub timestamp: i64,
}

/// Event emitted when a swap is executed
#[event]
pub struct SwapExecuted {
    pub market: Pubkey,
    pub user: Pubkey,
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    /// Native precision
    pub amount_in: u64,
    /// Native precision
    pub amount_out: u64,
    /// Total fee charged, 18-decimal, in the input token
    pub fee_wad: u128,
    /// LP share of the fee, 18-decimal
    pub lp_fee_wad: u128,
    /// Protocol share of the fee, 18-decimal
    pub protocol_fee_wad: u128,
    pub snapshot: MarketSnapshot,
    pub timestamp: i64,
}

/// Event emitted when the guardian bans a market
#[event]
pub struct MarketBanned {
    pub market: Pubkey,
    pub guardian: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the guardian lifts a market ban
#[event]
pub struct MarketUnbanned {
    pub market: Pubkey,
    pub guardian: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when accrued protocol fees are swept to the fee sink
#[event]
pub struct ProtocolFeesCollected {
    pub market: Pubkey,
    pub fee_sink: Pubkey,
    /// Native precision
    pub pt_amount: u64,
    /// Native precision
    pub quote_amount: u64,
    pub timestamp: i64,
}
