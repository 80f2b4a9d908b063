//! Market account: one per (pool, cycle) pair.
//!
//! All reserve and fee fields live in the internal 18-decimal domain
//! regardless of the native precision of the quote asset. Maturity is never
//! cached as a flag; `status_at` derives it from the clock on every read.

use anchor_lang::prelude::*;

use crate::constants::{MARKET_SEED, WAD};
use crate::error::CadenceError;
use crate::math::wad::{mul_div, Rounding};
use crate::math::{decay_factor, effective_reserves, EffectiveReserves};

/// Derived market status. `Expired` is computed from the clock, never
/// stored, so it cannot desynchronize from the chain time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketStatus {
    /// Created, no deposit yet; awaiting a bootstrap.
    Pending,
    /// Priced and trading. A fully drained market keeps this tag.
    Active,
    /// Past maturity: trading rejected, reserves remain queryable.
    Expired,
    /// Guardian-banned: deposits and swaps blocked, withdrawal unaffected.
    Banned,
}

#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Registry pool identifier
    pub pool_id: [u8; 32],
    /// Registry cycle identifier
    pub cycle_id: u64,

    /// Token wiring
    pub pt_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub pt_vault: Pubkey,
    pub quote_vault: Pubkey,

    /// Native precisions cached from the registry
    pub pt_decimals: u8,
    pub quote_decimals: u8,

    /// Decay anchors, immutable per cycle
    pub created_at: i64,
    pub maturity: i64,

    /// Set on the first deposit, never cleared; a drained market stays
    /// activated and is re-bootstrapped by the next depositor.
    pub activated: bool,
    /// Guardian ban flag
    pub banned: bool,

    /// PT reserve, 18-decimal
    pub pt_reserve: u128,
    /// Quote-side reserve implied by the bootstrap discount, 18-decimal.
    /// Not a real deposit; only deposits and withdrawals rescale it.
    pub virtual_quote_reserve: u128,
    /// Quote actually received via buy-direction swaps, 18-decimal
    pub real_quote_reserve: u128,

    /// Outstanding LP share supply
    pub total_lp_shares: u128,

    /// LP fee balances, disjoint from the tradable reserves
    pub accumulated_fees_pt: u128,
    pub accumulated_fees_quote: u128,

    /// Uncollected protocol fee share
    pub protocol_fees_pt: u128,
    pub protocol_fees_quote: u128,

    /// Canonical bump for the market PDA (also the vault authority)
    pub bump: u8,
}

impl Market {
    /// Market status at the given instant, recomputed on every read.
    pub fn status_at(&self, now: i64) -> MarketStatus {
        if self.banned {
            return MarketStatus::Banned;
        }
        if now >= self.maturity {
            return MarketStatus::Expired;
        }
        if self.activated {
            MarketStatus::Active
        } else {
            MarketStatus::Pending
        }
    }

    /// Reject swaps and deposits on a banned or matured market.
    pub fn ensure_open(&self, now: i64) -> Result<()> {
        match self.status_at(now) {
            MarketStatus::Banned => Err(CadenceError::MarketBanned.into()),
            MarketStatus::Expired => Err(CadenceError::MarketExpired.into()),
            _ => Ok(()),
        }
    }

    /// Swaps additionally require a priced (bootstrapped) market.
    pub fn ensure_tradable(&self, now: i64) -> Result<()> {
        self.ensure_open(now)?;
        if self.status_at(now) != MarketStatus::Active || self.total_lp_shares == 0 {
            return Err(CadenceError::MarketNotActive.into());
        }
        Ok(())
    }

    /// Decay factor for this market at the given instant.
    pub fn decay_factor_at(&self, now: i64) -> Result<u128> {
        decay_factor(now, self.created_at, self.maturity)
    }

    /// Effective (pricing) reserves at the given instant. Both swap
    /// directions must be priced from the same call.
    pub fn effective_reserves_at(&self, now: i64) -> Result<EffectiveReserves> {
        effective_reserves(
            self.pt_reserve,
            self.virtual_quote_reserve,
            self.decay_factor_at(now)?,
        )
    }

    /// Spot quote-per-PT price, 18-decimal, for event snapshots.
    /// Zero when the market holds no PT.
    pub fn spot_price_wad(&self, now: i64) -> Result<u128> {
        if self.pt_reserve == 0 {
            return Ok(0);
        }
        let eff = self.effective_reserves_at(now)?;
        mul_div(eff.quote, WAD, self.pt_reserve, Rounding::Down)
    }

    pub fn seeds<'a>(&'a self, cycle_id_bytes: &'a [u8; 8]) -> [&'a [u8]; 4] {
        [
            MARKET_SEED,
            self.pool_id.as_ref(),
            cycle_id_bytes,
            std::slice::from_ref(&self.bump),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Market {
        Market {
            pool_id: [7u8; 32],
            cycle_id: 1,
            pt_mint: Pubkey::default(),
            quote_mint: Pubkey::default(),
            pt_vault: Pubkey::default(),
            quote_vault: Pubkey::default(),
            pt_decimals: 9,
            quote_decimals: 6,
            created_at: 0,
            maturity: 100_000,
            activated: false,
            banned: false,
            pt_reserve: 0,
            virtual_quote_reserve: 0,
            real_quote_reserve: 0,
            total_lp_shares: 0,
            accumulated_fees_pt: 0,
            accumulated_fees_quote: 0,
            protocol_fees_pt: 0,
            protocol_fees_quote: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_status_is_derived_from_clock() {
        let mut m = market();
        assert_eq!(m.status_at(0), MarketStatus::Pending);
        m.activated = true;
        assert_eq!(m.status_at(99_999), MarketStatus::Active);
        assert_eq!(m.status_at(100_000), MarketStatus::Expired);
        assert_eq!(m.status_at(200_000), MarketStatus::Expired);
    }

    #[test]
    fn test_ban_dominates_other_states() {
        let mut m = market();
        m.activated = true;
        m.banned = true;
        assert_eq!(m.status_at(0), MarketStatus::Banned);
        // even past maturity, the ban is what callers see
        assert_eq!(m.status_at(200_000), MarketStatus::Banned);
        assert!(m.ensure_open(0).is_err());
        m.banned = false;
        assert_eq!(m.status_at(0), MarketStatus::Active);
    }

    #[test]
    fn test_drained_market_keeps_active_tag() {
        let mut m = market();
        m.activated = true;
        m.total_lp_shares = 0;
        assert_eq!(m.status_at(0), MarketStatus::Active);
        // but it is not tradable until re-bootstrapped
        assert!(m.ensure_tradable(0).is_err());
    }

    #[test]
    fn test_expired_rejects_trading() {
        let mut m = market();
        m.activated = true;
        m.total_lp_shares = 1;
        assert!(m.ensure_tradable(0).is_ok());
        assert!(m.ensure_tradable(100_000).is_err());
    }
}
