//! Global constants for the Cadence protocol
//!
//! Centralized constants for PDA seeds and protocol parameters

// PDA seed constants
pub const PROTOCOL_SEED: &[u8] = b"protocol";
pub const POOL_INFO_SEED: &[u8] = b"pool_info";
pub const CYCLE_INFO_SEED: &[u8] = b"cycle_info";
pub const MARKET_SEED: &[u8] = b"market";
pub const PT_VAULT_SEED: &[u8] = b"pt_vault";
pub const QUOTE_VAULT_SEED: &[u8] = b"quote_vault";
pub const LP_POSITION_SEED: &[u8] = b"lp_position";

// Fixed-point domain
/// One unit in the internal 18-decimal fixed-point domain.
pub const WAD: u128 = 1_000_000_000_000_000_000;
/// Number of decimals of the internal fixed-point domain.
pub const WAD_DECIMALS: u8 = 18;

// Basis points
pub const BPS_DENOMINATOR: u16 = 10_000;

// Swap fee bounds. The effective fee scales linearly from MIN_AMM_FEE_BPS
// (a full year or more to maturity) up to MAX_AMM_FEE_BPS (at maturity).
pub const MIN_AMM_FEE_BPS: u16 = 10; // 0.10%
pub const MAX_AMM_FEE_BPS: u16 = 100; // 1.00%

/// Share of every swap fee credited to the protocol, in basis points.
/// The remainder, including any integer-division remainder, accrues to LPs.
pub const PROTOCOL_FEE_SHARE_BPS: u16 = 2_000; // 20%

/// Reference year used by the dynamic fee schedule.
pub const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;
