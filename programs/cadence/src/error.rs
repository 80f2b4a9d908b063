//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum CadenceError {
    // State errors
    #[msg("Market is not active")]
    MarketNotActive,

    #[msg("Market has reached maturity")]
    MarketExpired,

    #[msg("Market is banned by the guardian")]
    MarketBanned,

    #[msg("Pool is banned in the registry")]
    PoolBanned,

    #[msg("Cycle account does not belong to the given pool")]
    PoolMismatch,

    #[msg("Token mint does not match the registry entry")]
    MintMismatch,

    #[msg("Cycle maturity must be after its start")]
    InvalidCycleBounds,

    // Input errors
    #[msg("Bootstrap discount must be strictly between 0 and 10000 basis points")]
    InvalidDiscount,

    #[msg("Zero amount")]
    ZeroAmount,

    #[msg("Deposit too small to mint any LP shares")]
    AmountTooSmall,

    #[msg("Share amount exceeds position balance")]
    InsufficientShares,

    // Economic errors
    #[msg("Slippage bound violated")]
    SlippageExceeded,

    #[msg("Insufficient liquidity for requested output")]
    InsufficientLiquidity,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    ArithmeticUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Amount does not fit the token's native precision")]
    AmountTooLarge,

    // Authorization errors
    #[msg("Unauthorized signer")]
    Unauthorized,

    #[msg("Re-entrancy detected. Another operation is in progress")]
    ReentrancyDetected,
}
