/// Clock utility functions for timestamp management
use anchor_lang::prelude::*;

/// Get the current timestamp from the Solana clock
pub fn current_timestamp() -> Result<i64> {
    let clock = Clock::get()?;
    Ok(clock.unix_timestamp)
}
