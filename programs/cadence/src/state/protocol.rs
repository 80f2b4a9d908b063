//! Global protocol state: guardian, fee authority, and the protocol-wide
//! reentrancy lock held across every mutating entry point.

use anchor_lang::prelude::*;

use crate::error::CadenceError;

#[account]
#[derive(InitSpace)]
pub struct Protocol {
    /// May ban and unban markets
    pub guardian: Pubkey,
    /// May sweep accrued protocol fees to the fee sink
    pub fee_authority: Pubkey,
    /// Registry collaborator allowed to write pool and cycle entries
    pub registry_authority: Pubkey,
    /// Protocol-wide reentrancy lock. One lock for the whole protocol, not
    /// per market: a mutating call that crosses into a collaborator and back
    /// must fail deterministically rather than interleave state.
    pub locked: bool,
    pub bump: u8,
}

impl Protocol {
    /// Acquire the mutation lock; fails if any mutating call is in flight.
    pub fn acquire_lock(&mut self) -> Result<()> {
        if self.locked {
            return Err(CadenceError::ReentrancyDetected.into());
        }
        self.locked = true;
        Ok(())
    }

    /// Release the mutation lock at the end of a successful operation.
    /// A failed operation rolls the whole transaction back, lock included.
    pub fn release_lock(&mut self) {
        self.locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_lifecycle() {
        let mut p = Protocol {
            guardian: Pubkey::default(),
            fee_authority: Pubkey::default(),
            registry_authority: Pubkey::default(),
            locked: false,
            bump: 255,
        };
        assert!(p.acquire_lock().is_ok());
        assert!(p.acquire_lock().is_err());
        p.release_lock();
        assert!(p.acquire_lock().is_ok());
    }
}
