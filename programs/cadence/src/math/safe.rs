/// Overflow-safe arithmetic for all reserve and fee bookkeeping.
/// Checked operations return errors instead of wrapping so that an
/// overflowing operation aborts the whole transaction.
use anchor_lang::prelude::*;

use crate::error::CadenceError;

pub trait SafeMath<T> {
    fn safe_add(self, v: T) -> Result<T>;
    fn safe_sub(self, v: T) -> Result<T>;
}

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath<$type> for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("Math overflow in safe_add: {} + {}", self, v);
                    CadenceError::MathOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("Math underflow in safe_sub: {} - {}", self, v);
                    CadenceError::ArithmeticUnderflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_add_overflow() {
        assert!(u128::MAX.safe_add(1).is_err());
        assert_eq!(1u128.safe_add(2).unwrap(), 3);
    }

    #[test]
    fn test_safe_sub_underflow() {
        assert!(0u128.safe_sub(1).is_err());
        assert_eq!(3u128.safe_sub(2).unwrap(), 1);
    }
}
