//! Market business logic, shared between mutating instructions and their
//! read-only previews.

pub mod liquidity;
pub mod swap;

pub use liquidity::*;
pub use swap::*;
