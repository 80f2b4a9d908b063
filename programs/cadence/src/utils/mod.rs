//! Shared utilities

pub mod clock;
pub mod transfers;

pub use clock::*;
pub use transfers::*;
