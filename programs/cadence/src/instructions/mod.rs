//! Instruction handlers and their account contexts

pub mod ban;
pub mod collect_fees;
pub mod initialize_market;
pub mod initialize_protocol;
pub mod liquidity_add;
pub mod liquidity_remove;
pub mod preview;
pub mod register_cycle;
pub mod register_pool;
pub mod swap;
pub mod views;

pub use ban::*;
pub use collect_fees::*;
pub use initialize_market::*;
pub use initialize_protocol::*;
pub use liquidity_add::*;
pub use liquidity_remove::*;
pub use preview::*;
pub use register_cycle::*;
pub use register_pool::*;
pub use swap::*;
pub use views::*;
