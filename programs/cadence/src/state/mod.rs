//! Account state

pub mod market;
pub mod position;
pub mod protocol;
pub mod registry;

pub use market::*;
pub use position::*;
pub use protocol::*;
pub use registry::*;
