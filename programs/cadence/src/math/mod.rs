//! Numeric foundations: checked arithmetic, fixed-point scaling, the
//! time-decay engine, and the constant-product pricing engine.

pub mod curve;
pub mod decay;
pub mod safe;
pub mod wad;

pub use curve::*;
pub use decay::*;
pub use safe::SafeMath;
pub use wad::*;
