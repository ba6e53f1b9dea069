//! Input module - from window pixels to world rays
//!
//! - `picking` - pointer normalization, ray construction and the piece and
//!   board hit tests (pure functions, no ECS)
//! - `pointer` - the system that captures clicks and emits
//!   [`crate::game::events::PointerAction`]

pub mod picking;
pub mod pointer;

pub use picking::*;
pub use pointer::*;
