//! Game systems - ECS glue around the interaction core
//!
//! - [`interaction`] - pointer and panel messages in, animation time forward
//!
//! The systems are thin: all decisions live in
//! [`crate::game::resources::InteractionMachine`], which keeps them testable
//! without an `App`.

pub mod interaction;

pub use interaction::*;
