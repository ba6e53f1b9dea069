//! Core module - configuration, GUI-bound settings and error types
//!
//! # Contents
//!
//! - [`InteractionConfig`] - heights, scales and tween durations
//! - [`ControlPanel`] - fields the settings panel binds to
//! - [`InteractionError`] - error taxonomy of the interaction core
//!
//! Everything here is plain data; the systems that consume it live in
//! [`crate::game`] and [`crate::rendering`].

pub mod error;
pub mod resources;

pub use error::{InteractionError, InteractionResult};
pub use resources::*;
