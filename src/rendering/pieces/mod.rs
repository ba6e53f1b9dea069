//! Chess pieces rendering module
//!
//! Builds primitive piece models and keeps their entities in step with the
//! piece registry.

pub mod pieces;

// Re-export all public items
pub use pieces::*;
