//! Scene effects

pub mod lighting;

pub use lighting::*;
