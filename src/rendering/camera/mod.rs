//! Camera module

pub mod showcase_camera;

pub use showcase_camera::*;
