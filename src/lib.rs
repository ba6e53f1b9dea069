//! Tabletop chess - a 3D chess piece interaction showcase
//!
//! A board with the standard 32 pieces that can be selected, moved, captured,
//! promoted and un-done with animated transitions. There are no chess rules:
//! any piece may go to any square.
//!
//! # Modules
//!
//! - [`core`] - configuration, panel settings and error types
//! - [`game`] - piece registry, interaction state machine, history and the
//!   tween driver, plus the systems feeding them
//! - [`input`] - mouse clicks turned into world rays and pick tests
//! - [`rendering`] - board, piece models, camera and lights
//! - [`ui`] - the egui settings panel

pub mod core;
pub mod game;
pub mod input;
pub mod rendering;
pub mod ui;
