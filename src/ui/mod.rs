//! UI module - the egui settings panel
//!
//! - **control_panel**: surface, camera and focal light controls plus the
//!   Start / Withdraw Move / Promote Pawn buttons
//! - **styles**: panel palette
//!
//! Panel systems run in `EguiPrimaryContextPass`. Pointer capture in
//! [`crate::input`] checks egui's pointer state so clicks on the panel never
//! reach the board.

pub mod control_panel;
pub mod styles;

pub use control_panel::*;
