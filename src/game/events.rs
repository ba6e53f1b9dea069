//! Messages crossing the input, GUI and interaction layers
//!
//! Input systems never touch the state machine directly: they turn mouse
//! clicks into [`PointerAction`]s and panel buttons into [`ControlAction`]s,
//! which the interaction systems consume in the next system set.

use bevy::math::Ray3d;
use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum PointerButton {
    /// Select or pick a move target
    Primary,
    /// Capture the selected piece
    Secondary,
}

/// A click on the 3D view, already unprojected into a world ray
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PointerAction {
    pub ray: Ray3d,
    pub button: PointerButton,
}

/// Named actions of the settings panel
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Reset the board to the starting layout
    StartGame,
    /// Undo the newest action
    WithdrawMove,
    /// Open the promotion menu for the selected pawn
    PromotePawn,
    /// Promote the selected pawn to the panel's promotion option
    ConfirmPromotion,
}
