//! Error types for the interaction core
//!
//! Every failure path in the interaction core degrades to "log and remain
//! interactive". These errors are returned by the state machine and the
//! registry so callers (ECS systems) can decide how loudly to log them;
//! none of them is allowed to escape a system.
//!
//! A pick that hits nothing is not an error: picking returns `Option`.

use crate::game::components::{PieceId, PieceKind};
use thiserror::Error;

/// Errors produced by the interaction core and its configuration layer
#[derive(Error, Debug)]
pub enum InteractionError {
    /// Promotion requested for a kind that has no attached template piece
    #[error("No template piece of kind {kind} is on the board")]
    MissingTemplate { kind: PieceKind },

    /// An operation referenced a piece the registry does not know
    #[error("Piece {id} not found in registry")]
    PieceNotFound { id: PieceId },

    /// Promotion requested for a piece that is not a pawn
    #[error("Only pawns can be promoted, got {kind}")]
    NotAPawn { kind: PieceKind },

    /// An action arrived while an animation sequence holds the lock
    #[error("Another piece is still animating")]
    Busy,

    /// The action needs a selected piece
    #[error("No piece is selected")]
    NothingSelected,

    /// Config file could not be read
    #[error("Config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::core::InteractionConfig`]
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias for interaction operations
pub type InteractionResult<T> = Result<T, InteractionError>;
