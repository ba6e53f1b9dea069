//! Piece identity and classification

use bevy::prelude::*;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn name(&self) -> &'static str {
        match self {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub enum PieceType {
    #[default]
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    pub fn name(&self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Rook => "rook",
            PieceType::Pawn => "pawn",
        }
    }

    /// Half extents of the piece model at scale 1.0, standing on the origin
    ///
    /// Used both to build the primitive meshes and as the pick volume.
    pub fn model_half_extents(&self) -> Vec3 {
        match self {
            PieceType::King => Vec3::new(0.4, 0.85, 0.4),
            PieceType::Queen => Vec3::new(0.4, 0.75, 0.4),
            PieceType::Bishop => Vec3::new(0.35, 0.65, 0.35),
            PieceType::Knight => Vec3::new(0.35, 0.55, 0.35),
            PieceType::Rook => Vec3::new(0.35, 0.5, 0.35),
            PieceType::Pawn => Vec3::new(0.3, 0.4, 0.3),
        }
    }
}

/// One of the twelve piece tags: color × type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub struct PieceKind {
    pub color: PieceColor,
    pub piece_type: PieceType,
}

impl PieceKind {
    pub const fn new(color: PieceColor, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    pub fn is_pawn(&self) -> bool {
        self.piece_type == PieceType::Pawn
    }

    /// Same color, different type
    pub fn with_type(&self, piece_type: PieceType) -> Self {
        Self::new(self.color, piece_type)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.name(), self.piece_type.name())
    }
}

/// Stable identity of a piece in the [`crate::game::resources::PieceRegistry`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Default)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Board square as (row, col), both in 0..8
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect, Default)]
pub struct BoardCell {
    pub row: u8,
    pub col: u8,
}

impl BoardCell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Snapshot of a piece taken once when it is created; never mutated
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct InitialPieceState {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub kind: PieceKind,
    pub row: u8,
    pub col: u8,
}

/// Links a rendered entity back to its registry record
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PieceEntity(pub PieceId);

/// Marks child meshes of a piece entity
#[derive(Component, Clone, Copy, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct PieceMesh;
