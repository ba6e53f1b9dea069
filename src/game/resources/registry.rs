//! Piece registry - the scene collaborator of the interaction core
//!
//! Holds one [`PieceRecord`] per piece ever created, whether or not it is
//! currently on the board. Capturing a piece only detaches it, so undo can
//! put the very same record back.
//!
//! # Board Geometry
//!
//! The board is an 8×8 plane centred on the origin. Cell (row, col) has its
//! centre at `x = (col - 3.5)·size`, `z = (row - 3.5)·size`. White starts on
//! rows 6-7, black on rows 0-1.
//!
//! # Rendering
//!
//! Records carry an optional [`Entity`]. The rendering layer spawns entities
//! for records that lack one and mirrors transform, visibility and opacity
//! every frame; nothing in here touches the ECS world.

use crate::core::{InteractionConfig, InteractionError, InteractionResult};
use crate::game::components::{
    BoardCell, InitialPieceState, PieceColor, PieceId, PieceKind, PieceType,
};
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, PI};

/// Standard back rank, from column 0 to column 7
pub const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// World position of a cell centre at resting height
pub fn board_position(cell: BoardCell, config: &InteractionConfig) -> Vec3 {
    let offset = 3.5;
    Vec3::new(
        (cell.col as f32 - offset) * config.square_size,
        config.resting_height,
        (cell.row as f32 - offset) * config.square_size,
    )
}

/// Cell under a world point, or `None` off the board
pub fn board_cell_at(point: Vec3, config: &InteractionConfig) -> Option<BoardCell> {
    let half = config.board_half_extent();
    if point.x.abs() > half || point.z.abs() > half {
        return None;
    }
    let col = ((point.x + half) / config.square_size).floor().clamp(0.0, 7.0) as u8;
    let row = ((point.z + half) / config.square_size).floor().clamp(0.0, 7.0) as u8;
    Some(BoardCell::new(row, col))
}

/// Resting orientation of a freshly created piece
pub fn facing(kind: PieceKind) -> Quat {
    match (kind.color, kind.piece_type) {
        (_, PieceType::King) => Quat::from_rotation_y(FRAC_PI_2),
        (PieceColor::White, PieceType::Knight) => Quat::from_rotation_y(PI),
        _ => Quat::IDENTITY,
    }
}

/// A piece as the interaction core sees it
#[derive(Clone, Debug, PartialEq)]
pub struct PieceRecord {
    pub id: PieceId,
    pub kind: PieceKind,
    pub transform: Transform,
    /// Cell under the piece; `None` if it was dropped off the grid
    pub cell: Option<BoardCell>,
    /// Scene membership
    pub attached: bool,
    pub opacity: f32,
    /// Rendered with a private blended material instead of the shared one
    pub transparent: bool,
    pub entity: Option<Entity>,
}

impl PieceRecord {
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Axis-aligned pick volume standing on the piece's translation
    pub fn pick_volume(&self) -> Aabb3d {
        let half = self.kind.piece_type.model_half_extents() * self.transform.scale;
        let center = self.transform.translation + Vec3::Y * half.y;
        Aabb3d::new(center, half)
    }
}

#[derive(Resource, Debug, Default)]
pub struct PieceRegistry {
    pieces: BTreeMap<PieceId, PieceRecord>,
    initial_states: BTreeMap<PieceId, InitialPieceState>,
    next_id: u32,
}

impl PieceRegistry {
    /// Registry holding the 32 pieces of the starting position, all attached
    pub fn standard_layout(config: &InteractionConfig) -> Self {
        let mut registry = Self::default();
        let ranks = [
            (PieceColor::White, 7, 6),
            (PieceColor::Black, 0, 1),
        ];
        for (color, back_row, pawn_row) in ranks {
            for (col, piece_type) in BACK_RANK.iter().enumerate() {
                let kind = PieceKind::new(color, *piece_type);
                registry.create_piece(kind, BoardCell::new(back_row, col as u8), config);
            }
            for col in 0..8 {
                let kind = PieceKind::new(color, PieceType::Pawn);
                registry.create_piece(kind, BoardCell::new(pawn_row, col), config);
            }
        }
        registry
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an attached piece resting on `cell` and snapshot its initial state
    pub fn create_piece(
        &mut self,
        kind: PieceKind,
        cell: BoardCell,
        config: &InteractionConfig,
    ) -> PieceId {
        let id = self.allocate_id();
        let transform = Transform {
            translation: board_position(cell, config),
            rotation: facing(kind),
            scale: Vec3::splat(config.piece_scale),
        };
        self.initial_states.insert(
            id,
            InitialPieceState {
                position: transform.translation,
                rotation: transform.rotation,
                scale: transform.scale,
                kind,
                row: cell.row,
                col: cell.col,
            },
        );
        self.pieces.insert(
            id,
            PieceRecord {
                id,
                kind,
                transform,
                cell: Some(cell),
                attached: true,
                opacity: 1.0,
                transparent: false,
                entity: None,
            },
        );
        id
    }

    /// Detached copy of `template` under a new id, not yet materialized
    pub fn clone_piece(&mut self, template: PieceId) -> InteractionResult<PieceId> {
        let source = self
            .pieces
            .get(&template)
            .cloned()
            .ok_or(InteractionError::PieceNotFound { id: template })?;
        let id = self.allocate_id();
        self.pieces.insert(
            id,
            PieceRecord {
                id,
                attached: false,
                entity: None,
                ..source
            },
        );
        Ok(id)
    }

    pub fn attach(&mut self, id: PieceId) -> InteractionResult<()> {
        self.get_mut(id)?.attached = true;
        Ok(())
    }

    pub fn detach(&mut self, id: PieceId) -> InteractionResult<()> {
        self.get_mut(id)?.attached = false;
        Ok(())
    }

    pub fn get(&self, id: PieceId) -> Option<&PieceRecord> {
        self.pieces.get(&id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> InteractionResult<&mut PieceRecord> {
        self.pieces
            .get_mut(&id)
            .ok_or(InteractionError::PieceNotFound { id })
    }

    pub fn initial_state(&self, id: PieceId) -> Option<&InitialPieceState> {
        self.initial_states.get(&id)
    }

    pub fn is_attached(&self, id: PieceId) -> bool {
        self.pieces.get(&id).is_some_and(|p| p.attached)
    }

    /// All records in id order
    pub fn iter(&self) -> impl Iterator<Item = &PieceRecord> {
        self.pieces.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PieceRecord> {
        self.pieces.values_mut()
    }

    /// Records currently on the board, in id order
    pub fn attached(&self) -> impl Iterator<Item = &PieceRecord> {
        self.pieces.values().filter(|p| p.attached)
    }

    /// Last attached piece of `kind`, used as a clone source for promotion
    pub fn find_template(&self, kind: PieceKind) -> Option<PieceId> {
        self.attached()
            .filter(|p| p.kind == kind)
            .last()
            .map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Replace every record with the starting layout
    ///
    /// Returns the entities of the discarded records so the caller can
    /// despawn them.
    pub fn reset(&mut self, config: &InteractionConfig) -> Vec<Entity> {
        let stale = self.pieces.values().filter_map(|p| p.entity).collect();
        *self = Self::standard_layout(config);
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> InteractionConfig {
        InteractionConfig::default()
    }

    #[test]
    fn test_standard_layout_has_32_attached_pieces() {
        //! Verifies the starting position and that every piece is on the board
        let registry = PieceRegistry::standard_layout(&config());
        assert_eq!(registry.len(), 32);
        assert_eq!(registry.attached().count(), 32);
        let white_pawns = registry
            .iter()
            .filter(|p| p.kind == PieceKind::new(PieceColor::White, PieceType::Pawn))
            .filter(|p| p.cell.map(|c| c.row) == Some(6))
            .count();
        assert_eq!(white_pawns, 8);
    }

    #[test]
    fn test_board_position_cell_centres() {
        //! Corner cells sit half a square inside the board edge
        let cfg = config();
        let a = board_position(BoardCell::new(0, 0), &cfg);
        assert_eq!(a, Vec3::new(-3.5, 0.01, -3.5));
        let h = board_position(BoardCell::new(7, 7), &cfg);
        assert_eq!(h, Vec3::new(3.5, 0.01, 3.5));
    }

    #[test]
    fn test_board_cell_round_trip_and_bounds() {
        let cfg = config();
        let cell = BoardCell::new(4, 0);
        assert_eq!(board_cell_at(board_position(cell, &cfg), &cfg), Some(cell));
        assert_eq!(board_cell_at(Vec3::new(4.5, 0.0, 0.0), &cfg), None);
        // The far edge still belongs to the last cell
        assert_eq!(
            board_cell_at(Vec3::new(4.0, 0.0, 4.0), &cfg),
            Some(BoardCell::new(7, 7))
        );
    }

    #[test]
    fn test_initial_state_snapshot_is_independent() {
        //! Moving a piece must not touch its initial snapshot
        let cfg = config();
        let mut registry = PieceRegistry::default();
        let kind = PieceKind::new(PieceColor::White, PieceType::Rook);
        let id = registry.create_piece(kind, BoardCell::new(7, 0), &cfg);

        registry.get_mut(id).unwrap().transform.translation = Vec3::new(1.0, 2.0, 3.0);

        let initial = registry.initial_state(id).expect("snapshot taken at creation");
        assert_eq!(initial.position, Vec3::new(-3.5, 0.01, 3.5));
        assert_eq!((initial.row, initial.col), (7, 0));
        assert_eq!(initial.kind, kind);
    }

    #[test]
    fn test_clone_is_detached_with_new_id() {
        let cfg = config();
        let mut registry = PieceRegistry::standard_layout(&cfg);
        let queen = registry
            .find_template(PieceKind::new(PieceColor::Black, PieceType::Queen))
            .expect("black queen on the board");

        let copy = registry.clone_piece(queen).unwrap();

        assert_ne!(copy, queen);
        let record = registry.get(copy).unwrap();
        assert!(!record.attached);
        assert!(record.entity.is_none());
        assert_eq!(record.kind.piece_type, PieceType::Queen);
        assert!(registry.initial_state(copy).is_none());
    }

    #[test]
    fn test_find_template_ignores_detached_pieces() {
        //! Captured pieces are not valid clone sources
        let cfg = config();
        let mut registry = PieceRegistry::standard_layout(&cfg);
        let kind = PieceKind::new(PieceColor::White, PieceType::Queen);
        let queen = registry.find_template(kind).unwrap();

        registry.detach(queen).unwrap();

        assert_eq!(registry.find_template(kind), None);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let mut registry = PieceRegistry::default();
        assert!(matches!(
            registry.attach(PieceId(99)),
            Err(InteractionError::PieceNotFound { .. })
        ));
    }

    #[test]
    fn test_facing() {
        let white_knight = PieceKind::new(PieceColor::White, PieceType::Knight);
        let black_knight = PieceKind::new(PieceColor::Black, PieceType::Knight);
        assert_eq!(facing(white_knight), Quat::from_rotation_y(PI));
        assert_eq!(facing(black_knight), Quat::IDENTITY);
    }

    #[test]
    fn test_pick_volume_scales_with_piece() {
        let cfg = config();
        let mut registry = PieceRegistry::default();
        let id = registry.create_piece(
            PieceKind::new(PieceColor::White, PieceType::Pawn),
            BoardCell::new(6, 0),
            &cfg,
        );
        let full = registry.get(id).unwrap().pick_volume();
        registry.get_mut(id).unwrap().transform.scale = Vec3::splat(0.01);
        let shrunk = registry.get(id).unwrap().pick_volume();
        assert!(shrunk.max.y < full.max.y);
    }
}
