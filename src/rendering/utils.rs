//! Rendering utilities - board squares and piece materials
//!
//! - **Square**: component identifying a board square by cell
//! - **SquareMaterials**: light and dark square materials
//! - **PieceMaterials**: the two shared piece materials, one per color
//! - **FadeMaterial**: a private blended copy given to a piece while it fades
//!
//! Pieces normally share the material of their color, so a surface preset
//! change touches exactly two assets. A fading piece gets its own copy
//! because its opacity must not leak onto the other fifteen pieces.

use crate::core::MaterialType;
use crate::game::components::{BoardCell, PieceColor};
use bevy::color::palettes::tailwind::*;
use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Square {
    pub cell: BoardCell,
}

impl Square {
    /// Light squares sit where row and column share parity
    pub fn is_light(&self) -> bool {
        (self.cell.row + self.cell.col).is_multiple_of(2)
    }

    /// Algebraic name as seen from white, e.g. "a1" for row 7, col 0
    pub fn name(&self) -> String {
        let file = (b'a' + self.cell.col) as char;
        let rank = 8 - self.cell.row;
        format!("{}{}", file, rank)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SquareMaterials {
    pub light: Handle<StandardMaterial>,
    pub dark: Handle<StandardMaterial>,
    pub frame: Handle<StandardMaterial>,
}

impl FromWorld for SquareMaterials {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        SquareMaterials {
            light: materials.add(Color::from(STONE_200)),
            dark: materials.add(Color::from(STONE_700)),
            frame: materials.add(Color::from(STONE_900)),
        }
    }
}

/// Surface of a shared piece material
pub fn piece_material(color: PieceColor, surface: MaterialType) -> StandardMaterial {
    let (metallic, perceptual_roughness) = surface.surface();
    let base_color = match color {
        PieceColor::White => Color::from(NEUTRAL_100),
        PieceColor::Black => Color::from(NEUTRAL_800),
    };
    StandardMaterial {
        base_color,
        metallic,
        perceptual_roughness,
        ..default()
    }
}

/// Blended copy of `shared` at `opacity`
pub fn fade_material(shared: &StandardMaterial, opacity: f32) -> StandardMaterial {
    let mut faded = shared.clone();
    faded.alpha_mode = AlphaMode::Blend;
    faded.base_color.set_alpha(opacity.clamp(0.0, 1.0));
    faded
}

/// Shared white and black piece materials
#[derive(Resource, Debug, Clone)]
pub struct PieceMaterials {
    pub white: Handle<StandardMaterial>,
    pub black: Handle<StandardMaterial>,
}

impl PieceMaterials {
    pub fn for_color(&self, color: PieceColor) -> Handle<StandardMaterial> {
        match color {
            PieceColor::White => self.white.clone(),
            PieceColor::Black => self.black.clone(),
        }
    }
}

impl FromWorld for PieceMaterials {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let surface = MaterialType::default();
        PieceMaterials {
            white: materials.add(piece_material(PieceColor::White, surface)),
            black: materials.add(piece_material(PieceColor::Black, surface)),
        }
    }
}

/// Private material of a piece that is currently transparent
#[derive(Component, Debug, Clone)]
pub struct FadeMaterial(pub Handle<StandardMaterial>);
