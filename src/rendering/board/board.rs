//! Board creation
//!
//! Uses the batch spawning pattern: all 64 squares are collected first and
//! spawned in one pass. Squares carry no observers; picking against the
//! board is a plane intersection in [`crate::input::picking`].

use crate::core::InteractionConfig;
use crate::game::components::BoardCell;
use crate::game::resources::board_position;
use crate::rendering::utils::{Square, SquareMaterials};
use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Board;

/// Thickness of the frame slab under the squares
const FRAME_DEPTH: f32 = 0.2;

pub fn create_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<SquareMaterials>,
    config: Res<InteractionConfig>,
) {
    let size = config.square_size;
    let square_mesh = meshes.add(Plane3d::default().mesh().size(size, size));

    let squares: Vec<_> = (0..8u8)
        .flat_map(|row| {
            let light = materials.light.clone();
            let dark = materials.dark.clone();
            let mesh = square_mesh.clone();
            let config = config.clone();

            (0..8u8).map(move |col| {
                let square = Square {
                    cell: BoardCell::new(row, col),
                };
                let material = if square.is_light() {
                    light.clone()
                } else {
                    dark.clone()
                };
                let centre = board_position(square.cell, &config).with_y(0.0);
                (
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(centre),
                    Name::new(format!("Square {}", square.name())),
                    square,
                    Board,
                )
            })
        })
        .collect();
    commands.spawn_batch(squares);

    let edge = config.board_half_extent() * 2.0 + size * 0.5;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(edge, FRAME_DEPTH, edge))),
        MeshMaterial3d(materials.frame.clone()),
        Transform::from_xyz(0.0, -FRAME_DEPTH / 2.0 - 0.001, 0.0),
        Name::new("Board Frame"),
        Board,
    ));
    info!("[SCENE] Board created ({}×{} squares of {})", 8, 8, size);
}
