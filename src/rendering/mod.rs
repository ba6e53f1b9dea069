//! Rendering module - the 3D view of the interaction core
//!
//! Nothing in here makes decisions. Every visible property of a piece comes
//! from its record in [`crate::game::resources::PieceRegistry`]; this module
//! only spawns entities for those records and keeps them in sync.
//!
//! # Architecture
//!
//! - `board` - 64 square planes on a frame slab
//! - `pieces` - primitive piece models, materialization and per-frame sync
//! - `camera` - preset views and the free orbit
//! - `effects` - focal spot lights and their mirror
//! - `utils` - shared square and piece materials
//!
//! # Rendering Components
//!
//! - `Mesh3d` - mesh handle of each model part
//! - `MeshMaterial3d<StandardMaterial>` - shared per color, private while fading
//! - `Transform` - copied from the record every frame
//! - `Visibility` - hidden while a record is detached

pub mod board;
pub mod camera;
pub mod effects;
pub mod pieces;
pub mod utils;

pub use board::*;
pub use camera::*;
pub use effects::*;
pub use pieces::*;
pub use utils::*;

use crate::game::system_sets::ShowcaseSystems;
use bevy::prelude::*;

/// Board, pieces, camera and lights
///
/// Add after [`crate::game::InteractionPlugin`], which provides the
/// registry and panel resources read here.
pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SquareMaterials>()
            .init_resource::<PieceMaterials>()
            .init_resource::<PieceMeshes>()
            .register_type::<OrbitController>();

        app.add_systems(Startup, (create_board, spawn_camera, spawn_lights))
            .add_systems(
                Update,
                (
                    orbit_camera.in_set(ShowcaseSystems::Input),
                    (
                        materialize_pieces,
                        sync_piece_entities,
                        apply_material_type,
                        apply_camera_view,
                        update_focal_lights,
                    )
                        .chain()
                        .in_set(ShowcaseSystems::Sync),
                ),
            );
    }
}
