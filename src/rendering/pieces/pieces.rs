//! Chess piece rendering - primitive models mirrored from the registry
//!
//! Every piece is a root entity carrying [`PieceEntity`] and the record's
//! transform, with one child per model part. The parts are built from Bevy
//! primitives (cylinders, spheres, cuboids) stacked in model space; their
//! outer extents match [`PieceType::model_half_extents`] so what you see is
//! what picking tests against.
//!
//! # Data Flow
//!
//! The registry is the only source of truth:
//!
//! 1. [`materialize_pieces`] spawns entities for records that have none and
//!    writes the new entity back into the record.
//! 2. [`sync_piece_entities`] copies transform, attachment (as visibility)
//!    and opacity onto the entity every time the registry changes.
//!
//! Entities are never despawned on capture, only hidden. "Start" despawns
//! them through the list returned by [`PieceRegistry::reset`].

use crate::core::{ControlPanel, MaterialType};
use crate::game::components::{PieceColor, PieceEntity, PieceMesh, PieceType};
use crate::game::resources::{PieceRecord, PieceRegistry};
use crate::rendering::utils::{fade_material, piece_material, FadeMaterial, PieceMaterials};
use bevy::prelude::*;
use std::collections::HashMap;

/// Primitive making up part of a piece model
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartShape {
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    Cuboid { size: Vec3 },
}

impl PartShape {
    fn mesh(&self) -> Mesh {
        match *self {
            PartShape::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
            PartShape::Sphere { radius } => Sphere::new(radius).into(),
            PartShape::Cuboid { size } => Cuboid::from_size(size).into(),
        }
    }

    /// Highest point of the part when centred on `offset`
    pub fn top(&self, offset: Vec3) -> f32 {
        offset.y
            + match *self {
                PartShape::Cylinder { height, .. } => height / 2.0,
                PartShape::Sphere { radius } => radius,
                PartShape::Cuboid { size } => size.y / 2.0,
            }
    }
}

const fn cylinder(radius: f32, height: f32, y: f32) -> (PartShape, Vec3) {
    (PartShape::Cylinder { radius, height }, Vec3::new(0.0, y, 0.0))
}

/// Model-space parts of each piece type, base first
pub fn piece_parts(piece_type: PieceType) -> Vec<(PartShape, Vec3)> {
    match piece_type {
        PieceType::King => vec![
            cylinder(0.4, 0.2, 0.1),
            cylinder(0.27, 1.2, 0.8),
            (
                PartShape::Cuboid {
                    size: Vec3::new(0.1, 0.3, 0.1),
                },
                Vec3::new(0.0, 1.55, 0.0),
            ),
            (
                PartShape::Cuboid {
                    size: Vec3::new(0.3, 0.1, 0.1),
                },
                Vec3::new(0.0, 1.55, 0.0),
            ),
        ],
        PieceType::Queen => vec![
            cylinder(0.4, 0.2, 0.1),
            cylinder(0.25, 1.0, 0.7),
            (PartShape::Sphere { radius: 0.3 }, Vec3::new(0.0, 1.2, 0.0)),
        ],
        PieceType::Bishop => vec![
            cylinder(0.35, 0.2, 0.1),
            cylinder(0.2, 0.8, 0.6),
            (PartShape::Sphere { radius: 0.2 }, Vec3::new(0.0, 1.1, 0.0)),
        ],
        PieceType::Knight => vec![
            cylinder(0.35, 0.2, 0.1),
            (
                PartShape::Cuboid {
                    size: Vec3::new(0.3, 0.6, 0.3),
                },
                Vec3::new(0.0, 0.5, 0.0),
            ),
            (
                PartShape::Cuboid {
                    size: Vec3::new(0.25, 0.3, 0.5),
                },
                Vec3::new(0.0, 0.95, 0.1),
            ),
        ],
        PieceType::Rook => vec![
            cylinder(0.35, 0.2, 0.1),
            cylinder(0.25, 0.6, 0.5),
            cylinder(0.32, 0.2, 0.9),
        ],
        PieceType::Pawn => vec![
            cylinder(0.3, 0.2, 0.1),
            cylinder(0.15, 0.4, 0.4),
            (PartShape::Sphere { radius: 0.18 }, Vec3::new(0.0, 0.62, 0.0)),
        ],
    }
}

#[derive(Clone, Debug)]
pub struct PiecePart {
    pub mesh: Handle<Mesh>,
    pub offset: Vec3,
}

/// Mesh handles of every piece type, built once at startup
#[derive(Resource, Debug)]
pub struct PieceMeshes {
    pub parts: HashMap<PieceType, Vec<PiecePart>>,
}

impl FromWorld for PieceMeshes {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let types = [
            PieceType::King,
            PieceType::Queen,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
            PieceType::Pawn,
        ];
        let parts = types
            .into_iter()
            .map(|piece_type| {
                let parts = piece_parts(piece_type)
                    .into_iter()
                    .map(|(shape, offset)| PiecePart {
                        mesh: meshes.add(shape.mesh()),
                        offset,
                    })
                    .collect();
                (piece_type, parts)
            })
            .collect();
        PieceMeshes { parts }
    }
}

fn visibility_of(record: &PieceRecord) -> Visibility {
    if record.attached {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Spawn entities for records that have not been materialized yet
pub fn materialize_pieces(
    mut commands: Commands,
    mut registry: ResMut<PieceRegistry>,
    piece_meshes: Res<PieceMeshes>,
    piece_materials: Res<PieceMaterials>,
) {
    if registry.iter().all(|record| record.entity.is_some()) {
        return;
    }
    let mut spawned = 0;
    for record in registry.iter_mut().filter(|r| r.entity.is_none()) {
        let material = piece_materials.for_color(record.kind.color);
        let parts = piece_meshes
            .parts
            .get(&record.kind.piece_type)
            .cloned()
            .unwrap_or_default();
        let entity = commands
            .spawn((
                PieceEntity(record.id),
                record.transform,
                visibility_of(record),
                Name::new(format!("{} {}", record.kind, record.id)),
            ))
            .with_children(|parent| {
                for part in parts {
                    parent.spawn((
                        Mesh3d(part.mesh),
                        MeshMaterial3d(material.clone()),
                        Transform::from_translation(part.offset),
                        PieceMesh,
                    ));
                }
            })
            .id();
        record.entity = Some(entity);
        spawned += 1;
    }
    debug!("[SCENE] Materialized {} piece(s)", spawned);
}

/// Mirror transform, visibility and opacity of every record onto its entity
#[allow(clippy::type_complexity)]
pub fn sync_piece_entities(
    mut commands: Commands,
    registry: Res<PieceRegistry>,
    piece_materials: Res<PieceMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut roots: Query<
        (&mut Transform, &mut Visibility, &Children, Option<&FadeMaterial>),
        With<PieceEntity>,
    >,
    mut parts: Query<&mut MeshMaterial3d<StandardMaterial>, With<PieceMesh>>,
) {
    for record in registry.iter() {
        let Some(entity) = record.entity else {
            continue;
        };
        let Ok((mut transform, mut visibility, children, fade)) = roots.get_mut(entity) else {
            continue;
        };
        transform.set_if_neq(record.transform);
        visibility.set_if_neq(visibility_of(record));

        let shared = piece_materials.for_color(record.kind.color);
        let wanted = match (record.transparent, fade) {
            (true, Some(FadeMaterial(handle))) => {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color.set_alpha(record.opacity.clamp(0.0, 1.0));
                }
                handle.clone()
            }
            (true, None) => {
                let Some(base) = materials.get(&shared).cloned() else {
                    continue;
                };
                let handle = materials.add(fade_material(&base, record.opacity));
                commands.entity(entity).insert(FadeMaterial(handle.clone()));
                trace!("[SCENE] {} switched to a private material", record.id);
                handle
            }
            (false, Some(_)) => {
                commands.entity(entity).remove::<FadeMaterial>();
                shared
            }
            (false, None) => shared,
        };

        for child in children.iter() {
            if let Ok(mut material) = parts.get_mut(child) {
                if material.0 != wanted {
                    material.0 = wanted.clone();
                }
            }
        }
    }
}

/// Apply the panel's surface preset to both shared piece materials
pub fn apply_material_type(
    panel: Res<ControlPanel>,
    piece_materials: Res<PieceMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut applied: Local<Option<MaterialType>>,
) {
    if *applied == Some(panel.material_type) {
        return;
    }
    for (handle, color) in [
        (&piece_materials.white, PieceColor::White),
        (&piece_materials.black, PieceColor::Black),
    ] {
        if let Some(material) = materials.get_mut(handle) {
            *material = piece_material(color, panel.material_type);
        }
    }
    *applied = Some(panel.material_type);
    info!("[SCENE] Piece surface set to {}", panel.material_type.name());
}
