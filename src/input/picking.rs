//! Picking - turns a pointer position into a piece or a board point
//!
//! Picking runs in three steps:
//!
//! 1. [`normalize_pointer`] maps window pixels to normalized device
//!    coordinates in [-1, 1] on both axes (y up).
//! 2. [`pointer_ray`] unprojects those coordinates into a world ray through
//!    the camera.
//! 3. The ray is tested against either the pieces ([`pick_piece`]) or the
//!    board plane ([`pick_board`]), depending on whether a piece is already
//!    selected.
//!
//! Candidates for [`pick_piece`] come straight from the [`PieceRegistry`]:
//! only attached pieces are considered, each through its bounding volume.
//! There is no scene traversal and no material test; a hit is always a
//! whole piece.

use crate::core::InteractionConfig;
use crate::game::components::PieceId;
use crate::game::resources::PieceRegistry;
use bevy::math::bounding::RayCast3d;
use bevy::math::primitives::InfinitePlane3d;
use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;

/// Window position (pixels, y down) to NDC (y up)
pub fn normalize_pointer(cursor: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        (cursor.x / window_size.x) * 2.0 - 1.0,
        -(cursor.y / window_size.y) * 2.0 + 1.0,
    )
}

/// World ray through `ndc`, starting on the camera's near plane
///
/// Bevy projections are reversed-z: the near plane sits at depth 1 and the
/// far plane towards 0.
pub fn pointer_ray(camera: &Camera, transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    let near = camera.ndc_to_world(transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d {
        origin: near,
        direction,
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceHit {
    pub piece: PieceId,
    pub distance: f32,
}

/// Nearest attached piece along `ray`
///
/// Ties keep the piece that comes first in id order.
pub fn pick_piece(ray: Ray3d, registry: &PieceRegistry) -> Option<PieceHit> {
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    registry
        .attached()
        .filter_map(|record| {
            cast.aabb_intersection_at(&record.pick_volume())
                .map(|distance| PieceHit {
                    piece: record.id,
                    distance,
                })
        })
        .fold(None, |best: Option<PieceHit>, hit| match best {
            Some(best) if best.distance <= hit.distance => Some(best),
            _ => Some(hit),
        })
}

/// Point where `ray` meets the board, or `None` if it misses the 8×8 area
pub fn pick_board(ray: Ray3d, config: &InteractionConfig) -> Option<Vec3> {
    let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
    let point = ray.get_point(distance);
    let half = config.board_half_extent();
    (point.x.abs() <= half && point.z.abs() <= half).then_some(point)
}
