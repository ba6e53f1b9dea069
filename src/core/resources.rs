//! Core resources for configuration and GUI-bound settings
//!
//! - [`InteractionConfig`] - heights, scales and tween durations used by the
//!   interaction core. Optionally read from a JSON file at startup.
//! - [`ControlPanel`] - the fields the settings panel binds to (material,
//!   camera view, focal light, promotion option).
//!
//! Nothing here is persisted: the config file is read-only input and the
//! panel state lives for the session only.

use super::error::InteractionResult;
use crate::game::components::PieceType;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Tunable constants of the interaction core
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct InteractionConfig {
    /// Height of a piece resting on the board
    pub resting_height: f32,
    /// Height of a selected piece
    pub lift_height: f32,
    /// Height pieces rise to before capture or promotion
    pub rise_height: f32,
    /// Uniform scale of a piece at rest
    pub piece_scale: f32,
    /// Scale a piece shrinks to when it vanishes
    pub vanish_scale: f32,
    /// Edge length of one board square
    pub square_size: f32,
    pub select_ms: u64,
    pub slide_ms: u64,
    pub drop_ms: u64,
    pub rise_ms: u64,
    pub fade_ms: u64,
    pub undo_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            resting_height: 0.01,
            lift_height: 0.3,
            rise_height: 1.0,
            piece_scale: 0.7,
            vanish_scale: 0.01,
            square_size: 1.0,
            select_ms: 200,
            slide_ms: 500,
            drop_ms: 200,
            rise_ms: 300,
            fade_ms: 500,
            undo_ms: 500,
        }
    }
}

impl InteractionConfig {
    /// Read a config from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> InteractionResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Half the board's edge length
    pub fn board_half_extent(&self) -> f32 {
        self.square_size * 4.0
    }

    pub fn select_duration(&self) -> Duration {
        Duration::from_millis(self.select_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    pub fn drop_duration(&self) -> Duration {
        Duration::from_millis(self.drop_ms)
    }

    pub fn rise_duration(&self) -> Duration {
        Duration::from_millis(self.rise_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn undo_duration(&self) -> Duration {
        Duration::from_millis(self.undo_ms)
    }
}

/// Surface finish applied to both piece materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum MaterialType {
    #[default]
    Plastic,
    Metal,
    Wood,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [MaterialType::Plastic, MaterialType::Metal, MaterialType::Wood];

    pub fn name(&self) -> &'static str {
        match self {
            MaterialType::Plastic => "Plastic",
            MaterialType::Metal => "Metal",
            MaterialType::Wood => "Wood",
        }
    }

    /// Returns (metallic, perceptual_roughness)
    pub fn surface(&self) -> (f32, f32) {
        match self {
            MaterialType::Plastic => (0.2, 0.8),
            MaterialType::Metal => (0.7, 0.2),
            MaterialType::Wood => (0.1, 0.9),
        }
    }
}

/// Camera presets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect, clap::ValueEnum,
)]
pub enum CameraView {
    #[default]
    Free,
    White,
    Black,
}

impl CameraView {
    pub const ALL: [CameraView; 3] = [CameraView::Free, CameraView::White, CameraView::Black];

    pub fn name(&self) -> &'static str {
        match self {
            CameraView::Free => "Free",
            CameraView::White => "White",
            CameraView::Black => "Black",
        }
    }

    /// Camera position for this preset; every preset looks at the origin
    pub fn eye(&self) -> Vec3 {
        match self {
            CameraView::Free => Vec3::new(5.0, 4.0, 5.0),
            CameraView::White => Vec3::new(0.0, 3.0, 7.0),
            CameraView::Black => Vec3::new(0.0, 3.0, -7.0),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Piece a pawn can be promoted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum PromotionChoice {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    pub fn piece_type(&self) -> PieceType {
        match self {
            PromotionChoice::Queen => PieceType::Queen,
            PromotionChoice::Rook => PieceType::Rook,
            PromotionChoice::Bishop => PieceType::Bishop,
            PromotionChoice::Knight => PieceType::Knight,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PromotionChoice::Queen => "Queen",
            PromotionChoice::Rook => "Rook",
            PromotionChoice::Bishop => "Bishop",
            PromotionChoice::Knight => "Knight",
        }
    }
}

/// Focal light slider ranges, as (min, max) per axis
pub const FOCAL_LIGHT_RANGE_X: (f32, f32) = (-10.0, 10.0);
pub const FOCAL_LIGHT_RANGE_Y: (f32, f32) = (0.0, 10.0);
pub const FOCAL_LIGHT_RANGE_Z: (f32, f32) = (-10.0, 10.0);

/// Fields bound to the settings panel
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct ControlPanel {
    pub material_type: MaterialType,
    pub camera_view: CameraView,
    /// Position of the primary focal light; the second light mirrors x and z
    pub focal_light: Vec3,
    pub promotion_option: PromotionChoice,
    /// Whether the "Promotion Options" section is shown
    pub promotion_menu_open: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            material_type: MaterialType::Plastic,
            camera_view: CameraView::Free,
            focal_light: Vec3::new(-4.0, 6.0, -4.0),
            promotion_option: PromotionChoice::Queen,
            promotion_menu_open: false,
        }
    }
}

impl ControlPanel {
    /// Position of the mirrored focal light
    pub fn mirrored_focal_light(&self) -> Vec3 {
        Vec3::new(-self.focal_light.x, self.focal_light.y, -self.focal_light.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_resting_layout() {
        //! Resting height and scale are the values every piece is created with
        let config = InteractionConfig::default();
        assert_eq!(config.resting_height, 0.01);
        assert_eq!(config.piece_scale, 0.7);
        assert_eq!(config.board_half_extent(), 4.0);
        assert_eq!(config.select_duration(), Duration::from_millis(200));
        assert_eq!(config.slide_duration(), Duration::from_millis(500));
        assert_eq!(config.undo_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        //! A config file only needs the fields it overrides
        let config: InteractionConfig = serde_json::from_str(r#"{ "lift_height": 0.5 }"#)
            .expect("partial config should parse");
        assert_eq!(config.lift_height, 0.5);
        assert_eq!(config.rise_height, 1.0);
    }

    #[test]
    fn test_material_surfaces() {
        assert_eq!(MaterialType::Plastic.surface(), (0.2, 0.8));
        assert_eq!(MaterialType::Metal.surface(), (0.7, 0.2));
        assert_eq!(MaterialType::Wood.surface(), (0.1, 0.9));
    }

    #[test]
    fn test_camera_presets_look_at_origin() {
        for view in CameraView::ALL {
            let transform = view.transform();
            let forward = transform.forward();
            let to_origin = (Vec3::ZERO - view.eye()).normalize();
            assert!(forward.dot(to_origin) > 0.999, "{:?} should face the board", view);
        }
    }

    #[test]
    fn test_focal_light_mirror() {
        let panel = ControlPanel {
            focal_light: Vec3::new(2.0, 5.0, -3.0),
            ..default()
        };
        assert_eq!(panel.mirrored_focal_light(), Vec3::new(-2.0, 5.0, 3.0));
    }
}
