//! Focal lighting - a spot light the panel can move, and its mirror image
//!
//! Two spot lights point at the board centre. The primary one sits at
//! [`ControlPanel::focal_light`]; the second mirrors it through the board's
//! vertical axis (x and z negated) so both sides of every piece are lit.
//! A dim directional light provides fill.

use crate::core::ControlPanel;
use bevy::prelude::*;

/// Spot light driven by the focal light sliders
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocalLight {
    pub mirrored: bool,
}

impl FocalLight {
    /// Where this light belongs for the given panel
    pub fn position(&self, panel: &ControlPanel) -> Vec3 {
        if self.mirrored {
            panel.mirrored_focal_light()
        } else {
            panel.focal_light
        }
    }
}

fn aimed_at_board(position: Vec3) -> Transform {
    Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y)
}

pub fn spawn_lights(mut commands: Commands, panel: Res<ControlPanel>) {
    for mirrored in [false, true] {
        let light = FocalLight { mirrored };
        commands.spawn((
            SpotLight {
                intensity: 4_000_000.0,
                color: Color::srgb(1.0, 0.96, 0.9),
                shadows_enabled: true,
                range: 30.0,
                radius: 0.3,
                inner_angle: 0.4,
                outer_angle: 0.9,
                ..default()
            },
            aimed_at_board(light.position(&panel)),
            light,
            Name::new(if mirrored {
                "Mirrored Focal Light"
            } else {
                "Focal Light"
            }),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 800.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Fill Light"),
    ));
    info!("[SCENE] Lights placed, focal light at {:?}", panel.focal_light);
}

/// Follow the focal light sliders
pub fn update_focal_lights(
    panel: Res<ControlPanel>,
    mut lights: Query<(&mut Transform, &FocalLight)>,
) {
    if !panel.is_changed() {
        return;
    }
    for (mut transform, light) in lights.iter_mut() {
        transform.set_if_neq(aimed_at_board(light.position(&panel)));
    }
}
