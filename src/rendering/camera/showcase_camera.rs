//! Showcase camera - presets and a free orbit around the board
//!
//! The White and Black presets put the camera behind each side and the Free
//! preset starts from a three-quarter view. Every preset is only a starting
//! point; from any of them the camera can be orbited:
//!
//! - **Middle mouse drag** rotates around the board centre
//! - **Mouse wheel** moves closer or further away, between 3 and 10 units
//!
//! Picking a preset in the panel jumps back to its position.
//!
//! Left and right clicks are reserved for selection and capture, so the
//! orbit never uses them.
//!
//! `AccumulatedMouseMotion` and `AccumulatedMouseScroll` are already
//! accumulated per frame and are not scaled by delta time.

use crate::core::{CameraView, ControlPanel};
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

/// Radians of orbit per pixel of mouse motion
const RADIANS_PER_DOT: f32 = 1.0 / 180.0;

/// Marker for the camera pointer rays are cast from
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ShowcaseCamera;

/// Spherical coordinates of the camera around the board centre
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct OrbitController {
    pub yaw: f32,
    /// Elevation above the board plane
    pub pitch: f32,
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub zoom_speed: f32,
    pub rotation_sensitivity: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::from_eye(CameraView::Free.eye())
    }
}

impl OrbitController {
    pub const MIN_PITCH: f32 = 0.1;
    pub const MAX_PITCH: f32 = 1.5;

    /// Controller whose camera sits at `eye`
    pub fn from_eye(eye: Vec3) -> Self {
        let radius = eye.length().max(f32::EPSILON);
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: (eye.y / radius).clamp(-1.0, 1.0).asin(),
            radius,
            min_radius: 3.0,
            max_radius: 10.0,
            zoom_speed: 0.5,
            rotation_sensitivity: 1.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let horizontal = self.radius * self.pitch.cos();
        Vec3::new(
            horizontal * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// Apply a frame of mouse motion
    pub fn rotate(&mut self, delta: Vec2) {
        let step = RADIANS_PER_DOT * self.rotation_sensitivity;
        self.yaw -= delta.x * step;
        self.pitch = (self.pitch + delta.y * step).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
    }

    /// Apply a frame of scrolling; positive scrolls towards the board
    pub fn zoom(&mut self, scroll: f32) {
        self.radius = (self.radius - scroll * self.zoom_speed).clamp(self.min_radius, self.max_radius);
    }
}

pub fn spawn_camera(mut commands: Commands, panel: Res<ControlPanel>) {
    let orbit = OrbitController::from_eye(panel.camera_view.eye());
    commands.spawn((
        Camera3d::default(),
        panel.camera_view.transform(),
        orbit,
        ShowcaseCamera,
        Name::new("Showcase Camera"),
    ));
    info!("[SCENE] Camera spawned with {} view", panel.camera_view.name());
}

/// Jump to the selected preset whenever it changes
pub fn apply_camera_view(
    panel: Res<ControlPanel>,
    mut cameras: Query<(&mut Transform, &mut OrbitController), With<ShowcaseCamera>>,
    mut applied: Local<Option<CameraView>>,
) {
    if *applied == Some(panel.camera_view) {
        return;
    }
    for (mut transform, mut orbit) in cameras.iter_mut() {
        let preset = OrbitController::from_eye(panel.camera_view.eye());
        orbit.yaw = preset.yaw;
        orbit.pitch = preset.pitch;
        orbit.radius = preset.radius;
        *transform = panel.camera_view.transform();
    }
    *applied = Some(panel.camera_view);
    debug!("[SCENE] Camera view set to {}", panel.camera_view.name());
}

/// Orbit and zoom around the board centre
pub fn orbit_camera(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<(&mut Transform, &mut OrbitController), With<ShowcaseCamera>>,
) {
    let rotating = mouse_button.pressed(MouseButton::Middle) && mouse_motion.delta != Vec2::ZERO;
    let zooming = mouse_scroll.delta.y != 0.0;
    if !rotating && !zooming {
        return;
    }
    for (mut transform, mut orbit) in cameras.iter_mut() {
        if rotating {
            orbit.rotate(mouse_motion.delta);
        }
        if zooming {
            orbit.zoom(mouse_scroll.delta.y);
        }
        *transform = orbit.transform();
    }
}
