//! Pointer capture - mouse clicks on the 3D view become [`PointerAction`]s
//!
//! Runs in [`ShowcaseSystems::Input`]. A click is dropped when:
//!
//! - egui wants the pointer (the click landed on the settings panel),
//! - the cursor is outside the window,
//! - the camera cannot produce a ray (degenerate projection).
//!
//! Everything else about the click is decided by the state machine.

use super::picking::{normalize_pointer, pointer_ray};
use crate::game::events::{PointerAction, PointerButton};
use crate::game::system_sets::ShowcaseSystems;
use crate::rendering::ShowcaseCamera;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

/// The button pressed this frame, left taking priority
pub fn pressed_button(buttons: &ButtonInput<MouseButton>) -> Option<PointerButton> {
    if buttons.just_pressed(MouseButton::Left) {
        Some(PointerButton::Primary)
    } else if buttons.just_pressed(MouseButton::Right) {
        Some(PointerButton::Secondary)
    } else {
        None
    }
}

/// Turn a click on the 3D view into a [`PointerAction`]
pub fn capture_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<ShowcaseCamera>>,
    mut contexts: EguiContexts,
    mut actions: MessageWriter<PointerAction>,
) {
    let Some(button) = pressed_button(&buttons) else {
        return;
    };
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            trace!("[INPUT] Click consumed by the settings panel");
            return;
        }
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, transform)) = cameras.single() else {
        warn!("[INPUT] No showcase camera to cast from");
        return;
    };

    let ndc = normalize_pointer(cursor, window.size());
    let Some(ray) = pointer_ray(camera, transform, ndc) else {
        debug!("[INPUT] Degenerate pick ray at {:?}", ndc);
        return;
    };
    actions.write(PointerAction { ray, button });
}

/// Mouse capture for the interactive binary
pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, capture_pointer.in_set(ShowcaseSystems::Input));
    }
}
