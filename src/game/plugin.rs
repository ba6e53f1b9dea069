//! Interaction plugin - registers the interaction core with Bevy
//!
//! # Plugin Architecture
//!
//! - Resource initialization in `build()`; a [`PieceRegistry`] holding the
//!   starting layout is inserted unless one is already present
//! - Message registration for [`PointerAction`] and [`ControlAction`]
//! - System registration with explicit ordering via [`ShowcaseSystems`]
//! - Type registration for reflection support
//!
//! # Plugin Dependencies
//!
//! Only needs `MinimalPlugins` (for `Time`) to run, which is how the
//! integration tests drive it. Rendering, pointer capture and the settings
//! panel are added by [`crate::rendering::ShowcasePlugin`],
//! [`crate::input::PointerInputPlugin`] and [`crate::ui::ControlPanelPlugin`].
//!
//! An [`InteractionConfig`] inserted before this plugin is kept; otherwise
//! the defaults are used.

use super::components::*;
use super::events::{ControlAction, PointerAction, PointerButton};
use super::resources::*;
use super::system_sets::ShowcaseSystems;
use super::systems::*;
use crate::core::{CameraView, ControlPanel, InteractionConfig, MaterialType, PromotionChoice};
use bevy::prelude::*;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionConfig>()
            .init_resource::<ControlPanel>()
            .init_resource::<InteractionMachine>()
            .init_resource::<AnimationDriver>();

        if !app.world().contains_resource::<PieceRegistry>() {
            let registry = app
                .world()
                .get_resource::<InteractionConfig>()
                .map(PieceRegistry::standard_layout)
                .unwrap_or_default();
            info!("[SCENE] Starting layout with {} pieces", registry.len());
            app.insert_resource(registry);
        }

        app.register_type::<InteractionConfig>()
            .register_type::<ControlPanel>()
            .register_type::<MaterialType>()
            .register_type::<CameraView>()
            .register_type::<PromotionChoice>()
            .register_type::<PieceColor>()
            .register_type::<PieceType>()
            .register_type::<PieceKind>()
            .register_type::<PieceId>()
            .register_type::<BoardCell>()
            .register_type::<PieceEntity>()
            .register_type::<PieceMesh>()
            .register_type::<PointerButton>()
            .register_type::<MotionKind>();

        app.add_message::<PointerAction>()
            .add_message::<ControlAction>();

        // Input → Interaction → Animation → Sync
        app.configure_sets(
            Update,
            (
                ShowcaseSystems::Input,
                ShowcaseSystems::Interaction,
                ShowcaseSystems::Animation,
                ShowcaseSystems::Sync,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                (handle_control_actions, handle_pointer_actions)
                    .chain()
                    .in_set(ShowcaseSystems::Interaction),
                advance_animations.in_set(ShowcaseSystems::Animation),
            ),
        );
    }
}
