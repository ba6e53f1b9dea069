//! Interaction systems - feed messages to the state machine and advance time
//!
//! Nothing here returns an error to the scheduler. Every
//! [`InteractionError`] is logged at a level matching how surprising it is
//! and the showcase stays interactive.

use crate::core::{ControlPanel, InteractionError};
use crate::game::events::{ControlAction, PointerAction, PointerButton};
use crate::game::resources::{Completion, InteractionParams};
use bevy::prelude::*;

/// Log a refused transition
pub fn report_interaction_error(error: &InteractionError) {
    match error {
        InteractionError::Busy | InteractionError::NothingSelected => {
            debug!("[INTERACTION] Ignored: {}", error)
        }
        InteractionError::MissingTemplate { .. } => {
            error!("[INTERACTION] Promotion aborted: {}", error)
        }
        _ => warn!("[INTERACTION] {}", error),
    }
}

/// Route clicks on the 3D view to the state machine
pub fn handle_pointer_actions(
    mut actions: MessageReader<PointerAction>,
    mut interaction: InteractionParams,
) {
    for action in actions.read() {
        let (machine, mut ctx) = interaction.split();
        let result = match action.button {
            PointerButton::Primary => machine.left_click(action.ray, &mut ctx),
            PointerButton::Secondary => machine.right_click(&mut ctx),
        };
        if let Err(e) = result {
            report_interaction_error(&e);
        }
    }
}

/// Apply settings panel actions
pub fn handle_control_actions(
    mut commands: Commands,
    mut actions: MessageReader<ControlAction>,
    mut interaction: InteractionParams,
    mut panel: ResMut<ControlPanel>,
) {
    for action in actions.read() {
        match action {
            ControlAction::StartGame => {
                interaction.driver.cancel_all();
                interaction.machine.reset();
                let stale = interaction.registry.reset(&interaction.config);
                for entity in stale {
                    commands.entity(entity).despawn();
                }
                panel.promotion_menu_open = false;
                info!("[CONTROLS] Board reset to the starting layout");
            }
            ControlAction::WithdrawMove => {
                let (machine, mut ctx) = interaction.split();
                machine.undo(&mut ctx);
                panel.promotion_menu_open = false;
            }
            ControlAction::PromotePawn => {
                if interaction.machine.promotion_available(&interaction.registry) {
                    panel.promotion_menu_open = true;
                } else {
                    debug!("[CONTROLS] Promotion needs a selected pawn");
                }
            }
            ControlAction::ConfirmPromotion => {
                let choice = panel.promotion_option;
                let (machine, mut ctx) = interaction.split();
                match machine.promote_selected(choice, &mut ctx) {
                    Ok(promoted) => {
                        debug!("[CONTROLS] Promotion to {} started ({})", choice.name(), promoted)
                    }
                    Err(e) => report_interaction_error(&e),
                }
            }
        }
    }
}

/// Advance running tweens by the frame time and report finished sequences
pub fn advance_animations(
    time: Res<Time>,
    mut interaction: InteractionParams,
    mut panel: ResMut<ControlPanel>,
) {
    if interaction.driver.is_idle() {
        return;
    }
    let InteractionParams {
        machine,
        registry,
        driver,
        ..
    } = &mut interaction;
    for completion in driver.advance(time.delta(), registry) {
        if matches!(completion, Completion::PromotionFinished { .. }) {
            panel.promotion_menu_open = false;
        }
        machine.complete(completion);
    }
}
