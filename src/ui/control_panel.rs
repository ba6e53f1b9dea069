//! Settings panel - the egui window that drives the showcase
//!
//! Shows the surface, camera and focal light controls bound to
//! [`ControlPanel`], the Start / Withdraw Move / Promote Pawn buttons and,
//! while [`ControlPanel::promotion_menu_open`] is set, the "Promotion
//! Options" section.
//!
//! Buttons never touch the interaction core directly. They write a
//! [`ControlAction`] which [`crate::game::systems::handle_control_actions`]
//! consumes on the next `Update`.

use super::styles::PanelColors;
use crate::core::{
    CameraView, ControlPanel, MaterialType, PromotionChoice, FOCAL_LIGHT_RANGE_X,
    FOCAL_LIGHT_RANGE_Y, FOCAL_LIGHT_RANGE_Z,
};
use crate::game::events::ControlAction;
use crate::game::resources::{InteractionMachine, InteractionState, PieceRegistry};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

/// One-line description of what the interaction core is doing
pub fn status_line(state: InteractionState, registry: &PieceRegistry) -> String {
    let describe = |piece| {
        registry
            .get(piece)
            .map(|record| record.kind.to_string())
            .unwrap_or_else(|| format!("piece {}", piece))
    };
    match state {
        InteractionState::Idle => "Click a piece to select it".to_string(),
        InteractionState::Selected(piece) => format!("Selected: {}", describe(piece)),
        InteractionState::Moving { piece, action } => {
            format!("{}: {}", action.name(), describe(piece))
        }
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    ui.label(egui::RichText::new(text).size(15.0).color(color).strong());
}

/// Draw the settings panel and emit the actions of pressed buttons
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanel>,
    machine: Res<InteractionMachine>,
    registry: Res<PieceRegistry>,
    mut actions: MessageWriter<ControlAction>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut edited = panel.clone();
    let promotion_available = machine.promotion_available(&registry);
    let busy = machine.is_moving();

    egui::Window::new("Chess Showcase")
        .default_pos(egui::pos2(12.0, 12.0))
        .default_width(260.0)
        .resizable(false)
        .frame(
            egui::Frame::default()
                .fill(PanelColors::BG_MID)
                .corner_radius(8.0)
                .inner_margin(12.0)
                .stroke(egui::Stroke::new(1.0, PanelColors::BORDER)),
        )
        .show(ctx, |ui| {
            section_heading(ui, "Scene", PanelColors::TEXT_PRIMARY);

            ui.horizontal(|ui| {
                ui.label("Material:");
                egui::ComboBox::from_id_salt("material_type")
                    .selected_text(edited.material_type.name())
                    .show_ui(ui, |ui| {
                        for material in MaterialType::ALL {
                            ui.selectable_value(&mut edited.material_type, material, material.name());
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Camera:");
                egui::ComboBox::from_id_salt("camera_view")
                    .selected_text(edited.camera_view.name())
                    .show_ui(ui, |ui| {
                        for view in CameraView::ALL {
                            ui.selectable_value(&mut edited.camera_view, view, view.name());
                        }
                    });
            });

            ui.add_space(6.0);
            ui.label("Focal light");
            let light = &mut edited.focal_light;
            for (value, (min, max), axis) in [
                (&mut light.x, FOCAL_LIGHT_RANGE_X, "X"),
                (&mut light.y, FOCAL_LIGHT_RANGE_Y, "Y"),
                (&mut light.z, FOCAL_LIGHT_RANGE_Z, "Z"),
            ] {
                ui.add(egui::Slider::new(value, min..=max).text(axis));
            }

            ui.separator();
            section_heading(ui, "Game", PanelColors::TEXT_PRIMARY);

            ui.horizontal(|ui| {
                if ui.button("Start").clicked() {
                    actions.write(ControlAction::StartGame);
                }
                if ui.button("Withdraw Move").clicked() {
                    actions.write(ControlAction::WithdrawMove);
                }
                if ui
                    .add_enabled(promotion_available, egui::Button::new("Promote Pawn"))
                    .clicked()
                {
                    actions.write(ControlAction::PromotePawn);
                }
            });

            if edited.promotion_menu_open {
                ui.separator();
                section_heading(ui, "Promotion Options", PanelColors::ACCENT_GOLD);
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt("promotion_option")
                        .selected_text(edited.promotion_option.name())
                        .show_ui(ui, |ui| {
                            for choice in PromotionChoice::ALL {
                                ui.selectable_value(
                                    &mut edited.promotion_option,
                                    choice,
                                    choice.name(),
                                );
                            }
                        });
                    if ui.add_enabled(!busy, egui::Button::new("Confirm")).clicked() {
                        actions.write(ControlAction::ConfirmPromotion);
                    }
                });
            }

            ui.separator();
            ui.label(
                egui::RichText::new(status_line(machine.state(), &registry))
                    .size(12.0)
                    .color(PanelColors::TEXT_TERTIARY),
            );
            ui.label(
                egui::RichText::new(format!(
                    "History: {}  Captured: {}",
                    machine.history().len(),
                    machine.removed().len()
                ))
                .size(12.0)
                .color(PanelColors::TEXT_TERTIARY),
            );
        });

    if panel.set_if_neq(edited) {
        debug!("[CONTROLS] Panel settings changed");
    }
}

/// Registers the settings panel in the egui pass
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, control_panel_ui);
    }
}
