//! Panel palette
//!
//! Colors are `egui::Color32` so they drop straight into `RichText`.

use bevy_egui::egui;

pub struct PanelColors;

impl PanelColors {
    /// Window background
    pub const BG_MID: egui::Color32 = egui::Color32::from_rgb(30, 30, 35);

    /// Section headings
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Status lines and hints
    pub const TEXT_TERTIARY: egui::Color32 = egui::Color32::from_rgb(150, 150, 155);

    /// The promotion section header
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

    pub const BORDER: egui::Color32 = egui::Color32::from_rgb(60, 60, 65);
}
