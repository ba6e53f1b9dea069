use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;
use std::path::PathBuf;
use tabletop_chess::core::{CameraView, ControlPanel, InteractionConfig};
use tabletop_chess::game::InteractionPlugin;
use tabletop_chess::input::PointerInputPlugin;
use tabletop_chess::rendering::ShowcasePlugin;
use tabletop_chess::ui::ControlPanelPlugin;

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;

/// 3D chess piece interaction showcase
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file overriding heights, scales and tween durations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial camera preset
    #[arg(long, value_enum, default_value_t = CameraView::Free)]
    camera_view: CameraView,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: u32,

    /// `tracing` env-filter directives
    #[arg(
        long,
        default_value = "wgpu=error,naga=warn,bevy_render=warn,tabletop_chess=info"
    )]
    log_filter: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => InteractionConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => InteractionConfig::default(),
    };

    let window = Window {
        title: "Tabletop Chess".to_string(),
        resolution: (args.width, args.height).into(),
        ..default()
    };

    App::new()
        // Core plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .set(LogPlugin {
                    filter: args.log_filter.clone(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        // Settings read by the plugins below
        .insert_resource(config)
        .insert_resource(ControlPanel {
            camera_view: args.camera_view,
            ..default()
        })
        // Showcase
        .add_plugins(InteractionPlugin)
        .add_plugins(ShowcasePlugin)
        .add_plugins(PointerInputPlugin)
        .add_plugins(ControlPanelPlugin)
        .run();

    Ok(())
}
