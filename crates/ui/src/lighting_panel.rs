use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::lighting::LightSettings;

/// Sun tint and heading sliders, bottom right.
pub fn lighting_panel_ui(mut contexts: EguiContexts, mut settings: ResMut<LightSettings>) {
    let mut edited = *settings;

    egui::Window::new("Light")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -60.0))
        .resizable(false)
        .collapsible(true)
        .default_open(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.add(egui::Slider::new(&mut edited.hue, 0.0..=1.0).text("Hue"));
            ui.add(egui::Slider::new(&mut edited.saturation, 0.0..=1.0).text("Tint"));
            ui.add(
                egui::Slider::new(&mut edited.yaw_degrees, 0.0..=360.0)
                    .text("Angle")
                    .suffix("°"),
            );
        });

    // write only on edits, the sun system keys off change detection
    if edited != *settings {
        *settings = edited;
    }
}
