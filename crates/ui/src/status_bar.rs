use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floor::Floor;
use rendering::input::StatusMessage;

/// Top bar: room size, piece count and the latest status line.
pub fn status_bar_ui(mut contexts: EguiContexts, floor: Res<Floor>, status: Res<StatusMessage>) {
    let size = floor.room_size();
    egui::TopBottomPanel::top("status_bar")
        .exact_height(30.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(format!("Room {}x{}", size.x, size.y));
                ui.separator();
                ui.label(format!("{} piece(s)", floor.furniture_count()));
                if status.active() {
                    ui.separator();
                    let color = if status.is_error {
                        egui::Color32::from_rgb(190, 60, 40)
                    } else {
                        egui::Color32::from_rgb(60, 120, 60)
                    };
                    ui.colored_label(color, &status.text);
                }
            });
        });
}
