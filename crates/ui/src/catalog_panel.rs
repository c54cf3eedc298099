use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floor::{FloorCommand, FurnitureKind};

/// Button caption for a catalog entry, e.g. "Bed (2x3)".
pub fn catalog_label(kind: FurnitureKind) -> String {
    let fp = kind.footprint();
    format!("{} ({}x{})", kind.label(), fp.x, fp.y)
}

/// Left panel listing every furniture kind. Clicking one creates it at the
/// spawn cell, selected and ready to drag.
pub fn catalog_panel_ui(mut contexts: EguiContexts, mut commands: EventWriter<FloorCommand>) {
    egui::SidePanel::left("furniture_catalog")
        .resizable(false)
        .default_width(150.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Furniture");
            ui.separator();
            for kind in FurnitureKind::ALL {
                let button = egui::Button::new(catalog_label(kind)).min_size(egui::vec2(130.0, 0.0));
                if ui.add(button).clicked() {
                    commands.send(FloorCommand::Create(kind));
                }
            }
        });
}
