use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floor::signals::ButtonsVisible;
use floor::{Floor, FloorCommand};

/// Whether the rotate/delete/cancel/confirm row is shown.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionButtons {
    pub visible: bool,
}

pub fn track_buttons_visible(
    mut events: EventReader<ButtonsVisible>,
    mut buttons: ResMut<SelectionButtons>,
) {
    if let Some(ButtonsVisible(visible)) = events.read().last() {
        buttons.visible = *visible;
    }
}

pub fn selection_buttons_ui(
    mut contexts: EguiContexts,
    buttons: Res<SelectionButtons>,
    floor: Res<Floor>,
    mut commands: EventWriter<FloorCommand>,
) {
    if !buttons.visible {
        return;
    }
    let Some(piece) = floor.selected_furniture() else {
        return;
    };
    let can_confirm = floor.selection_available().unwrap_or(false);

    egui::TopBottomPanel::bottom("selection_buttons")
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(egui::RichText::new(piece.kind.label()).strong());
                ui.separator();
                if ui.button("Rotate").clicked() {
                    commands.send(FloorCommand::Rotate);
                }
                if ui.button("Delete").clicked() {
                    commands.send(FloorCommand::Delete);
                }
                if ui.button("Cancel").clicked() {
                    commands.send(FloorCommand::CancelMovement);
                }
                let confirm = ui
                    .add_enabled(can_confirm, egui::Button::new("Confirm"))
                    .on_disabled_hover_text("This spot is blocked");
                if confirm.clicked() {
                    commands.send(FloorCommand::Confirm);
                }
            });
        });
}
