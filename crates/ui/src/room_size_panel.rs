use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floor::signals::RoomResized;
use floor::{Floor, FloorCommand, PlannerConfig};

/// Room size being edited in the panel, applied with the Apply button.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSizeDraft {
    pub width: i32,
    pub height: i32,
}

impl FromWorld for RoomSizeDraft {
    fn from_world(world: &mut World) -> Self {
        let size = world
            .get_resource::<Floor>()
            .map(|floor| floor.room_size())
            .unwrap_or(UVec2::new(10, 10));
        Self {
            width: size.x as i32,
            height: size.y as i32,
        }
    }
}

/// The resize to send for `draft`, or `None` when it matches the room.
pub fn resize_command(draft: RoomSizeDraft, current: UVec2) -> Option<FloorCommand> {
    if draft.width == current.x as i32 && draft.height == current.y as i32 {
        return None;
    }
    Some(FloorCommand::ResizeRoom {
        width: draft.width,
        height: draft.height,
    })
}

/// How many pieces a resize to `width` x `height` would remove.
pub fn eviction_preview(floor: &Floor, width: i32, height: i32) -> usize {
    floor
        .iter_furniture()
        .filter(|piece| piece.cells().any(|cell| cell.x >= width || cell.y >= height))
        .count()
}

/// Keep the draft in step with resizes applied elsewhere.
pub fn sync_room_size_draft(
    mut resized: EventReader<RoomResized>,
    mut draft: ResMut<RoomSizeDraft>,
) {
    if let Some(RoomResized { width, height }) = resized.read().last() {
        draft.width = *width as i32;
        draft.height = *height as i32;
    }
}

pub fn room_size_panel_ui(
    mut contexts: EguiContexts,
    mut draft: ResMut<RoomSizeDraft>,
    floor: Res<Floor>,
    config: Res<PlannerConfig>,
    mut commands: EventWriter<FloorCommand>,
) {
    let min = config.floor.min_room_side as i32;
    let max = config.floor.max_room_side as i32;
    let command = resize_command(*draft, floor.room_size());
    let evicted = eviction_preview(&floor, draft.width, draft.height);

    egui::Window::new("Room")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .resizable(false)
        .collapsible(true)
        .show(contexts.ctx_mut(), |ui| {
            egui::Grid::new("room_size_grid").show(ui, |ui| {
                ui.label("Width");
                ui.add(egui::DragValue::new(&mut draft.width).range(min..=max));
                ui.end_row();
                ui.label("Depth");
                ui.add(egui::DragValue::new(&mut draft.height).range(min..=max));
                ui.end_row();
            });
            if evicted > 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(190, 60, 40),
                    format!("{evicted} piece(s) will be removed"),
                );
            }
            if ui
                .add_enabled(command.is_some(), egui::Button::new("Apply"))
                .clicked()
            {
                if let Some(command) = command {
                    commands.send(command);
                }
            }
        });
}
