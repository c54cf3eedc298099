use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use floor::FloorSet;

pub mod catalog_panel;
pub mod lighting_panel;
pub mod room_size_panel;
pub mod selection_buttons;
pub mod status_bar;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<selection_buttons::SelectionButtons>()
            .init_resource::<room_size_panel::RoomSizeDraft>()
            .add_systems(Startup, theme::apply_planner_theme)
            .add_systems(
                Update,
                (
                    selection_buttons::track_buttons_visible,
                    room_size_panel::sync_room_size_draft,
                )
                    .after(FloorSet::Signals),
            )
            .add_systems(
                Update,
                (
                    status_bar::status_bar_ui,
                    catalog_panel::catalog_panel_ui,
                    selection_buttons::selection_buttons_ui
                        .after(selection_buttons::track_buttons_visible),
                    room_size_panel::room_size_panel_ui
                        .after(room_size_panel::sync_room_size_draft),
                    lighting_panel::lighting_panel_ui,
                )
                    .chain(),
            );
    }
}
