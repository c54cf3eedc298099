use bevy::prelude::*;

use floor::FloorSet;

pub mod camera;
pub mod egui_input_guard;
pub mod floor_render;
pub mod furniture_render;
pub mod input;
pub mod lighting;
pub mod selection_highlight;

use input::{PointerTracker, StatusMessage};
use lighting::LightSettings;
use selection_highlight::SelectionOutline;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerTracker>()
            .init_resource::<StatusMessage>()
            .init_resource::<SelectionOutline>()
            .init_resource::<LightSettings>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    lighting::setup_lighting,
                    floor_render::spawn_floor_plane,
                    furniture_render::setup_furniture_assets,
                ),
            )
            .add_systems(
                Update,
                (input::track_pointers, input::resolve_pointer_frame)
                    .chain()
                    .in_set(FloorSet::Input),
            )
            .add_systems(
                Update,
                (
                    input::keyboard_shortcuts.before(FloorSet::Commands),
                    (
                        camera::camera_pointer_gestures,
                        camera::camera_zoom,
                        camera::apply_planner_camera,
                    )
                        .chain()
                        .after(FloorSet::Signals),
                    input::report_floor_feedback.after(FloorSet::Signals),
                    input::tick_status_message,
                    lighting::apply_light_settings,
                ),
            )
            .add_systems(
                Update,
                (
                    furniture_render::spawn_furniture_meshes,
                    furniture_render::despawn_furniture_meshes,
                    furniture_render::sync_furniture_transforms,
                    floor_render::sync_floor_plane,
                    selection_highlight::update_selection_outline,
                )
                    .after(FloorSet::Signals),
            )
            .add_systems(
                Update,
                (
                    floor_render::draw_grid_lines,
                    selection_highlight::draw_selection_outline
                        .after(selection_highlight::update_selection_outline),
                ),
            );
    }
}
