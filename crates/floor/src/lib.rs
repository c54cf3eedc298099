use bevy::prelude::*;

pub mod commands;
pub mod config;
pub mod error;
pub mod floor_state;
pub mod furniture;
pub mod grid_store;
pub mod invariant_checks;
pub mod pointer;
pub mod room_resize;
pub mod selection;
pub mod signals;

#[cfg(test)]
pub mod test_harness;

pub use commands::FloorCommand;
pub use config::{ConfigSource, PlannerConfig};
pub use error::FloorError;
pub use floor_state::{Floor, SelectionState};
pub use furniture::{FurnitureId, FurnitureKind, FurnitureTemplate, Orientation};
pub use grid_store::GridStore;
pub use pointer::{PointerFrame, TouchPhase};

/// Frame ordering for everything that touches the floor.
///
/// Rendering fills the [`PointerFrame`] in `Input`; the floor consumes it in
/// `Interaction`, applies queued [`FloorCommand`]s in `Commands`, publishes
/// the resulting events in `Signals` and audits the grid in `Validate`.
/// Consumers of floor events run after `Signals`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FloorSet {
    Input,
    Interaction,
    Commands,
    Signals,
    Validate,
}

/// Whether the camera may pan and zoom. Cleared while a selected piece is
/// being dragged.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraMovement {
    pub allowed: bool,
}

impl Default for CameraMovement {
    fn default() -> Self {
        Self { allowed: true }
    }
}

pub struct FloorPlugin;

impl Plugin for FloorPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<PlannerConfig>()
            .cloned()
            .unwrap_or_default();
        let floor = match Floor::new(&config.floor) {
            Ok(floor) => floor,
            Err(err) => {
                warn!("Invalid floor settings ({}), using the default room", err);
                Floor::default()
            }
        };

        app.insert_resource(config)
            .insert_resource(floor)
            .init_resource::<ConfigSource>()
            .init_resource::<PointerFrame>()
            .init_resource::<CameraMovement>()
            .init_resource::<invariant_checks::OccupancyViolations>()
            .add_event::<FloorCommand>()
            .add_event::<signals::FurnitureSpawned>()
            .add_event::<signals::FurnitureDestroyed>()
            .add_event::<signals::HighlightObject>()
            .add_event::<signals::AvailabilityTint>()
            .add_event::<signals::ButtonsVisible>()
            .add_event::<signals::RoomResized>()
            .add_event::<signals::PlacementRefused>()
            .configure_sets(
                Update,
                (
                    FloorSet::Input,
                    FloorSet::Interaction,
                    FloorSet::Commands,
                    FloorSet::Signals,
                    FloorSet::Validate,
                )
                    .chain(),
            )
            .add_systems(Startup, config::report_config_source)
            .add_systems(
                Update,
                (
                    pointer::process_pointer_input.in_set(FloorSet::Interaction),
                    commands::apply_floor_commands.in_set(FloorSet::Commands),
                    (signals::flush_floor_signals, signals::sync_camera_movement)
                        .in_set(FloorSet::Signals),
                    invariant_checks::validate_occupancy.in_set(FloorSet::Validate),
                ),
            );
    }
}
