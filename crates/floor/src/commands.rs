use bevy::prelude::*;

use crate::config::{FloorSettings, PlannerConfig};
use crate::error::FloorError;
use crate::floor_state::Floor;
use crate::furniture::FurnitureKind;
use crate::signals::PlacementRefused;

/// User intents coming from buttons and keyboard shortcuts.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorCommand {
    /// Instantiate a catalog piece at the spawn anchor and select it.
    Create(FurnitureKind),
    Rotate,
    Delete,
    CancelMovement,
    /// Commit the selected piece where it stands.
    Confirm,
    /// Commit if valid, otherwise cancel. Used when the user taps away.
    Dismiss,
    ResizeRoom { width: i32, height: i32 },
}

/// Run one command against the floor.
pub fn execute_command(
    floor: &mut Floor,
    settings: &FloorSettings,
    command: FloorCommand,
) -> Result<(), FloorError> {
    match command {
        FloorCommand::Create(kind) => {
            floor.create(kind);
        }
        FloorCommand::Rotate => {
            floor.rotate_selected()?;
        }
        FloorCommand::Delete => {
            floor.delete_selected()?;
        }
        FloorCommand::CancelMovement => {
            floor.cancel_movement()?;
        }
        FloorCommand::Confirm => {
            floor.commit_selection()?;
        }
        FloorCommand::Dismiss => {
            floor.dismiss_selection();
        }
        FloorCommand::ResizeRoom { width, height } => {
            if width <= 0 || height <= 0 {
                return Err(FloorError::InvalidDimension { width, height });
            }
            if !settings.allows_room_size(width, height) {
                return Err(FloorError::ResizeUnavailable { width, height });
            }
            floor.resize_room(width, height)?;
        }
    }
    Ok(())
}

/// System: apply queued commands in order. Refusals are logged and reported
/// as [`PlacementRefused`]; the floor is left as it was.
pub fn apply_floor_commands(
    mut commands: EventReader<FloorCommand>,
    mut floor: ResMut<Floor>,
    config: Option<Res<PlannerConfig>>,
    mut refused: EventWriter<PlacementRefused>,
) {
    let defaults = FloorSettings::default();
    let settings = config.as_ref().map(|c| &c.floor).unwrap_or(&defaults);

    for command in commands.read() {
        if let Err(err) = execute_command(&mut floor, settings, *command) {
            debug!("Floor command {:?} refused: {}", command, err);
            refused.send(PlacementRefused(err));
        }
    }
}
