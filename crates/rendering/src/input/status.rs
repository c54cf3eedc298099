use bevy::prelude::*;

use floor::signals::{PlacementRefused, RoomResized};
use floor::FloorError;

use super::types::StatusMessage;

/// Short user-facing text for a refused floor command.
pub fn refusal_message(err: &FloorError) -> String {
    match err {
        FloorError::OutOfBounds { .. } => "Doesn't fit inside the room".to_string(),
        FloorError::CellConflict { .. } => "That spot is already taken".to_string(),
        FloorError::InvalidDimension { width, height } => {
            format!("{width}x{height} is not a valid room size")
        }
        FloorError::NoActiveSelection => "Select a piece first".to_string(),
        FloorError::UnknownFurniture(_) => "That piece no longer exists".to_string(),
        FloorError::ResizeUnavailable { width, height } => {
            format!("A {width}x{height} room is not available")
        }
    }
}

/// System: surface refusals and resizes on the status line.
pub fn report_floor_feedback(
    mut refused: EventReader<PlacementRefused>,
    mut resized: EventReader<RoomResized>,
    mut status: ResMut<StatusMessage>,
) {
    for PlacementRefused(err) in refused.read() {
        status.set(refusal_message(err), true);
    }
    for RoomResized { width, height } in resized.read() {
        status.set(format!("Room resized to {width}x{height}"), false);
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}
