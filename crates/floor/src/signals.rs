//! Visual state changes the floor reports to rendering and UI.
//!
//! Floor operations are plain methods, so they cannot write Bevy events
//! directly. They append [`FloorSignal`]s to an outbox on the [`Floor`]
//! resource instead, and [`flush_floor_signals`] turns the outbox into typed
//! events once per frame, in order.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::error::FloorError;
use crate::floor_state::Floor;
use crate::furniture::FurnitureId;
use crate::CameraMovement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightMode {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorSignal {
    Spawned(FurnitureId),
    Destroyed(FurnitureId),
    Highlight { id: FurnitureId, mode: HighlightMode },
    AvailabilityTint { id: FurnitureId, available: bool },
    ButtonsVisible(bool),
    RoomResized { width: usize, height: usize },
}

// =============================================================================
// Events
// =============================================================================

/// A new piece exists and needs a mesh.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureSpawned(pub FurnitureId);

/// A piece is gone for good.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureDestroyed(pub FurnitureId);

/// Show or hide the selection outline of a piece.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightObject {
    pub id: FurnitureId,
    pub mode: HighlightMode,
}

/// Whether the tentative position of the selected piece is a valid drop.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityTint {
    pub id: FurnitureId,
    pub available: bool,
}

/// Show or hide the rotate/delete/cancel/confirm buttons.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonsVisible(pub bool);

/// The room now has `width` x `height` cells.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomResized {
    pub width: usize,
    pub height: usize,
}

/// A floor command was refused. State is unchanged.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRefused(pub FloorError);

#[derive(SystemParam)]
pub struct SignalWriters<'w> {
    spawned: EventWriter<'w, FurnitureSpawned>,
    destroyed: EventWriter<'w, FurnitureDestroyed>,
    highlight: EventWriter<'w, HighlightObject>,
    tint: EventWriter<'w, AvailabilityTint>,
    buttons: EventWriter<'w, ButtonsVisible>,
    resized: EventWriter<'w, RoomResized>,
}

/// System: drain the floor outbox into events.
pub fn flush_floor_signals(mut floor: ResMut<Floor>, mut writers: SignalWriters) {
    if floor.pending_signals().is_empty() {
        return;
    }
    for signal in floor.drain_signals() {
        match signal {
            FloorSignal::Spawned(id) => {
                writers.spawned.send(FurnitureSpawned(id));
            }
            FloorSignal::Destroyed(id) => {
                writers.destroyed.send(FurnitureDestroyed(id));
            }
            FloorSignal::Highlight { id, mode } => {
                writers.highlight.send(HighlightObject { id, mode });
            }
            FloorSignal::AvailabilityTint { id, available } => {
                writers.tint.send(AvailabilityTint { id, available });
            }
            FloorSignal::ButtonsVisible(visible) => {
                writers.buttons.send(ButtonsVisible(visible));
            }
            FloorSignal::RoomResized { width, height } => {
                writers.resized.send(RoomResized { width, height });
            }
        }
    }
}

/// System: mirror the floor's camera flag into [`CameraMovement`].
pub fn sync_camera_movement(floor: Res<Floor>, mut camera: ResMut<CameraMovement>) {
    let allowed = floor.camera_movement_allowed();
    if camera.allowed != allowed {
        camera.allowed = allowed;
    }
}
