//! Per-frame pointer handling: hold-to-select while idle, drag-to-move while
//! a piece is selected.
//!
//! The floor never reads devices. Rendering resolves touches (or the mouse)
//! against the ground plane and writes a [`PointerFrame`]; this module turns
//! that frame into selection and movement.

use bevy::prelude::*;

use crate::floor_state::{Floor, SelectionState};
use crate::furniture::FurnitureId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
}

/// What the pointer did this frame, already resolved against the floor.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerFrame {
    /// Number of active touches (a held left mouse button counts as one).
    pub touch_count: usize,
    /// Phase of the primary touch.
    pub phase: Option<TouchPhase>,
    /// Piece under the primary touch, if any.
    pub pick: Option<FurnitureId>,
    /// Ground cell under the primary touch, if the ray hits the ground.
    pub drag_cell: Option<IVec2>,
}

impl PointerFrame {
    pub fn released() -> Self {
        Self::default()
    }

    /// A single stationary touch over `pick`, standing on `cell`.
    pub fn holding(pick: Option<FurnitureId>, cell: IVec2) -> Self {
        Self {
            touch_count: 1,
            phase: Some(TouchPhase::Stationary),
            pick,
            drag_cell: Some(cell),
        }
    }

    /// A single moving touch over `cell`.
    pub fn dragging(cell: IVec2) -> Self {
        Self {
            touch_count: 1,
            phase: Some(TouchPhase::Moved),
            pick: None,
            drag_cell: Some(cell),
        }
    }
}

/// Hold debounce: a piece is selected only after the same piece stays under a
/// stationary touch for `delay` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldToSelect {
    delay: f32,
    remaining: f32,
    target: Option<FurnitureId>,
}

impl HoldToSelect {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            remaining: delay,
            target: None,
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.delay;
        self.target = None;
    }

    pub fn target(&self) -> Option<FurnitureId> {
        self.target
    }

    /// Seconds of holding still needed before the current target is selected.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `dt` while `target` is held. A new target restarts the
    /// countdown. Returns the target once the countdown runs out, then rearms.
    pub fn tick(&mut self, target: FurnitureId, dt: f32) -> Option<FurnitureId> {
        if self.target != Some(target) {
            self.remaining = self.delay;
            self.target = Some(target);
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.reset();
            return Some(target);
        }
        None
    }
}

/// What [`Floor::process_pointer`] did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Nothing,
    /// Hold in progress on this piece.
    Holding(FurnitureId),
    Selected(FurnitureId),
    /// Tried the selected piece at a new cell.
    Previewed { cell: IVec2, valid: bool },
}

impl Floor {
    /// Apply one frame of pointer input.
    ///
    /// With a selection, any touch drags the selected piece to the touched
    /// cell and locks the camera; releasing every touch unlocks it and leaves
    /// the piece selected. Without one, a single stationary touch on a piece
    /// counts towards hold-to-select; anything else resets the hold.
    pub fn process_pointer(&mut self, frame: &PointerFrame, dt: f32) -> PointerOutcome {
        match self.selection {
            SelectionState::Selected(id) => {
                if frame.touch_count == 0 {
                    self.camera_movement_allowed = true;
                    return PointerOutcome::Nothing;
                }
                self.camera_movement_allowed = false;
                let Some(cell) = frame.drag_cell else {
                    return PointerOutcome::Nothing;
                };
                let unchanged = self
                    .furniture
                    .get(&id)
                    .is_some_and(|piece| piece.anchor == cell);
                if unchanged {
                    return PointerOutcome::Nothing;
                }
                match self.preview_move(cell) {
                    Ok(valid) => PointerOutcome::Previewed { cell, valid },
                    Err(_) => PointerOutcome::Nothing,
                }
            }
            SelectionState::Idle => {
                let holding = frame.touch_count == 1
                    && frame.phase == Some(TouchPhase::Stationary);
                let target = match (holding, frame.pick) {
                    (true, Some(target)) => target,
                    _ => {
                        self.hold.reset();
                        return PointerOutcome::Nothing;
                    }
                };
                match self.hold.tick(target, dt) {
                    Some(id) => match self.select(id) {
                        Ok(()) => PointerOutcome::Selected(id),
                        Err(err) => {
                            warn!("Hold-to-select on {} failed: {}", id, err);
                            PointerOutcome::Nothing
                        }
                    },
                    None => PointerOutcome::Holding(target),
                }
            }
        }
    }
}

/// System: feed this frame's pointer state into the floor.
pub fn process_pointer_input(
    time: Res<Time>,
    frame: Res<PointerFrame>,
    mut floor: ResMut<Floor>,
) {
    if frame.touch_count == 0 && !floor.is_selecting() && floor.hold.target().is_none() {
        return;
    }
    let outcome = floor.process_pointer(&frame, time.delta_secs());
    if let PointerOutcome::Selected(id) = outcome {
        info!("Selected {} by holding", id);
    }
}
