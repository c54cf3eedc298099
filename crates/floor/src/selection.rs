//! Selection state machine: `Idle` -> `Selected` -> `Idle`.
//!
//! While a piece is selected its cells are taken out of the grid, so its own
//! old position never blocks a move. The grid is written again only when the
//! selection ends: by a commit at the tentative anchor, or by a cancel that
//! restores the snapshot taken when the selection started.

use bevy::prelude::*;

use crate::error::FloorError;
use crate::floor_state::{Floor, SelectionState};
use crate::furniture::{FurnitureId, FurnitureTemplate, Orientation};
use crate::signals::{FloorSignal, HighlightMode};

/// How a cancel ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Put back where it was when the selection started.
    Restored(FurnitureId),
    /// The piece had no earlier placement to return to and was removed.
    Discarded(FurnitureId),
}

/// How a dismiss ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    Committed(FurnitureId),
    Cancelled(CancelOutcome),
}

impl Floor {
    /// Instantiate a piece at the spawn anchor and select it. An active
    /// selection is dismissed first.
    pub fn create(&mut self, template: impl Into<FurnitureTemplate>) -> FurnitureId {
        self.dismiss_selection();

        let piece = self.factory.build(template.into(), self.spawn_anchor);
        let id = piece.id;
        debug!("Created {:?} {}", piece.kind, id);
        self.furniture.insert(id, piece);
        self.emit(FloorSignal::Spawned(id));
        self.begin_selection(id);
        id
    }

    /// Select a placed piece. Selecting the current selection is a no-op;
    /// selecting a different piece dismisses the current one first.
    pub fn select(&mut self, id: FurnitureId) -> Result<(), FloorError> {
        if !self.furniture.contains_key(&id) {
            return Err(FloorError::UnknownFurniture(id));
        }
        match self.selection {
            SelectionState::Selected(current) if current == id => return Ok(()),
            SelectionState::Selected(_) => {
                self.dismiss_selection();
            }
            SelectionState::Idle => {}
        }
        self.begin_selection(id);
        Ok(())
    }

    fn begin_selection(&mut self, id: FurnitureId) {
        if let Some(piece) = self.furniture.get_mut(&id) {
            piece.save_snapshot();
        }
        self.grid.clear(id);
        self.selection = SelectionState::Selected(id);
        self.hold.reset();
        self.emit(FloorSignal::Highlight {
            id,
            mode: HighlightMode::Visible,
        });
        self.emit(FloorSignal::ButtonsVisible(true));
        let available = self.selection_available().unwrap_or(false);
        self.emit(FloorSignal::AvailabilityTint { id, available });
        debug!("Selected {}", id);
    }

    /// Try the selected piece at `candidate`. A valid candidate becomes the
    /// new tentative anchor; an invalid one leaves the anchor where it was.
    /// Returns whether the candidate was valid. The grid is never touched.
    pub fn preview_move(&mut self, candidate: IVec2) -> Result<bool, FloorError> {
        let id = self.selected().ok_or(FloorError::NoActiveSelection)?;
        let footprint = self
            .furniture
            .get(&id)
            .map(|piece| piece.footprint)
            .ok_or(FloorError::UnknownFurniture(id))?;

        let available = self.grid.is_region_free(candidate, footprint, None);
        if available {
            if let Some(piece) = self.furniture.get_mut(&id) {
                piece.anchor = candidate;
            }
        }
        self.emit(FloorSignal::AvailabilityTint { id, available });
        Ok(available)
    }

    /// Write the selected piece into the grid at its tentative anchor and go
    /// idle. Refused while the tentative position is invalid; the piece then
    /// stays selected.
    pub fn commit_selection(&mut self) -> Result<FurnitureId, FloorError> {
        let id = self.selected().ok_or(FloorError::NoActiveSelection)?;
        self.occupy_at_current(id)?;
        self.end_selection(id);
        debug!("Committed {}", id);
        Ok(id)
    }

    /// End the selection without an explicit confirm: commit when the drop is
    /// valid, otherwise return the piece to its snapshot. No-op while idle.
    pub fn dismiss_selection(&mut self) -> Option<DismissOutcome> {
        let id = self.selected()?;
        match self.commit_selection() {
            Ok(id) => Some(DismissOutcome::Committed(id)),
            Err(err) => {
                debug!("Dismissing {} with invalid drop ({}), reverting", id, err);
                self.cancel_movement().ok().map(DismissOutcome::Cancelled)
            }
        }
    }

    /// Undo the current move: restore the snapshot and commit there.
    pub fn cancel_movement(&mut self) -> Result<CancelOutcome, FloorError> {
        let id = self.selected().ok_or(FloorError::NoActiveSelection)?;
        let piece = self
            .furniture
            .get(&id)
            .ok_or(FloorError::UnknownFurniture(id))?;

        let snapshot = match (piece.committed, piece.snapshot) {
            (true, Some(snapshot)) => snapshot,
            _ => {
                debug!("Cancelled never-placed {}, discarding", id);
                self.destroy(id);
                return Ok(CancelOutcome::Discarded(id));
            }
        };
        if let Some(piece) = self.furniture.get_mut(&id) {
            piece.restore(snapshot);
        }

        match self.occupy_at_current(id) {
            Ok(()) => {
                self.end_selection(id);
                debug!("Cancelled move of {}", id);
                Ok(CancelOutcome::Restored(id))
            }
            Err(err) => {
                warn!(
                    "Saved position of {} is no longer available ({}), removing it",
                    id, err
                );
                self.destroy(id);
                Ok(CancelOutcome::Discarded(id))
            }
        }
    }

    /// Quarter-turn the selected piece. Validity is re-checked on the next
    /// preview or commit; the tint is refreshed right away.
    pub fn rotate_selected(&mut self) -> Result<Orientation, FloorError> {
        let id = self.selected().ok_or(FloorError::NoActiveSelection)?;
        let piece = self
            .furniture
            .get_mut(&id)
            .ok_or(FloorError::UnknownFurniture(id))?;
        piece.rotate();
        let orientation = piece.orientation;

        let available = self.selection_available().unwrap_or(false);
        self.emit(FloorSignal::AvailabilityTint { id, available });
        debug!("Rotated {} to {} degrees", id, orientation.degrees());
        Ok(orientation)
    }

    /// Remove the selected piece. Its cells are already out of the grid.
    pub fn delete_selected(&mut self) -> Result<FurnitureId, FloorError> {
        let id = self.selected().ok_or(FloorError::NoActiveSelection)?;
        self.destroy(id);
        self.hold.reset();
        debug!("Deleted {}", id);
        Ok(id)
    }

    /// Validate and write the piece at its current anchor, clearing the
    /// snapshot on success.
    fn occupy_at_current(&mut self, id: FurnitureId) -> Result<(), FloorError> {
        let piece = self
            .furniture
            .get(&id)
            .ok_or(FloorError::UnknownFurniture(id))?;
        let (anchor, footprint) = (piece.anchor, piece.footprint);
        self.grid.check_region(anchor, footprint, Some(id))?;

        self.grid.clear(id);
        self.grid.occupy(anchor, footprint, id);
        if let Some(piece) = self.furniture.get_mut(&id) {
            piece.snapshot = None;
            piece.committed = true;
        }
        Ok(())
    }
}
