// ---------------------------------------------------------------------------
// FloorError: refused floor operations
// ---------------------------------------------------------------------------

use std::fmt;

use bevy::math::{IVec2, UVec2};

use crate::furniture::FurnitureId;

/// Reasons a floor operation was refused.
///
/// None of these are fatal. An operation that returns one of them has left
/// the grid, the furniture and the selection exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorError {
    /// The footprint rectangle at `anchor` leaves the grid.
    OutOfBounds { anchor: IVec2, footprint: UVec2 },
    /// `cell` is already claimed by another piece.
    CellConflict { cell: IVec2, occupant: FurnitureId },
    /// A room size with a non-positive side was requested.
    InvalidDimension { width: i32, height: i32 },
    /// Rotate, commit, cancel or delete was requested with nothing selected.
    NoActiveSelection,
    /// The id does not name a piece on this floor.
    UnknownFurniture(FurnitureId),
    /// The room sizer does not allow this size right now.
    ResizeUnavailable { width: i32, height: i32 },
}

impl fmt::Display for FloorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorError::OutOfBounds { anchor, footprint } => write!(
                f,
                "{}x{} piece at ({}, {}) does not fit inside the room",
                footprint.x, footprint.y, anchor.x, anchor.y
            ),
            FloorError::CellConflict { cell, occupant } => write!(
                f,
                "cell ({}, {}) is already taken by {occupant}",
                cell.x, cell.y
            ),
            FloorError::InvalidDimension { width, height } => {
                write!(f, "invalid room size {width}x{height}")
            }
            FloorError::NoActiveSelection => write!(f, "nothing is selected"),
            FloorError::UnknownFurniture(id) => write!(f, "no furniture {id} on this floor"),
            FloorError::ResizeUnavailable { width, height } => {
                write!(f, "room size {width}x{height} is not available")
            }
        }
    }
}

impl std::error::Error for FloorError {}
