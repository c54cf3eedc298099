//! Runtime guards for the occupancy grid.
//!
//! After each frame's mutations the grid is cross-checked against the
//! furniture list: every occupied cell names a known, committed piece, the
//! selected piece owns no cells, and each idle piece owns exactly its
//! footprint. Violations are logged and counted, never repaired.

use bevy::prelude::*;

use crate::floor_state::Floor;

/// Violations found by the last audit. Used by integration tests.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyViolations {
    /// Cells naming an id that is not on the floor.
    pub unknown_occupant: u32,
    /// Cells held by the selected piece.
    pub selected_in_grid: u32,
    /// Idle pieces whose cells differ from their footprint.
    pub footprint_mismatch: u32,
    /// Idle pieces extending past the grid.
    pub out_of_bounds: u32,
}

impl OccupancyViolations {
    pub fn total(&self) -> u32 {
        self.unknown_occupant + self.selected_in_grid + self.footprint_mismatch + self.out_of_bounds
    }
}

pub fn audit_occupancy(floor: &Floor) -> OccupancyViolations {
    let mut violations = OccupancyViolations::default();
    let grid = floor.grid();
    let selected = floor.selected();

    for (cell, occupant) in grid.iter_occupied() {
        if floor.furniture(occupant).is_none() {
            warn!(
                "Invariant violation: cell ({}, {}) held by unknown {}",
                cell.x, cell.y, occupant
            );
            violations.unknown_occupant += 1;
        } else if selected == Some(occupant) {
            warn!(
                "Invariant violation: selected {} still holds cell ({}, {})",
                occupant, cell.x, cell.y
            );
            violations.selected_in_grid += 1;
        }
    }

    for piece in floor.iter_furniture() {
        if selected == Some(piece.id) {
            continue;
        }
        if !grid.region_in_bounds(piece.anchor, piece.footprint) {
            warn!(
                "Invariant violation: {} at ({}, {}) extends past the {}x{} grid",
                piece.id,
                piece.anchor.x,
                piece.anchor.y,
                grid.width(),
                grid.height()
            );
            violations.out_of_bounds += 1;
            continue;
        }
        let expected: Vec<IVec2> = piece.cells().collect();
        if grid.cells_of(piece.id) != expected {
            warn!(
                "Invariant violation: {} holds cells that differ from its footprint",
                piece.id
            );
            violations.footprint_mismatch += 1;
        }
    }

    violations
}

/// System: audit the grid, skipping frames where nothing changed.
pub fn validate_occupancy(floor: Res<Floor>, mut violations: ResMut<OccupancyViolations>) {
    if !floor.is_changed() {
        return;
    }
    *violations = audit_occupancy(&floor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::{FurnitureId, FurnitureKind};

    #[test]
    fn test_consistent_floor_has_no_violations() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        floor
            .place(FurnitureKind::Bed, IVec2::new(0, 0))
            .expect("bed");
        let table = floor
            .place(FurnitureKind::Table, IVec2::new(5, 5))
            .expect("table");
        floor.select(table).expect("select");
        floor.preview_move(IVec2::new(6, 6)).expect("preview");
        assert_eq!(audit_occupancy(&floor).total(), 0);
    }

    #[test]
    fn test_detects_stray_cells() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let chair = floor
            .place(FurnitureKind::Chair, IVec2::new(2, 2))
            .expect("chair");
        floor
            .grid
            .occupy(IVec2::new(3, 3), UVec2::ONE, FurnitureId(42));
        floor.grid.occupy(IVec2::new(4, 4), UVec2::ONE, chair);

        let violations = audit_occupancy(&floor);
        assert_eq!(violations.unknown_occupant, 1);
        assert_eq!(violations.footprint_mismatch, 1);
    }

    #[test]
    fn test_detects_selected_piece_in_grid() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let chair = floor
            .place(FurnitureKind::Chair, IVec2::new(2, 2))
            .expect("chair");
        floor.select(chair).expect("select");
        floor.grid.occupy(IVec2::new(2, 2), UVec2::ONE, chair);
        assert_eq!(audit_occupancy(&floor).selected_in_grid, 1);
    }
}
