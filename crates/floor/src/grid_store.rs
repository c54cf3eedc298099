use bevy::prelude::*;

use crate::config::CELL_SIZE;
use crate::error::FloorError;
use crate::furniture::FurnitureId;

/// Cells covered by a `footprint` rectangle whose minimum corner is `anchor`,
/// row by row.
pub fn footprint_cells(anchor: IVec2, footprint: UVec2) -> impl Iterator<Item = IVec2> {
    let (w, h) = (footprint.x as i32, footprint.y as i32);
    (0..h).flat_map(move |dy| (0..w).map(move |dx| anchor + IVec2::new(dx, dy)))
}

/// Occupancy table: which piece, if any, claims each floor cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStore {
    cells: Vec<Option<FurnitureId>>,
    width: usize,
    height: usize,
}

impl GridStore {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![None; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Occupant of `cell`. Out-of-range cells read as empty.
    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<FurnitureId> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[self.index(cell.x as usize, cell.y as usize)]
    }

    /// Whether the whole rectangle lies inside the grid.
    pub fn region_in_bounds(&self, anchor: IVec2, footprint: UVec2) -> bool {
        footprint.x > 0
            && footprint.y > 0
            && anchor.x >= 0
            && anchor.y >= 0
            && anchor.x as i64 + footprint.x as i64 <= self.width as i64
            && anchor.y as i64 + footprint.y as i64 <= self.height as i64
    }

    /// Validate a rectangle for placement. Cells held by `excluding` count as free.
    ///
    /// Returns the first problem found: bounds are checked before occupancy,
    /// and conflicts are reported in row order.
    pub fn check_region(
        &self,
        anchor: IVec2,
        footprint: UVec2,
        excluding: Option<FurnitureId>,
    ) -> Result<(), FloorError> {
        if !self.region_in_bounds(anchor, footprint) {
            return Err(FloorError::OutOfBounds { anchor, footprint });
        }
        for cell in footprint_cells(anchor, footprint) {
            if let Some(occupant) = self.get(cell) {
                if Some(occupant) != excluding {
                    return Err(FloorError::CellConflict { cell, occupant });
                }
            }
        }
        Ok(())
    }

    pub fn is_region_free(
        &self,
        anchor: IVec2,
        footprint: UVec2,
        excluding: Option<FurnitureId>,
    ) -> bool {
        self.check_region(anchor, footprint, excluding).is_ok()
    }

    /// Mark every cell of the rectangle with `id`.
    ///
    /// Does not re-validate: callers check the region first. Cells outside
    /// the grid are skipped.
    pub fn occupy(&mut self, anchor: IVec2, footprint: UVec2, id: FurnitureId) {
        for cell in footprint_cells(anchor, footprint) {
            if self.in_bounds(cell) {
                let idx = self.index(cell.x as usize, cell.y as usize);
                self.cells[idx] = Some(id);
            }
        }
    }

    /// Empty every cell held by `id`. Returns how many cells were freed.
    pub fn clear(&mut self, id: FurnitureId) -> usize {
        let mut freed = 0;
        for slot in self.cells.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
                freed += 1;
            }
        }
        freed
    }

    /// A new store of `new_width` x `new_height` holding the occupancy of the
    /// overlapping rectangle. Everything outside the overlap is dropped.
    pub fn resize(&self, new_width: usize, new_height: usize) -> GridStore {
        let mut resized = GridStore::new(new_width, new_height);
        for y in 0..self.height.min(new_height) {
            for x in 0..self.width.min(new_width) {
                let dst = resized.index(x, y);
                resized.cells[dst] = self.cells[self.index(x, y)];
            }
        }
        resized
    }

    /// Cells currently held by `id`, in row order.
    pub fn cells_of(&self, id: FurnitureId) -> Vec<IVec2> {
        self.iter_occupied()
            .filter(|(_, occupant)| *occupant == id)
            .map(|(cell, _)| cell)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// All occupied cells with their occupant, in row order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (IVec2, FurnitureId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.map(|id| (IVec2::new((idx % width) as i32, (idx / width) as i32), id))
        })
    }

    /// Cell under a world-space ground point. Cell (x, y) is centered on
    /// world (x, 0, y), so the nearest integer wins.
    pub fn world_to_cell(world_x: f32, world_z: f32) -> IVec2 {
        IVec2::new(
            (world_x / CELL_SIZE).round() as i32,
            (world_z / CELL_SIZE).round() as i32,
        )
    }

    /// World-space center of a cell on the ground plane.
    pub fn cell_to_world(cell: IVec2) -> Vec3 {
        Vec3::new(cell.x as f32 * CELL_SIZE, 0.0, cell.y as f32 * CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: FurnitureId = FurnitureId(1);
    const B: FurnitureId = FurnitureId(2);

    #[test]
    fn test_new_grid_is_empty() {
        let grid = GridStore::new(10, 10);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.get(IVec2::new(5, 5)), None);
    }

    #[test]
    fn test_out_of_bounds_reads_are_empty() {
        let grid = GridStore::new(4, 4);
        assert!(!grid.in_bounds(IVec2::new(4, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, -1)));
        assert_eq!(grid.get(IVec2::new(-1, -1)), None);
        assert_eq!(grid.get(IVec2::new(100, 2)), None);
    }

    #[test]
    fn test_occupy_marks_footprint() {
        let mut grid = GridStore::new(5, 5);
        grid.occupy(IVec2::new(0, 0), UVec2::new(2, 2), A);
        assert_eq!(
            grid.cells_of(A),
            vec![
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 1)
            ]
        );
        assert_eq!(grid.occupied_count(), 4);
    }

    #[test]
    fn test_region_past_edge_is_out_of_bounds() {
        let grid = GridStore::new(10, 10);
        let err = grid
            .check_region(IVec2::new(9, 8), UVec2::new(2, 3), None)
            .expect_err("9 + 2 > 10");
        assert_eq!(
            err,
            FloorError::OutOfBounds {
                anchor: IVec2::new(9, 8),
                footprint: UVec2::new(2, 3)
            }
        );
        assert!(grid.is_region_free(IVec2::new(8, 7), UVec2::new(2, 3), None));
    }

    #[test]
    fn test_negative_anchor_is_out_of_bounds() {
        let grid = GridStore::new(10, 10);
        assert!(!grid.is_region_free(IVec2::new(-1, 0), UVec2::new(1, 1), None));
        assert!(!grid.is_region_free(IVec2::new(0, -1), UVec2::new(1, 1), None));
    }

    #[test]
    fn test_conflict_reports_first_overlapping_cell() {
        let mut grid = GridStore::new(5, 5);
        grid.occupy(IVec2::new(0, 0), UVec2::new(2, 2), A);
        let err = grid
            .check_region(IVec2::new(1, 1), UVec2::new(2, 2), None)
            .expect_err("overlap at (1,1)");
        assert_eq!(
            err,
            FloorError::CellConflict {
                cell: IVec2::new(1, 1),
                occupant: A
            }
        );
    }

    #[test]
    fn test_excluded_occupant_counts_as_free() {
        let mut grid = GridStore::new(5, 5);
        grid.occupy(IVec2::new(0, 0), UVec2::new(2, 2), A);
        assert!(grid.is_region_free(IVec2::new(1, 1), UVec2::new(2, 2), Some(A)));
        assert!(!grid.is_region_free(IVec2::new(1, 1), UVec2::new(2, 2), Some(B)));
    }

    #[test]
    fn test_clear_only_touches_that_object() {
        let mut grid = GridStore::new(5, 5);
        grid.occupy(IVec2::new(0, 0), UVec2::new(2, 2), A);
        grid.occupy(IVec2::new(2, 2), UVec2::new(2, 2), B);
        assert_eq!(grid.clear(A), 4);
        assert!(grid.cells_of(A).is_empty());
        assert_eq!(grid.cells_of(B).len(), 4);
        assert_eq!(grid.clear(A), 0);
    }

    #[test]
    fn test_resize_grow_copies_everything() {
        let mut grid = GridStore::new(4, 4);
        grid.occupy(IVec2::new(3, 3), UVec2::new(1, 1), A);
        let grown = grid.resize(6, 5);
        assert_eq!(grown.width(), 6);
        assert_eq!(grown.height(), 5);
        assert_eq!(grown.get(IVec2::new(3, 3)), Some(A));
        assert_eq!(grown.occupied_count(), 1);
    }

    #[test]
    fn test_resize_shrink_drops_outside_overlap() {
        let mut grid = GridStore::new(10, 10);
        grid.occupy(IVec2::new(0, 0), UVec2::new(1, 1), A);
        grid.occupy(IVec2::new(9, 9), UVec2::new(1, 1), B);
        let shrunk = grid.resize(8, 8);
        assert_eq!(shrunk.get(IVec2::new(0, 0)), Some(A));
        assert!(!shrunk.in_bounds(IVec2::new(9, 9)));
        assert!(shrunk.cells_of(B).is_empty());
    }

    #[test]
    fn test_resize_mixed_axes() {
        let mut grid = GridStore::new(3, 6);
        grid.occupy(IVec2::new(2, 5), UVec2::new(1, 1), A);
        grid.occupy(IVec2::new(1, 1), UVec2::new(1, 1), B);
        let resized = grid.resize(7, 2);
        assert_eq!(resized.get(IVec2::new(1, 1)), Some(B));
        assert!(resized.cells_of(A).is_empty());
        assert_eq!(resized.occupied_count(), 1);
    }

    #[test]
    fn test_world_cell_roundtrip() {
        for cell in [IVec2::new(0, 0), IVec2::new(3, 7), IVec2::new(9, 1)] {
            let world = GridStore::cell_to_world(cell);
            assert_eq!(GridStore::world_to_cell(world.x, world.z), cell);
        }
        assert_eq!(GridStore::world_to_cell(2.4, 2.6), IVec2::new(2, 3));
        assert_eq!(GridStore::world_to_cell(-0.6, 0.2), IVec2::new(-1, 0));
    }
}
