use bevy::prelude::*;

use crate::config::{CELL_SIZE, ROOM_SIDE_LIMIT};
use crate::error::FloorError;
use crate::floor_state::Floor;
use crate::furniture::FurnitureId;
use crate::grid_store::footprint_cells;
use crate::signals::FloorSignal;

/// Placement of the floor plane. The plane is anchored at the origin edge:
/// cell (0, 0) keeps its world position whatever the room size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorTransform {
    pub center: Vec3,
    pub scale: Vec3,
}

impl FloorTransform {
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            center: Vec3::new(
                (width as f32 - 1.0) * 0.5 * CELL_SIZE,
                0.0,
                (height as f32 - 1.0) * 0.5 * CELL_SIZE,
            ),
            scale: Vec3::new(width as f32 * CELL_SIZE, 1.0, height as f32 * CELL_SIZE),
        }
    }

    /// Transform for a unit plane mesh.
    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.center).with_scale(self.scale)
    }
}

/// Outcome of a successful resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeReport {
    pub width: usize,
    pub height: usize,
    /// Pieces that no longer fit and were removed, in id order.
    pub evicted: Vec<FurnitureId>,
}

impl Floor {
    /// Change the room to `width` x `height` cells.
    ///
    /// Occupancy in the overlap with the old room is kept. Any piece with a
    /// cell outside the new bounds is removed, including the selected piece
    /// when its tentative footprint no longer fits. Sides above
    /// [`ROOM_SIDE_LIMIT`] are refused. On error nothing changes.
    pub fn resize_room(&mut self, width: i32, height: i32) -> Result<ResizeReport, FloorError> {
        if width <= 0 || height <= 0 {
            return Err(FloorError::InvalidDimension { width, height });
        }
        if width as usize > ROOM_SIDE_LIMIT || height as usize > ROOM_SIDE_LIMIT {
            return Err(FloorError::ResizeUnavailable { width, height });
        }
        let (new_w, new_h) = (width as usize, height as usize);

        let resized = self.grid.resize(new_w, new_h);
        let evicted: Vec<FurnitureId> = self
            .furniture
            .values()
            .filter(|piece| {
                footprint_cells(piece.anchor, piece.footprint).any(|cell| !resized.in_bounds(cell))
            })
            .map(|piece| piece.id)
            .collect();

        self.grid = resized;
        for id in &evicted {
            self.destroy(*id);
        }
        self.transform = FloorTransform::for_grid(new_w, new_h);
        self.emit(FloorSignal::RoomResized {
            width: new_w,
            height: new_h,
        });

        if evicted.is_empty() {
            info!("Room resized to {}x{}", new_w, new_h);
        } else {
            info!(
                "Room resized to {}x{}, removed {} piece(s) that no longer fit",
                new_w,
                new_h,
                evicted.len()
            );
        }
        Ok(ResizeReport {
            width: new_w,
            height: new_h,
            evicted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_state::SelectionState;
    use crate::furniture::FurnitureKind;

    #[test]
    fn test_transform_keeps_origin_cell_fixed() {
        for (w, h) in [(1, 1), (10, 10), (7, 3)] {
            let t = FloorTransform::for_grid(w, h);
            let min_edge = t.center - t.scale * 0.5;
            assert!((min_edge.x + 0.5 * CELL_SIZE).abs() < 1e-5);
            assert!((min_edge.z + 0.5 * CELL_SIZE).abs() < 1e-5);
        }
        let t = FloorTransform::for_grid(10, 10);
        assert_eq!(t.center, Vec3::new(4.5, 0.0, 4.5));
        assert_eq!(t.scale, Vec3::new(10.0, 1.0, 10.0));
    }

    #[test]
    fn test_resize_rejects_non_positive() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        assert_eq!(
            floor.resize_room(0, 5),
            Err(FloorError::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            floor.resize_room(4, -2),
            Err(FloorError::InvalidDimension {
                width: 4,
                height: -2
            })
        );
        assert_eq!(floor.room_size(), UVec2::new(10, 10));
        assert!(floor.pending_signals().is_empty());
    }

    #[test]
    fn test_resize_refuses_sides_above_limit() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        floor
            .place(FurnitureKind::Table, IVec2::new(8, 8))
            .expect("table");
        for (w, h) in [(i32::MAX, i32::MAX), (ROOM_SIDE_LIMIT as i32 + 1, 5)] {
            assert_eq!(
                floor.resize_room(w, h),
                Err(FloorError::ResizeUnavailable {
                    width: w,
                    height: h
                })
            );
        }
        assert_eq!(floor.room_size(), UVec2::new(10, 10));
        assert_eq!(floor.furniture_count(), 1);

        let report = floor
            .resize_room(ROOM_SIDE_LIMIT as i32, 3)
            .expect("limit itself is allowed");
        assert_eq!(report.width, ROOM_SIDE_LIMIT);
    }

    #[test]
    fn test_grow_keeps_everything() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let bed = floor
            .place(FurnitureKind::Bed, IVec2::new(8, 7))
            .expect("bed");
        let report = floor.resize_room(15, 12).expect("grow");
        assert!(report.evicted.is_empty());
        assert_eq!(floor.grid().cells_of(bed).len(), 6);
        assert_eq!(floor.room_size(), UVec2::new(15, 12));
        assert_eq!(floor.transform(), &FloorTransform::for_grid(15, 12));
    }

    #[test]
    fn test_shrink_evicts_pieces_outside() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let inside = floor
            .place(FurnitureKind::Table, IVec2::new(0, 0))
            .expect("inside");
        let outside = floor
            .place(FurnitureKind::Table, IVec2::new(8, 8))
            .expect("corner");
        floor.drain_signals();

        let report = floor.resize_room(8, 8).expect("shrink");
        assert_eq!(report.evicted, vec![outside]);
        assert!(floor.furniture(outside).is_none());
        assert!(floor.grid().cells_of(outside).is_empty());
        assert_eq!(floor.grid().cells_of(inside).len(), 4);
        assert_eq!(
            floor.drain_signals(),
            vec![
                FloorSignal::Destroyed(outside),
                FloorSignal::RoomResized {
                    width: 8,
                    height: 8
                }
            ]
        );
    }

    #[test]
    fn test_shrink_evicts_straddling_piece() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let sofa = floor
            .place(FurnitureKind::Sofa, IVec2::new(5, 2))
            .expect("sofa over x=5..7");
        let report = floor.resize_room(7, 10).expect("shrink");
        assert_eq!(report.evicted, vec![sofa]);
        assert_eq!(floor.grid().occupied_count(), 0);
    }

    #[test]
    fn test_shrink_evicts_selected_piece_that_no_longer_fits() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let chair = floor
            .place(FurnitureKind::Chair, IVec2::new(1, 1))
            .expect("chair");
        floor.select(chair).expect("select");
        floor.preview_move(IVec2::new(9, 9)).expect("preview");

        let report = floor.resize_room(5, 5).expect("shrink");
        assert_eq!(report.evicted, vec![chair]);
        assert_eq!(floor.selection(), SelectionState::Idle);
        assert!(floor.camera_movement_allowed());
    }

    #[test]
    fn test_selected_piece_that_still_fits_stays_selected() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let chair = floor.create(FurnitureKind::Chair);
        floor.resize_room(3, 3).expect("shrink");
        assert_eq!(floor.selected(), Some(chair));
        assert!(floor.grid().cells_of(chair).is_empty());
        assert_eq!(floor.commit_selection(), Ok(chair));
    }
}
