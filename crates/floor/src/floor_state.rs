use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::{FloorSettings, ROOM_SIDE_LIMIT};
use crate::error::FloorError;
use crate::furniture::{Furniture, FurnitureFactory, FurnitureId, FurnitureTemplate};
use crate::grid_store::GridStore;
use crate::pointer::HoldToSelect;
use crate::room_resize::FloorTransform;
use crate::signals::{FloorSignal, HighlightMode};

/// At most one piece is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(FurnitureId),
}

/// The floor coordinator: sole owner of the occupancy grid, the placed
/// furniture and the selection. Every mutation goes through its methods.
///
/// Selection and movement live in `selection.rs`, per-frame pointer handling
/// in `pointer.rs` and room resizing in `room_resize.rs`.
#[derive(Resource, Debug)]
pub struct Floor {
    pub(crate) grid: GridStore,
    pub(crate) furniture: BTreeMap<FurnitureId, Furniture>,
    pub(crate) selection: SelectionState,
    pub(crate) factory: FurnitureFactory,
    pub(crate) transform: FloorTransform,
    pub(crate) hold: HoldToSelect,
    pub(crate) spawn_anchor: IVec2,
    pub(crate) camera_movement_allowed: bool,
    signals: Vec<FloorSignal>,
}

impl Default for Floor {
    fn default() -> Self {
        let settings = FloorSettings::default();
        Self::build(&settings, settings.grid_width, settings.grid_height)
    }
}

impl Floor {
    pub fn new(settings: &FloorSettings) -> Result<Self, FloorError> {
        let (width, height) = (settings.grid_width, settings.grid_height);
        if width == 0 || height == 0 || width > ROOM_SIDE_LIMIT || height > ROOM_SIDE_LIMIT {
            return Err(FloorError::InvalidDimension {
                width: i32::try_from(width).unwrap_or(i32::MAX),
                height: i32::try_from(height).unwrap_or(i32::MAX),
            });
        }
        Ok(Self::build(
            settings,
            settings.grid_width,
            settings.grid_height,
        ))
    }

    /// A floor of the given size with every other setting at its default.
    pub fn with_size(width: usize, height: usize) -> Result<Self, FloorError> {
        Self::new(&FloorSettings {
            grid_width: width,
            grid_height: height,
            ..FloorSettings::default()
        })
    }

    fn build(settings: &FloorSettings, width: usize, height: usize) -> Self {
        Self {
            grid: GridStore::new(width, height),
            furniture: BTreeMap::new(),
            selection: SelectionState::Idle,
            factory: FurnitureFactory::default(),
            transform: FloorTransform::for_grid(width, height),
            hold: HoldToSelect::new(settings.select_delay),
            spawn_anchor: settings.spawn_anchor(),
            camera_movement_allowed: true,
            signals: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn room_size(&self) -> UVec2 {
        UVec2::new(self.grid.width() as u32, self.grid.height() as u32)
    }

    pub fn transform(&self) -> &FloorTransform {
        &self.transform
    }

    pub fn furniture(&self, id: FurnitureId) -> Option<&Furniture> {
        self.furniture.get(&id)
    }

    /// All pieces, selected one included, in id order.
    pub fn iter_furniture(&self) -> impl Iterator<Item = &Furniture> {
        self.furniture.values()
    }

    pub fn furniture_count(&self) -> usize {
        self.furniture.len()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn selected(&self) -> Option<FurnitureId> {
        match self.selection {
            SelectionState::Idle => None,
            SelectionState::Selected(id) => Some(id),
        }
    }

    pub fn selected_furniture(&self) -> Option<&Furniture> {
        self.selected().and_then(|id| self.furniture.get(&id))
    }

    pub fn is_selecting(&self) -> bool {
        self.selected().is_some()
    }

    /// Whether the tentative position of the selected piece is a valid drop.
    /// `None` while idle.
    pub fn selection_available(&self) -> Option<bool> {
        self.selected_furniture()
            .map(|piece| self.grid.is_region_free(piece.anchor, piece.footprint, None))
    }

    pub fn camera_movement_allowed(&self) -> bool {
        self.camera_movement_allowed
    }

    pub fn pending_signals(&self) -> &[FloorSignal] {
        &self.signals
    }

    pub fn drain_signals(&mut self) -> Vec<FloorSignal> {
        std::mem::take(&mut self.signals)
    }

    // -----------------------------------------------------------------------
    // Direct placement
    // -----------------------------------------------------------------------

    /// Place a new piece straight into the grid without selecting it.
    /// Used for layouts built in code and for tests.
    pub fn place(
        &mut self,
        template: impl Into<FurnitureTemplate>,
        anchor: IVec2,
    ) -> Result<FurnitureId, FloorError> {
        let template = template.into();
        self.grid.check_region(anchor, template.footprint, None)?;

        let mut piece = self.factory.build(template, anchor);
        piece.committed = true;
        let id = piece.id;
        self.grid.occupy(piece.anchor, piece.footprint, id);
        self.furniture.insert(id, piece);
        self.emit(FloorSignal::Spawned(id));
        debug!(
            "Placed {:?} {} at ({}, {})",
            template.kind, id, anchor.x, anchor.y
        );
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Internal helpers shared by selection and resize
    // -----------------------------------------------------------------------

    pub(crate) fn emit(&mut self, signal: FloorSignal) {
        self.signals.push(signal);
    }

    /// Remove a piece for good. Clears its cells and, if it was selected,
    /// the selection.
    pub(crate) fn destroy(&mut self, id: FurnitureId) {
        if self.furniture.remove(&id).is_none() {
            return;
        }
        self.grid.clear(id);
        self.emit(FloorSignal::Destroyed(id));
        if self.selected() == Some(id) {
            self.selection = SelectionState::Idle;
            self.camera_movement_allowed = true;
            self.emit(FloorSignal::ButtonsVisible(false));
        }
    }

    /// Back to idle after a successful commit.
    pub(crate) fn end_selection(&mut self, id: FurnitureId) {
        self.selection = SelectionState::Idle;
        self.camera_movement_allowed = true;
        self.hold.reset();
        self.emit(FloorSignal::Highlight {
            id,
            mode: HighlightMode::Hidden,
        });
        self.emit(FloorSignal::ButtonsVisible(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::FurnitureKind;

    #[test]
    fn test_new_rejects_zero_size() {
        let err = Floor::with_size(0, 5).expect_err("zero width");
        assert_eq!(
            err,
            FloorError::InvalidDimension {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn test_new_rejects_oversized_grid() {
        let err = Floor::with_size(usize::MAX, 4).expect_err("too wide");
        assert_eq!(
            err,
            FloorError::InvalidDimension {
                width: i32::MAX,
                height: 4
            }
        );
        assert!(Floor::with_size(ROOM_SIDE_LIMIT, 1).is_ok());
    }

    #[test]
    fn test_default_floor_is_idle_and_empty() {
        let floor = Floor::default();
        assert_eq!(floor.selection(), SelectionState::Idle);
        assert_eq!(floor.room_size(), UVec2::new(10, 10));
        assert_eq!(floor.furniture_count(), 0);
        assert!(floor.camera_movement_allowed());
        assert_eq!(floor.selection_available(), None);
    }

    /// 5x5 floor: A at (0,0), B refused at (1,1), B accepted at (2,2).
    #[test]
    fn test_place_two_tables_end_to_end() {
        let mut floor = Floor::with_size(5, 5).expect("floor");
        let a = floor
            .place(FurnitureKind::Table, IVec2::new(0, 0))
            .expect("A fits");
        assert_eq!(
            floor.grid().cells_of(a),
            vec![
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 1)
            ]
        );

        let err = floor
            .place(FurnitureKind::Table, IVec2::new(1, 1))
            .expect_err("B overlaps A");
        assert_eq!(
            err,
            FloorError::CellConflict {
                cell: IVec2::new(1, 1),
                occupant: a
            }
        );
        assert_eq!(floor.furniture_count(), 1);

        let b = floor
            .place(FurnitureKind::Table, IVec2::new(2, 2))
            .expect("B fits");
        assert_eq!(
            floor.grid().cells_of(b),
            vec![
                IVec2::new(2, 2),
                IVec2::new(3, 2),
                IVec2::new(2, 3),
                IVec2::new(3, 3)
            ]
        );
        assert_eq!(floor.grid().get(IVec2::new(1, 1)), Some(a));
    }

    #[test]
    fn test_place_out_of_bounds_bed() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let err = floor
            .place(FurnitureKind::Bed, IVec2::new(9, 8))
            .expect_err("2x3 at (9,8) leaves a 10x10 room");
        assert!(matches!(err, FloorError::OutOfBounds { .. }));
        assert_eq!(floor.grid().occupied_count(), 0);
        assert!(floor.pending_signals().is_empty());
    }

    #[test]
    fn test_place_emits_spawned() {
        let mut floor = Floor::default();
        let id = floor
            .place(FurnitureKind::Chair, IVec2::new(3, 3))
            .expect("fits");
        assert_eq!(floor.drain_signals(), vec![FloorSignal::Spawned(id)]);
        assert!(floor.pending_signals().is_empty());
    }
}
