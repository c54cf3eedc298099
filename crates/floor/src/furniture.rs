use std::fmt;

use bevy::prelude::*;

use crate::grid_store::footprint_cells;

/// Unique id of a placed piece. Ids are never reused within a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FurnitureId(pub u32);

impl fmt::Display for FurnitureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    Chair,
    Armchair,
    Nightstand,
    Desk,
    Wardrobe,
    Table,
    Sofa,
    Bookshelf,
    Bed,
}

impl FurnitureKind {
    /// Catalog order shown in the UI.
    pub const ALL: [FurnitureKind; 9] = [
        FurnitureKind::Chair,
        FurnitureKind::Armchair,
        FurnitureKind::Nightstand,
        FurnitureKind::Desk,
        FurnitureKind::Wardrobe,
        FurnitureKind::Table,
        FurnitureKind::Sofa,
        FurnitureKind::Bookshelf,
        FurnitureKind::Bed,
    ];

    /// Returns (width, height) footprint in grid cells, unrotated.
    pub fn footprint(self) -> UVec2 {
        match self {
            FurnitureKind::Chair | FurnitureKind::Armchair | FurnitureKind::Nightstand => {
                UVec2::new(1, 1)
            }
            FurnitureKind::Desk | FurnitureKind::Wardrobe => UVec2::new(2, 1),
            FurnitureKind::Table => UVec2::new(2, 2),
            FurnitureKind::Sofa | FurnitureKind::Bookshelf => UVec2::new(3, 1),
            FurnitureKind::Bed => UVec2::new(2, 3),
        }
    }

    /// Block height in world units, used by the renderer.
    pub fn height(self) -> f32 {
        match self {
            FurnitureKind::Nightstand | FurnitureKind::Bed => 0.5,
            FurnitureKind::Chair | FurnitureKind::Armchair | FurnitureKind::Sofa => 0.8,
            FurnitureKind::Desk | FurnitureKind::Table => 0.75,
            FurnitureKind::Wardrobe | FurnitureKind::Bookshelf => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FurnitureKind::Chair => "Chair",
            FurnitureKind::Armchair => "Armchair",
            FurnitureKind::Nightstand => "Nightstand",
            FurnitureKind::Desk => "Desk",
            FurnitureKind::Wardrobe => "Wardrobe",
            FurnitureKind::Table => "Table",
            FurnitureKind::Sofa => "Sofa",
            FurnitureKind::Bookshelf => "Bookshelf",
            FurnitureKind::Bed => "Bed",
        }
    }

    pub fn template(self) -> FurnitureTemplate {
        FurnitureTemplate::new(self)
    }
}

/// What a new piece is instantiated from: a kind plus its footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureTemplate {
    pub kind: FurnitureKind,
    pub footprint: UVec2,
}

impl FurnitureTemplate {
    pub fn new(kind: FurnitureKind) -> Self {
        Self {
            kind,
            footprint: kind.footprint(),
        }
    }

    /// Override the catalog footprint. Each side is clamped to at least one cell.
    pub fn with_footprint(mut self, footprint: UVec2) -> Self {
        self.footprint = footprint.max(UVec2::ONE);
        self
    }
}

impl From<FurnitureKind> for FurnitureTemplate {
    fn from(kind: FurnitureKind) -> Self {
        Self::new(kind)
    }
}

/// Quarter-turn orientation about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// The orientation one quarter turn further, wrapping at 360 degrees.
    pub fn next(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    pub fn radians(self) -> f32 {
        (self.degrees() as f32).to_radians()
    }
}

/// Anchor, orientation and footprint of a piece: what a snapshot saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub anchor: IVec2,
    pub orientation: Orientation,
    pub footprint: UVec2,
}

/// One piece of furniture on the floor.
///
/// While the piece is selected, `anchor` is the tentative position shown to
/// the user and none of its cells are written into the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    pub id: FurnitureId,
    pub kind: FurnitureKind,
    pub anchor: IVec2,
    pub footprint: UVec2,
    pub orientation: Orientation,
    /// Placement saved when the current selection started.
    pub snapshot: Option<Placement>,
    /// Whether the piece has ever been written into the grid.
    pub committed: bool,
}

impl Furniture {
    pub fn placement(&self) -> Placement {
        Placement {
            anchor: self.anchor,
            orientation: self.orientation,
            footprint: self.footprint,
        }
    }

    pub fn save_snapshot(&mut self) {
        self.snapshot = Some(self.placement());
    }

    pub fn restore(&mut self, placement: Placement) {
        self.anchor = placement.anchor;
        self.orientation = placement.orientation;
        self.footprint = placement.footprint;
    }

    /// Quarter turn: swap the footprint sides and advance the orientation.
    /// The anchor (minimum corner) stays where it is.
    pub fn rotate(&mut self) {
        self.footprint = UVec2::new(self.footprint.y, self.footprint.x);
        self.orientation = self.orientation.next();
    }

    /// Cells covered at the current anchor.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> {
        footprint_cells(self.anchor, self.footprint)
    }
}

/// Builds new pieces with fresh ids.
#[derive(Debug, Default)]
pub struct FurnitureFactory {
    next_id: u32,
}

impl FurnitureFactory {
    pub fn build(&mut self, template: FurnitureTemplate, anchor: IVec2) -> Furniture {
        let id = FurnitureId(self.next_id);
        self.next_id += 1;
        Furniture {
            id,
            kind: template.kind,
            anchor,
            footprint: template.footprint.max(UVec2::ONE),
            orientation: Orientation::Deg0,
            snapshot: None,
            committed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_wraps_after_four_turns() {
        let mut o = Orientation::Deg0;
        for _ in 0..4 {
            o = o.next();
        }
        assert_eq!(o, Orientation::Deg0);
        assert_eq!(Orientation::Deg270.degrees(), 270);
        assert!((Orientation::Deg180.radians() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_swaps_footprint_and_keeps_anchor() {
        let mut factory = FurnitureFactory::default();
        let mut bed = factory.build(FurnitureKind::Bed.template(), IVec2::new(3, 4));
        bed.rotate();
        assert_eq!(bed.footprint, UVec2::new(3, 2));
        assert_eq!(bed.orientation, Orientation::Deg90);
        assert_eq!(bed.anchor, IVec2::new(3, 4));
        bed.rotate();
        assert_eq!(bed.footprint, UVec2::new(2, 3));
        assert_eq!(bed.orientation, Orientation::Deg180);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut factory = FurnitureFactory::default();
        let mut sofa = factory.build(FurnitureKind::Sofa.template(), IVec2::new(1, 1));
        sofa.save_snapshot();
        sofa.anchor = IVec2::new(5, 5);
        sofa.rotate();
        let saved = sofa.snapshot.expect("snapshot saved");
        sofa.restore(saved);
        assert_eq!(sofa.anchor, IVec2::new(1, 1));
        assert_eq!(sofa.footprint, UVec2::new(3, 1));
        assert_eq!(sofa.orientation, Orientation::Deg0);
    }

    #[test]
    fn test_factory_ids_are_unique() {
        let mut factory = FurnitureFactory::default();
        let a = factory.build(FurnitureKind::Chair.template(), IVec2::ZERO);
        let b = factory.build(FurnitureKind::Chair.template(), IVec2::ZERO);
        assert_ne!(a.id, b.id);
        assert!(!a.committed);
        assert!(a.snapshot.is_none());
    }

    #[test]
    fn test_template_footprint_clamped_positive() {
        let t = FurnitureKind::Desk.template().with_footprint(UVec2::new(0, 4));
        assert_eq!(t.footprint, UVec2::new(1, 4));
    }

    #[test]
    fn test_cells_cover_footprint() {
        let mut factory = FurnitureFactory::default();
        let table = factory.build(FurnitureKind::Table.template(), IVec2::new(2, 2));
        let cells: Vec<IVec2> = table.cells().collect();
        assert_eq!(
            cells,
            vec![
                IVec2::new(2, 2),
                IVec2::new(3, 2),
                IVec2::new(2, 3),
                IVec2::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_catalog_footprints_positive() {
        for kind in FurnitureKind::ALL {
            let fp = kind.footprint();
            assert!(fp.x > 0 && fp.y > 0, "{} has an empty footprint", kind.label());
            assert!(kind.height() > 0.0);
        }
    }
}
