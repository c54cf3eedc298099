use bevy::prelude::*;

use floor::config::CELL_SIZE;
use floor::signals::{AvailabilityTint, FurnitureDestroyed, HighlightMode, HighlightObject};
use floor::{Floor, FurnitureId, GridStore};

/// Outline color while the tentative position is a valid drop.
const AVAILABLE_COLOR: Color = Color::srgb(1.0, 0.85, 0.1);
/// Outline color while the tentative position is blocked or out of bounds.
const BLOCKED_COLOR: Color = Color::srgb(0.95, 0.15, 0.1);
const OUTLINE_LIFT: f32 = 0.02;

/// Which piece is outlined and in which tint.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutline {
    pub id: Option<FurnitureId>,
    pub available: bool,
}

impl SelectionOutline {
    pub fn color(&self) -> Color {
        if self.available {
            AVAILABLE_COLOR
        } else {
            BLOCKED_COLOR
        }
    }
}

/// Ground rectangle around a footprint, as a closed line strip.
pub fn footprint_outline(anchor: IVec2, footprint: UVec2) -> [Vec3; 5] {
    let origin = GridStore::cell_to_world(anchor);
    let min_x = origin.x - 0.5 * CELL_SIZE;
    let min_z = origin.z - 0.5 * CELL_SIZE;
    let max_x = min_x + footprint.x as f32 * CELL_SIZE;
    let max_z = min_z + footprint.y as f32 * CELL_SIZE;
    [
        Vec3::new(min_x, OUTLINE_LIFT, min_z),
        Vec3::new(max_x, OUTLINE_LIFT, min_z),
        Vec3::new(max_x, OUTLINE_LIFT, max_z),
        Vec3::new(min_x, OUTLINE_LIFT, max_z),
        Vec3::new(min_x, OUTLINE_LIFT, min_z),
    ]
}

/// Track highlight, tint and destruction events.
pub fn update_selection_outline(
    mut highlights: EventReader<HighlightObject>,
    mut tints: EventReader<AvailabilityTint>,
    mut destroyed: EventReader<FurnitureDestroyed>,
    mut outline: ResMut<SelectionOutline>,
) {
    for event in highlights.read() {
        match event.mode {
            HighlightMode::Visible => outline.id = Some(event.id),
            HighlightMode::Hidden if outline.id == Some(event.id) => outline.id = None,
            HighlightMode::Hidden => {}
        }
    }
    for tint in tints.read() {
        if outline.id == Some(tint.id) {
            outline.available = tint.available;
        }
    }
    for FurnitureDestroyed(id) in destroyed.read() {
        if outline.id == Some(*id) {
            outline.id = None;
        }
    }
}

pub fn draw_selection_outline(
    mut gizmos: Gizmos,
    outline: Res<SelectionOutline>,
    floor: Res<Floor>,
) {
    let Some(piece) = outline.id.and_then(|id| floor.furniture(id)) else {
        return;
    };
    gizmos.linestrip(footprint_outline(piece.anchor, piece.footprint), outline.color());
}
