use bevy::input::touch::Touches;
use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use floor::{Floor, FurnitureId, GridStore, PointerFrame, TouchPhase};

use crate::egui_input_guard::egui_wants_pointer;
use crate::furniture_render::furniture_transform;

use super::types::{PointerSample, PointerTracker, MOUSE_POINTER_ID, MOVE_THRESHOLD_PX};

/// Phase of a pointer this frame.
pub fn sample_phase(sample: &PointerSample) -> TouchPhase {
    if sample.began {
        TouchPhase::Began
    } else if sample.delta().length() > MOVE_THRESHOLD_PX {
        TouchPhase::Moved
    } else {
        TouchPhase::Stationary
    }
}

/// Where a ray meets the Y=0 ground plane, if it points down at it.
pub fn ground_hit(ray: Ray3d) -> Option<Vec3> {
    if ray.direction.y.abs() <= 0.001 {
        return None;
    }
    let t = -ray.origin.y / ray.direction.y;
    (t > 0.0).then(|| ray.origin + *ray.direction * t)
}

/// Longest pick ray considered, in world units.
const PICK_RANGE: f32 = 1000.0;

/// Piece whose block the ray hits first. Falls back to the grid occupant
/// under the ground hit for rays that slip through the gaps between blocks.
pub fn pick_furniture(ray: Ray3d, floor: &Floor) -> Option<FurnitureId> {
    let cast = RayCast3d::from_ray(ray, PICK_RANGE);
    let nearest = floor
        .iter_furniture()
        .filter_map(|piece| {
            let block = furniture_transform(piece);
            let bounds = Aabb3d::new(block.translation, block.scale * 0.5);
            cast.aabb_intersection_at(&bounds).map(|t| (t, piece.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id);

    nearest.or_else(|| {
        let hit = ground_hit(ray)?;
        floor.grid().get(GridStore::world_to_cell(hit.x, hit.z))
    })
}

/// System: collect active touches, or the held left mouse button when there
/// are none. Pointers over egui are dropped.
pub fn track_pointers(
    touches: Res<Touches>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut tracker: ResMut<PointerTracker>,
) {
    if egui_wants_pointer(&mut contexts) {
        tracker.update(Vec::new());
        return;
    }

    let mut points: Vec<(u64, Vec2)> = touches.iter().map(|t| (t.id(), t.position())).collect();
    if points.is_empty() && buttons.pressed(MouseButton::Left) {
        if let Some(pos) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
            points.push((MOUSE_POINTER_ID, pos));
        }
    }
    tracker.update(points);
}

/// System: resolve the primary pointer against the floor into a
/// [`PointerFrame`].
pub fn resolve_pointer_frame(
    tracker: Res<PointerTracker>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    floor: Res<Floor>,
    mut frame: ResMut<PointerFrame>,
) {
    let Some(primary) = tracker.primary() else {
        let released = PointerFrame {
            phase: tracker.just_released().then_some(TouchPhase::Ended),
            ..PointerFrame::default()
        };
        if *frame != released {
            *frame = released;
        }
        return;
    };

    let ray = camera_q
        .get_single()
        .ok()
        .and_then(|(camera, transform)| camera.viewport_to_world(transform, primary.position).ok());
    let drag_cell = ray
        .and_then(ground_hit)
        .map(|hit| GridStore::world_to_cell(hit.x, hit.z));

    *frame = PointerFrame {
        touch_count: tracker.count(),
        phase: Some(sample_phase(primary)),
        pick: ray.and_then(|ray| pick_furniture(ray, &floor)),
        drag_cell,
    };
}
