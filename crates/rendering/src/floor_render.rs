use bevy::prelude::*;

use floor::config::CELL_SIZE;
use floor::signals::RoomResized;
use floor::Floor;

const FLOOR_COLOR: Color = Color::srgb(0.82, 0.76, 0.66);
const GRID_LINE_COLOR: Color = Color::srgba(0.25, 0.22, 0.18, 0.6);
/// Lift above the plane so the lines don't z-fight with it.
const GRID_LINE_LIFT: f32 = 0.005;

/// Marker on the floor plane entity.
#[derive(Component)]
pub struct FloorPlane;

/// End points of the cell boundary lines of a `width` x `height` room. Cell
/// (x, y) is centered on world (x, 0, y), so boundaries sit at half cells.
pub fn grid_line_segments(width: usize, height: usize) -> Vec<(Vec3, Vec3)> {
    let min_x = -0.5 * CELL_SIZE;
    let min_z = -0.5 * CELL_SIZE;
    let max_x = min_x + width as f32 * CELL_SIZE;
    let max_z = min_z + height as f32 * CELL_SIZE;

    let mut segments = Vec::with_capacity(width + height + 2);
    for i in 0..=width {
        let x = min_x + i as f32 * CELL_SIZE;
        segments.push((
            Vec3::new(x, GRID_LINE_LIFT, min_z),
            Vec3::new(x, GRID_LINE_LIFT, max_z),
        ));
    }
    for j in 0..=height {
        let z = min_z + j as f32 * CELL_SIZE;
        segments.push((
            Vec3::new(min_x, GRID_LINE_LIFT, z),
            Vec3::new(max_x, GRID_LINE_LIFT, z),
        ));
    }
    segments
}

pub fn spawn_floor_plane(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    floor: Res<Floor>,
) {
    commands.spawn((
        FloorPlane,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: FLOOR_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        floor.transform().to_transform(),
    ));
}

/// Rescale the plane after a room resize.
pub fn sync_floor_plane(
    mut resized: EventReader<RoomResized>,
    floor: Res<Floor>,
    mut planes: Query<&mut Transform, With<FloorPlane>>,
) {
    if resized.read().last().is_none() {
        return;
    }
    for mut transform in &mut planes {
        *transform = floor.transform().to_transform();
    }
}

pub fn draw_grid_lines(mut gizmos: Gizmos, floor: Res<Floor>) {
    let size = floor.room_size();
    for (start, end) in grid_line_segments(size.x as usize, size.y as usize) {
        gizmos.line(start, end, GRID_LINE_COLOR);
    }
}
