use bevy::prelude::*;

use floor::config::CELL_SIZE;
use floor::furniture::Furniture;
use floor::signals::{FurnitureDestroyed, FurnitureSpawned};
use floor::{Floor, FurnitureId, FurnitureKind, GridStore};

/// Gap left between neighbouring blocks so adjacent pieces read as separate.
const BLOCK_INSET: f32 = 0.06;

/// Links a block mesh to the piece it shows.
#[derive(Component, Debug)]
pub struct FurnitureMesh {
    pub id: FurnitureId,
}

/// Shared unit cube, scaled per piece.
#[derive(Resource)]
pub struct FurnitureAssets {
    pub cube: Handle<Mesh>,
}

pub fn kind_color(kind: FurnitureKind) -> Color {
    match kind {
        FurnitureKind::Chair => Color::srgb(0.55, 0.35, 0.2),
        FurnitureKind::Armchair => Color::srgb(0.45, 0.25, 0.35),
        FurnitureKind::Nightstand => Color::srgb(0.6, 0.45, 0.3),
        FurnitureKind::Desk => Color::srgb(0.4, 0.3, 0.2),
        FurnitureKind::Wardrobe => Color::srgb(0.35, 0.25, 0.15),
        FurnitureKind::Table => Color::srgb(0.65, 0.5, 0.3),
        FurnitureKind::Sofa => Color::srgb(0.25, 0.4, 0.55),
        FurnitureKind::Bookshelf => Color::srgb(0.5, 0.35, 0.25),
        FurnitureKind::Bed => Color::srgb(0.75, 0.75, 0.8),
    }
}

/// Transform of the block for a piece at its current (possibly tentative)
/// anchor. The footprint is already swapped by rotation, so the block only
/// needs scaling.
pub fn furniture_transform(piece: &Furniture) -> Transform {
    let height = piece.kind.height();
    let fp = piece.footprint.as_vec2();
    let center = GridStore::cell_to_world(piece.anchor)
        + Vec3::new((fp.x - 1.0) * 0.5 * CELL_SIZE, height * 0.5, (fp.y - 1.0) * 0.5 * CELL_SIZE);
    Transform::from_translation(center).with_scale(Vec3::new(
        fp.x * CELL_SIZE - BLOCK_INSET,
        height,
        fp.y * CELL_SIZE - BLOCK_INSET,
    ))
}

pub fn setup_furniture_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(FurnitureAssets {
        cube: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
    });
}

pub fn spawn_furniture_meshes(
    mut commands: Commands,
    mut spawned: EventReader<FurnitureSpawned>,
    floor: Res<Floor>,
    assets: Res<FurnitureAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for FurnitureSpawned(id) in spawned.read() {
        let Some(piece) = floor.furniture(*id) else {
            continue;
        };
        commands.spawn((
            FurnitureMesh { id: *id },
            Mesh3d(assets.cube.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: kind_color(piece.kind),
                perceptual_roughness: 0.7,
                ..default()
            })),
            furniture_transform(piece),
        ));
    }
}

pub fn despawn_furniture_meshes(
    mut commands: Commands,
    mut destroyed: EventReader<FurnitureDestroyed>,
    meshes: Query<(Entity, &FurnitureMesh)>,
) {
    for FurnitureDestroyed(id) in destroyed.read() {
        for (entity, mesh) in &meshes {
            if mesh.id == *id {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}

/// Follow anchor and footprint changes (drags, rotations, commits).
pub fn sync_furniture_transforms(
    floor: Res<Floor>,
    mut meshes: Query<(&FurnitureMesh, &mut Transform)>,
) {
    if !floor.is_changed() {
        return;
    }
    for (mesh, mut transform) in &mut meshes {
        let Some(piece) = floor.furniture(mesh.id) else {
            continue;
        };
        let target = furniture_transform(piece);
        if *transform != target {
            *transform = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_covers_footprint_cells() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let id = floor
            .place(FurnitureKind::Table, IVec2::new(2, 3))
            .expect("table");
        let transform = furniture_transform(floor.furniture(id).expect("table"));
        assert_eq!(transform.translation.x, 2.5);
        assert_eq!(transform.translation.z, 3.5);
        assert!((transform.scale.x - (2.0 - BLOCK_INSET)).abs() < 1e-5);
        assert!((transform.translation.y - FurnitureKind::Table.height() * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_block_swaps_extent() {
        let mut floor = Floor::with_size(10, 10).expect("floor");
        let id = floor
            .place(FurnitureKind::Sofa, IVec2::new(1, 1))
            .expect("sofa");
        floor.select(id).expect("select");
        floor.rotate_selected().expect("rotate");
        let transform = furniture_transform(floor.furniture(id).expect("sofa"));
        assert!(transform.scale.z > transform.scale.x);
        assert_eq!(transform.translation.z, 2.0);
    }
}
