use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use floor::config::CameraSettings;
use floor::{CameraMovement, Floor, PlannerConfig};

use crate::input::PointerTracker;

/// Distance from the focus point along the view direction. Orthographic, so
/// it only has to keep the room in front of the near plane.
const CAMERA_DISTANCE: f32 = 40.0;

/// Orthographic camera looking down at the floor from a fixed angle.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlannerCamera {
    /// Ground point the camera looks at.
    pub focus: Vec3,
    /// Orthographic half-height in world units.
    pub zoom: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl PlannerCamera {
    pub fn from_settings(settings: &CameraSettings, focus: Vec3) -> Self {
        Self {
            focus,
            zoom: clamp_zoom(settings.initial_zoom, settings),
            pitch: settings.pitch_degrees.to_radians(),
            yaw: settings.yaw_degrees.to_radians(),
        }
    }

    /// Camera transform: `CAMERA_DISTANCE` back from the focus along the
    /// pitched and yawed view direction.
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * CAMERA_DISTANCE;
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }
}

pub fn clamp_zoom(zoom: f32, settings: &CameraSettings) -> f32 {
    zoom.clamp(settings.min_zoom, settings.max_zoom)
}

/// New zoom after a two-finger pinch. Fingers moving apart zoom in.
pub fn pinch_zoom(zoom: f32, prev_distance: f32, distance: f32, settings: &CameraSettings) -> f32 {
    let spread = prev_distance - distance;
    clamp_zoom(zoom + spread * settings.pinch_zoom_speed, settings)
}

/// New zoom after `lines` mouse-wheel lines. Scrolling up zooms in.
pub fn wheel_zoom(zoom: f32, lines: f32, settings: &CameraSettings) -> f32 {
    clamp_zoom(zoom * (1.0 - lines * settings.wheel_zoom_speed), settings)
}

/// Ground-plane focus offset for a screen-space drag. The ground follows the
/// finger: dragging right moves the focus left, rotated by the camera yaw.
pub fn pan_offset(screen_delta: Vec2, yaw: f32, zoom: f32, settings: &CameraSettings) -> Vec3 {
    let units_per_pixel = settings.pan_speed * zoom / settings.initial_zoom.max(f32::EPSILON);
    let d = screen_delta * units_per_pixel;
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(
        -d.x * cos_yaw - d.y * sin_yaw,
        0.0,
        d.x * sin_yaw - d.y * cos_yaw,
    )
}

pub fn setup_camera(mut commands: Commands, config: Res<PlannerConfig>, floor: Res<Floor>) {
    let camera = PlannerCamera::from_settings(&config.camera, floor.transform().center);
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: camera.zoom * 2.0,
            },
            ..OrthographicProjection::default_3d()
        }),
        camera.transform(),
    ));
    commands.insert_resource(camera);
}

/// One pointer pans, two pinch-zoom. Ignored while a piece is being dragged.
pub fn camera_pointer_gestures(
    tracker: Res<PointerTracker>,
    movement: Res<CameraMovement>,
    config: Res<PlannerConfig>,
    mut camera: ResMut<PlannerCamera>,
) {
    if !movement.allowed {
        return;
    }
    let settings = &config.camera;
    match tracker.samples() {
        [single] => {
            let delta = single.delta();
            if delta != Vec2::ZERO {
                let offset = pan_offset(delta, camera.yaw, camera.zoom, settings);
                camera.focus += offset;
            }
        }
        [first, second] => {
            let prev = first.previous.distance(second.previous);
            let now = first.position.distance(second.position);
            if prev != now {
                camera.zoom = pinch_zoom(camera.zoom, prev, now, settings);
            }
        }
        _ => {}
    }
}

/// Scroll wheel: zoom.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    movement: Res<CameraMovement>,
    config: Res<PlannerConfig>,
    mut camera: ResMut<PlannerCamera>,
) {
    for evt in scroll_evts.read() {
        if !movement.allowed {
            continue;
        }
        let lines = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        camera.zoom = wheel_zoom(camera.zoom, lines, &config.camera);
    }
}

/// System: apply `PlannerCamera` to the camera entity.
pub fn apply_planner_camera(
    camera: Res<PlannerCamera>,
    mut query: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    if !camera.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    *transform = camera.transform();
    if let Projection::Orthographic(ortho) = &mut *projection {
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: camera.zoom * 2.0,
        };
    }
}
