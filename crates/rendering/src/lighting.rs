use bevy::prelude::*;

/// Fixed downward tilt of the sun. Only its heading is adjustable.
const SUN_PITCH_DEGREES: f32 = -60.0;

/// User-adjustable sun: tint hue, tint strength and heading.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LightSettings {
    /// Hue of the tint, 0..=1 around the color wheel.
    pub hue: f32,
    /// Strength of the tint, 0 is white light.
    pub saturation: f32,
    /// Compass heading of the sun in degrees.
    pub yaw_degrees: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            hue: 0.6,
            saturation: 0.2,
            yaw_degrees: 30.0,
        }
    }
}

impl LightSettings {
    /// Full-value HSV color of the tint.
    pub fn color(&self) -> Color {
        Color::hsv(
            self.hue.clamp(0.0, 1.0) * 360.0,
            self.saturation.clamp(0.0, 1.0),
            1.0,
        )
    }

    /// Sun orientation: heading around Y, then the fixed tilt.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_degrees.to_radians(),
            SUN_PITCH_DEGREES.to_radians(),
            0.0,
        )
    }
}

/// Marker on the directional light driven by [`LightSettings`].
#[derive(Component)]
pub struct SunLight;

pub fn setup_lighting(mut commands: Commands, settings: Res<LightSettings>) {
    // Soft fill so block sides facing away from the sun stay readable
    commands.insert_resource(AmbientLight {
        color: Color::srgb(1.0, 0.97, 0.92),
        brightness: 400.0,
    });

    commands.spawn((
        SunLight,
        DirectionalLight {
            color: settings.color(),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(settings.rotation()),
    ));
}

pub fn apply_light_settings(
    settings: Res<LightSettings>,
    mut lights: Query<(&mut DirectionalLight, &mut Transform), With<SunLight>>,
) {
    if !settings.is_changed() {
        return;
    }
    for (mut light, mut transform) in &mut lights {
        light.color = settings.color();
        transform.rotation = settings.rotation();
    }
}
