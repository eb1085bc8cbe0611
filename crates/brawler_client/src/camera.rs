use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use brawler_simulation::{CameraShaker, Player};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (zoom_controls, follow_player).chain());
    }
}

/// Side view that tracks the player along the walk axis
#[derive(Component)]
pub struct FollowCamera {
    /// Camera position relative to the focus point
    pub offset: Vec3,
    pub focus: Vec3,
    /// Fraction of the remaining distance covered per second
    pub smoothing: f32,
    pub zoom_speed: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            // Behind the -Z side so that screen right is world -X
            offset: Vec3::new(0.0, 4.0, -12.0),
            focus: Vec3::Y,
            smoothing: 4.0,
            zoom_speed: 1.0,
        }
    }
}

impl FollowCamera {
    pub fn bundle() -> impl Bundle {
        let camera = FollowCamera::default();
        let transform =
            Transform::from_translation(camera.focus + camera.offset).looking_at(camera.focus, Vec3::Y);
        (
            Camera3d::default(),
            transform,
            SpatialListener::default(),
            CameraShaker::default(),
            camera,
        )
    }
}

/// Mouse wheel: move closer / further along the offset
fn zoom_controls(mut query: Query<&mut FollowCamera>, mut mouse_wheel: EventReader<MouseWheel>) {
    let Ok(mut camera) = query.single_mut() else {
        mouse_wheel.clear();
        return;
    };

    for wheel in mouse_wheel.read() {
        let distance = (camera.offset.length() - wheel.y * camera.zoom_speed).clamp(5.0, 30.0);
        camera.offset = camera.offset.normalize_or_zero() * distance;
    }
}

/// Eases the focus toward the player and adds the shake offset on top
fn follow_player(
    time: Res<Time>,
    player: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&mut FollowCamera, &CameraShaker, &mut Transform)>,
) {
    let target = player.iter().next().map(|t| t.translation + Vec3::Y);

    for (mut camera, shaker, mut transform) in cameras.iter_mut() {
        if let Some(target) = target {
            let blend = (time.delta_secs() * camera.smoothing).min(1.0);
            camera.focus = camera.focus.lerp(target, blend);
        }

        let focus = camera.focus;
        *transform = Transform::from_translation(focus + camera.offset + shaker.offset)
            .looking_at(focus + shaker.offset, Vec3::Y);
    }
}
