use bevy::audio::Volume;
use bevy::prelude::*;
use brawler_simulation::physics::wall_probe_center;
use brawler_simulation::{
    AudioQueue, BodyCapsule, EffectInstance, EffectKind, Health, LevelCollider,
    MovementController, Player, Projectile, RendererToggle, UnitAnimator,
};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                make_units_visible,
                attach_body_meshes,
                attach_level_meshes,
                attach_effect_meshes,
                attach_projectile_meshes,
                sync_renderer_toggles,
                update_health_bars,
                draw_wall_probes,
                play_queued_sounds,
            )
                .chain(),
        );
    }
}

/// Unit roots and animators carry no mesh but sit in the visibility hierarchy
fn make_units_visible(
    mut commands: Commands,
    roots: Query<Entity, (Added<MovementController>, Without<Visibility>)>,
    animators: Query<Entity, (Added<UnitAnimator>, Without<Visibility>)>,
) {
    for entity in roots.iter().chain(animators.iter()) {
        commands.entity(entity).insert(Visibility::default());
    }
}

/// Capsule mesh for the body renderer under each animator
fn attach_body_meshes(
    mut commands: Commands,
    bodies: Query<(Entity, &ChildOf), Added<RendererToggle>>,
    animators: Query<&UnitAnimator>,
    units: Query<(&BodyCapsule, Has<Player>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, child_of) in bodies.iter() {
        let Ok(animator) = animators.get(child_of.0) else {
            continue;
        };
        let Some((capsule, is_player)) = animator.unit.and_then(|unit| units.get(unit).ok()) else {
            continue;
        };

        commands.entity(entity).insert((
            Mesh3d(meshes.add(Capsule3d::new(capsule.radius, capsule.half_segment() * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: unit_color(is_player),
                ..default()
            })),
            Transform::from_translation(capsule.center),
        ));
    }
}

fn attach_level_meshes(
    mut commands: Commands,
    level: Query<(Entity, &LevelCollider), Added<LevelCollider>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, collider) in level.iter() {
        let size = collider.half_extents * 2.0;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        ));
    }
}

fn attach_effect_meshes(
    mut commands: Commands,
    effects: Query<(Entity, &EffectInstance), Added<EffectInstance>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, effect) in effects.iter() {
        let (radius, color) = match effect.kind {
            EffectKind::Hit => (0.25, Color::srgb(1.0, 0.9, 0.2)),
            EffectKind::Defend => (0.3, Color::srgb(0.3, 0.6, 1.0)),
            EffectKind::DustLand | EffectKind::DustJump => (0.2, Color::srgb(0.7, 0.65, 0.55)),
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            })),
        ));
    }
}

fn attach_projectile_meshes(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile), Added<Projectile>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, projectile) in projectiles.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(projectile.radius * 4.0, projectile.radius, projectile.radius))),
            MeshMaterial3d(materials.add(Color::srgb(0.8, 0.8, 0.85))),
        ));
    }
}

/// Mirror the simulation renderer flag onto Bevy visibility
fn sync_renderer_toggles(
    mut toggles: Query<(&RendererToggle, &mut Visibility), Changed<RendererToggle>>,
) {
    for (toggle, mut visibility) in toggles.iter_mut() {
        *visibility = if toggle.enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Simple colored bar above each living unit
fn update_health_bars(units: Query<(&Health, &Transform, &BodyCapsule)>, mut gizmos: Gizmos) {
    for (health, transform, capsule) in units.iter() {
        let health_percent = health.current as f32 / health.max.max(1) as f32;
        if health_percent <= 0.0 {
            continue;
        }

        let bar_width = 1.0;
        let bar_height = 0.1;
        let world_pos = transform.translation + Vec3::Y * (capsule.height + 0.3);

        gizmos.rect(
            bevy::math::Isometry3d::new(world_pos, Quat::IDENTITY),
            Vec2::new(bar_width, bar_height),
            Color::srgb(0.8, 0.2, 0.2),
        );

        let fg_pos = world_pos - Vec3::X * (bar_width * (1.0 - health_percent) * 0.5);
        gizmos.rect(
            bevy::math::Isometry3d::new(fg_pos, Quat::IDENTITY),
            Vec2::new(bar_width * health_percent, bar_height),
            Color::srgb(0.2, 0.8, 0.2),
        );
    }
}

/// Wall probe sphere, red while it touches a wall
fn draw_wall_probes(
    units: Query<(&MovementController, &Transform, &BodyCapsule)>,
    mut gizmos: Gizmos,
) {
    for (controller, transform, capsule) in units.iter() {
        let center = wall_probe_center(
            transform.translation,
            capsule,
            controller.input_direction,
            controller.settings.look_ahead_distance,
        );
        let color = if controller.wall_ahead {
            Color::srgb(1.0, 0.2, 0.2)
        } else {
            Color::srgb(0.2, 1.0, 0.2)
        };
        gizmos.sphere(Isometry3d::from_translation(center), capsule.radius, color);
    }
}

/// Drains the simulation sound queue into audio players
fn play_queued_sounds(
    mut commands: Commands,
    mut queue: ResMut<AudioQueue>,
    asset_server: Res<AssetServer>,
) {
    for sound in queue.drain() {
        let settings = PlaybackSettings::DESPAWN
            .with_volume(Volume::Linear(sound.clip.volume))
            .with_spatial(sound.position.is_some());
        commands.spawn((
            Name::new(format!("Sfx {}", sound.name)),
            AudioPlayer::new(asset_server.load(sound.clip.path.clone())),
            settings,
            Transform::from_translation(sound.position.unwrap_or_default()),
        ));
    }
}

fn unit_color(is_player: bool) -> Color {
    if is_player {
        Color::srgb(0.2, 0.2, 0.8)
    } else {
        Color::srgb(0.8, 0.2, 0.2)
    }
}
